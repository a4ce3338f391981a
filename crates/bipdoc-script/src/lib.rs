//! Scanner for annotated bipscript examples.
//!
//! This crate splits an example script into prose, audio and code segments,
//! extracts the page title and rebuilds the code-only "complete script" view.

pub mod parser;
pub mod script;
pub mod segment;
pub mod title;

pub use parser::{parse_script, ParseError, ParsedScript};
pub use script::CompleteScript;
pub use segment::{segment, Segment};
pub use title::extract_title;
