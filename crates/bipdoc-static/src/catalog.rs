//! Catalog files listing the examples and demo applications.
//!
//! A catalog is a small XML document whose root element holds one child per
//! entry:
//!
//! ```xml
//! <root>
//!   <example tag="midi-input" name="MIDI Input">Reading events from a MIDI port</example>
//!   <demo name="Drum Machine">A *step sequencer* built on the MIDI API.</demo>
//! </root>
//! ```

use quick_xml::escape::unescape;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use serde::Serialize;

/// Which entries to read from a catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogKind {
    /// `<example tag=".." name="..">`
    Examples,
    /// `<demo name="..">`
    Demos,
}

impl CatalogKind {
    /// Element name of an entry.
    pub fn element(&self) -> &'static str {
        match self {
            Self::Examples => "example",
            Self::Demos => "demo",
        }
    }

    fn requires_tag(&self) -> bool {
        matches!(self, Self::Examples)
    }
}

/// One entry of a catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogEntry {
    /// Short identifier, also the example's directory and file stem
    pub tag: Option<String>,
    /// Display name
    pub name: String,
    /// Free text (markdown for demos)
    pub description: String,
}

/// Errors that can occur when parsing a catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Catalog is not valid UTF-8: {0}")]
    Encoding(#[from] std::str::Utf8Error),

    #[error("XML error: {0}")]
    Xml(String),

    #[error("<{element}> is missing the '{attribute}' attribute")]
    MissingAttribute {
        element: &'static str,
        attribute: &'static str,
    },

    #[error("Catalog has no root element")]
    NoRoot,
}

/// Parse the entries of a catalog, in document order.
///
/// Only direct children of the root element are read; other elements are
/// ignored. An entry's description is the text leading up to its first child
/// element.
pub fn parse_catalog(bytes: &[u8], kind: CatalogKind) -> Result<Vec<CatalogEntry>, CatalogError> {
    let content = std::str::from_utf8(strip_bom(bytes))?;

    let mut reader = Reader::from_str(content);

    let mut entries = Vec::new();
    let mut current: Option<CatalogEntry> = None;
    let mut depth = 0usize;
    let mut saw_root = false;
    // Set once the current entry's leading text has ended
    let mut text_done = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                depth += 1;
                saw_root = true;
                if depth == 2 && is_entry(&e, kind) {
                    current = Some(entry_from_attributes(&e, kind)?);
                    text_done = false;
                } else if depth > 2 {
                    text_done = true;
                }
            }
            Ok(Event::Empty(e)) => {
                saw_root = true;
                if depth == 1 && is_entry(&e, kind) {
                    entries.push(entry_from_attributes(&e, kind)?);
                } else if depth >= 2 {
                    text_done = true;
                }
            }
            Ok(Event::End(_)) => {
                if depth == 2 {
                    if let Some(mut entry) = current.take() {
                        entry.description = entry.description.trim().to_string();
                        entries.push(entry);
                    }
                }
                depth = depth.saturating_sub(1);
            }
            Ok(Event::Text(e)) => {
                if let Some(entry) = current.as_mut().filter(|_| !text_done) {
                    entry.description.push_str(&String::from_utf8_lossy(e.as_ref()));
                }
            }
            Ok(Event::CData(e)) => {
                if let Some(entry) = current.as_mut().filter(|_| !text_done) {
                    entry
                        .description
                        .push_str(&String::from_utf8_lossy(&e.into_inner()));
                }
            }
            Ok(Event::GeneralRef(e)) => {
                if let Some(entry) = current.as_mut().filter(|_| !text_done) {
                    let reference = format!("&{};", String::from_utf8_lossy(e.as_ref()));
                    let resolved =
                        unescape(&reference).map_err(|err| CatalogError::Xml(err.to_string()))?;
                    entry.description.push_str(&resolved);
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(CatalogError::Xml(e.to_string())),
            _ => {}
        }
    }

    if !saw_root {
        return Err(CatalogError::NoRoot);
    }

    Ok(entries)
}

fn is_entry(e: &BytesStart<'_>, kind: CatalogKind) -> bool {
    e.name().as_ref() == kind.element().as_bytes()
}

fn entry_from_attributes(e: &BytesStart<'_>, kind: CatalogKind) -> Result<CatalogEntry, CatalogError> {
    let mut tag = None;
    let mut name = None;

    for attr in e.attributes() {
        let attr = attr.map_err(|err| CatalogError::Xml(err.to_string()))?;
        let raw = std::str::from_utf8(&attr.value)?;
        let value = unescape(raw)
            .map_err(|err| CatalogError::Xml(err.to_string()))?
            .into_owned();

        match attr.key.as_ref() {
            b"tag" => tag = Some(value),
            b"name" => name = Some(value),
            _ => {}
        }
    }

    if kind.requires_tag() && tag.is_none() {
        return Err(CatalogError::MissingAttribute {
            element: kind.element(),
            attribute: "tag",
        });
    }

    let name = name.ok_or(CatalogError::MissingAttribute {
        element: kind.element(),
        attribute: "name",
    })?;

    Ok(CatalogEntry {
        tag,
        name,
        description: String::new(),
    })
}

fn strip_bom(bytes: &[u8]) -> &[u8] {
    bytes.strip_prefix(&[0xEF, 0xBB, 0xBF]).unwrap_or(bytes)
}
