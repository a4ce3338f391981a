//! Example script parser.

use crate::script::CompleteScript;
use crate::segment::{segment, Segment};
use crate::title::extract_title;

/// A parsed example script.
#[derive(Debug, Clone)]
pub struct ParsedScript {
    /// Page title, from the first `#` line
    pub title: String,

    /// Segments in file order
    pub segments: Vec<Segment>,

    /// All code segments joined into one listing
    pub complete_script: String,
}

/// Errors that can occur when parsing an example script.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("Missing title: no line starting with '#' found")]
    MissingTitle,
}

/// Parse an example script.
///
/// Extracts the title, splits the file into segments and rebuilds the
/// complete script.
pub fn parse_script(source: &str) -> Result<ParsedScript, ParseError> {
    // Title first so a file without one is rejected before any scanning
    let title = extract_title(source)?;

    let segments = segment(source);
    let complete_script = CompleteScript::from_segments(&segments).into_string();

    Ok(ParsedScript {
        title,
        segments,
        complete_script,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_complete_example() {
        let source = r#"// # Playing a Note
/**
This example plays a single note.
*/
var synth = new Lv2.Plugin("http://calf.sourceforge.net/plugins/Monosynth");

/**
Listen to the result:
*/
$audio note.ogg

/**
Now schedule the note.
*/
synth.schedule(new Midi.Note(60, 127, 1));
// vim: set ft=javascript:
"#;

        let doc = parse_script(source).unwrap();

        assert_eq!(doc.title, "Playing a Note");
        assert_eq!(doc.segments.len(), 7);
        assert!(matches!(doc.segments[4], Segment::Audio { ref file, .. } if file == "note.ogg"));

        assert_eq!(
            doc.complete_script,
            "// # Playing a Note\n\n\
             var synth = new Lv2.Plugin(\"http://calf.sourceforge.net/plugins/Monosynth\");\n\n\
             synth.schedule(new Midi.Note(60, 127, 1));\n\n"
        );
    }

    #[test]
    fn complete_script_joins_code_segments() {
        let source = "# Title\n/**\nA\n*/\none();\n  \n/**\nB\n*/\ntwo();\nthree();\n";

        let doc = parse_script(source).unwrap();

        let expected: String = doc
            .segments
            .iter()
            .filter_map(|s| match s {
                Segment::Code { text, .. } => {
                    Some(format!("{}\n\n", text.trim_end().trim_start_matches('\n')))
                }
                _ => None,
            })
            .collect();

        assert_eq!(doc.complete_script, expected);
        assert!(!doc.complete_script.contains('A'));
    }

    #[test]
    fn rejects_script_without_title() {
        let result = parse_script("/**\nNo title.\n*/\nplay();\n");

        assert!(matches!(result, Err(ParseError::MissingTitle)));
    }
}
