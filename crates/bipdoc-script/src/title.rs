//! Page title extraction.

use std::sync::LazyLock;

use regex::Regex;

use crate::parser::ParseError;

// First `#` anywhere in the file, then the rest of that (or the next non-blank) line.
static TITLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"#\s*([^\n]+)").expect("Invalid title regex"));

/// Extract the page title from an example script.
///
/// The title is the text following the first `#` in the file, up to the end
/// of the line. Scripts usually carry it in a leading comment such as
/// `// # Playing a MIDI file`.
pub fn extract_title(source: &str) -> Result<String, ParseError> {
    let title = TITLE_RE
        .captures(source)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim_end())
        .ok_or(ParseError::MissingTitle)?;

    if title.is_empty() {
        return Err(ParseError::MissingTitle);
    }

    Ok(title.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_title_from_comment() {
        let source = "// # Playing a MIDI file\nvar x = 1;\n";

        assert_eq!(extract_title(source).unwrap(), "Playing a MIDI file");
    }

    #[test]
    fn uses_first_hash_in_file() {
        let source = "var a = 1;\n// # First\n// # Second\n";

        assert_eq!(extract_title(source).unwrap(), "First");
    }

    #[test]
    fn skips_whitespace_after_hash() {
        assert_eq!(extract_title("#\n  Next line\n").unwrap(), "Next line");
        assert_eq!(extract_title("#Tight\r\n").unwrap(), "Tight");
    }

    #[test]
    fn errors_without_hash() {
        let result = extract_title("var x = 1;\n/**\nNo title here.\n*/\n");

        assert!(matches!(result, Err(ParseError::MissingTitle)));
    }

    #[test]
    fn errors_on_blank_title() {
        assert!(matches!(extract_title("# \n"), Err(ParseError::MissingTitle)));
    }
}
