//! Complete script reconstruction.

use crate::segment::Segment;

/// The code-only view of an example, rebuilt from its code segments.
///
/// Each block is stored with trailing whitespace and leading line breaks
/// removed, followed by one blank line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompleteScript {
    text: String,
    lines: usize,
}

impl CompleteScript {
    /// Create an empty script.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild the script from the code segments of a parsed file.
    pub fn from_segments(segments: &[Segment]) -> Self {
        let mut script = Self::new();
        for segment in segments {
            if let Segment::Code { text, .. } = segment {
                script.push(text);
            }
        }
        script
    }

    /// Append a code block.
    ///
    /// Returns the 0-based line at which the block starts.
    pub fn push(&mut self, code: &str) -> usize {
        let first_line = self.lines;

        let block = code.trim_end().trim_start_matches(['\r', '\n']);
        self.text.push_str(block);
        self.text.push_str("\n\n");
        self.lines += block.matches('\n').count() + 2;

        first_line
    }

    pub fn into_string(self) -> String {
        self.text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn separates_blocks_with_blank_line() {
        let mut script = CompleteScript::new();

        assert_eq!(script.push("a();\n  \n"), 0);
        assert_eq!(script.push("\n\nb();\nc();\n"), 2);
        assert_eq!(script.push("d();"), 5);

        assert_eq!(script.into_string(), "a();\n\nb();\nc();\n\nd();\n\n");
    }

    #[test]
    fn keeps_indentation_of_first_line() {
        let mut script = CompleteScript::new();
        script.push("\n    indented();\n");

        assert_eq!(script.into_string(), "    indented();\n\n");
    }

    #[test]
    fn ignores_prose_and_audio() {
        let segments = vec![
            Segment::Code {
                text: "one();\n".to_string(),
                first_line: 0,
            },
            Segment::Prose {
                text: "Prose.".to_string(),
            },
            Segment::Audio {
                file: "clip.ogg".to_string(),
                raw: "$audio clip.ogg\n".to_string(),
            },
            Segment::Code {
                text: "\ntwo();\n".to_string(),
                first_line: 2,
            },
        ];

        let script = CompleteScript::from_segments(&segments);

        assert_eq!(script.into_string(), "one();\n\ntwo();\n\n");
    }
}
