//! Segment scanning.
//!
//! An example script is plain code interleaved with `/** ... */` prose blocks.
//! Code spans may instead hold an `$audio <file>` directive, which replaces the
//! whole span with an audio player.

use std::sync::LazyLock;

use regex::Regex;

use crate::script::CompleteScript;

const PROSE_OPEN: &str = "/**";
const PROSE_CLOSE: &str = "*/";

// Trailing editor modeline, e.g. `// vim: set ft=javascript:`
static MODELINE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)\n\s*//\s*vim:.*$").expect("Invalid modeline regex"));

static AUDIO_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$audio\s+(\S+)\s").expect("Invalid audio regex"));

/// A classified unit of an example script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Markdown prose (without the comment markers)
    Prose { text: String },

    /// Audio clip that takes the place of a code span
    Audio {
        /// Referenced file name
        file: String,
        /// The span the directive was found in
        raw: String,
    },

    /// Code span
    Code {
        /// Source text, modelines removed
        text: String,
        /// 0-based line of this block within the complete script
        first_line: usize,
    },
}

/// Raw span of the source, before classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Span<'a> {
    Gap(&'a str),
    Prose(&'a str),
}

/// Split an example script into segments, in file order.
///
/// Whitespace-only spans are dropped. Code segments record where they start in
/// the complete script so the highlighter can number lines consistently.
pub fn segment(source: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut script = CompleteScript::new();

    for span in spans(source) {
        match span {
            Span::Prose(inner) => {
                segments.push(Segment::Prose {
                    text: strip_modelines(inner),
                });
            }
            Span::Gap(gap) => {
                let text = strip_modelines(gap);
                if text.trim().is_empty() {
                    continue;
                }

                if let Some(file) = audio_file(&text) {
                    segments.push(Segment::Audio { file, raw: text });
                } else {
                    let first_line = script.push(&text);
                    segments.push(Segment::Code { text, first_line });
                }
            }
        }
    }

    segments
}

/// Cut the source into alternating gap and prose spans.
fn spans(source: &str) -> Vec<Span<'_>> {
    let mut spans = Vec::new();
    let mut pos = 0;

    while let Some((start, end)) = find_prose(source, pos) {
        spans.push(Span::Gap(&source[pos..start]));
        spans.push(Span::Prose(
            &source[start + PROSE_OPEN.len()..end - PROSE_CLOSE.len()],
        ));
        pos = end;
    }
    spans.push(Span::Gap(&source[pos..]));

    spans
}

/// Find the next prose block at or after `from`.
///
/// A block is `/**`, at least one character that is not `*`, then `*/`.
fn find_prose(source: &str, from: usize) -> Option<(usize, usize)> {
    let mut search = from;

    while let Some(offset) = source[search..].find(PROSE_OPEN) {
        let start = search + offset;
        let body = start + PROSE_OPEN.len();
        let body_len = source[body..].find('*').unwrap_or(source.len() - body);

        if body_len > 0 && source[body + body_len..].starts_with(PROSE_CLOSE) {
            return Some((start, body + body_len + PROSE_CLOSE.len()));
        }

        search = start + 1;
    }

    None
}

fn strip_modelines(text: &str) -> String {
    MODELINE_RE.replace_all(text, "").into_owned()
}

fn audio_file(text: &str) -> Option<String> {
    AUDIO_RE
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}
