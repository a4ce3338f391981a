//! HTML fragment rendering for example segments.

use pulldown_cmark::{html, Options, Parser};

use bipdoc_script::Segment;

/// Highlighter brush used for every code block.
pub const BRUSH: &str = "js";

/// Renders markdown source to HTML.
pub trait MarkdownRenderer {
    fn render(&self, source: &str) -> String;
}

/// How quotes in prose are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QuoteStyle {
    /// Keep ASCII quotes
    #[default]
    Straight,
    /// Typographic (curly) quotes
    Smart,
}

/// Markdown rendering options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MarkdownOptions {
    pub quotes: QuoteStyle,
}

/// Markdown renderer backed by pulldown-cmark.
#[derive(Debug, Clone, Default)]
pub struct CmarkRenderer {
    options: MarkdownOptions,
}

impl CmarkRenderer {
    pub fn new(options: MarkdownOptions) -> Self {
        Self { options }
    }

    fn parser_options(&self) -> Options {
        let mut options = Options::ENABLE_TABLES
            | Options::ENABLE_FOOTNOTES
            | Options::ENABLE_STRIKETHROUGH;

        if self.options.quotes == QuoteStyle::Smart {
            options |= Options::ENABLE_SMART_PUNCTUATION;
        }

        options
    }
}

impl MarkdownRenderer for CmarkRenderer {
    fn render(&self, source: &str) -> String {
        let parser = Parser::new_ext(source, self.parser_options());

        let mut html_output = String::new();
        html::push_html(&mut html_output, parser);

        html_output
    }
}

/// Turns segments into the HTML fragments of an example page.
#[derive(Debug, Clone, Default)]
pub struct FragmentRenderer<M = CmarkRenderer> {
    markdown: M,
}

impl<M: MarkdownRenderer> FragmentRenderer<M> {
    pub fn new(markdown: M) -> Self {
        Self { markdown }
    }

    /// Render one segment.
    pub fn segment(&self, segment: &Segment) -> String {
        match segment {
            Segment::Prose { text } => self.prose(text),
            Segment::Audio { file, .. } => audio(file),
            Segment::Code { text, first_line } => code(text, *first_line),
        }
    }

    pub fn prose(&self, text: &str) -> String {
        self.markdown.render(text)
    }
}

/// Audio player for an Ogg Vorbis clip.
pub fn audio(file: &str) -> String {
    format!(
        "<audio controls>\n  <source src=\"{}\" type=\"audio/ogg\">\n</audio>\n",
        escape_attribute(file)
    )
}

/// Highlighter block whose numbering starts at `first_line + 1`.
pub fn code(source: &str, first_line: usize) -> String {
    format!(
        "<div class=\"bubbles\">\n<pre class=\"brush: {}; first-line: {}\">\n{}\n</pre></div>\n",
        BRUSH,
        first_line + 1,
        escape_code(source)
    )
}

/// Escape `&`, `<` and `>`; everything else is left for the highlighter.
pub fn escape_code(source: &str) -> String {
    let mut escaped = String::with_capacity(source.len());
    for c in source.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn escape_attribute(value: &str) -> String {
    escape_code(value).replace('"', "&quot;")
}
