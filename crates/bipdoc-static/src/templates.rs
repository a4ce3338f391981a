//! Page shells for example and catalog pages.

use minijinja::Environment;
use serde::Serialize;

/// Link prefix for a page nested `level` directories below the output root.
pub fn root_path(level: usize) -> String {
    "../".repeat(level)
}

/// Context for an example page.
#[derive(Debug, Clone, Serialize)]
pub struct ExampleContext {
    /// Script title
    pub title: String,
    /// Site name used in headings and the window title
    pub site_name: String,
    /// Relative path back to the output root
    pub root: String,
    /// Rendered segments, in file order
    pub fragments: Vec<String>,
    /// Rendered complete script block
    pub complete_script: String,
}

/// One row of a catalog page.
#[derive(Debug, Clone, Serialize)]
pub struct CatalogRow {
    pub tag: Option<String>,
    pub name: String,
    /// HTML shown for the entry
    pub description: String,
}

/// Context for the index and demo pages.
#[derive(Debug, Clone, Serialize)]
pub struct CatalogContext {
    pub title: String,
    pub site_name: String,
    pub root: String,
    pub entries: Vec<CatalogRow>,
}

/// Template engine using minijinja.
pub struct TemplateEngine {
    env: Environment<'static>,
}

impl TemplateEngine {
    /// Create a new template engine with the built-in templates.
    pub fn new() -> Self {
        let mut env = Environment::new();
        env.set_trim_blocks(true);

        for (name, source) in TEMPLATES {
            env.add_template(name, source)
                .expect("Failed to add built-in template");
        }

        Self { env }
    }

    /// Render a page using the specified template.
    pub fn render_page<S: Serialize>(
        &self,
        template: &str,
        context: &S,
    ) -> Result<String, minijinja::Error> {
        self.env.get_template(template)?.render(context)
    }

    pub fn render_example(&self, context: &ExampleContext) -> Result<String, minijinja::Error> {
        self.render_page("example.html", context)
    }

    pub fn render_index(&self, context: &CatalogContext) -> Result<String, minijinja::Error> {
        self.render_page("index.html", context)
    }

    pub fn render_demos(&self, context: &CatalogContext) -> Result<String, minijinja::Error> {
        self.render_page("demos.html", context)
    }
}

impl Default for TemplateEngine {
    fn default() -> Self {
        Self::new()
    }
}

const TEMPLATES: [(&str, &str); 5] = [
    ("base.html", BASE_TEMPLATE),
    ("license.html", LICENSE_TEMPLATE),
    ("example.html", EXAMPLE_TEMPLATE),
    ("index.html", INDEX_TEMPLATE),
    ("demos.html", DEMOS_TEMPLATE),
];

const BASE_TEMPLATE: &str = r##"<html><head>
<title>{{ site_name }} Example: {{ title }}</title>
<link rel="stylesheet" href="{{ root|safe }}examples.css" type="text/css">
{% block head %}{% endblock %}
</head><body><div id="pagecontainer">
{% block content %}{% endblock %}
<hr/>
{% block scripts %}{% endblock %}
{% include "license.html" %}
</div></body></html>
"##;

const LICENSE_TEMPLATE: &str = r##"<a rel="license" href="http://creativecommons.org/licenses/by-nc-sa/4.0/">
<img alt="Creative Commons License" style="float:right;border-width:0" src="{{ root|safe }}img/by-nc-sa.png" /></a>
<span class="fineprint">This work is licensed under a <a rel="license" href="http://creativecommons.org/licenses/by-nc-sa/4.0/">Creative Commons Attribution-NonCommercial-ShareAlike 4.0 International License</a>.</span>
"##;

const EXAMPLE_TEMPLATE: &str = r##"{% extends "base.html" %}
{% block head %}
<script type="text/javascript" src="{{ root|safe }}sh/shCore.js"></script>
<script type="text/javascript" src="{{ root|safe }}sh/shBrushJScript.js"></script>
<link href="{{ root|safe }}sh/shCore.css" rel="stylesheet" type="text/css"/>
<link href="{{ root|safe }}sh/shThemeDefault.css" rel="stylesheet" type="text/css"/>
{% endblock %}
{% block content %}
{% for fragment in fragments %}
{{ fragment|safe }}
{% endfor %}
<br/>
<hr/>
<h2 id="complete-script">Complete Script</h2>
{{ complete_script|safe }}
<div class="centertext">
<a href="{{ root|safe }}index.html">List of All Examples</a>
&bull;
<a href="{{ root|safe }}demos.html">Demo Applications</a></div><br/>
{% endblock %}
{% block scripts %}
<script type="text/javascript">
SyntaxHighlighter.defaults['toolbar'] = false;
SyntaxHighlighter.all()</script>
{% endblock %}
"##;

const INDEX_TEMPLATE: &str = r##"{% extends "base.html" %}
{% block content %}
<h1>{{ site_name }} Examples</h1>
<table class="toc">
{% for entry in entries %}
<tr><td>
<a href="{{ entry.tag }}/{{ entry.tag }}.html">
{{ entry.name }}</a></td>
<td>{{ entry.description|safe }}</td></tr>
{% endfor %}
</table>
{% endblock %}
"##;

const DEMOS_TEMPLATE: &str = r##"{% extends "base.html" %}
{% block content %}
<h1>{{ site_name }} Demo Applications</h1>
{% for entry in entries %}
<div class="bubbles">
<h2>{{ entry.name }}</h2>
{{ entry.description|safe }}
</div>
{% endfor %}
{% endblock %}
"##;

#[cfg(test)]
mod tests {
    use super::*;

    fn example_context() -> ExampleContext {
        ExampleContext {
            title: "Playing a Note".to_string(),
            site_name: "Bipscript".to_string(),
            root: root_path(1),
            fragments: vec!["<p>Intro</p>\n".to_string(), "<pre>code</pre>\n".to_string()],
            complete_script: "<pre>all code</pre>\n".to_string(),
        }
    }

    #[test]
    fn root_path_climbs_levels() {
        assert_eq!(root_path(0), "");
        assert_eq!(root_path(1), "../");
        assert_eq!(root_path(2), "../../");
    }

    #[test]
    fn renders_example_page() {
        let engine = TemplateEngine::new();

        let html = engine.render_example(&example_context()).unwrap();

        assert!(html.contains("<title>Bipscript Example: Playing a Note</title>"));
        assert!(html.contains("href=\"../examples.css\""));
        assert!(html.contains("src=\"../sh/shCore.js\""));
        assert!(html.contains("<a href=\"../index.html\">List of All Examples</a>"));
        assert!(html.contains("src=\"../img/by-nc-sa.png\""));
        assert!(html.contains("SyntaxHighlighter.all()"));
    }

    #[test]
    fn keeps_fragment_order_before_complete_script() {
        let engine = TemplateEngine::new();

        let html = engine.render_example(&example_context()).unwrap();

        let intro = html.find("<p>Intro</p>").unwrap();
        let code = html.find("<pre>code</pre>").unwrap();
        let heading = html.find("Complete Script</h2>").unwrap();
        let all = html.find("<pre>all code</pre>").unwrap();
        assert!(intro < code && code < heading && heading < all);
    }

    #[test]
    fn escapes_title() {
        let engine = TemplateEngine::new();
        let mut context = example_context();
        context.title = "A < B".to_string();

        let html = engine.render_example(&context).unwrap();

        assert!(html.contains("Example: A &lt; B</title>"));
    }

    #[test]
    fn renders_index_without_highlighter() {
        let engine = TemplateEngine::new();

        let context = CatalogContext {
            title: "Index".to_string(),
            site_name: "Bipscript".to_string(),
            root: root_path(0),
            entries: vec![CatalogRow {
                tag: Some("midi".to_string()),
                name: "MIDI Input".to_string(),
                description: "Reading <b>MIDI</b>".to_string(),
            }],
        };

        let html = engine.render_index(&context).unwrap();

        assert!(html.contains("<title>Bipscript Example: Index</title>"));
        assert!(html.contains("<a href=\"midi/midi.html\">\nMIDI Input</a></td>"));
        assert!(html.contains("<td>Reading <b>MIDI</b></td></tr>"));
        assert!(html.contains("src=\"img/by-nc-sa.png\""));
        assert!(!html.contains("shCore.js"));
    }

    #[test]
    fn renders_demo_blocks() {
        let engine = TemplateEngine::new();

        let context = CatalogContext {
            title: "Index".to_string(),
            site_name: "Bipscript".to_string(),
            root: root_path(0),
            entries: vec![CatalogRow {
                tag: None,
                name: "Drum Machine".to_string(),
                description: "<p>A step sequencer.</p>\n".to_string(),
            }],
        };

        let html = engine.render_demos(&context).unwrap();

        assert!(html.contains("<h1>Bipscript Demo Applications</h1>"));
        assert!(html.contains("<h2>Drum Machine</h2>\n<p>A step sequencer.</p>"));
    }
}
