//! Static site builder.

use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use walkdir::{DirEntry, WalkDir};

use bipdoc_script::{parse_script, ParseError, ParsedScript};

use crate::assets::{copy_assets, AssetPaths};
use crate::catalog::{parse_catalog, CatalogEntry, CatalogKind};
use crate::render::{self, CmarkRenderer, FragmentRenderer, MarkdownOptions};
use crate::templates::{root_path, CatalogContext, CatalogRow, ExampleContext, TemplateEngine};

/// Nesting level of example pages (`<output>/<group>/<example>.html`).
const EXAMPLE_LEVEL: usize = 1;

/// Nesting level of the catalog pages.
const CATALOG_LEVEL: usize = 0;

/// Configuration for building the documentation site.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// Directory holding one subdirectory per example group
    pub input_root: PathBuf,

    /// Output directory
    pub output_root: PathBuf,

    /// Support files copied into the output
    pub assets: AssetPaths,

    /// Extension of example scripts
    pub extension: String,

    /// Example catalog, relative to the input root
    pub examples_catalog: PathBuf,

    /// Demo catalog, relative to the input root
    pub demos_catalog: PathBuf,

    /// Site name shown in titles and headings
    pub site_name: String,

    /// Markdown options for prose and demo descriptions
    pub markdown: MarkdownOptions,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            input_root: PathBuf::from("src"),
            output_root: PathBuf::from("html"),
            assets: AssetPaths::default(),
            extension: "bip".to_string(),
            examples_catalog: PathBuf::from("index.xml"),
            demos_catalog: PathBuf::from("demos.xml"),
            site_name: "Bipscript".to_string(),
            markdown: MarkdownOptions::default(),
        }
    }
}

/// Result of a build operation.
#[derive(Debug)]
pub struct BuildResult {
    /// Number of example pages generated
    pub pages: usize,

    /// Number of catalog pages generated
    pub catalogs: usize,

    /// Number of asset files copied
    pub assets: usize,

    /// Total build time in milliseconds
    pub duration_ms: u64,

    /// Output directory
    pub output_dir: PathBuf,
}

/// Errors that can occur during build.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("Input path not found: {}", .0.display())]
    MissingInputPath(PathBuf),

    #[error("Failed to parse {}: {source}", .path.display())]
    ParseError {
        path: PathBuf,
        #[source]
        source: ParseError,
    },

    #[error("Malformed catalog {}: {message}", .path.display())]
    MalformedCatalog { path: PathBuf, message: String },

    #[error("Failed to render template: {0}")]
    TemplateError(String),

    #[error("Failed to read input: {0}")]
    ReadError(String),

    #[error("Failed to write output: {0}")]
    WriteError(String),
}

/// An example script found under the input root.
#[derive(Debug)]
struct ExampleSource {
    /// Source file path
    source_path: PathBuf,

    /// Output path
    output_path: PathBuf,
}

/// Static site builder.
pub struct StaticBuilder {
    config: BuildConfig,
    fragments: FragmentRenderer<CmarkRenderer>,
    templates: TemplateEngine,
}

impl StaticBuilder {
    /// Create a new static builder.
    pub fn new(config: BuildConfig) -> Self {
        let fragments = FragmentRenderer::new(CmarkRenderer::new(config.markdown));

        Self {
            config,
            fragments,
            templates: TemplateEngine::new(),
        }
    }

    /// Build the site: example pages, the two catalog pages, then assets.
    ///
    /// Stops at the first error.
    pub fn build(&self) -> Result<BuildResult, BuildError> {
        let start = Instant::now();

        let examples = self.discover_examples()?;

        let output_root = &self.config.output_root;
        fs::create_dir_all(output_root)
            .map_err(|e| BuildError::WriteError(format!("{}: {}", output_root.display(), e)))?;

        for example in &examples {
            self.build_example(example)?;
        }

        let catalogs = self.build_catalogs()?;

        let assets = copy_assets(&self.config.assets, &self.config.output_root)
            .map_err(|e| BuildError::WriteError(e.to_string()))?;

        Ok(BuildResult {
            pages: examples.len(),
            catalogs,
            assets,
            duration_ms: start.elapsed().as_millis() as u64,
            output_dir: self.config.output_root.clone(),
        })
    }

    /// Find example scripts, exactly one directory level below the input root.
    fn discover_examples(&self) -> Result<Vec<ExampleSource>, BuildError> {
        let input_root = &self.config.input_root;

        if !input_root.is_dir() {
            return Err(BuildError::MissingInputPath(input_root.clone()));
        }

        let extension = OsStr::new(&self.config.extension);
        let mut examples = Vec::new();

        for entry in WalkDir::new(input_root)
            .min_depth(2)
            .max_depth(2)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || !is_hidden(e))
        {
            let entry = entry.map_err(|e| {
                let path = e.path().unwrap_or(input_root);
                BuildError::ReadError(format!("{}: {}", path.display(), e))
            })?;
            let path = entry.path();

            if !entry.file_type().is_file() || path.extension() != Some(extension) {
                continue;
            }

            let relative_path = path.strip_prefix(input_root).unwrap_or(path);

            examples.push(ExampleSource {
                source_path: path.to_path_buf(),
                output_path: self.output_path(relative_path),
            });
        }

        tracing::debug!(
            "Found {} example scripts in {}",
            examples.len(),
            input_root.display()
        );

        Ok(examples)
    }

    /// `group/example.bip` -> `<output>/group/example.html`
    fn output_path(&self, relative: &Path) -> PathBuf {
        self.config
            .output_root
            .join(relative.with_extension("html"))
    }

    /// Build a single example page.
    fn build_example(&self, example: &ExampleSource) -> Result<(), BuildError> {
        let source = fs::read_to_string(&example.source_path)
            .map_err(|e| BuildError::ReadError(format!("{}: {}", example.source_path.display(), e)))?;

        let doc = parse_script(&source).map_err(|source| BuildError::ParseError {
            path: example.source_path.clone(),
            source,
        })?;

        let html = self.render_example(&doc)?;

        if let Some(parent) = example.output_path.parent() {
            fs::create_dir_all(parent).map_err(|e| BuildError::WriteError(e.to_string()))?;
        }

        fs::write(&example.output_path, html)
            .map_err(|e| BuildError::WriteError(format!("{}: {}", example.output_path.display(), e)))?;

        tracing::info!(
            "Built {} ({} segments)",
            example.output_path.display(),
            doc.segments.len()
        );

        Ok(())
    }

    /// Render the page for a parsed example.
    pub fn render_example(&self, doc: &ParsedScript) -> Result<String, BuildError> {
        let context = ExampleContext {
            title: doc.title.clone(),
            site_name: self.config.site_name.clone(),
            root: root_path(EXAMPLE_LEVEL),
            fragments: doc
                .segments
                .iter()
                .map(|segment| self.fragments.segment(segment))
                .collect(),
            complete_script: render::code(&doc.complete_script, 0),
        };

        self.templates
            .render_example(&context)
            .map_err(|e| BuildError::TemplateError(e.to_string()))
    }

    /// Build `index.html` and `demos.html` from the catalogs.
    fn build_catalogs(&self) -> Result<usize, BuildError> {
        let examples = self.load_catalog(&self.config.examples_catalog, CatalogKind::Examples)?;
        let index = self.catalog_context("Index", examples, |entry| entry.description.clone());
        let html = self
            .templates
            .render_index(&index)
            .map_err(|e| BuildError::TemplateError(e.to_string()))?;
        self.write_catalog_page("index.html", html)?;

        let demos = self.load_catalog(&self.config.demos_catalog, CatalogKind::Demos)?;
        let gallery = self.catalog_context("Index", demos, |entry| {
            self.fragments.prose(&entry.description)
        });
        let html = self
            .templates
            .render_demos(&gallery)
            .map_err(|e| BuildError::TemplateError(e.to_string()))?;
        self.write_catalog_page("demos.html", html)?;

        Ok(2)
    }

    fn load_catalog(&self, file: &Path, kind: CatalogKind) -> Result<Vec<CatalogEntry>, BuildError> {
        let path = self.config.input_root.join(file);

        if !path.is_file() {
            return Err(BuildError::MissingInputPath(path));
        }

        let bytes = fs::read(&path)
            .map_err(|e| BuildError::ReadError(format!("{}: {}", path.display(), e)))?;

        let entries = parse_catalog(&bytes, kind).map_err(|e| BuildError::MalformedCatalog {
            path: path.clone(),
            message: e.to_string(),
        })?;

        tracing::debug!("Loaded {} entries from {}", entries.len(), path.display());

        Ok(entries)
    }

    fn catalog_context(
        &self,
        title: &str,
        entries: Vec<CatalogEntry>,
        describe: impl Fn(&CatalogEntry) -> String,
    ) -> CatalogContext {
        CatalogContext {
            title: title.to_string(),
            site_name: self.config.site_name.clone(),
            root: root_path(CATALOG_LEVEL),
            entries: entries
                .iter()
                .map(|entry| CatalogRow {
                    tag: entry.tag.clone(),
                    name: entry.name.clone(),
                    description: describe(entry),
                })
                .collect(),
        }
    }

    fn write_catalog_page(&self, name: &str, html: String) -> Result<(), BuildError> {
        let path = self.config.output_root.join(name);

        fs::write(&path, html)
            .map_err(|e| BuildError::WriteError(format!("{}: {}", path.display(), e)))?;

        tracing::info!("Built {}", path.display());
        Ok(())
    }
}

/// Dotfiles and dot-directories are not part of the example tree.
fn is_hidden(entry: &DirEntry) -> bool {
    entry.file_name().to_string_lossy().starts_with('.')
}
