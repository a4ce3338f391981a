//! Site build.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use bipdoc_static::{AssetPaths, BuildConfig, MarkdownOptions, QuoteStyle, StaticBuilder};
use serde::Deserialize;

/// Configuration file structure (bipdoc.toml).
#[derive(Debug, Deserialize, Default)]
struct ConfigFile {
    #[serde(default)]
    paths: PathsConfig,
    #[serde(default)]
    assets: AssetsConfig,
    #[serde(default)]
    site: SiteConfig,
}

#[derive(Debug, Deserialize)]
struct PathsConfig {
    #[serde(default = "default_input")]
    input: PathBuf,
    #[serde(default = "default_output")]
    output: PathBuf,
}

#[derive(Debug, Deserialize)]
struct AssetsConfig {
    /// Directories copied recursively into the output
    #[serde(default = "default_asset_dirs")]
    dirs: Vec<PathBuf>,
    /// Files copied into the output
    #[serde(default = "default_asset_files")]
    files: Vec<PathBuf>,
}

#[derive(Debug, Deserialize)]
struct SiteConfig {
    #[serde(default = "default_name")]
    name: String,
    #[serde(default = "default_extension")]
    extension: String,
    #[serde(default = "default_examples_catalog")]
    examples_catalog: PathBuf,
    #[serde(default = "default_demos_catalog")]
    demos_catalog: PathBuf,
    #[serde(default)]
    smart_quotes: bool,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            input: default_input(),
            output: default_output(),
        }
    }
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            dirs: default_asset_dirs(),
            files: default_asset_files(),
        }
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            extension: default_extension(),
            examples_catalog: default_examples_catalog(),
            demos_catalog: default_demos_catalog(),
            smart_quotes: false,
        }
    }
}

fn default_input() -> PathBuf {
    BuildConfig::default().input_root
}
fn default_output() -> PathBuf {
    BuildConfig::default().output_root
}
fn default_asset_dirs() -> Vec<PathBuf> {
    AssetPaths::default().dirs
}
fn default_asset_files() -> Vec<PathBuf> {
    AssetPaths::default().files
}
fn default_name() -> String {
    BuildConfig::default().site_name
}
fn default_extension() -> String {
    BuildConfig::default().extension
}
fn default_examples_catalog() -> PathBuf {
    BuildConfig::default().examples_catalog
}
fn default_demos_catalog() -> PathBuf {
    BuildConfig::default().demos_catalog
}

impl ConfigFile {
    /// Merge with command line overrides.
    fn into_build_config(self, input: Option<PathBuf>, output: Option<PathBuf>) -> BuildConfig {
        let quotes = if self.site.smart_quotes {
            QuoteStyle::Smart
        } else {
            QuoteStyle::Straight
        };

        BuildConfig {
            input_root: input.unwrap_or(self.paths.input),
            output_root: output.unwrap_or(self.paths.output),
            assets: AssetPaths {
                dirs: self.assets.dirs,
                files: self.assets.files,
            },
            extension: self.site.extension,
            examples_catalog: self.site.examples_catalog,
            demos_catalog: self.site.demos_catalog,
            site_name: self.site.name,
            markdown: MarkdownOptions { quotes },
        }
    }
}

/// Load configuration from `path` if it exists.
/// Returns an error if the config file exists but is malformed.
fn load_config(path: &Path) -> Result<ConfigFile> {
    if path.exists() {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config: ConfigFile = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        tracing::info!("Loaded config from {}", path.display());
        return Ok(config);
    }
    Ok(ConfigFile::default())
}

/// Run the build.
pub fn run(config_path: &Path, input: Option<PathBuf>, output: Option<PathBuf>) -> Result<()> {
    tracing::info!("Building example documentation...");

    let config = load_config(config_path)?.into_build_config(input, output);

    let result = StaticBuilder::new(config).build()?;

    tracing::info!(
        "Built {} example pages and {} catalog pages, copied {} assets in {}ms",
        result.pages,
        result.catalogs,
        result.assets,
        result.duration_ms
    );

    tracing::info!("Output: {}", result.output_dir.display());

    Ok(())
}
