//! Static asset copying (highlighter library, stylesheet, images).

use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

/// Support files copied verbatim into the output root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetPaths {
    /// Directories copied recursively as `<output>/<dir name>/`
    pub dirs: Vec<PathBuf>,
    /// Files copied as `<output>/<file name>`
    pub files: Vec<PathBuf>,
}

impl Default for AssetPaths {
    fn default() -> Self {
        Self {
            dirs: vec![PathBuf::from("sh"), PathBuf::from("img")],
            files: vec![PathBuf::from("examples.css")],
        }
    }
}

/// Errors that can occur while copying assets.
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("Failed to copy {}: {source}", .path.display())]
    Copy {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to walk {}: {source}", .path.display())]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },
}

/// Copy every configured asset into `output_root`, overwriting existing copies.
///
/// Missing sources are skipped with a warning. Returns the number of files
/// copied.
pub fn copy_assets(assets: &AssetPaths, output_root: &Path) -> Result<usize, AssetError> {
    let mut copied = 0;

    for dir in &assets.dirs {
        if !dir.is_dir() {
            tracing::warn!("Asset directory not found: {}", dir.display());
            continue;
        }
        let dest = output_root.join(dir.file_name().unwrap_or(dir.as_os_str()));
        copied += copy_dir(dir, &dest)?;
        tracing::info!("Copied {} to {}", dir.display(), dest.display());
    }

    for file in &assets.files {
        if !file.is_file() {
            tracing::warn!("Asset file not found: {}", file.display());
            continue;
        }
        let dest = output_root.join(file.file_name().unwrap_or(file.as_os_str()));
        copy_file(file, &dest)?;
        copied += 1;
        tracing::info!("Copied {} to {}", file.display(), dest.display());
    }

    Ok(copied)
}

/// Recursively copy a directory tree.
fn copy_dir(src: &Path, dest: &Path) -> Result<usize, AssetError> {
    let mut copied = 0;

    for entry in WalkDir::new(src).follow_links(true).sort_by_file_name() {
        let entry = entry.map_err(|source| AssetError::Walk {
            path: src.to_path_buf(),
            source,
        })?;

        // Entries always live under the walk root
        let relative = entry.path().strip_prefix(src).unwrap_or(entry.path());
        let target = dest.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target).map_err(|source| AssetError::Copy {
                path: target.clone(),
                source,
            })?;
        } else {
            copy_file(entry.path(), &target)?;
            copied += 1;
        }
    }

    Ok(copied)
}

fn copy_file(src: &Path, dest: &Path) -> Result<(), AssetError> {
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent).map_err(|source| AssetError::Copy {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    fs::copy(src, dest).map_err(|source| AssetError::Copy {
        path: src.to_path_buf(),
        source,
    })?;

    tracing::debug!("Copied {}", dest.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn copies_directories_and_files() {
        let temp = tempdir().unwrap();
        let sh = temp.path().join("sh");
        let css = temp.path().join("examples.css");
        let out = temp.path().join("html");

        fs::create_dir_all(sh.join("scripts")).unwrap();
        fs::write(sh.join("shCore.js"), "core").unwrap();
        fs::write(sh.join("scripts").join("shBrushJScript.js"), "brush").unwrap();
        fs::write(&css, "body {}").unwrap();

        let assets = AssetPaths {
            dirs: vec![sh],
            files: vec![css],
        };

        let copied = copy_assets(&assets, &out).unwrap();

        assert_eq!(copied, 3);
        assert_eq!(fs::read_to_string(out.join("sh/shCore.js")).unwrap(), "core");
        assert_eq!(
            fs::read_to_string(out.join("sh/scripts/shBrushJScript.js")).unwrap(),
            "brush"
        );
        assert_eq!(fs::read_to_string(out.join("examples.css")).unwrap(), "body {}");
    }

    #[test]
    fn overwrites_existing_copies() {
        let temp = tempdir().unwrap();
        let css = temp.path().join("examples.css");
        let out = temp.path().join("html");

        fs::create_dir_all(&out).unwrap();
        fs::write(out.join("examples.css"), "old").unwrap();
        fs::write(&css, "new").unwrap();

        let assets = AssetPaths {
            dirs: vec![],
            files: vec![css],
        };
        copy_assets(&assets, &out).unwrap();

        assert_eq!(fs::read_to_string(out.join("examples.css")).unwrap(), "new");
    }

    #[test]
    fn skips_missing_sources() {
        let temp = tempdir().unwrap();

        let assets = AssetPaths {
            dirs: vec![temp.path().join("missing-dir")],
            files: vec![temp.path().join("missing.css")],
        };

        let copied = copy_assets(&assets, &temp.path().join("html")).unwrap();

        assert_eq!(copied, 0);
    }
}
