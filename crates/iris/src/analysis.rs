//! File-level analysis
//!
//! Bridges the pure scoring engine to the filesystem: reads source files,
//! applies the extension filter, and walks directory trees for the CLI.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::debug;
use walkdir::WalkDir;

use crate::config::IrisConfig;
use crate::scoring::{analyze_cognitive_complexity, Analysis};
use crate::{IrisError, Result};

/// Extensions of the languages the analyzer understands.
pub const SUPPORTED_EXTENSIONS: [&str; 8] = ["js", "jsx", "ts", "tsx", "mjs", "cjs", "mts", "cts"];

/// Result of analyzing a single file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileAnalysis {
  pub path: PathBuf,
  pub analysis: Analysis,
}

/// Check whether a path has a supported source extension.
pub fn is_supported_source(path: &Path) -> bool {
  path
    .extension()
    .and_then(|ext| ext.to_str())
    .is_some_and(|ext| SUPPORTED_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
}

/// Analyze a single file.
///
/// Invalid UTF-8 is replaced rather than rejected; the engine itself never
/// fails, so the only error case is I/O.
pub fn analyze_file<P: AsRef<Path>>(path: P) -> Result<FileAnalysis> {
  let path = path.as_ref();
  let bytes =
    fs::read(path).map_err(|source| IrisError::Io { path: path.to_path_buf(), source })?;
  let content = String::from_utf8_lossy(&bytes);
  let analysis = analyze_cognitive_complexity(&content);

  debug!("analyzed {}: total complexity {}", path.display(), analysis.total_complexity);
  Ok(FileAnalysis { path: path.to_path_buf(), analysis })
}

/// Collect the source files under a root, honoring the config's ignored
/// directories and extension filter. An explicitly named file is returned
/// as-is, regardless of extension.
pub fn collect_source_files(root: &Path, config: &IrisConfig) -> Vec<PathBuf> {
  if root.is_file() {
    return vec![root.to_path_buf()];
  }

  let walker = WalkDir::new(root)
    .sort_by_file_name()
    .into_iter()
    .filter_entry(|entry| !(entry.file_type().is_dir() && config.should_ignore_dir(entry.path())));

  let mut files = Vec::new();
  for entry in walker.flatten() {
    if entry.file_type().is_file() && config.matches_extensions(entry.path()) {
      files.push(entry.into_path());
    }
  }

  files
}
