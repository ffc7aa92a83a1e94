//! Cognitive complexity analysis for brace-structured source code

pub mod analysis;
pub mod config;
pub mod scanner;
pub mod scoring;

pub use analysis::{analyze_file, FileAnalysis};
pub use config::IrisConfig;
pub use scoring::{
  analyze_cognitive_complexity, calculate_cognitive_complexity, Analysis, Contribution,
};

use std::path::PathBuf;
use thiserror::Error;

/// Errors from the filesystem-facing layers.
///
/// The scoring engine itself is total over all string inputs and never
/// returns one of these.
#[derive(Debug, Error)]
pub enum IrisError {
  #[error("failed to read {}: {source}", .path.display())]
  Io { path: PathBuf, source: std::io::Error },
  #[error("invalid configuration {}: {source}", .path.display())]
  Config { path: PathBuf, source: serde_json::Error },
}

pub type Result<T> = std::result::Result<T, IrisError>;
