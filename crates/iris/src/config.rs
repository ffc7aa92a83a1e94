//! Configuration management
//!
//! Loads analyzer settings from a JSON file in the working directory:
//! severity thresholds, analyzed extensions, and ignored directories.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::{IrisError, Result};

/// Severity band for a total complexity score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
  Low,
  Moderate,
  High,
  Severe,
}

/// Complexity thresholds dividing the severity bands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thresholds {
  /// Scores at or below this are low severity
  #[serde(default = "default_low")]
  pub low: u32,
  /// Scores at or below this are moderate severity
  #[serde(default = "default_moderate")]
  pub moderate: u32,
  /// Scores at or below this are high severity; anything above is severe
  #[serde(default = "default_high")]
  pub high: u32,
}

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IrisConfig {
  /// Severity thresholds
  #[serde(default)]
  pub thresholds: Thresholds,
  /// File extensions to analyze
  #[serde(default = "default_extensions")]
  pub extensions: Vec<String>,
  /// Directories to skip during traversal
  #[serde(default = "default_ignore_dirs")]
  pub ignore_dirs: Vec<String>,
}

// Default threshold functions
fn default_low() -> u32 {
  5
}
fn default_moderate() -> u32 {
  10
}
fn default_high() -> u32 {
  20
}

fn default_extensions() -> Vec<String> {
  crate::analysis::SUPPORTED_EXTENSIONS.iter().map(|ext| ext.to_string()).collect()
}

fn default_ignore_dirs() -> Vec<String> {
  vec![
    ".git".to_string(),
    "node_modules".to_string(),
    "target".to_string(),
    "dist".to_string(),
    "build".to_string(),
  ]
}

impl Default for Thresholds {
  fn default() -> Self {
    Self { low: default_low(), moderate: default_moderate(), high: default_high() }
  }
}

impl Default for IrisConfig {
  fn default() -> Self {
    Self {
      thresholds: Thresholds::default(),
      extensions: default_extensions(),
      ignore_dirs: default_ignore_dirs(),
    }
  }
}

impl Thresholds {
  /// Band a total score against the configured thresholds.
  pub fn severity(&self, score: u32) -> Severity {
    if score <= self.low {
      Severity::Low
    } else if score <= self.moderate {
      Severity::Moderate
    } else if score <= self.high {
      Severity::High
    } else {
      Severity::Severe
    }
  }
}

impl IrisConfig {
  /// Load configuration from a file
  pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)
      .map_err(|source| IrisError::Io { path: path.to_path_buf(), source })?;
    let config = serde_json::from_str(&content)
      .map_err(|source| IrisError::Config { path: path.to_path_buf(), source })?;
    Ok(config)
  }

  /// Load configuration from the working directory, or defaults
  pub fn load() -> Result<Self> {
    let config_paths = [".iris.json", "iris.json"];

    for path in &config_paths {
      if Path::new(path).exists() {
        return Self::load_from_file(path);
      }
    }

    // No config file found, use defaults
    Ok(IrisConfig::default())
  }

  /// Save configuration to a file
  pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
    let path = path.as_ref();
    let content = serde_json::to_string_pretty(self)
      .map_err(|source| IrisError::Config { path: path.to_path_buf(), source })?;
    std::fs::write(path, content)
      .map_err(|source| IrisError::Io { path: path.to_path_buf(), source })?;
    Ok(())
  }

  /// Check if a directory should be skipped during traversal
  pub fn should_ignore_dir(&self, path: &Path) -> bool {
    path
      .file_name()
      .and_then(|name| name.to_str())
      .is_some_and(|name| self.ignore_dirs.iter().any(|dir| dir == name))
  }

  /// Check if a file's extension is configured for analysis
  pub fn matches_extensions(&self, path: &Path) -> bool {
    path.extension().and_then(|ext| ext.to_str()).is_some_and(|ext| {
      let ext = ext.to_ascii_lowercase();
      self.extensions.iter().any(|allowed| allowed == &ext)
    })
  }
}
