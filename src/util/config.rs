//! Configuration file support for jspack.
//!
//! jspack supports two configuration file locations:
//! - Global: `~/.jspack/config.toml` - User-wide defaults
//! - Project: `.jspack/config.toml` - Project-specific overrides
//!
//! Project config takes precedence over global config.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::util::fs::DEFAULT_SCAN_DEPTH;

/// jspack configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Build settings
    pub build: BuildConfig,

    /// Source discovery settings
    pub scan: ScanConfig,
}

/// Build configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Tagged blocks to strip from every build
    pub blocks: Vec<String>,

    /// Default output file for builds
    pub output: Option<PathBuf>,

    /// Package paths to load in addition to the ones given on the command line
    pub packages: Vec<PathBuf>,
}

/// Source discovery configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Initial depth budget for pattern-declared sources (-1 = unlimited)
    pub depth: Option<i32>,
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config: {}", path.display()))
    }

    /// Load configuration with fallback to defaults if the file is missing or broken.
    pub fn load_or_default(path: &Path) -> Self {
        if path.exists() {
            Self::load(path).unwrap_or_else(|e| {
                tracing::warn!("Failed to load config from {}: {:#}", path.display(), e);
                Self::default()
            })
        } else {
            Self::default()
        }
    }

    /// Merge another config into this one (other takes precedence).
    pub fn merge(&mut self, other: Config) {
        if !other.build.blocks.is_empty() {
            self.build.blocks = other.build.blocks;
        }
        if other.build.output.is_some() {
            self.build.output = other.build.output;
        }
        if !other.build.packages.is_empty() {
            self.build.packages = other.build.packages;
        }
        if other.scan.depth.is_some() {
            self.scan.depth = other.scan.depth;
        }
    }

    /// The effective scan depth budget.
    pub fn scan_depth(&self) -> i32 {
        self.scan.depth.unwrap_or(DEFAULT_SCAN_DEPTH)
    }
}

/// Load configuration with proper precedence (global < project).
pub fn load_config(global_path: &Path, project_path: &Path) -> Config {
    let mut config = Config::default();

    if global_path.exists() {
        config.merge(Config::load_or_default(global_path));
    }

    if project_path.exists() {
        config.merge(Config::load_or_default(project_path));
    }

    config
}
