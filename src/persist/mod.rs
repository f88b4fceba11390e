//! Persistence layer for the parser.
//!
//! Provides RON-based save/load for [`QuackitConfig`] and a file-backed
//! `exec` command that queues `.cfg` files for parsing.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use bevy::prelude::*;

use crate::config::QuackitConfig;
use crate::core::{Quackit, RegistryError};

/// Default config file name.
pub const DEFAULT_CONFIG_FILE: &str = "quackit.ron";

impl QuackitConfig {
    /// Load config from a RON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;

        ron::from_str(&contents)
            .map_err(|e| ConfigError::Parse(path.display().to_string(), e.to_string()))
    }

    /// Save config to a RON file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();

        // Create parent directories if needed
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)
                    .map_err(|e| ConfigError::Io(parent.to_path_buf(), e))?;
            }
        }

        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(2)
            .separate_tuple_members(true)
            .enumerate_arrays(false);

        let contents = ron::ser::to_string_pretty(self, pretty)
            .map_err(|e| ConfigError::Serialize(e.to_string()))?;

        fs::write(path, contents).map_err(|e| ConfigError::Io(path.to_path_buf(), e))
    }

    /// Load config from file, returning default if the file is missing or invalid.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                debug!("Using default parser config: {}", e);
                Self::default()
            }
        }
    }
}

/// Errors that can occur during config operations.
#[derive(Debug)]
pub enum ConfigError {
    /// IO error (path, cause).
    Io(PathBuf, io::Error),
    /// Parse error (path, message).
    Parse(String, String),
    /// Serialization error.
    Serialize(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(path, e) => write!(f, "IO error for '{}': {}", path.display(), e),
            ConfigError::Parse(path, msg) => write!(f, "Parse error for '{}': {}", path, msg),
            ConfigError::Serialize(msg) => write!(f, "Serialization error: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(_, e) => Some(e),
            _ => None,
        }
    }
}

/// Errors reported by the `exec` handler.
#[derive(Debug)]
pub enum ExecError {
    /// `exec` was called without a file name.
    MissingFile,
    /// The file could not be read (path, cause).
    Io(PathBuf, io::Error),
}

impl std::fmt::Display for ExecError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExecError::MissingFile => write!(f, "Usage: exec <filename>"),
            ExecError::Io(path, e) => write!(f, "Failed to read '{}': {}", path.display(), e),
        }
    }
}

impl std::error::Error for ExecError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ExecError::Io(_, e) => Some(e),
            ExecError::MissingFile => None,
        }
    }
}

/// Register the `exec` command on `quackit`.
///
/// `exec <name>` reads `<name>` under the configured exec root, adding the
/// configured extension when the name has none, and queues the file contents
/// so they are parsed once the current scan finishes.
pub fn register_exec(quackit: &mut Quackit) -> Result<(), RegistryError> {
    let config = quackit.config().clone();

    quackit.register_handler("exec", move |q, args| {
        let name = args.get(0).ok_or(ExecError::MissingFile)?;
        let path = config.resolve_exec(name);

        let contents = fs::read_to_string(&path)
            .map_err(|e| ExecError::Io(path.clone(), e))?;

        info!("Executing '{}'...", path.display());
        q.queue_content(contents);
        Ok(())
    })
}
