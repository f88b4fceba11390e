//! Parser configuration.

use std::path::PathBuf;

/// Default limit on how deeply queued content may nest.
pub const DEFAULT_MAX_QUEUE_DEPTH: usize = 32;

/// Default extension appended to `exec` arguments that have none.
pub const DEFAULT_EXEC_EXTENSION: &str = "cfg";

/// Configuration for a [`Quackit`](crate::Quackit) instance.
///
/// With the `persist` feature this can be loaded from and saved to RON:
///
/// ```text
/// (
///     max_queue_depth: 16,
///     exec_root: "cfg",
///     exec_extension: "cfg",
/// )
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "persist", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "persist", serde(default))]
pub struct QuackitConfig {
    /// How many levels of queued content may nest below the top-level text.
    ///
    /// `0` forbids queuing content at all.
    pub max_queue_depth: usize,
    /// Directory `exec` resolves file names against.
    pub exec_root: PathBuf,
    /// Extension appended to `exec` file names without one.
    pub exec_extension: String,
}

impl Default for QuackitConfig {
    fn default() -> Self {
        Self {
            max_queue_depth: DEFAULT_MAX_QUEUE_DEPTH,
            exec_root: PathBuf::from("."),
            exec_extension: DEFAULT_EXEC_EXTENSION.to_string(),
        }
    }
}

impl QuackitConfig {
    /// Create the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the queue nesting limit.
    pub fn max_queue_depth(mut self, depth: usize) -> Self {
        self.max_queue_depth = depth;
        self
    }

    /// Set the directory `exec` loads files from.
    pub fn exec_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.exec_root = root.into();
        self
    }

    /// Set the extension appended to bare `exec` file names.
    pub fn exec_extension(mut self, extension: impl Into<String>) -> Self {
        self.exec_extension = extension.into();
        self
    }

    /// Resolve an `exec` argument to a path under [`exec_root`](Self::exec_root).
    ///
    /// The configured extension is added when `name` has none.
    pub fn resolve_exec(&self, name: &str) -> PathBuf {
        let mut path = self.exec_root.join(name);
        if path.extension().is_none() && !self.exec_extension.is_empty() {
            path.set_extension(&self.exec_extension);
        }
        path
    }
}
