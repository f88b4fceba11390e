//! Handler registry.
//!
//! Maps command names to the callbacks run when those commands are parsed.

use std::collections::HashMap;
use std::fmt;

use bevy::log::debug;

use super::{CommandArgs, Quackit};

/// Error type returned by command handlers.
pub type HandlerError = Box<dyn std::error::Error + Send + Sync>;

/// Type alias for command handler functions.
///
/// Handlers receive:
/// - `quackit`: The engine running the parse, for queuing content or reading the position
/// - `args`: The command name and its argument tokens
pub type CommandHandler =
    Box<dyn FnMut(&mut Quackit, &CommandArgs<'_>) -> Result<(), HandlerError> + Send + Sync>;

/// Errors from handler registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// A handler is already registered under this name.
    AlreadyRegistered(Box<str>),
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistryError::AlreadyRegistered(name) => {
                write!(f, "handler for '{}' is already registered", name)
            }
        }
    }
}

impl std::error::Error for RegistryError {}

/// Stores command handlers by name.
///
/// Registration never overwrites: a name keeps its first handler for the
/// lifetime of the registry. A handler taken out for dispatch leaves an empty
/// slot under its name, so the name stays registered while it runs.
#[derive(Default)]
pub struct HandlerRegistry {
    handlers: HashMap<Box<str>, Option<CommandHandler>>,
}

impl HandlerRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler for a command.
    pub fn register(&mut self, name: impl Into<Box<str>>, handler: CommandHandler) -> Result<(), RegistryError> {
        let name = name.into();
        if self.handlers.contains_key(&name) {
            return Err(RegistryError::AlreadyRegistered(name));
        }

        debug!("Quackit: registered handler '{}'", name);
        self.handlers.insert(name, Some(handler));
        Ok(())
    }

    /// Get a handler by name.
    ///
    /// Returns `None` while the handler is being dispatched.
    pub fn get(&self, name: &str) -> Option<&CommandHandler> {
        self.handlers.get(name).and_then(Option::as_ref)
    }

    /// Check if a handler is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    /// Get the number of registered handlers.
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Iterate over registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.handlers.keys().map(|k| k.as_ref()).collect();
        names.sort_unstable();
        names
    }

    /// Take a handler temporarily for execution.
    ///
    /// Use `put` to return the handler after execution.
    pub(crate) fn take(&mut self, name: &str) -> Option<CommandHandler> {
        self.handlers.get_mut(name)?.take()
    }

    /// Put a handler back after temporary removal.
    pub(crate) fn put(&mut self, name: &str, handler: CommandHandler) {
        if let Some(slot) = self.handlers.get_mut(name) {
            *slot = Some(handler);
        }
    }
}

impl fmt::Debug for HandlerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerRegistry")
            .field("names", &self.names())
            .finish()
    }
}
