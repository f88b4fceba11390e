//! The parsing engine.
//!
//! [`Quackit`] scans `.cfg` text, dispatches every completed command to its
//! registered handler, and resolves content queued by handlers.

use std::collections::VecDeque;
use std::fmt;
use std::io::Read;
use std::mem;

use bevy::log::{debug, trace};
use bevy::prelude::Resource;

use super::{
    Command, CommandArgs, HandlerError, HandlerRegistry, Position, RegistryError, Scanner, Token,
};
use crate::config::QuackitConfig;

/// Errors that abort a parse.
#[derive(Debug)]
pub enum ParseError {
    /// A command's leading token is not a word.
    MalformedCommand {
        /// Where the command starts.
        position: Position,
        /// The offending leading token.
        token: Token,
    },
    /// A handler returned an error.
    HandlerFailed {
        /// Name of the command whose handler failed.
        command: Box<str>,
        /// Where the command starts.
        position: Position,
        /// The handler's error.
        source: HandlerError,
    },
    /// A handler panicked.
    HandlerPanicked {
        /// Name of the command whose handler panicked.
        command: Box<str>,
        /// The panic message.
        message: String,
    },
    /// Queued content nested deeper than the configured limit.
    QueueDepthExceeded {
        /// The configured limit.
        limit: usize,
    },
    /// `parse` was called from inside a handler.
    Reentrant,
    /// The input stream could not be read.
    Io(std::io::Error),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::MalformedCommand { position, token } => {
                write!(f, "malformed command at {}: expected a command name, got {}", position, token)
            }
            ParseError::HandlerFailed { command, position, source } => {
                write!(f, "handler for '{}' at {} failed: {}", command, position, source)
            }
            ParseError::HandlerPanicked { command, message } => {
                write!(f, "handler for '{}' panicked: {}", command, message)
            }
            ParseError::QueueDepthExceeded { limit } => {
                write!(f, "queued content nested deeper than {} levels", limit)
            }
            ParseError::Reentrant => write!(f, "parse called while a parse is already running"),
            ParseError::Io(e) => write!(f, "failed to read input: {}", e),
        }
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ParseError::HandlerFailed { source, .. } => Some(source.as_ref()),
            ParseError::Io(e) => Some(e),
            _ => None,
        }
    }
}

/// A Quake/Valve `.cfg` parser instance.
///
/// Holds the registered handlers, the content queue, the cursor of the scan
/// currently running, and the commands produced by the last top-level parse.
///
/// # Examples
///
/// ```
/// use quackit::Quackit;
///
/// let mut quackit = Quackit::new();
/// quackit.register_handler("exec", |q, args| {
///     if args.get(0) == Some("autoexec") {
///         q.queue_content("sv_cheats 1\ngod");
///     }
///     Ok(())
/// }).unwrap();
///
/// quackit.parse("exec autoexec\nsay hi").unwrap();
///
/// let names: Vec<_> = quackit.parsed_commands().iter().filter_map(|c| c.name()).collect();
/// assert_eq!(names, vec!["exec", "say", "sv_cheats", "god"]);
/// ```
#[derive(Resource, Default)]
pub struct Quackit {
    handlers: HandlerRegistry,
    config: QuackitConfig,
    parsed: Vec<Command>,
    queue: VecDeque<String>,
    position: Position,
    running: bool,
}

impl Quackit {
    /// Create a parser with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a parser with the given configuration.
    pub fn with_config(config: QuackitConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Get the configuration.
    #[inline]
    pub fn config(&self) -> &QuackitConfig {
        &self.config
    }

    /// Get the registered handlers.
    #[inline]
    pub fn handlers(&self) -> &HandlerRegistry {
        &self.handlers
    }

    /// Register a handler for a command.
    ///
    /// Fails with [`RegistryError::AlreadyRegistered`] if the name already has
    /// a handler; the existing handler is kept.
    pub fn register_handler<F>(&mut self, name: impl Into<Box<str>>, handler: F) -> Result<(), RegistryError>
    where
        F: FnMut(&mut Quackit, &CommandArgs<'_>) -> Result<(), HandlerError> + Send + Sync + 'static,
    {
        self.handlers.register(name, Box::new(handler))
    }

    /// Schedule `text` to be parsed after the scan currently running.
    ///
    /// Meant to be called from handlers. Entries are parsed in the order they
    /// were queued, each one fully (including whatever it queues) before the next.
    /// Content queued outside a parse is picked up after the next top-level scan.
    pub fn queue_content(&mut self, text: impl Into<String>) {
        self.queue.push_back(text.into());
    }

    /// Get the commands produced by the last call to [`parse`](Self::parse).
    ///
    /// After a failed parse this holds the commands completed before the failure.
    #[inline]
    pub fn parsed_commands(&self) -> &[Command] {
        &self.parsed
    }

    /// Get the cursor position.
    ///
    /// While a parse runs this is the cursor of the scan in progress, which
    /// may be queued content. Once a parse succeeds it is the end of the
    /// top-level text.
    #[inline]
    pub fn current_position(&self) -> Position {
        self.position
    }

    /// Read `reader` to the end and parse its contents.
    pub fn parse_reader(&mut self, mut reader: impl Read) -> Result<(), ParseError> {
        let mut text = String::new();
        reader.read_to_string(&mut text).map_err(ParseError::Io)?;
        self.parse(&text)
    }

    /// Parse `text`, dispatching each command to its handler as it is completed.
    ///
    /// Replaces the stored command list. Any error aborts the whole parse,
    /// including content still waiting in the queue.
    pub fn parse(&mut self, text: &str) -> Result<(), ParseError> {
        if self.running {
            return Err(ParseError::Reentrant);
        }

        self.running = true;
        self.parsed.clear();

        let result = self.parse_all(text);

        self.queue.clear();
        self.running = false;

        match &result {
            Ok(()) => debug!("Quackit: parsed {} commands", self.parsed.len()),
            Err(e) => debug!("Quackit: parse failed after {} commands: {}", self.parsed.len(), e),
        }
        result
    }

    /// Scan the top-level text, then drain queued content depth-first.
    fn parse_all(&mut self, text: &str) -> Result<(), ParseError> {
        let end = self.scan(text)?;

        // One queue per scan level; the innermost level is drained first.
        let mut levels: Vec<VecDeque<String>> = Vec::new();
        self.push_level(&mut levels)?;

        while let Some(level) = levels.last_mut() {
            let Some(content) = level.pop_front() else {
                levels.pop();
                continue;
            };

            trace!("Quackit: parsing queued content at depth {}", levels.len());
            self.scan(&content)?;
            self.push_level(&mut levels)?;
        }

        self.position = end;
        Ok(())
    }

    fn push_level(&mut self, levels: &mut Vec<VecDeque<String>>) -> Result<(), ParseError> {
        let queued = mem::take(&mut self.queue);
        if queued.is_empty() {
            return Ok(());
        }

        let limit = self.config.max_queue_depth;
        if levels.len() >= limit {
            return Err(ParseError::QueueDepthExceeded { limit });
        }

        levels.push(queued);
        Ok(())
    }

    /// Scan one piece of text, dispatching and recording every command.
    fn scan(&mut self, text: &str) -> Result<Position, ParseError> {
        let mut scanner = Scanner::new(text);
        self.position = scanner.cursor();

        while let Some(command) = scanner.next_command() {
            self.position = scanner.cursor();
            self.dispatch(&command)?;
            self.parsed.push(command);
        }

        self.position = scanner.cursor();
        Ok(self.position)
    }

    fn dispatch(&mut self, command: &Command) -> Result<(), ParseError> {
        let Some(name) = command.name() else {
            return Err(ParseError::MalformedCommand {
                position: command.position(),
                token: command.head().clone(),
            });
        };

        // Take the handler out so it can borrow the engine mutably.
        let Some(mut handler) = self.handlers.take(name) else {
            trace!("Quackit: no handler for '{}'", name);
            return Ok(());
        };

        let args = CommandArgs::new(name, command.args(), command.position());
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| handler(self, &args)));

        // Always put the handler back, regardless of panic
        self.handlers.put(name, handler);

        match result {
            Ok(Ok(())) => Ok(()),
            Ok(Err(source)) => Err(ParseError::HandlerFailed {
                command: name.into(),
                position: command.position(),
                source,
            }),
            Err(panic_info) => {
                let message = if let Some(s) = panic_info.downcast_ref::<&str>() {
                    s.to_string()
                } else if let Some(s) = panic_info.downcast_ref::<String>() {
                    s.clone()
                } else {
                    "Unknown panic".to_string()
                };
                Err(ParseError::HandlerPanicked {
                    command: name.into(),
                    message,
                })
            }
        }
    }
}

impl fmt::Debug for Quackit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Quackit")
            .field("handlers", &self.handlers)
            .field("config", &self.config)
            .field("parsed", &self.parsed.len())
            .field("position", &self.position)
            .finish_non_exhaustive()
    }
}
