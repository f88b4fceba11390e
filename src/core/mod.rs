//! Core parser types.
//!
//! This module provides the fundamental building blocks:
//! - [`Token`] - Words and quoted strings
//! - [`Command`] - A run of tokens between delimiters
//! - [`Scanner`] - Single-pass scanner turning text into commands
//! - [`HandlerRegistry`] - Command name to handler mapping
//! - [`Quackit`] - The engine: scanning, dispatch, and queued content
//! - Messages for use inside a Bevy app

mod token;
mod command;
mod scanner;
mod registry;
mod quackit;
mod events;

pub use token::{Token, TokenKind};
pub use command::{Command, CommandArgs, Position};
pub use scanner::{Scanner, scan};
pub use registry::{HandlerRegistry, CommandHandler, HandlerError, RegistryError};
pub use quackit::{Quackit, ParseError};
pub use events::{CfgInputEvent, CfgCommandEvent, CfgErrorEvent, QuackitEventsPlugin};
