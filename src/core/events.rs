//! Messages connecting the parser to a Bevy app.
//!
//! - App -> parser: `.cfg` text to parse
//! - Parser -> app: parsed commands and parse failures

use bevy::prelude::*;

use super::{Command, ParseError};

/// Message carrying `.cfg` text to parse.
///
/// # Examples
///
/// ```ignore
/// fn load_autoexec(mut events: MessageWriter<CfgInputEvent>) {
///     events.write(CfgInputEvent::new("exec autoexec"));
/// }
/// ```
#[derive(Message, Debug, Clone)]
pub struct CfgInputEvent {
    /// The raw `.cfg` text.
    pub text: String,
}

impl CfgInputEvent {
    /// Create a new input event.
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// Message sent for every command produced by a successful parse, in order.
///
/// # Examples
///
/// ```ignore
/// fn on_command(mut events: MessageReader<CfgCommandEvent>) {
///     for event in events.read() {
///         info!("{}", event.command);
///     }
/// }
/// ```
#[derive(Message, Debug, Clone)]
pub struct CfgCommandEvent {
    /// The parsed command.
    pub command: Command,
}

impl CfgCommandEvent {
    /// Create a new command event.
    pub fn new(command: Command) -> Self {
        Self { command }
    }
}

/// Message sent when parsing submitted text fails.
#[derive(Message, Debug, Clone)]
pub struct CfgErrorEvent {
    /// The rendered error.
    pub message: String,
}

impl CfgErrorEvent {
    /// Create a new error event.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<&ParseError> for CfgErrorEvent {
    fn from(error: &ParseError) -> Self {
        Self::new(error.to_string())
    }
}

/// Plugin that registers all parser messages.
pub struct QuackitEventsPlugin;

impl Plugin for QuackitEventsPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<CfgInputEvent>()
            .add_message::<CfgCommandEvent>()
            .add_message::<CfgErrorEvent>();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Position, Token};

    #[test]
    fn test_cfg_input_event() {
        let event = CfgInputEvent::new("exec autoexec");
        assert_eq!(event.text, "exec autoexec");
    }

    #[test]
    fn test_cfg_command_event() {
        let command = Command::new(vec![Token::word("god")], Position::default()).unwrap();
        let event = CfgCommandEvent::new(command.clone());
        assert_eq!(event.command, command);
    }

    #[test]
    fn test_cfg_error_event_from_parse_error() {
        let error = ParseError::QueueDepthExceeded { limit: 2 };
        let event = CfgErrorEvent::from(&error);
        assert_eq!(event.message, "queued content nested deeper than 2 levels");
    }
}
