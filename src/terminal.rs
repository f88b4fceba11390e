//! Terminal backend for command-line use.
//!
//! Renders parsed commands for the `quackit` binary, which reads `.cfg`
//! text from stdin.

use std::io::{self, Write};

use crate::core::{Command, Token};

/// Configuration for terminal output.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalConfig {
    /// Whether to use colored output (ANSI escape codes).
    pub colored: bool,
}

impl TerminalConfig {
    /// Build the config from command-line arguments (`--color`).
    pub fn from_args(args: impl IntoIterator<Item = String>) -> Self {
        Self {
            colored: args.into_iter().any(|arg| arg == "--color"),
        }
    }
}

/// Print one line per command, numbered from 1.
pub fn render_commands(
    commands: &[Command],
    config: TerminalConfig,
    out: &mut impl Write,
) -> io::Result<()> {
    for (i, command) in commands.iter().enumerate() {
        if config.colored {
            let tokens: Vec<String> = command.tokens().iter().map(colored_token).collect();
            writeln!(out, "\x1b[90m{:>3} {}\x1b[0m [{}]", i + 1, command.position(), tokens.join(", "))?;
        } else {
            writeln!(out, "{:>3} {} {}", i + 1, command.position(), command)?;
        }
    }
    out.flush()
}

fn colored_token(token: &Token) -> String {
    let color = match token {
        Token::Word(_) => "\x1b[36m",
        Token::QuotedString(_) => "\x1b[32m",
    };
    format!("{}{}\x1b[0m", color, token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::scan;

    #[test]
    fn test_config_from_args() {
        let args = ["quackit", "--color"].map(String::from);
        assert!(TerminalConfig::from_args(args).colored);
        assert!(!TerminalConfig::from_args(Vec::new()).colored);
    }

    #[test]
    fn test_render_plain() {
        let commands = scan("say \"hi\"\n  god");
        let mut out = Vec::new();
        render_commands(&commands, TerminalConfig::default(), &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, "  1 1:1 [Word{'say'}, String{\"hi\"}]\n  2 2:3 [Word{'god'}]\n");
    }

    #[test]
    fn test_render_colored() {
        let commands = scan("bind g \"+jump\"");
        let mut out = Vec::new();
        render_commands(&commands, TerminalConfig { colored: true }, &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("\x1b[36mWord{'bind'}\x1b[0m"));
        assert!(text.contains("\x1b[32mString{\"+jump\"}\x1b[0m"));
    }
}
