//! Single-pass scanner for `.cfg` text.
//!
//! Turns raw text into [`Command`]s one at a time, so the caller can dispatch
//! each command before scanning resumes.
//!
//! # Syntax
//!
//! - Commands are separated by `;` or newlines
//! - Tokens are separated by whitespace
//! - `"..."` is a quoted string; `;` and newlines inside it are content, no escapes
//! - `#` and `//` start a comment running to end of line
//! - `/* ... */` is a block comment, possibly spanning lines
//!
//! Unterminated quoted strings and block comments run to the end of the input.

use std::mem;

use super::{Command, Position, Token};

/// Scanner state for one piece of `.cfg` text.
///
/// All state lives in the struct, so nested scans (queued content) never
/// share a cursor or token accumulator.
///
/// # Examples
///
/// ```
/// use quackit::Scanner;
///
/// let mut scanner = Scanner::new("sv_cheats 1\nbind g \"impulse 101\"");
/// let first = scanner.next_command().unwrap();
/// assert_eq!(first.texts(), vec!["sv_cheats", "1"]);
/// let second = scanner.next_command().unwrap();
/// assert_eq!(second.texts(), vec!["bind", "g", "impulse 101"]);
/// assert!(scanner.next_command().is_none());
/// ```
#[derive(Debug, Clone)]
pub struct Scanner<'a> {
    text: &'a str,
    pos: usize,
    /// Zero-based line.
    line: usize,
    /// Zero-based column, counted in characters.
    column: usize,
    tokens: Vec<Token>,
    /// Position of the first token in `tokens`.
    start: Option<Position>,
}

impl<'a> Scanner<'a> {
    /// Create a scanner at the start of `text`.
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            pos: 0,
            line: 0,
            column: 0,
            tokens: Vec::new(),
            start: None,
        }
    }

    /// Get the cursor as a 1-based position.
    #[inline]
    pub fn cursor(&self) -> Position {
        Position::new(self.line + 1, self.column + 1)
    }

    /// Check if the whole input has been consumed.
    #[inline]
    pub fn is_finished(&self) -> bool {
        self.pos >= self.text.len()
    }

    /// Scan up to and including the next command.
    ///
    /// Returns `None` once the input is exhausted and no tokens are pending.
    pub fn next_command(&mut self) -> Option<Command> {
        while let Some(b) = self.peek(0) {
            match b {
                b'"' => self.quoted_string(),
                b'#' => self.line_comment(),
                b'/' if self.peek(1) == Some(b'/') => self.line_comment(),
                b'/' if self.peek(1) == Some(b'*') => self.block_comment(),
                b';' | b'\n' => {
                    self.advance();
                    if let Some(command) = self.flush() {
                        return Some(command);
                    }
                }
                b if b <= b' ' => self.advance(),
                _ => self.word(),
            }
        }

        self.flush()
    }

    #[inline]
    fn peek(&self, offset: usize) -> Option<u8> {
        self.text.as_bytes().get(self.pos + offset).copied()
    }

    /// Consume one byte, keeping line and column in step.
    fn advance(&mut self) {
        let Some(b) = self.peek(0) else {
            return;
        };
        self.pos += 1;

        if b == b'\n' {
            self.line += 1;
            self.column = 0;
        } else if b & 0xC0 != 0x80 {
            // UTF-8 continuation bytes do not start a new column.
            self.column += 1;
        }
    }

    fn push(&mut self, token: Token, at: Position) {
        if self.tokens.is_empty() {
            self.start = Some(at);
        }
        self.tokens.push(token);
    }

    fn flush(&mut self) -> Option<Command> {
        let at = self.start.take().unwrap_or_default();
        Command::new(mem::take(&mut self.tokens), at)
    }

    fn line_comment(&mut self) {
        while self.peek(0).is_some_and(|b| b != b'\n') {
            self.advance();
        }
    }

    fn block_comment(&mut self) {
        // Skip the opener so `/*/` does not close itself.
        self.advance();
        self.advance();

        while let Some(b) = self.peek(0) {
            if b == b'*' && self.peek(1) == Some(b'/') {
                self.advance();
                self.advance();
                return;
            }
            self.advance();
        }
    }

    fn quoted_string(&mut self) {
        let at = self.cursor();
        self.advance();

        let start = self.pos;
        while self.peek(0).is_some_and(|b| b != b'"') {
            self.advance();
        }
        let token = Token::quoted(&self.text[start..self.pos]);

        // Closing quote, if the string was terminated.
        self.advance();
        self.push(token, at);
    }

    fn word(&mut self) {
        let at = self.cursor();
        let start = self.pos;

        while self.peek(0).is_some_and(|b| b > b' ') {
            self.advance();
        }

        let token = Token::word(&self.text[start..self.pos]);
        self.push(token, at);
    }
}

impl Iterator for Scanner<'_> {
    type Item = Command;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_command()
    }
}

/// Scan `text` into commands without dispatching them.
///
/// # Examples
///
/// ```
/// use quackit::scan;
///
/// let commands = scan("bind v \"sv_cheats 1; noclip\" // fly\nsay hi");
/// assert_eq!(commands.len(), 2);
/// assert_eq!(commands[0].texts(), vec!["bind", "v", "sv_cheats 1; noclip"]);
/// ```
pub fn scan(text: &str) -> Vec<Command> {
    Scanner::new(text).collect()
}
