//! Token model for `.cfg` text.
//!
//! A command is made of two kinds of tokens: bare words and quoted strings.

use std::fmt;

/// Discriminant of a [`Token`], for code that only cares about the kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// An unquoted word.
    Word,
    /// A double-quoted string.
    QuotedString,
}

impl TokenKind {
    /// Get the display name for this kind.
    pub fn name(&self) -> &'static str {
        match self {
            TokenKind::Word => "Word",
            TokenKind::QuotedString => "String",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single lexical unit of a command.
///
/// Text is trimmed of surrounding whitespace when the token is created and
/// never changes afterwards.
///
/// # Examples
///
/// ```
/// use quackit::{Token, TokenKind};
///
/// let token = Token::quoted("  sv_cheats 1; noclip ");
/// assert_eq!(token.kind(), TokenKind::QuotedString);
/// assert_eq!(token.text(), "sv_cheats 1; noclip");
/// assert_eq!(token.to_string(), r#"String{"sv_cheats 1; noclip"}"#);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Token {
    /// Unquoted run of non-whitespace characters.
    Word(Box<str>),
    /// Content between a pair of double quotes, quotes excluded.
    QuotedString(Box<str>),
}

impl Token {
    /// Create a word token.
    pub fn word(text: &str) -> Self {
        Token::Word(text.trim().into())
    }

    /// Create a quoted string token.
    pub fn quoted(text: &str) -> Self {
        Token::QuotedString(text.trim().into())
    }

    /// Get the kind of this token.
    #[inline]
    pub fn kind(&self) -> TokenKind {
        match self {
            Token::Word(_) => TokenKind::Word,
            Token::QuotedString(_) => TokenKind::QuotedString,
        }
    }

    /// Get the token text.
    #[inline]
    pub fn text(&self) -> &str {
        match self {
            Token::Word(text) | Token::QuotedString(text) => text,
        }
    }

    /// Check if this is a word.
    #[inline]
    pub fn is_word(&self) -> bool {
        matches!(self, Token::Word(_))
    }

    /// Check if this is a quoted string.
    #[inline]
    pub fn is_quoted(&self) -> bool {
        matches!(self, Token::QuotedString(_))
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Word(text) => write!(f, "Word{{'{}'}}", text),
            Token::QuotedString(text) => write!(f, "String{{\"{}\"}}", text),
        }
    }
}
