//! Parsed commands and the arguments handed to command handlers.

use std::fmt;

use super::Token;

/// A 1-based line/column position in `.cfg` text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    /// Line number, starting at 1.
    pub line: usize,
    /// Column number in characters, starting at 1.
    pub column: usize,
}

impl Position {
    /// Create a position from 1-based coordinates.
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self { line: 1, column: 1 }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// One command: a non-empty run of tokens between two delimiters.
///
/// The first token conventionally names the command. The scanner does not
/// check that it is a word; dispatch does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    tokens: Vec<Token>,
    position: Position,
}

impl Command {
    /// Create a command from its tokens.
    ///
    /// Returns `None` for an empty token list, since empty commands are never recorded.
    pub fn new(tokens: Vec<Token>, position: Position) -> Option<Self> {
        if tokens.is_empty() {
            None
        } else {
            Some(Self { tokens, position })
        }
    }

    /// Get all tokens, name included.
    #[inline]
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Get the leading token.
    #[inline]
    pub fn head(&self) -> &Token {
        &self.tokens[0]
    }

    /// Get the command name, if the leading token is a word.
    pub fn name(&self) -> Option<&str> {
        match self.head() {
            Token::Word(name) => Some(name),
            Token::QuotedString(_) => None,
        }
    }

    /// Get the tokens following the name.
    #[inline]
    pub fn args(&self) -> &[Token] {
        &self.tokens[1..]
    }

    /// Get the position of the leading token.
    #[inline]
    pub fn position(&self) -> Position {
        self.position
    }

    /// Get the number of tokens, name included.
    #[inline]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Always `false`; commands hold at least one token.
    #[inline]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Get the token texts, name included.
    pub fn texts(&self) -> Vec<&str> {
        self.tokens.iter().map(Token::text).collect()
    }
}

impl std::ops::Index<usize> for Command {
    type Output = Token;

    fn index(&self, index: usize) -> &Self::Output {
        &self.tokens[index]
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, token) in self.tokens.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", token)?;
        }
        f.write_str("]")
    }
}

/// Arguments passed to a command handler.
#[derive(Debug, Clone, Copy)]
pub struct CommandArgs<'a> {
    /// The command name.
    name: &'a str,
    /// Tokens after the name.
    args: &'a [Token],
    /// Where the command started.
    position: Position,
}

impl<'a> CommandArgs<'a> {
    /// Create handler arguments from a name and the remaining tokens.
    pub fn new(name: &'a str, args: &'a [Token], position: Position) -> Self {
        Self { name, args, position }
    }

    /// Get the command name.
    #[inline]
    pub fn name(&self) -> &'a str {
        self.name
    }

    /// Get the position of the command name.
    #[inline]
    pub fn position(&self) -> Position {
        self.position
    }

    /// Get the number of arguments.
    #[inline]
    pub fn len(&self) -> usize {
        self.args.len()
    }

    /// Check if there are no arguments.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }

    /// Get an argument token by index.
    #[inline]
    pub fn token(&self, index: usize) -> Option<&'a Token> {
        self.args.get(index)
    }

    /// Get an argument's text by index, regardless of its kind.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&'a str> {
        self.args.get(index).map(Token::text)
    }

    /// Get an argument or a default value.
    #[inline]
    pub fn get_or(&self, index: usize, default: &'a str) -> &'a str {
        self.get(index).unwrap_or(default)
    }

    /// Try to parse an argument as a specific type.
    pub fn parse<T: std::str::FromStr>(&self, index: usize) -> Option<T> {
        self.get(index).and_then(|s| s.parse().ok())
    }

    /// Parse an argument with a default value.
    pub fn parse_or<T: std::str::FromStr>(&self, index: usize, default: T) -> T {
        self.parse(index).unwrap_or(default)
    }

    /// Get all argument tokens.
    #[inline]
    pub fn as_slice(&self) -> &'a [Token] {
        self.args
    }

    /// Iterate over argument texts.
    pub fn iter(&self) -> impl Iterator<Item = &'a str> + use<'a> {
        self.args.iter().map(Token::text)
    }

    /// Join all argument texts with a separator.
    pub fn join(&self, separator: &str) -> String {
        self.iter().collect::<Vec<_>>().join(separator)
    }
}
