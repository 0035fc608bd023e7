use lazy_static::lazy_static;
use std::{collections::HashSet, fmt::Display};

use crate::Position;

lazy_static! {
    pub static ref KEYWORD_LOOKUP: HashSet<&'static str> = {
        let mut set = HashSet::new();
        set.insert("if");
        set.insert("else");
        set.insert("end");
        set.insert("then");
        set.insert("goto");
        set.insert("and");
        set.insert("or");
        set.insert("not");
        set
    };
}

/// Operators and punctuation, tried in order. Two-character spellings must
/// come before their one-character prefixes.
pub const SYMBOLS: &[&str] = &[
    "++", "--", ">=", "<=", "!=", "==", "+=", "-=", "*=", "/=", "%=",
    "=", ">", "<", "+", "-", "*", "/", "^", "%", ",", "(", ")",
];

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    Identifier,
    Number,
    String,
    Keyword,
    Symbol,
    Newline,
    EndOfInput,
    Comment,
    Whitespace,
    Unknown,
}

impl TokenKind {
    /// Whitespace and comments, which parsers usually drop.
    pub fn is_trivia(&self) -> bool {
        matches!(self, TokenKind::Whitespace | TokenKind::Comment)
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            TokenKind::Identifier => "ID",
            TokenKind::Number => "Number",
            TokenKind::String => "String",
            TokenKind::Keyword => "Keyword",
            TokenKind::Symbol => "Symbol",
            TokenKind::Newline => "Newline",
            TokenKind::EndOfInput => "EOF",
            TokenKind::Comment => "Comment",
            TokenKind::Whitespace => "Whitespace",
            TokenKind::Unknown => "Unknown",
        };

        write!(f, "{}", name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub position: Position,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}, Type: {}", self.position, self.kind)?;
        if !self.value.is_empty() {
            write!(f, ", Value: '{}'", self.value)?;
        }
        writeln!(f)
    }
}

impl Token {
    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::EndOfInput
    }
}
