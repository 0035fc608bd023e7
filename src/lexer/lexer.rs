use lazy_static::lazy_static;
use regex::{Match, Regex};
use std::collections::HashSet;
use tracing::{debug, trace, warn};

use crate::{
    errors::errors::{Error, ErrorImpl},
    Position, MK_TOKEN,
};

use super::tokens::{Token, TokenKind, KEYWORD_LOOKUP, SYMBOLS};

lazy_static! {
    static ref COMMENT_REGEX: Regex = Regex::new("^[ \\t]*//([^\\n]*)").unwrap();
    static ref WHITESPACE_REGEX: Regex = Regex::new("^[ \\t\\r]+").unwrap();
    static ref WORD_REGEX: Regex = Regex::new("^[a-zA-Z0-9_]+").unwrap();
    static ref IDENTIFIER_REGEX: Regex = Regex::new("^:?[a-zA-Z]+[a-zA-Z0-9_]*").unwrap();
    static ref NUMBER_REGEX: Regex = Regex::new("^[0-9]+(\\.[0-9]+)?").unwrap();
}

/// Tries to recognize a token at the cursor. On success the token is
/// returned and the cursor has moved past it; on failure nothing changes.
pub type Recognizer = fn(&mut Tokenizer) -> Option<Token>;

/// Recognizers in priority order, the first match wins.
const RECOGNIZERS: [Recognizer; 9] = [
    comment_recognizer,
    end_of_input_recognizer,
    whitespace_recognizer,
    keyword_recognizer,
    newline_recognizer,
    symbol_recognizer,
    identifier_recognizer,
    string_recognizer,
    number_recognizer,
];

/// Pull-based tokenizer over a single source text.
///
/// `next_token` always returns a token. Once the input is consumed it keeps
/// returning `EndOfInput` without moving. The [`Iterator`] impl stops after
/// the first `EndOfInput` instead.
///
/// The symbol table, keyword set and the comment, identifier and number
/// patterns can be replaced with the `with_*` builders. Replacement patterns
/// only count when they match at the cursor and consume something.
#[derive(Debug, Clone)]
pub struct Tokenizer {
    source: String,
    offset: usize,
    position: Position,
    finished: bool,
    symbols: Vec<String>,
    keywords: HashSet<String>,
    comment_regex: Regex,
    identifier_regex: Regex,
    number_regex: Regex,
}

impl Default for Tokenizer {
    fn default() -> Self {
        Tokenizer::new()
    }
}

impl Tokenizer {
    pub fn new() -> Tokenizer {
        Tokenizer {
            source: String::new(),
            offset: 0,
            position: Position::start(),
            finished: false,
            symbols: SYMBOLS.iter().map(|symbol| symbol.to_string()).collect(),
            keywords: KEYWORD_LOOKUP.iter().map(|kw| kw.to_string()).collect(),
            comment_regex: COMMENT_REGEX.clone(),
            identifier_regex: IDENTIFIER_REGEX.clone(),
            number_regex: NUMBER_REGEX.clone(),
        }
    }

    /// Replaces the symbol table. Symbols are tried in the given order, so
    /// longer spellings must precede their prefixes.
    pub fn with_symbols<I, S>(mut self, symbols: I) -> Tokenizer
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.symbols = symbols
            .into_iter()
            .map(Into::<String>::into)
            .filter(|symbol| !symbol.is_empty())
            .collect();
        self
    }

    /// Replaces the keyword set. Keywords match case-insensitively and only
    /// as whole words.
    pub fn with_keywords<I, S>(mut self, keywords: I) -> Tokenizer
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.keywords = keywords
            .into_iter()
            .map(|kw| kw.as_ref().to_ascii_lowercase())
            .filter(|kw| !kw.is_empty())
            .collect();
        self
    }

    /// Replaces the comment pattern. The first capture group, when present,
    /// becomes the token value; otherwise the whole match does.
    pub fn with_comment_regex(mut self, regex: Regex) -> Tokenizer {
        self.comment_regex = regex;
        self
    }

    pub fn with_identifier_regex(mut self, regex: Regex) -> Tokenizer {
        self.identifier_regex = regex;
        self
    }

    pub fn with_number_regex(mut self, regex: Regex) -> Tokenizer {
        self.number_regex = regex;
        self
    }

    /// Resets the tokenizer to the start of `source`.
    pub fn load(&mut self, source: impl Into<String>) {
        self.source = source.into();
        self.offset = 0;
        self.position = Position::start();
        self.finished = false;

        debug!(bytes = self.source.len(), "loaded source");
    }

    /// Returns the next token and advances past it.
    pub fn next_token(&mut self) -> Token {
        let token = RECOGNIZERS
            .iter()
            .find_map(|recognizer| recognizer(self))
            .unwrap_or_else(|| unknown_fallback(self));

        trace!(kind = %token.kind, value = ?token.value, line = token.position.line, column = token.position.column, "token");

        token
    }

    /// Where the next token will start.
    pub fn position(&self) -> Position {
        self.position
    }

    pub fn is_exhausted(&self) -> bool {
        self.offset >= self.source.len()
    }

    fn remainder(&self) -> &str {
        &self.source[self.offset..]
    }

    fn new_token(&self, kind: TokenKind, value: String) -> Token {
        MK_TOKEN!(kind, value, self.position)
    }

    /// Moves the cursor `amount` bytes forward. Only the column moves, by
    /// the number of characters consumed; lines change in
    /// `newline_recognizer`.
    fn advance_n(&mut self, amount: usize) {
        let consumed = &self.source[self.offset..self.offset + amount];

        self.position = self.position.add(consumed.chars().count());
        self.offset += amount;
    }

    fn take_token(&mut self, kind: TokenKind, value: String, consumed: usize) -> Token {
        let token = self.new_token(kind, value);
        self.advance_n(consumed);
        token
    }
}

impl Iterator for Tokenizer {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        if self.finished {
            return None;
        }

        let token = self.next_token();
        if token.is_eof() {
            self.finished = true;
        }

        Some(token)
    }
}

/// `regex` matched at the very start of `text`, consuming at least one byte.
fn leading_match<'t>(regex: &Regex, text: &'t str) -> Option<Match<'t>> {
    regex
        .find(text)
        .filter(|matched| matched.start() == 0 && !matched.is_empty())
}

fn comment_recognizer(lexer: &mut Tokenizer) -> Option<Token> {
    let captures = lexer.comment_regex.captures(lexer.remainder())?;
    let whole = captures.get(0)?;
    if whole.start() != 0 || whole.is_empty() {
        return None;
    }

    let consumed = whole.end();
    let value = captures.get(1).unwrap_or(whole).as_str().to_string();

    Some(lexer.take_token(TokenKind::Comment, value, consumed))
}

fn end_of_input_recognizer(lexer: &mut Tokenizer) -> Option<Token> {
    if lexer.is_exhausted() {
        return Some(lexer.new_token(TokenKind::EndOfInput, String::new()));
    }

    None
}

fn whitespace_recognizer(lexer: &mut Tokenizer) -> Option<Token> {
    let matched = WHITESPACE_REGEX.find(lexer.remainder())?;
    let value = matched.as_str().to_string();
    let consumed = matched.end();

    Some(lexer.take_token(TokenKind::Whitespace, value, consumed))
}

fn keyword_recognizer(lexer: &mut Tokenizer) -> Option<Token> {
    // The whole word must be the keyword, so `ifx` stays an identifier.
    let word = WORD_REGEX.find(lexer.remainder())?;
    let value = word.as_str().to_ascii_lowercase();

    if !lexer.keywords.contains(&value) {
        return None;
    }

    let consumed = word.end();
    Some(lexer.take_token(TokenKind::Keyword, value, consumed))
}

fn newline_recognizer(lexer: &mut Tokenizer) -> Option<Token> {
    if !lexer.remainder().starts_with('\n') {
        return None;
    }

    let token = lexer.new_token(TokenKind::Newline, String::new());
    lexer.position = Position::new(lexer.position.line + 1, 0);
    lexer.advance_n(1);

    Some(token)
}

fn symbol_recognizer(lexer: &mut Tokenizer) -> Option<Token> {
    let remaining = lexer.remainder();
    let symbol = lexer
        .symbols
        .iter()
        .find(|symbol| remaining.starts_with(symbol.as_str()))?
        .clone();
    let consumed = symbol.len();

    Some(lexer.take_token(TokenKind::Symbol, symbol, consumed))
}

fn identifier_recognizer(lexer: &mut Tokenizer) -> Option<Token> {
    let matched = leading_match(&lexer.identifier_regex, lexer.remainder())?;
    let value = matched.as_str().to_ascii_lowercase();
    let consumed = matched.end();

    Some(lexer.take_token(TokenKind::Identifier, value, consumed))
}

fn string_recognizer(lexer: &mut Tokenizer) -> Option<Token> {
    let remaining = lexer.remainder();
    if remaining.len() < 2 || !remaining.starts_with('"') {
        return None;
    }

    let close = closing_quote(&remaining[1..])? + 1;
    let value = remaining[1..close].to_string();

    Some(lexer.take_token(TokenKind::String, value, close + 1))
}

/// Byte index of the first unescaped `"` in `body`. Escape sequences are
/// skipped, not decoded.
fn closing_quote(body: &str) -> Option<usize> {
    let mut escaped = false;

    for (i, ch) in body.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }

        match ch {
            '\\' => escaped = true,
            '"' => return Some(i),
            _ => {}
        }
    }

    None
}

fn number_recognizer(lexer: &mut Tokenizer) -> Option<Token> {
    let matched = leading_match(&lexer.number_regex, lexer.remainder())?;
    let value = matched.as_str().to_string();
    let consumed = matched.end();

    Some(lexer.take_token(TokenKind::Number, value, consumed))
}

fn unknown_fallback(lexer: &mut Tokenizer) -> Token {
    match lexer.remainder().chars().next() {
        Some(ch) => {
            debug!(character = ?ch, line = lexer.position.line, column = lexer.position.column, "unrecognised character");
            lexer.take_token(TokenKind::Unknown, ch.to_string(), ch.len_utf8())
        }
        None => lexer.new_token(TokenKind::EndOfInput, String::new()),
    }
}

/// Tokenizes `source` up to and including the first `EndOfInput` token.
pub fn tokenize(source: impl Into<String>) -> Vec<Token> {
    let mut lex = Tokenizer::new();
    lex.load(source);
    lex.collect()
}

/// Like [`tokenize`], but fails on the first token the language does not
/// recognise.
pub fn tokenize_strict(source: impl Into<String>) -> Result<Vec<Token>, Error> {
    let mut lex = Tokenizer::new();
    lex.load(source);

    let mut tokens = vec![];
    for token in lex {
        if token.kind == TokenKind::Unknown {
            warn!(value = ?token.value, line = token.position.line, column = token.position.column, "rejecting unrecognised token");

            let error = if token.value == "\"" {
                ErrorImpl::UnterminatedString
            } else {
                ErrorImpl::UnrecognisedToken { token: token.value }
            };
            return Err(Error::new(error, token.position));
        }

        tokens.push(token);
    }

    Ok(tokens)
}
