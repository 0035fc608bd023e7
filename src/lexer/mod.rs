//! Lexical analysis module.
//!
//! This module contains the tokenizer that turns source text into a flat
//! stream of positioned tokens for a downstream parser. It handles:
//!
//! - Comments, whitespace and line breaks (emitted, not skipped)
//! - Case-insensitive keywords and identifiers
//! - Operators and punctuation from an ordered symbol table
//! - String and number literals
//! - A single-character `Unknown` fallback so scanning never stalls

pub mod lexer;
pub mod tokens;
