//! Error types for strict tokenization and the command line front end.
//!
//! The tokenizer itself never fails: anything it cannot classify becomes an
//! `Unknown` token. Callers that want hard failures go through
//! `tokenize_strict`, which turns the first anomaly into an [`errors::Error`]
//! carrying the position where it starts.

pub mod errors;

#[cfg(test)]
mod tests;
