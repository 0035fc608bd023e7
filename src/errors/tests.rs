//! Unit tests for error handling.

use crate::errors::errors::{Error, ErrorImpl, ErrorTip};
use crate::{render_error, Position};

#[test]
fn test_error_creation() {
    let error = Error::new(
        ErrorImpl::UnrecognisedToken {
            token: "@".to_string(),
        },
        Position::new(1, 10),
    );

    assert_eq!(error.get_error_name(), "UnrecognisedToken");
    assert_eq!(error.get_position(), &Position::new(1, 10));
}

#[test]
fn test_error_names() {
    let error = Error::new(ErrorImpl::UnterminatedString, Position::start());
    assert_eq!(error.get_error_name(), "UnterminatedString");

    let error = Error::new(
        ErrorImpl::Io {
            path: "missing.dsl".to_string(),
            message: "not found".to_string(),
        },
        Position::start(),
    );
    assert_eq!(error.get_error_name(), "Io");
}

#[test]
fn test_error_display() {
    let error = Error::new(
        ErrorImpl::UnrecognisedToken {
            token: "@".to_string(),
        },
        Position::new(1, 5),
    );

    assert_eq!(
        error.to_string(),
        "unrecognised token: \"@\" at Line: 1, Column: 5"
    );
}

#[test]
fn test_error_tip_none() {
    let error = Error::new(
        ErrorImpl::Io {
            path: "missing.dsl".to_string(),
            message: "not found".to_string(),
        },
        Position::start(),
    );

    assert!(matches!(error.get_tip(), ErrorTip::None));
}

#[test]
fn test_error_tip_suggestion() {
    let error = Error::new(ErrorImpl::UnterminatedString, Position::start());

    match error.get_tip() {
        ErrorTip::Suggestion(tip) => assert!(tip.contains("closing quote")),
        _ => panic!("Expected suggestion tip"),
    }
}

#[test]
fn test_error_tip_display() {
    let tip = ErrorTip::Suggestion("Try this instead".to_string());
    assert_eq!(tip.to_string(), "Try this instead");

    let tip = ErrorTip::None;
    assert_eq!(tip.to_string(), "");
}

#[test]
fn test_render_error() {
    let error = Error::new(
        ErrorImpl::UnrecognisedToken {
            token: "@".to_string(),
        },
        Position::new(2, 7),
    );

    let rendered = render_error(&error, "x = 1\n  y = @\n", "test.dsl");

    assert_eq!(
        rendered,
        "Error: UnrecognisedToken (`@` is not part of the language)\n\
         -> test.dsl\n\
         \x20 |\n\
         2 | y = @\n\
         \x20 | ----^\n"
    );
}

#[test]
fn test_render_error_without_tip() {
    let error = Error::new(
        ErrorImpl::Io {
            path: "a.dsl".to_string(),
            message: "denied".to_string(),
        },
        Position::start(),
    );

    let rendered = render_error(&error, "abc", "a.dsl");

    assert!(rendered.starts_with("Error: Io\n-> a.dsl\n"));
    assert!(rendered.ends_with("1 | abc\n  | ^\n"));
}
