use std::{fs::read_to_string, path::PathBuf, process::ExitCode, time::Instant};

use clap::Parser;
use dsl_tokenizer::{
    errors::errors::{Error, ErrorImpl},
    lexer::{
        lexer::{tokenize, tokenize_strict},
        tokens::Token,
    },
    render_error,
};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Print the token stream of a source file", long_about = None)]
struct Cli {
    /// Source file to tokenize
    file: PathBuf,

    /// Fail on the first unrecognised token instead of emitting it
    #[arg(long)]
    strict: bool,

    /// Leave whitespace and comment tokens out of the output
    #[arg(long)]
    skip_trivia: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: &Cli, source: &str) -> Result<Vec<Token>, Error> {
    let start = Instant::now();

    let tokens = if cli.strict {
        tokenize_strict(source)?
    } else {
        tokenize(source)
    };

    info!(count = tokens.len(), elapsed = ?start.elapsed(), "tokenized");

    Ok(tokens)
}

/// Tokens to print, dropping whitespace and comments when `skip_trivia` is set.
fn visible_tokens(tokens: &[Token], skip_trivia: bool) -> impl Iterator<Item = &Token> {
    tokens
        .iter()
        .filter(move |token| !(skip_trivia && token.kind.is_trivia()))
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let file_name = cli.file.as_os_str().to_string_lossy().to_string();
    debug!("Tokenizing file: {:?}", cli.file);

    let source = match read_to_string(&cli.file) {
        Ok(source) => source,
        Err(e) => {
            let error = ErrorImpl::Io {
                path: file_name,
                message: e.to_string(),
            };
            eprintln!("Error: {}", error);
            return ExitCode::FAILURE;
        }
    };

    match run(&cli, &source) {
        Ok(tokens) => {
            for token in visible_tokens(&tokens, cli.skip_trivia) {
                print!("{}", token);
            }
            ExitCode::SUCCESS
        }
        Err(error) => {
            eprint!("{}", render_error(&error, &source, &file_name));
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{run, visible_tokens, Cli};
    use clap::Parser;
    use dsl_tokenizer::{
        errors::errors::ErrorImpl,
        lexer::{lexer::tokenize, tokens::TokenKind},
        Position,
    };

    #[test]
    fn test_visible_tokens_skips_trivia() {
        let tokens = tokenize("x  // note\ny");

        let kinds: Vec<TokenKind> = visible_tokens(&tokens, true).map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::Identifier,
                TokenKind::Newline,
                TokenKind::Identifier,
                TokenKind::EndOfInput,
            ]
        );

        assert_eq!(visible_tokens(&tokens, false).count(), tokens.len());
    }

    #[test]
    fn test_run_strict_fails() {
        let cli = Cli::parse_from(["tokenize", "input.dsl", "--strict"]);
        assert!(cli.strict);

        let error = run(&cli, "x = @").unwrap_err();
        assert_eq!(
            error.get_kind(),
            &ErrorImpl::UnrecognisedToken {
                token: "@".to_string()
            }
        );
        assert_eq!(error.get_position(), &Position::new(1, 5));
    }

    #[test]
    fn test_run_lenient_keeps_unknown() {
        let cli = Cli::parse_from(["tokenize", "input.dsl", "--skip-trivia"]);
        assert!(!cli.strict);
        assert!(cli.skip_trivia);

        let tokens = run(&cli, "x = @").unwrap();
        assert_eq!(tokens[4].kind, TokenKind::Unknown);
        assert_eq!(tokens[4].value, "@");
    }

    #[test]
    fn test_io_error_message() {
        let error = ErrorImpl::Io {
            path: "missing.dsl".to_string(),
            message: "not found".to_string(),
        };

        assert_eq!(error.to_string(), "failed to read \"missing.dsl\": not found");
    }
}
