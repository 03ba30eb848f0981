//! Token acquisition and validation.

use crate::error::{Error, Result};
use std::io::{BufRead, Write};

/// Check that a token can be sent to the registry and stored as a netrc
/// password.
///
/// Tokens must be non-empty and free of whitespace; a space would split
/// the netrc entry into garbage tokens.
pub fn validate(token: &str) -> Result<()> {
    if token.is_empty() {
        return Err(Error::InvalidToken {
            reason: "must not be empty".to_string(),
        });
    }
    if token.chars().any(char::is_whitespace) {
        return Err(Error::InvalidToken {
            reason: "must not contain whitespace".to_string(),
        });
    }
    Ok(())
}

/// Read a token from stdin, for `--token-stdin`.
pub fn from_stdin() -> Result<String> {
    from_reader(std::io::stdin().lock())
}

/// Prompt for a token on the terminal.
///
/// The prompt goes to stderr so stdout stays clean for scripting.
pub fn prompt() -> Result<String> {
    let mut stderr = std::io::stderr();
    write!(stderr, "Token: ")
        .and_then(|_| stderr.flush())
        .map_err(Error::TokenRead)?;
    from_reader(std::io::stdin().lock())
}

fn from_reader(mut reader: impl BufRead) -> Result<String> {
    let mut line = String::new();
    reader.read_line(&mut line).map_err(Error::TokenRead)?;
    let token = line.trim().to_string();
    validate(&token)?;
    Ok(token)
}
