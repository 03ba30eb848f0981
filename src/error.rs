//! Error types for gofig.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while logging in to a registry or reconciling
/// the `go` environment.
#[derive(Error, Debug)]
pub enum Error {
    /// The `go` binary could not be located on `PATH`.
    #[error("could not find the go binary on PATH: {0}")]
    GoNotFound(#[from] which::Error),

    /// `go env <var>` failed, so the current value could not be read.
    #[error("could not read {var}: {message}")]
    EnvRead { var: String, message: String },

    /// `go env -w` failed, so the computed values were not persisted.
    #[error("could not persist {vars}: {message}")]
    EnvWrite { vars: String, message: String },

    /// Failed to spawn or wait for the `go` subprocess.
    #[error("failed to run {command}: {source}")]
    GoCommand {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// Invalid URL in configuration or in a registry response.
    #[error("invalid URL '{url}': {message}")]
    InvalidUrl { url: String, message: String },

    /// The registry request could not be completed.
    #[error("error talking to registry: {0}")]
    Http(#[from] reqwest::Error),

    /// The registry rejected the request.
    #[error("registry returned {status}: {message}")]
    Registry { status: u16, message: String },

    /// Failed to read a netrc file.
    #[error("failed to read netrc file {path}: {source}")]
    NetrcRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write a netrc file.
    #[error("failed to write netrc file {path}: {source}")]
    NetrcWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The home directory could not be determined, so there is nowhere
    /// to store credentials.
    #[error("could not determine home directory for netrc file")]
    HomeDirNotFound,

    /// The supplied token is not usable as a credential.
    #[error("invalid token: {reason}")]
    InvalidToken { reason: String },

    /// Failed to read the token from the terminal or stdin.
    #[error("could not read token: {0}")]
    TokenRead(#[source] std::io::Error),
}

/// Result type alias for gofig operations.
pub type Result<T> = std::result::Result<T, Error>;
