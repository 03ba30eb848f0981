//! Authenticate against a Go module-proxy registry and wire the proxy
//! into the local `go` environment.
//!
//! The library behind the `gofig` CLI. Logging in verifies a token with
//! the registry, stores the resulting credential in `~/.netrc`, and
//! reconciles the registry's routing requirements into three `go env`
//! variables:
//!
//! - `GOPROXY` gains the account's proxy URL at the front of the
//!   fallback chain.
//! - `GONOSUMDB` gains the registry's private path patterns, exempting
//!   them from checksum-database verification.
//! - `GOPRIVATE` loses those same patterns, so the modules are fetched
//!   through the proxy instead of bypassing it.
//!
//! # Quick Start
//!
//! ```no_run
//! use gofig::{reconcile, GoCmd, GoEnv, RegistryClient};
//!
//! # fn main() -> gofig::Result<()> {
//! let client = RegistryClient::new("https://gofig.dev")?;
//! let config = client.login("my-token")?;
//!
//! let goenv = GoCmd::locate()?;
//! let assignments = reconcile(&goenv, &config.url, &config.private_paths)?;
//! goenv.apply_vars(&assignments)?;
//! # Ok(())
//! # }
//! ```
//!
//! The merge semantics live in [`merge`] as pure functions over strings;
//! [`reconcile`] reads the current values through the [`GoEnv`] trait (an
//! in-memory fake works for tests) and produces the `KEY=value` strings
//! to apply in one `go env -w` invocation.

mod error;
mod goenv;
pub mod merge;
mod netrc;
pub mod registry;
pub mod token;

// Re-export main types
pub use error::{Error, Result};
pub use goenv::{logout, reconcile, GoCmd, GoEnv, PUBLIC_GOPROXY};
pub use netrc::{Machine, Netrc, LOGIN_NAME};
pub use registry::{ProxyConfig, RegistryClient, DEFAULT_REGISTRY};
