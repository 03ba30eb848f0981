//! Reading and writing the `go` toolchain environment.
//!
//! The ambient environment is reached through the [`GoEnv`] trait so the
//! reconciliation driver can be exercised against an in-memory fake
//! instead of mutating the developer's real toolchain state. The real
//! implementation, [`GoCmd`], shells out to `go env` / `go env -w`.

use crate::error::{Error, Result};
use crate::merge::{
    merge_exclusions, merge_proxy, remove_private_paths, GONOSUMDB, GOPRIVATE, GOPROXY,
};
use crate::netrc::{Netrc, LOGIN_NAME};
use std::path::PathBuf;
use std::process::Command;
use tracing::{debug, info};

/// Proxy chain restored on logout: the public Go module mirror.
pub const PUBLIC_GOPROXY: &str = "proxy.golang.org,direct";

/// Access to the `go` environment configuration.
///
/// Both operations are synchronous and blocking. `read_var` failures mean
/// the toolchain is not installed or not reachable and abort the whole
/// reconciliation pass before any merge is computed.
pub trait GoEnv {
    /// Read the current value of a named configuration variable.
    fn read_var(&self, var: &str) -> Result<String>;

    /// Persist all given `KEY=value` assignments in a single invocation.
    fn apply_vars(&self, assignments: &[String]) -> Result<()>;
}

/// [`GoEnv`] implementation backed by the `go` binary.
#[derive(Debug, Clone)]
pub struct GoCmd {
    go: PathBuf,
}

impl GoCmd {
    /// Locate the `go` binary on `PATH`.
    pub fn locate() -> Result<Self> {
        let go = which::which("go")?;
        debug!(go = %go.display(), "located go binary");
        Ok(Self { go })
    }

    /// Use a specific `go` binary instead of searching `PATH`.
    pub fn with_path(go: PathBuf) -> Self {
        Self { go }
    }
}

impl GoEnv for GoCmd {
    fn read_var(&self, var: &str) -> Result<String> {
        let output = Command::new(&self.go)
            .args(["env", var])
            .output()
            .map_err(|e| Error::GoCommand {
                command: format!("go env {}", var),
                source: e,
            })?;

        if !output.status.success() {
            return Err(Error::EnvRead {
                var: var.to_string(),
                message: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let value = String::from_utf8_lossy(&output.stdout).trim().to_string();
        debug!(var, value = %value, "read go env");
        Ok(value)
    }

    fn apply_vars(&self, assignments: &[String]) -> Result<()> {
        info!(?assignments, "writing go env");
        let output = Command::new(&self.go)
            .args(["env", "-w"])
            .args(assignments)
            .output()
            .map_err(|e| Error::GoCommand {
                command: "go env -w".to_string(),
                source: e,
            })?;

        if !output.status.success() {
            return Err(Error::EnvWrite {
                vars: assignment_keys(assignments),
                message: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(())
    }
}

/// The variable names from a list of `KEY=value` assignments, for error
/// messages.
fn assignment_keys(assignments: &[String]) -> String {
    assignments
        .iter()
        .map(|a| a.split('=').next().unwrap_or(a))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Compute the three environment assignments that route modules through
/// the given proxy.
///
/// Reads `GOPROXY`, `GONOSUMDB` and `GOPRIVATE` up front so all merges
/// work from one consistent snapshot, then returns the `KEY=value`
/// strings in that fixed order. Nothing is written here; pass the result
/// to [`GoEnv::apply_vars`] to persist it in one shot.
pub fn reconcile(env: &dyn GoEnv, proxy_url: &str, private_paths: &[String]) -> Result<Vec<String>> {
    let goproxy = env.read_var(GOPROXY)?;
    let gonosumdb = env.read_var(GONOSUMDB)?;
    let goprivate = env.read_var(GOPRIVATE)?;

    Ok(vec![
        format!("{}={}", GOPROXY, merge_proxy(&goproxy, proxy_url)),
        format!("{}={}", GONOSUMDB, merge_exclusions(&gonosumdb, private_paths)),
        format!("{}={}", GOPRIVATE, remove_private_paths(&goprivate, private_paths)),
    ])
}

/// Undo what a login set up: restore the public proxy chain and drop the
/// credentials this tool wrote from the netrc model.
///
/// Removes machine entries whose login is [`LOGIN_NAME`] plus any entry
/// named after the registry host, leaving unrelated machines alone.
/// Returns `true` when the netrc changed and should be saved.
pub fn logout(env: &dyn GoEnv, netrc: &mut Netrc, registry_host: Option<&str>) -> Result<bool> {
    env.apply_vars(&[format!("{}={}", GOPROXY, PUBLIC_GOPROXY)])?;

    let stale: Vec<String> = netrc
        .machines()
        .filter(|m| m.login.as_deref() == Some(LOGIN_NAME) || Some(m.name.as_str()) == registry_host)
        .map(|m| m.name.clone())
        .collect();
    for name in &stale {
        debug!(machine = %name, "removing stored credential");
        netrc.remove_machine(name);
    }
    Ok(!stale.is_empty())
}
