//! Reconciliation tests driving the merge pipeline through an in-memory
//! go environment instead of a real toolchain.

use gofig::merge::{GONOSUMDB, GOPRIVATE, GOPROXY};
use gofig::{reconcile, Error, GoEnv};
use std::cell::RefCell;
use std::collections::HashMap;

/// In-memory [`GoEnv`] recording what would have been written.
struct MemoryEnv {
    vars: HashMap<String, String>,
    applied: RefCell<Vec<Vec<String>>>,
    fail_var: Option<String>,
}

impl MemoryEnv {
    fn new(goproxy: &str, gonosumdb: &str, goprivate: &str) -> Self {
        let mut vars = HashMap::new();
        vars.insert(GOPROXY.to_string(), goproxy.to_string());
        vars.insert(GONOSUMDB.to_string(), gonosumdb.to_string());
        vars.insert(GOPRIVATE.to_string(), goprivate.to_string());
        Self {
            vars,
            applied: RefCell::new(Vec::new()),
            fail_var: None,
        }
    }

    fn failing_on(var: &str) -> Self {
        let mut env = Self::new("", "", "");
        env.fail_var = Some(var.to_string());
        env
    }
}

impl GoEnv for MemoryEnv {
    fn read_var(&self, var: &str) -> gofig::Result<String> {
        if self.fail_var.as_deref() == Some(var) {
            return Err(Error::EnvRead {
                var: var.to_string(),
                message: "exec: \"go\": executable file not found".to_string(),
            });
        }
        Ok(self.vars.get(var).cloned().unwrap_or_default())
    }

    fn apply_vars(&self, assignments: &[String]) -> gofig::Result<()> {
        self.applied.borrow_mut().push(assignments.to_vec());
        Ok(())
    }
}

/// Run the read-compute-apply sequence the way the login command does.
fn reconcile_and_apply(
    env: &MemoryEnv,
    proxy_url: &str,
    private_paths: &[&str],
) -> gofig::Result<Vec<String>> {
    let paths: Vec<String> = private_paths.iter().map(|p| p.to_string()).collect();
    let assignments = reconcile(env, proxy_url, &paths)?;
    env.apply_vars(&assignments)?;
    Ok(assignments)
}

// =============================================================================
// GOPROXY merge scenarios
// =============================================================================

#[test]
fn test_goproxy_prepended_to_chain() {
    let env = MemoryEnv::new("proxy.golang.org,direct", "", "");

    let assignments = reconcile_and_apply(&env, "https://example.com", &[]).unwrap();

    assert_eq!(
        assignments[0],
        "GOPROXY=https://example.com,proxy.golang.org,direct"
    );
}

#[test]
fn test_goproxy_empty_current() {
    let env = MemoryEnv::new("", "", "");

    let assignments = reconcile_and_apply(&env, "https://example.com", &[]).unwrap();

    assert_eq!(assignments[0], "GOPROXY=https://example.com");
}

#[test]
fn test_goproxy_unchanged_when_already_configured() {
    let env = MemoryEnv::new("proxy.golang.org|https://example.com", "", "");

    let assignments = reconcile_and_apply(&env, "https://example.com", &[]).unwrap();

    assert_eq!(assignments[0], "GOPROXY=proxy.golang.org|https://example.com");
}

// =============================================================================
// GONOSUMDB / GOPRIVATE scenarios
// =============================================================================

#[test]
fn test_gonosumdb_appends_new_patterns() {
    let env = MemoryEnv::new("", "other.stuff/*", "");

    let assignments =
        reconcile_and_apply(&env, "https://example.com", &["cli.gofig.dev/*"]).unwrap();

    assert_eq!(assignments[1], "GONOSUMDB=other.stuff/*,cli.gofig.dev/*");
}

#[test]
fn test_goprivate_drops_claimed_patterns() {
    let env = MemoryEnv::new("", "", "other.stuff/*,cli.gofig.dev/*");

    let assignments =
        reconcile_and_apply(&env, "https://example.com", &["cli.gofig.dev/*"]).unwrap();

    assert_eq!(assignments[2], "GOPRIVATE=other.stuff/*");
}

#[test]
fn test_goprivate_empty_current() {
    let env = MemoryEnv::new("", "", "");

    let assignments = reconcile_and_apply(&env, "https://example.com", &["a/*"]).unwrap();

    assert_eq!(assignments[2], "GOPRIVATE=");
}

#[test]
fn test_pattern_moves_from_goprivate_to_gonosumdb() {
    let env = MemoryEnv::new(
        "proxy.golang.org,direct",
        "other.stuff/*",
        "other.stuff/*,cli.gofig.dev/*",
    );

    let assignments =
        reconcile_and_apply(&env, "https://example.com", &["cli.gofig.dev/*"]).unwrap();

    assert_eq!(
        assignments,
        vec![
            "GOPROXY=https://example.com,proxy.golang.org,direct",
            "GONOSUMDB=other.stuff/*,cli.gofig.dev/*",
            "GOPRIVATE=other.stuff/*",
        ]
    );
}

// =============================================================================
// Failure and application behavior
// =============================================================================

#[test]
fn test_read_failure_prevents_any_write() {
    for var in [GOPROXY, GONOSUMDB, GOPRIVATE] {
        let env = MemoryEnv::failing_on(var);

        let result = reconcile_and_apply(&env, "https://example.com", &["a/*"]);

        assert!(matches!(result, Err(Error::EnvRead { .. })));
        assert!(
            env.applied.borrow().is_empty(),
            "nothing may be applied when reading {var} fails"
        );
    }
}

#[test]
fn test_all_three_applied_in_one_call() {
    let env = MemoryEnv::new("direct", "", "");

    reconcile_and_apply(&env, "https://example.com", &["a/*"]).unwrap();

    let applied = env.applied.borrow();
    assert_eq!(applied.len(), 1);
    assert_eq!(applied[0].len(), 3);
}

#[test]
fn test_reconcile_is_idempotent() {
    let env = MemoryEnv::new(
        "proxy.golang.org,direct",
        "other.stuff/*",
        "other.stuff/*,cli.gofig.dev/*",
    );

    let first = reconcile_and_apply(&env, "https://example.com", &["cli.gofig.dev/*"]).unwrap();

    // Feed the computed values back in, as if login ran a second time.
    let env2 = MemoryEnv::new(
        first[0].strip_prefix("GOPROXY=").unwrap(),
        first[1].strip_prefix("GONOSUMDB=").unwrap(),
        first[2].strip_prefix("GOPRIVATE=").unwrap(),
    );
    let second = reconcile_and_apply(&env2, "https://example.com", &["cli.gofig.dev/*"]).unwrap();

    assert_eq!(first, second);
}
