//! List-merge logic for the `go` environment variables.
//!
//! The registry hands back a proxy URL and a set of private path patterns,
//! and those have to be folded into whatever the developer already has in
//! `GOPROXY`, `GONOSUMDB` and `GOPRIVATE`. All three variables hold
//! comma-separated lists, but each one gets its own merge policy:
//!
//! - `GOPROXY` is a fallback chain, so the new proxy is prepended (it must
//!   win) unless it is already present somewhere in the value.
//! - `GONOSUMDB` is an exclusion set, so new patterns are appended unless
//!   already present.
//! - `GOPRIVATE` loses the patterns that the registry claimed, since those
//!   modules are now served (and checksummed) by the proxy itself.
//!
//! Presence checks for `GOPROXY` and `GONOSUMDB` are substring containment
//! on the raw value rather than token membership: `GOPROXY` entries may be
//! glued together with `|` as well as `,`, and splitting on commas alone
//! would miss a proxy configured behind a pipe separator. `GOPRIVATE`
//! removal compares exact trimmed tokens instead, because its entries are
//! individual patterns, never composite chains.

/// Environment variable holding the module proxy fallback chain.
pub const GOPROXY: &str = "GOPROXY";

/// Environment variable holding checksum-database exclusion patterns.
pub const GONOSUMDB: &str = "GONOSUMDB";

/// Environment variable holding private module path patterns.
pub const GOPRIVATE: &str = "GOPRIVATE";

/// Split a comma-separated configuration value into trimmed, non-empty
/// tokens, preserving order.
///
/// Total over all inputs: a value that is empty or all whitespace yields
/// an empty vector.
///
/// # Examples
///
/// ```
/// use gofig::merge::split_list;
///
/// assert_eq!(split_list("a, b ,,c"), vec!["a", "b", "c"]);
/// assert!(split_list("  ").is_empty());
/// ```
pub fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Compute the new `GOPROXY` value given the current value and the proxy
/// URL returned by the registry.
///
/// The proxy is prepended so it becomes the first (winning) entry in the
/// fallback chain. If the URL already appears anywhere in the current
/// value it is left untouched, and an empty current value becomes the URL
/// alone, with no stray comma.
pub fn merge_proxy(current: &str, proxy_url: &str) -> String {
    let current = current.trim();
    if current.is_empty() {
        return proxy_url.to_string();
    }
    if current.contains(proxy_url) {
        return current.to_string();
    }
    format!("{},{}", proxy_url, current)
}

/// Fold the registry's private path patterns into the current `GONOSUMDB`
/// value, appending each pattern not already present.
///
/// Patterns are processed in the order supplied, and a pattern appended
/// earlier in the pass suppresses a later duplicate. The presence check is
/// substring containment against the accumulated value, matching
/// [`merge_proxy`].
pub fn merge_exclusions(current: &str, patterns: &[String]) -> String {
    let mut merged = current.trim().to_string();
    for pattern in patterns {
        let pattern = pattern.trim();
        if pattern.is_empty() || merged.contains(pattern) {
            continue;
        }
        if merged.is_empty() {
            merged.push_str(pattern);
        } else {
            merged.push(',');
            merged.push_str(pattern);
        }
    }
    merged
}

/// Drop the registry's private path patterns from the current `GOPRIVATE`
/// value.
///
/// The patterns were just claimed by the exclusion merge, and leaving them
/// in `GOPRIVATE` would keep routing those modules around the proxy.
/// Matching here is exact trimmed-token equality, and the relative order
/// of the retained tokens is preserved. An empty result serializes to the
/// empty string.
pub fn remove_private_paths(current: &str, patterns: &[String]) -> String {
    let removal: std::collections::HashSet<&str> =
        patterns.iter().map(|p| p.trim()).collect();
    split_list(current)
        .into_iter()
        .filter(|token| !removal.contains(token.as_str()))
        .collect::<Vec<_>>()
        .join(",")
}
