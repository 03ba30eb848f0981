//! Registry URL handling and the authentication client.
//!
//! The registry verifies a developer's token and answers with the routing
//! configuration for their account: the module proxy URL to put at the
//! front of `GOPROXY`, plus the private path patterns the proxy serves.

use crate::error::{Error, Result};
use serde::Deserialize;
use tracing::debug;
use url::Url;

/// The default gofig registry URL.
pub const DEFAULT_REGISTRY: &str = "https://gofig.dev/";

/// Parse a registry URL, ensuring it has a trailing slash.
pub fn parse_registry_url(url: &str) -> Result<Url> {
    let normalized = if url.ends_with('/') {
        url.to_string()
    } else {
        format!("{}/", url)
    };
    Url::parse(&normalized).map_err(|e| Error::InvalidUrl {
        url: url.to_string(),
        message: e.to_string(),
    })
}

/// Routing configuration returned by the registry after a successful
/// login.
#[derive(Debug, Clone, Deserialize)]
pub struct ProxyConfig {
    /// The developer-specific module proxy URL.
    pub url: String,
    /// Module path patterns served privately by the proxy.
    #[serde(default)]
    pub private_paths: Vec<String>,
}

impl ProxyConfig {
    /// Host of the proxy URL, used as the netrc machine name.
    pub fn proxy_host(&self) -> Result<String> {
        let parsed = Url::parse(&self.url).map_err(|e| Error::InvalidUrl {
            url: self.url.clone(),
            message: e.to_string(),
        })?;
        parsed
            .host_str()
            .map(str::to_string)
            .ok_or_else(|| Error::InvalidUrl {
                url: self.url.clone(),
                message: "missing host".to_string(),
            })
    }
}

/// Client for the registry's login endpoint.
#[derive(Debug, Clone)]
pub struct RegistryClient {
    base: Url,
    http: reqwest::blocking::Client,
}

impl RegistryClient {
    /// Create a client for the given registry URL.
    pub fn new(registry: &str) -> Result<Self> {
        Ok(Self {
            base: parse_registry_url(registry)?,
            http: reqwest::blocking::Client::new(),
        })
    }

    /// Verify the token with the registry and retrieve the proxy
    /// configuration for the account it belongs to.
    pub fn login(&self, token: &str) -> Result<ProxyConfig> {
        let endpoint = self.base.join("api/proxy").map_err(|e| Error::InvalidUrl {
            url: self.base.to_string(),
            message: e.to_string(),
        })?;

        debug!(endpoint = %endpoint, "authenticating with registry");
        let response = self
            .http
            .post(endpoint)
            .json(&serde_json::json!({ "proxy_token": token }))
            .send()?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(Error::Registry {
                status: status.as_u16(),
                message: error_message(&body, &status),
            });
        }

        let config: ProxyConfig = response.json()?;
        debug!(
            proxy_url = %config.url,
            private_paths = config.private_paths.len(),
            "registry login succeeded"
        );
        Ok(config)
    }
}

/// Best-effort error message from a registry error body.
///
/// The registry reports errors as `{"msg": "..."}`; fall back to the raw
/// body, then to the HTTP reason phrase.
fn error_message(body: &str, status: &reqwest::StatusCode) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        if let Some(msg) = value.get("msg").and_then(serde_json::Value::as_str) {
            return msg.to_string();
        }
    }
    let trimmed = body.trim();
    if !trimmed.is_empty() {
        return trimmed.to_string();
    }
    status
        .canonical_reason()
        .unwrap_or("unknown error")
        .to_string()
}
