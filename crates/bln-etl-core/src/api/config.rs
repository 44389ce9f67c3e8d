//! API client settings.

use crate::Error;
use crate::Result;
use std::fmt;

/// Default GraphQL endpoint of the Big Local News platform.
pub const DEFAULT_ENDPOINT: &str = "https://api.biglocalnews.org/graphql";

/// Environment variable holding the API token.
pub const TOKEN_ENV: &str = "BLN_API_KEY";

/// Environment variable overriding the endpoint.
pub const ENDPOINT_ENV: &str = "BLN_API_ENDPOINT";

/// Token and endpoint used by a [`Client`](super::Client).
///
/// The token is never printed by the `Debug` implementation.
///
/// # Examples
///
/// ```
/// use bln_etl_core::api::ApiConfig;
///
/// let config = ApiConfig::new("secret").with_endpoint("http://localhost:8000/graphql");
/// assert_eq!(config.token(), "secret");
/// assert!(!format!("{config:?}").contains("secret"));
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct ApiConfig {
    token: String,
    endpoint: String,
}

impl ApiConfig {
    /// Creates a config for `token` against the default endpoint.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
        }
    }

    /// Resolves settings from an explicit token, falling back to
    /// `BLN_API_KEY`. `BLN_API_ENDPOINT` overrides the endpoint when set.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] when neither source yields a
    /// non-empty token.
    pub fn resolve(token: Option<String>) -> Result<Self> {
        Self::resolve_with(token, |key| std::env::var(key).ok())
    }

    fn resolve_with<F>(token: Option<String>, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let token = token
            .filter(|t| !t.is_empty())
            .or_else(|| lookup(TOKEN_ENV).filter(|t| !t.is_empty()))
            .ok_or_else(|| {
                Error::Configuration(format!(
                    "no API token: pass one explicitly or set the {TOKEN_ENV} environment variable"
                ))
            })?;

        let mut config = Self::new(token);
        if let Some(endpoint) = lookup(ENDPOINT_ENV).filter(|e| !e.is_empty()) {
            config.endpoint = endpoint;
        }
        Ok(config)
    }

    /// Sets the endpoint.
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Bearer token.
    #[must_use]
    pub fn token(&self) -> &str {
        &self.token
    }

    /// GraphQL endpoint URL.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiConfig")
            .field("token", &"<redacted>")
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_explicit_token_wins() {
        let config =
            ApiConfig::resolve_with(Some("explicit".into()), env(&[(TOKEN_ENV, "from-env")]))
                .unwrap();
        assert_eq!(config.token(), "explicit");
        assert_eq!(config.endpoint(), DEFAULT_ENDPOINT);
    }

    #[test]
    fn test_env_token_fallback() {
        let config = ApiConfig::resolve_with(None, env(&[(TOKEN_ENV, "from-env")])).unwrap();
        assert_eq!(config.token(), "from-env");
    }

    #[test]
    fn test_empty_token_falls_back() {
        let config =
            ApiConfig::resolve_with(Some(String::new()), env(&[(TOKEN_ENV, "from-env")])).unwrap();
        assert_eq!(config.token(), "from-env");
    }

    #[test]
    fn test_missing_token_is_configuration_error() {
        let err = ApiConfig::resolve_with(None, env(&[])).unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
        assert!(err.to_string().contains(TOKEN_ENV));
    }

    #[test]
    fn test_endpoint_override() {
        let config = ApiConfig::resolve_with(
            Some("t".into()),
            env(&[(ENDPOINT_ENV, "http://localhost:9000/graphql")]),
        )
        .unwrap();
        assert_eq!(config.endpoint(), "http://localhost:9000/graphql");
    }

    #[test]
    fn test_debug_redacts_token() {
        let debug = format!("{:?}", ApiConfig::new("hunter2"));
        assert!(!debug.contains("hunter2"));
        assert!(debug.contains(DEFAULT_ENDPOINT));
    }
}
