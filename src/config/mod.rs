//! Configuration for the Amadeus proxy.
//!
//! Holds the upstream environment selection (sandbox vs production), the
//! client credentials for the OAuth2 grant, and server/transport settings.

use secrecy::{ExposeSecret, SecretString};
use std::time::Duration;

use crate::error::{ProxyError, ProxyResult};

/// Base URL of the Amadeus sandbox environment.
pub const SANDBOX_BASE_URL: &str = "https://test.api.amadeus.com";

/// Base URL of the Amadeus production environment.
pub const PRODUCTION_BASE_URL: &str = "https://api.amadeus.com";

/// Default outbound request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default port the proxy listens on.
pub const DEFAULT_PORT: u16 = 8080;

/// Amadeus deployment environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmadeusEnvironment {
    /// Sandbox (`test.api.amadeus.com`). The default.
    Sandbox,
    /// Production (`api.amadeus.com`).
    Production,
}

impl AmadeusEnvironment {
    /// Returns the base URL for this environment.
    pub fn base_url(&self) -> &'static str {
        match self {
            Self::Sandbox => SANDBOX_BASE_URL,
            Self::Production => PRODUCTION_BASE_URL,
        }
    }

    fn from_env_value(value: &str) -> Self {
        if value.eq_ignore_ascii_case("production") {
            Self::Production
        } else {
            Self::Sandbox
        }
    }
}

/// Configuration for the Amadeus proxy.
#[derive(Clone)]
pub struct AmadeusConfig {
    /// Selected Amadeus environment.
    pub environment: AmadeusEnvironment,
    /// Base URL for upstream requests. Derived from the environment unless
    /// overridden through the builder (tests point this at a mock server).
    pub base_url: String,
    /// OAuth2 client id.
    pub client_id: String,
    /// OAuth2 client secret (stored securely).
    pub(crate) client_secret: SecretString,
    /// Outbound request timeout.
    pub timeout: Duration,
    /// Port the proxy listens on.
    pub port: u16,
}

impl AmadeusConfig {
    /// Creates a new configuration builder.
    pub fn builder() -> AmadeusConfigBuilder {
        AmadeusConfigBuilder::new()
    }

    /// Creates a configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `AMADEUS_API_KEY` (required): OAuth2 client id
    /// - `AMADEUS_API_SECRET` (required): OAuth2 client secret
    /// - `AMADEUS_ENV` (optional): `production` or `test` (default `test`)
    /// - `PORT` (optional): listen port (default 8080)
    pub fn from_env() -> ProxyResult<Self> {
        let client_id =
            std::env::var("AMADEUS_API_KEY").map_err(|_| ProxyError::Configuration {
                message: "AMADEUS_API_KEY environment variable not set".to_string(),
            })?;
        let client_secret =
            std::env::var("AMADEUS_API_SECRET").map_err(|_| ProxyError::Configuration {
                message: "AMADEUS_API_SECRET environment variable not set".to_string(),
            })?;

        let mut builder = Self::builder()
            .client_id(client_id)
            .client_secret(client_secret);

        if let Ok(env) = std::env::var("AMADEUS_ENV") {
            builder = builder.environment(AmadeusEnvironment::from_env_value(&env));
        }

        if let Ok(port_str) = std::env::var("PORT") {
            let port = port_str.parse::<u16>().map_err(|_| ProxyError::Configuration {
                message: format!("PORT is not a valid port number: {}", port_str),
            })?;
            builder = builder.port(port);
        }

        builder.build()
    }

    /// Returns the client secret (exposing the secret).
    pub(crate) fn client_secret(&self) -> &str {
        self.client_secret.expose_secret()
    }

    /// Returns the full URL for an upstream endpoint path.
    pub fn endpoint_url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

impl std::fmt::Debug for AmadeusConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AmadeusConfig")
            .field("environment", &self.environment)
            .field("base_url", &self.base_url)
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .field("timeout", &self.timeout)
            .field("port", &self.port)
            .finish()
    }
}

/// Builder for `AmadeusConfig`.
#[derive(Default)]
pub struct AmadeusConfigBuilder {
    environment: Option<AmadeusEnvironment>,
    base_url: Option<String>,
    client_id: Option<String>,
    client_secret: Option<String>,
    timeout: Option<Duration>,
    port: Option<u16>,
}

impl AmadeusConfigBuilder {
    /// Creates a new configuration builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the Amadeus environment.
    pub fn environment(mut self, environment: AmadeusEnvironment) -> Self {
        self.environment = Some(environment);
        self
    }

    /// Overrides the upstream base URL regardless of environment.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Sets the OAuth2 client id.
    pub fn client_id(mut self, client_id: impl Into<String>) -> Self {
        self.client_id = Some(client_id.into());
        self
    }

    /// Sets the OAuth2 client secret.
    pub fn client_secret(mut self, client_secret: impl Into<String>) -> Self {
        self.client_secret = Some(client_secret.into());
        self
    }

    /// Sets the outbound request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the listen port.
    pub fn port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Builds the configuration.
    pub fn build(self) -> ProxyResult<AmadeusConfig> {
        let client_id = self.client_id.ok_or_else(|| ProxyError::Configuration {
            message: "client id is required".to_string(),
        })?;
        if client_id.is_empty() {
            return Err(ProxyError::Configuration {
                message: "client id cannot be empty".to_string(),
            });
        }

        let client_secret = self.client_secret.ok_or_else(|| ProxyError::Configuration {
            message: "client secret is required".to_string(),
        })?;
        if client_secret.is_empty() {
            return Err(ProxyError::Configuration {
                message: "client secret cannot be empty".to_string(),
            });
        }

        let environment = self.environment.unwrap_or(AmadeusEnvironment::Sandbox);
        let base_url = self
            .base_url
            .unwrap_or_else(|| environment.base_url().to_string())
            .trim_end_matches('/')
            .to_string();

        Ok(AmadeusConfig {
            environment,
            base_url,
            client_id,
            client_secret: SecretString::new(client_secret),
            timeout: self.timeout.unwrap_or(DEFAULT_TIMEOUT),
            port: self.port.unwrap_or(DEFAULT_PORT),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults_to_sandbox() {
        let config = AmadeusConfig::builder()
            .client_id("id")
            .client_secret("secret")
            .build()
            .unwrap();

        assert_eq!(config.environment, AmadeusEnvironment::Sandbox);
        assert_eq!(config.base_url, SANDBOX_BASE_URL);
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);
        assert_eq!(config.port, DEFAULT_PORT);
    }

    #[test]
    fn test_builder_production_environment() {
        let config = AmadeusConfig::builder()
            .client_id("id")
            .client_secret("secret")
            .environment(AmadeusEnvironment::Production)
            .build()
            .unwrap();

        assert_eq!(config.base_url, PRODUCTION_BASE_URL);
    }

    #[test]
    fn test_builder_base_url_override_trims_trailing_slash() {
        let config = AmadeusConfig::builder()
            .client_id("id")
            .client_secret("secret")
            .base_url("http://127.0.0.1:9999/")
            .build()
            .unwrap();

        assert_eq!(config.base_url, "http://127.0.0.1:9999");
        assert_eq!(
            config.endpoint_url("/v1/security/oauth2/token"),
            "http://127.0.0.1:9999/v1/security/oauth2/token"
        );
    }

    #[test]
    fn test_builder_missing_credentials() {
        assert!(AmadeusConfig::builder().build().is_err());
        assert!(AmadeusConfig::builder().client_id("id").build().is_err());
        assert!(AmadeusConfig::builder()
            .client_id("")
            .client_secret("secret")
            .build()
            .is_err());
    }

    #[test]
    fn test_environment_from_env_value() {
        assert_eq!(
            AmadeusEnvironment::from_env_value("production"),
            AmadeusEnvironment::Production
        );
        assert_eq!(
            AmadeusEnvironment::from_env_value("test"),
            AmadeusEnvironment::Sandbox
        );
        assert_eq!(
            AmadeusEnvironment::from_env_value("anything-else"),
            AmadeusEnvironment::Sandbox
        );
    }

    #[test]
    fn test_debug_redacts_secret() {
        let config = AmadeusConfig::builder()
            .client_id("id")
            .client_secret("super-secret")
            .build()
            .unwrap();

        let debug_str = format!("{:?}", config);
        assert!(debug_str.contains("[REDACTED]"));
        assert!(!debug_str.contains("super-secret"));
    }
}
