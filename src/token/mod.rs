//! OAuth2 client-credentials token management.
//!
//! The proxy authenticates every upstream call with a bearer token obtained
//! through the client-credentials grant. Tokens are cached in a single
//! process-wide slot and reused until 30 seconds before expiry.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;
use std::sync::{Arc, Mutex};

use crate::config::AmadeusConfig;
use crate::error::{ProxyError, ProxyResult};

/// Path of the Amadeus token endpoint, relative to the base URL.
pub const TOKEN_PATH: &str = "/v1/security/oauth2/token";

/// Safety margin in seconds before expiry within which a cached token is not
/// reused.
pub const TOKEN_EXPIRY_MARGIN_SECS: i64 = 30;

/// Token lifetime assumed when the grant response omits `expires_in`.
pub const DEFAULT_TOKEN_LIFETIME_SECS: i64 = 1500;

/// Grant response from the token endpoint. Unknown fields are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenGrant {
    /// The bearer token.
    pub access_token: String,
    /// Lifetime in seconds, if the provider supplied one.
    #[serde(default)]
    pub expires_in: Option<i64>,
}

/// A cached bearer token with its computed expiry time.
#[derive(Debug, Clone)]
pub struct CachedToken {
    /// The bearer token.
    pub access_token: String,
    /// Absolute expiry time.
    pub expires_at: DateTime<Utc>,
}

impl CachedToken {
    /// Builds a cached token from a grant response received at `now`.
    pub fn from_grant(grant: TokenGrant, now: DateTime<Utc>) -> Self {
        let lifetime = grant.expires_in.unwrap_or(DEFAULT_TOKEN_LIFETIME_SECS);
        Self {
            access_token: grant.access_token,
            expires_at: now + Duration::seconds(lifetime),
        }
    }

    /// Whether the token is still usable at `now`, applying the 30-second
    /// safety margin: a token is fresh iff `expires_at - 30s` is in the future.
    pub fn is_fresh_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at - Duration::seconds(TOKEN_EXPIRY_MARGIN_SECS) > now
    }
}

/// Single-slot token cache.
///
/// The mutex guards only the slot itself, never a network call. Two callers
/// racing past an expired token will each perform a redundant grant, and
/// whichever `set()` lands last is retained. Tokens are interchangeable bearer
/// credentials until their own expiry, so the race is harmless and is left
/// undeduplicated on purpose.
#[derive(Debug, Default)]
pub struct TokenCache {
    slot: Mutex<Option<CachedToken>>,
}

impl TokenCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a clone of the cached token, if any.
    pub fn get(&self) -> Option<CachedToken> {
        self.slot.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Overwrites the cached token. Last writer wins.
    pub fn set(&self, token: CachedToken) {
        *self.slot.lock().unwrap_or_else(|e| e.into_inner()) = Some(token);
    }
}

/// Source of bearer tokens for upstream calls.
#[async_trait]
pub trait AccessTokenProvider: Send + Sync {
    /// Returns a valid bearer token, refreshing it if necessary.
    async fn bearer_token(&self) -> ProxyResult<String>;
}

/// Token manager performing the client-credentials grant against Amadeus.
pub struct OAuthTokenManager {
    config: Arc<AmadeusConfig>,
    http: reqwest::Client,
    cache: TokenCache,
}

impl OAuthTokenManager {
    /// Creates a new token manager with an empty cache.
    pub fn new(config: Arc<AmadeusConfig>, http: reqwest::Client) -> Self {
        Self {
            config,
            http,
            cache: TokenCache::new(),
        }
    }

    async fn request_grant(&self) -> ProxyResult<TokenGrant> {
        let url = self.config.endpoint_url(TOKEN_PATH);
        let response = self
            .http
            .post(&url)
            .form(&[
                ("grant_type", "client_credentials"),
                ("client_id", self.config.client_id.as_str()),
                ("client_secret", self.config.client_secret()),
            ])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "token grant rejected");
            return Err(ProxyError::Token {
                status: status.as_u16(),
                body,
            });
        }

        serde_json::from_str(&body).map_err(|e| {
            ProxyError::uncaught(format!("invalid token grant response: {}", e))
        })
    }
}

#[async_trait]
impl AccessTokenProvider for OAuthTokenManager {
    async fn bearer_token(&self) -> ProxyResult<String> {
        if let Some(cached) = self.cache.get() {
            if cached.is_fresh_at(Utc::now()) {
                tracing::debug!("reusing cached access token");
                return Ok(cached.access_token);
            }
        }

        tracing::debug!("requesting new access token");
        let grant = self.request_grant().await?;
        let token = CachedToken::from_grant(grant, Utc::now());
        let access_token = token.access_token.clone();
        self.cache.set(token);
        Ok(access_token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grant(token: &str, expires_in: Option<i64>) -> TokenGrant {
        TokenGrant {
            access_token: token.to_string(),
            expires_in,
        }
    }

    #[test]
    fn test_grant_parsing_ignores_extra_fields() {
        let json = r#"{
            "type": "amadeusOAuth2Token",
            "access_token": "abc123",
            "token_type": "Bearer",
            "expires_in": 1799,
            "state": "approved"
        }"#;

        let parsed: TokenGrant = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.access_token, "abc123");
        assert_eq!(parsed.expires_in, Some(1799));
    }

    #[test]
    fn test_default_lifetime_applied_when_expires_in_absent() {
        let now = Utc::now();
        let token = CachedToken::from_grant(grant("t", None), now);
        assert_eq!(
            token.expires_at,
            now + Duration::seconds(DEFAULT_TOKEN_LIFETIME_SECS)
        );
    }

    #[test]
    fn test_freshness_respects_expiry_margin() {
        let now = Utc::now();

        // Plenty of lifetime left.
        let token = CachedToken::from_grant(grant("t", Some(1799)), now);
        assert!(token.is_fresh_at(now));

        // Expires in 31 seconds: just inside the window.
        let token = CachedToken::from_grant(grant("t", Some(31)), now);
        assert!(token.is_fresh_at(now));

        // Expires in 30 seconds: on the margin, treated as stale.
        let token = CachedToken::from_grant(grant("t", Some(30)), now);
        assert!(!token.is_fresh_at(now));

        // Already expired.
        let token = CachedToken::from_grant(grant("t", Some(-10)), now);
        assert!(!token.is_fresh_at(now));
    }

    #[test]
    fn test_cache_last_writer_wins() {
        let cache = TokenCache::new();
        assert!(cache.get().is_none());

        let now = Utc::now();
        cache.set(CachedToken::from_grant(grant("first", Some(100)), now));
        cache.set(CachedToken::from_grant(grant("second", Some(100)), now));

        assert_eq!(cache.get().unwrap().access_token, "second");
    }
}
