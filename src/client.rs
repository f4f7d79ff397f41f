//! Amadeus client facade.
//!
//! Wires the configuration, a shared HTTP client, the token manager and the
//! search service together. The server holds one instance for the lifetime of
//! the process.

use std::sync::Arc;

use crate::config::AmadeusConfig;
use crate::error::{ProxyError, ProxyResult};
use crate::services::search::FlightSearchService;
use crate::token::{AccessTokenProvider, OAuthTokenManager};
use crate::types::search::FlightSearchRequest;

/// Client for the Amadeus flight-offers search API.
pub struct AmadeusClient {
    search: FlightSearchService,
}

impl AmadeusClient {
    /// Creates a client with a token manager backed by the configured
    /// credentials.
    pub fn new(config: AmadeusConfig) -> ProxyResult<Self> {
        let config = Arc::new(config);
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(ProxyError::from)?;

        let tokens: Arc<dyn AccessTokenProvider> =
            Arc::new(OAuthTokenManager::new(Arc::clone(&config), http.clone()));

        Ok(Self {
            search: FlightSearchService::new(config, http, tokens),
        })
    }

    /// Creates a client with a custom token provider. Used by tests to bypass
    /// the credentials grant.
    pub fn with_token_provider(
        config: AmadeusConfig,
        tokens: Arc<dyn AccessTokenProvider>,
    ) -> ProxyResult<Self> {
        let config = Arc::new(config);
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(ProxyError::from)?;

        Ok(Self {
            search: FlightSearchService::new(config, http, tokens),
        })
    }

    /// Translates and forwards a flight search, returning the raw upstream
    /// response body.
    pub async fn search_offers(&self, request: &FlightSearchRequest) -> ProxyResult<String> {
        self.search.search(request).await
    }
}
