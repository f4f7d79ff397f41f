//! Amadeus Flight-Offers Search Proxy
//!
//! A single-endpoint HTTP proxy in front of the Amadeus travel API. It accepts
//! a simplified flight-search request, obtains and caches an OAuth2
//! client-credentials token, translates the request into the Amadeus
//! flight-offers search schema, forwards it, and relays the upstream response
//! (or a normalized error envelope) with permissive CORS headers.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use amadeus_flight_proxy::{server, AmadeusClient, AmadeusConfig};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = AmadeusConfig::from_env()?;
//!     let port = config.port;
//!     let client = Arc::new(AmadeusClient::new(config)?);
//!
//!     let app = server::app(server::AppState { client });
//!     let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;
//!     axum::serve(listener, app).await?;
//!     Ok(())
//! }
//! ```

#![forbid(unsafe_code)]

pub mod client;
pub mod config;
pub mod error;
pub mod server;
pub mod services;
pub mod token;
pub mod types;

// Re-exports for convenience
pub use client::AmadeusClient;
pub use config::{AmadeusConfig, AmadeusConfigBuilder, AmadeusEnvironment};
pub use error::{ProxyError, ProxyResult};
pub use types::search::{FlightOffersRequest, FlightSearchRequest};
