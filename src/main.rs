use std::sync::Arc;

use amadeus_flight_proxy::server::{app, AppState};
use amadeus_flight_proxy::{AmadeusClient, AmadeusConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "amadeus_flight_proxy=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AmadeusConfig::from_env().expect("Failed to load config");
    let port = config.port;
    tracing::info!(environment = ?config.environment, "Starting Amadeus flight proxy");

    let client = AmadeusClient::new(config).expect("Failed to build Amadeus client");
    let state = AppState {
        client: Arc::new(client),
    };

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port))
        .await
        .expect("Failed to bind listener");
    tracing::info!("Listening on 0.0.0.0:{}", port);

    axum::serve(listener, app(state)).await.expect("Server error");
}
