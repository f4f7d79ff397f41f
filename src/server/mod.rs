//! HTTP surface of the proxy.
//!
//! A single endpoint: `POST /` translates and forwards a flight search,
//! `OPTIONS /` short-circuits cross-origin preflights. Every response, success
//! or error, carries the permissive CORS headers. This module is also the one
//! boundary where typed errors become transport responses.

use axum::{
    body::Bytes,
    extract::{Request, State},
    http::{header, HeaderValue, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde_json::json;
use std::sync::Arc;

use crate::client::AmadeusClient;
use crate::error::ProxyError;
use crate::types::search::FlightSearchRequest;

/// Value of the `Access-Control-Allow-Headers` header on every response.
pub const ALLOWED_HEADERS: &str = "authorization, x-client-info, apikey, content-type";

/// Shared state for the request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Process-wide Amadeus client (owns the token cache).
    pub client: Arc<AmadeusClient>,
}

/// Builds the router for the proxy.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", post(search_offers).options(preflight))
        .layer(axum::middleware::from_fn(cors_headers))
        .with_state(state)
}

/// Stamps the permissive CORS headers on every response.
async fn cors_headers(request: Request, next: Next) -> Response {
    let mut response = next.run(request).await;
    let headers = response.headers_mut();
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static(ALLOWED_HEADERS),
    );
    response
}

/// Preflight short-circuit: 200, empty body, no body processing.
async fn preflight() -> StatusCode {
    StatusCode::OK
}

/// Parses the caller request, forwards the translated search, and relays the
/// upstream body verbatim.
///
/// The body is parsed by hand from raw bytes instead of through the `Json`
/// extractor: a parse failure of any kind, invalid UTF-8 included, is an
/// internal error here (UNCAUGHT, 500), not a client rejection.
async fn search_offers(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Response, ProxyError> {
    let request: FlightSearchRequest =
        serde_json::from_slice(&body).map_err(ProxyError::uncaught)?;

    let raw = state.client.search_offers(&request).await?;

    Ok((
        StatusCode::OK,
        [(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        )],
        raw,
    )
        .into_response())
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            ProxyError::Api { status, detail } => (
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY),
                json!({
                    "error": self.error_code(),
                    "status": status,
                    "detail": detail,
                }),
            ),
            ProxyError::Token { body, .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({
                    "error": self.error_code(),
                    "detail": body,
                }),
            ),
            other => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({
                    "error": other.error_code(),
                    "detail": other.to_string(),
                }),
            ),
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_api_error_mirrors_upstream_status() {
        let err = ProxyError::Api {
            status: 400,
            detail: json!({"errors": [{"code": 425}]}),
        };
        let response = err.into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"], "API_ERROR");
        assert_eq!(body["status"], 400);
        assert_eq!(body["detail"], json!({"errors": [{"code": 425}]}));
    }

    #[tokio::test]
    async fn test_token_error_responds_500_with_raw_detail() {
        let err = ProxyError::Token {
            status: 401,
            body: "invalid_client".to_string(),
        };
        let response = err.into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body["error"], "TOKEN_ERROR");
        assert_eq!(body["detail"], "invalid_client");
    }

    #[tokio::test]
    async fn test_uncaught_error_responds_500() {
        let response = ProxyError::uncaught("boom").into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body["error"], "UNCAUGHT");
        assert_eq!(body["detail"], "boom");
    }

    #[tokio::test]
    async fn test_api_error_with_invalid_status_falls_back_to_bad_gateway() {
        let err = ProxyError::Api {
            status: 99,
            detail: json!("odd"),
        };
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }
}
