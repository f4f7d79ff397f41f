//! Flight-offers search service.
//!
//! Translates a [`FlightSearchRequest`] into the Amadeus flight-offers search
//! body and forwards it with bearer authorization. The upstream response body
//! is relayed verbatim on success so the caller sees exactly what Amadeus
//! returned.

use std::sync::Arc;
use tracing::instrument;

use crate::config::AmadeusConfig;
use crate::error::{detail_from_body, ProxyError, ProxyResult};
use crate::token::AccessTokenProvider;
use crate::types::search::{
    CabinCoverage, CabinRestriction, ConnectionRestriction, DepartureDateTimeRange,
    FlightFilters, FlightOffersRequest, FlightSearchRequest, OriginDestination,
    SearchCriteria, Traveler, TravelerType,
};

/// Path of the flight-offers search endpoint, relative to the base URL.
pub const FLIGHT_OFFERS_PATH: &str = "/v2/shopping/flight-offers";

/// Hard upper bound on the number of offers requested upstream.
pub const MAX_FLIGHT_OFFERS_CAP: u32 = 250;

/// Result cap used when the caller does not specify one.
pub const DEFAULT_MAX_FLIGHT_OFFERS: u32 = 50;

/// Maximum connections allowed when the caller asked for `nonStop: false`.
const MAX_CONNECTIONS_WITH_STOPS: u32 = 3;

/// Content source searched for offers.
const GDS_SOURCE: &str = "GDS";

/// Builds the upstream search payload from a caller request.
///
/// Segment "1" is the outbound leg; segment "2", with the endpoints swapped,
/// exists iff a return date was supplied. The cabin restriction, when present,
/// covers exactly the segment ids in use.
pub fn build_payload(request: &FlightSearchRequest) -> FlightOffersRequest {
    let mut origin_destinations = vec![OriginDestination {
        id: "1".to_string(),
        origin_location_code: request.origin_location_code.clone(),
        destination_location_code: request.destination_location_code.clone(),
        departure_date_time_range: DepartureDateTimeRange {
            date: request.departure_date.clone(),
        },
    }];

    if let Some(return_date) = &request.return_date {
        origin_destinations.push(OriginDestination {
            id: "2".to_string(),
            origin_location_code: request.destination_location_code.clone(),
            destination_location_code: request.origin_location_code.clone(),
            departure_date_time_range: DepartureDateTimeRange {
                date: return_date.clone(),
            },
        });
    }

    let travelers = (1..=request.adults)
        .map(|i| Traveler {
            id: i.to_string(),
            traveler_type: TravelerType::Adult,
        })
        .collect();

    let connection_restriction = request.non_stop.map(|non_stop| ConnectionRestriction {
        max_number_of_connections: if non_stop { 0 } else { MAX_CONNECTIONS_WITH_STOPS },
    });

    let cabin_restrictions = request.travel_class.as_ref().map(|cabin| {
        vec![CabinRestriction {
            cabin: cabin.clone(),
            coverage: CabinCoverage::MostSegments,
            origin_destination_ids: origin_destinations.iter().map(|od| od.id.clone()).collect(),
        }]
    });

    FlightOffersRequest {
        currency_code: request.currency_code.clone(),
        origin_destinations,
        travelers,
        sources: vec![GDS_SOURCE.to_string()],
        search_criteria: SearchCriteria {
            max_flight_offers: request
                .max
                .unwrap_or(DEFAULT_MAX_FLIGHT_OFFERS)
                .min(MAX_FLIGHT_OFFERS_CAP),
            flight_filters: FlightFilters {
                connection_restriction,
            },
            cabin_restrictions,
        },
    }
}

/// Forwards translated searches to the Amadeus flight-offers endpoint.
pub struct FlightSearchService {
    config: Arc<AmadeusConfig>,
    http: reqwest::Client,
    tokens: Arc<dyn AccessTokenProvider>,
}

impl FlightSearchService {
    /// Creates a new search service.
    pub fn new(
        config: Arc<AmadeusConfig>,
        http: reqwest::Client,
        tokens: Arc<dyn AccessTokenProvider>,
    ) -> Self {
        Self {
            config,
            http,
            tokens,
        }
    }

    /// Translates and forwards a search, returning the raw upstream body.
    ///
    /// The body is read as text rather than deserialized so the success
    /// response preserves the exact upstream formatting.
    #[instrument(
        skip(self, request),
        fields(
            origin = %request.origin_location_code,
            destination = %request.destination_location_code,
        )
    )]
    pub async fn search(&self, request: &FlightSearchRequest) -> ProxyResult<String> {
        let payload = build_payload(request);
        let token = self.tokens.bearer_token().await?;

        let response = self
            .http
            .post(self.config.endpoint_url(FLIGHT_OFFERS_PATH))
            .bearer_auth(token)
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "upstream search rejected");
            return Err(ProxyError::Api {
                status: status.as_u16(),
                detail: detail_from_body(&body),
            });
        }

        Ok(body)
    }
}
