//! Flight search types.
//!
//! [`FlightSearchRequest`] is the simplified schema callers send to the proxy;
//! [`FlightOffersRequest`] is the Amadeus flight-offers search body the proxy
//! builds from it. Both use camelCase on the wire.

use serde::{Deserialize, Serialize};

/// Default number of adult travelers.
pub const DEFAULT_ADULTS: u32 = 1;

/// Default currency for priced offers.
pub const DEFAULT_CURRENCY: &str = "THB";

/// Simplified search request accepted by the proxy.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightSearchRequest {
    /// IATA code of the departure location.
    pub origin_location_code: String,
    /// IATA code of the arrival location.
    pub destination_location_code: String,
    /// Outbound travel date (`YYYY-MM-DD`).
    pub departure_date: String,
    /// Return travel date; when present the search becomes a round trip.
    #[serde(default)]
    pub return_date: Option<String>,
    /// Number of adult travelers.
    #[serde(default = "default_adults")]
    pub adults: u32,
    /// Currency for priced offers.
    #[serde(default = "default_currency")]
    pub currency_code: String,
    /// Requested result cap; defaults to 50 and is clamped to 250.
    #[serde(default)]
    pub max: Option<u32>,
    /// When explicitly set, restricts connections: `true` means non-stop only.
    #[serde(default)]
    pub non_stop: Option<bool>,
    /// Cabin class (for example `ECONOMY` or `BUSINESS`). Passed through to
    /// Amadeus unvalidated.
    #[serde(default)]
    pub travel_class: Option<String>,
}

fn default_adults() -> u32 {
    DEFAULT_ADULTS
}

fn default_currency() -> String {
    DEFAULT_CURRENCY.to_string()
}

/// Amadeus flight-offers search request body.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightOffersRequest {
    /// Currency for priced offers.
    pub currency_code: String,
    /// Itinerary segments. One for a one-way search, two for a round trip.
    pub origin_destinations: Vec<OriginDestination>,
    /// Traveler list, ids "1".."N".
    pub travelers: Vec<Traveler>,
    /// Content sources to search.
    pub sources: Vec<String>,
    /// Result cap and filters.
    pub search_criteria: SearchCriteria,
}

/// One itinerary segment.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OriginDestination {
    /// Segment id ("1" outbound, "2" return).
    pub id: String,
    /// IATA code of the departure location.
    pub origin_location_code: String,
    /// IATA code of the arrival location.
    pub destination_location_code: String,
    /// Travel date for this segment.
    pub departure_date_time_range: DepartureDateTimeRange,
}

/// Travel date wrapper for a segment.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartureDateTimeRange {
    /// Travel date (`YYYY-MM-DD`).
    pub date: String,
}

/// One traveler entry.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Traveler {
    /// Traveler id, sequential from "1".
    pub id: String,
    /// Traveler category.
    pub traveler_type: TravelerType,
}

/// Traveler category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TravelerType {
    /// Adult traveler.
    Adult,
}

/// Result cap and filters for the search.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchCriteria {
    /// Maximum number of offers to return. Never exceeds 250.
    pub max_flight_offers: u32,
    /// Connection filters. Always serialized, even when empty.
    pub flight_filters: FlightFilters,
    /// Cabin restrictions, present only when a cabin class was requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cabin_restrictions: Option<Vec<CabinRestriction>>,
}

/// Connection filters.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightFilters {
    /// Restriction on the number of stops.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connection_restriction: Option<ConnectionRestriction>,
}

/// Restriction on the number of stops allowed in a result.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionRestriction {
    /// Maximum number of connections (0 for non-stop).
    pub max_number_of_connections: u32,
}

/// Constraint limiting results to a cabin class on specific segments.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CabinRestriction {
    /// Requested cabin class, forwarded verbatim.
    pub cabin: String,
    /// How many of the covered segments must honor the cabin.
    pub coverage: CabinCoverage,
    /// Segment ids the restriction applies to.
    pub origin_destination_ids: Vec<String>,
}

/// Cabin restriction coverage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CabinCoverage {
    /// The cabin must apply to most segments of the covered itineraries.
    MostSegments,
}
