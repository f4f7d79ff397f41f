//! Type definitions for the caller-facing request and the upstream payload.

pub mod search;

pub use search::{
    CabinCoverage, CabinRestriction, ConnectionRestriction, DepartureDateTimeRange,
    FlightFilters, FlightOffersRequest, FlightSearchRequest, OriginDestination,
    SearchCriteria, Traveler, TravelerType,
};
