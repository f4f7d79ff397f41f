//! Services layer: the request translation and upstream forwarding.

pub mod search;

pub use search::{build_payload, FlightSearchService};
