//! Decision logic: raw records in, filtered views and answers out.
//!
//! Everything here is a pure function of the canonical alert store and an
//! explicit profile. Nothing reads ambient state.

pub mod dashboard;
pub mod enrich;
pub mod filter;
pub mod normalize;
pub mod query;
pub mod universe;

pub use dashboard::DashboardSummary;
pub use enrich::enrich_vessels;
pub use filter::{
    assign_affected_vessels, derive_vessel_status, filter_alerts, filter_vessels,
    match_affected_vessels,
};
pub use normalize::{normalize, normalize_at, normalize_record};
pub use query::{Answer, Intent, QueryEngine};
pub use universe::{Universe, derive_sources, known_vessels};
