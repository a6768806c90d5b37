pub mod dates;
pub mod enrich;
pub mod model;
pub mod profile;
pub mod reference;
pub mod schema;

pub use enrich::{EnrichmentMatch, NoEnrichment, VesselEnricher};
pub use model::{
    Alert, AlertCategory, AlertStatus, Position, RawRegulatoryRecord, RegulatorySource, Severity,
    SourceStatus, Vessel, VesselStatus,
};
pub use profile::{FleetProfile, UserProfile, VesselDescriptor};
pub use schema::alerts;
