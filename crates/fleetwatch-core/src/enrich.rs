//! External vessel-enrichment collaborator.
//!
//! A tracking service may know a vessel under its own identifier and report
//! where it was last seen. The engine asks for this on a best-effort basis;
//! every derivation works with the collaborator absent.

use crate::model::{Position, Vessel};

/// Best-effort match returned by an enrichment provider.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EnrichmentMatch {
    /// Identifier of the vessel in the external tracking system.
    pub tracking_id: Option<String>,
    pub position: Option<Position>,
}

/// Looks up a vessel by name and registry identifiers.
///
/// Implementations hold results that were fetched ahead of time; lookups
/// must not block on the network.
pub trait VesselEnricher {
    fn lookup(&self, vessel: &Vessel) -> Option<EnrichmentMatch>;
}

/// The absent collaborator: never matches anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoEnrichment;

impl VesselEnricher for NoEnrichment {
    fn lookup(&self, _vessel: &Vessel) -> Option<EnrichmentMatch> {
        None
    }
}
