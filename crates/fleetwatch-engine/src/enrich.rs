//! Merge best-effort enrichment results into vessels.

use fleetwatch_core::{Vessel, VesselEnricher};
use tracing::debug;

/// Registry-identifier key under which an external tracking id is stored.
pub const TRACKING_ID_KEY: &str = "tracking_id";

/// Apply the enricher to every vessel. Vessels without a match pass through
/// unchanged, so `NoEnrichment` is an identity.
pub fn enrich_vessels(vessels: &[Vessel], enricher: &dyn VesselEnricher) -> Vec<Vessel> {
    vessels
        .iter()
        .map(|vessel| {
            let Some(found) = enricher.lookup(vessel) else {
                return vessel.clone();
            };
            debug!(vessel = %vessel.name, tracking_id = ?found.tracking_id, "enriched vessel");

            let mut enriched = vessel.clone();
            if let Some(id) = found.tracking_id {
                enriched.identifiers.insert(TRACKING_ID_KEY.to_string(), id);
            }
            if found.position.is_some() {
                enriched.last_position = found.position;
            }
            enriched
        })
        .collect()
}
