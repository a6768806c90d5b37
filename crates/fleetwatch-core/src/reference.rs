//! Static reference tables: issuing bodies, species keywords, seed fleet.
//!
//! Lookups over these tables are ordered scans, not maps. The species table in
//! particular relies on order: the first keyword found in a title wins, so
//! more specific keywords ("southern bluefin") sit above general ones
//! ("bluefin", "tuna").

use std::collections::BTreeMap;

use crate::model::{Vessel, VesselStatus};

/// Zone reported for bodies missing from [`BODIES`].
pub const UNKNOWN_ZONE: &str = "Unknown";

/// Species reported when no keyword matches a title.
pub const ALL_SPECIES: &str = "All Species";

/// A regional fisheries management organisation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BodyInfo {
    pub code: &'static str,
    pub name: &'static str,
    pub region: &'static str,
    /// Canonical zone used for alerts issued by this body.
    pub zone: &'static str,
}

pub const BODIES: &[BodyInfo] = &[
    BodyInfo {
        code: "IOTC",
        name: "Indian Ocean Tuna Commission",
        region: "Indian Ocean",
        zone: "Indian Ocean",
    },
    BodyInfo {
        code: "WCPFC",
        name: "Western and Central Pacific Fisheries Commission",
        region: "Pacific",
        zone: "Western & Central Pacific",
    },
    BodyInfo {
        code: "ICCAT",
        name: "International Commission for the Conservation of Atlantic Tunas",
        region: "Atlantic",
        zone: "Atlantic Ocean",
    },
    BodyInfo {
        code: "IATTC",
        name: "Inter-American Tropical Tuna Commission",
        region: "Pacific",
        zone: "Eastern Pacific",
    },
    BodyInfo {
        code: "CCSBT",
        name: "Commission for the Conservation of Southern Bluefin Tuna",
        region: "Southern Hemisphere",
        zone: "Southern Ocean",
    },
    BodyInfo {
        code: "NAFO",
        name: "Northwest Atlantic Fisheries Organization",
        region: "Atlantic",
        zone: "Northwest Atlantic",
    },
    BodyInfo {
        code: "NEAFC",
        name: "North-East Atlantic Fisheries Commission",
        region: "Atlantic",
        zone: "Northeast Atlantic",
    },
    BodyInfo {
        code: "SPRFMO",
        name: "South Pacific Regional Fisheries Management Organisation",
        region: "Pacific",
        zone: "South Pacific",
    },
    BodyInfo {
        code: "CCAMLR",
        name: "Commission for the Conservation of Antarctic Marine Living Resources",
        region: "Antarctic",
        zone: "Antarctic Waters",
    },
    BodyInfo {
        code: "SIOFA",
        name: "Southern Indian Ocean Fisheries Agreement",
        region: "Indian Ocean",
        zone: "Southern Indian Ocean",
    },
    BodyInfo {
        code: "GFCM",
        name: "General Fisheries Commission for the Mediterranean",
        region: "Mediterranean",
        zone: "Mediterranean Sea",
    },
    BodyInfo {
        code: "NPFC",
        name: "North Pacific Fisheries Commission",
        region: "Pacific",
        zone: "North Pacific",
    },
];

/// `(keyword, canonical species)` pairs, matched against lower-cased titles.
pub const SPECIES_KEYWORDS: &[(&str, &str)] = &[
    ("yellowfin", "Yellowfin Tuna"),
    ("bigeye", "Bigeye Tuna"),
    ("skipjack", "Skipjack Tuna"),
    ("albacore", "Albacore Tuna"),
    ("southern bluefin", "Southern Bluefin Tuna"),
    ("bluefin", "Bluefin Tuna"),
    ("swordfish", "Swordfish"),
    ("marlin", "Marlin"),
    ("shark", "Sharks"),
    ("toothfish", "Toothfish"),
    ("krill", "Antarctic Krill"),
    ("jack mackerel", "Jack Mackerel"),
    ("mackerel", "Mackerel"),
    ("squid", "Squid"),
    ("saury", "Pacific Saury"),
    ("redfish", "Redfish"),
    ("halibut", "Greenland Halibut"),
    ("tuna", "Tuna"),
];

/// Look up a body by code (case-insensitive).
pub fn body_info(code: &str) -> Option<&'static BodyInfo> {
    let code = code.trim();
    BODIES.iter().find(|b| b.code.eq_ignore_ascii_case(code))
}

/// Canonical zone for a body code, or [`UNKNOWN_ZONE`].
pub fn zone_for_body(code: &str) -> &'static str {
    body_info(code).map(|b| b.zone).unwrap_or(UNKNOWN_ZONE)
}

/// The reference fleet used when no operator profile is configured.
pub fn seed_vessels() -> Vec<Vessel> {
    vec![
        seed(
            "v1",
            "Ocean Harvester",
            "Seychelles",
            "Indian Ocean",
            &["Yellowfin Tuna", "Skipjack Tuna"],
            VesselStatus::ActionNeeded,
            &[("imo", "9234567"), ("call_sign", "S7OH"), ("mmsi", "664123000")],
        ),
        seed(
            "v2",
            "Pacific Star",
            "Fiji",
            "Western & Central Pacific",
            &["Skipjack Tuna", "Bigeye Tuna"],
            VesselStatus::Compliant,
            &[("imo", "9345678"), ("call_sign", "3DPS"), ("mmsi", "520456000")],
        ),
        seed(
            "v3",
            "Atlantic Dawn",
            "Spain",
            "Atlantic Ocean",
            &["Bluefin Tuna", "Swordfish"],
            VesselStatus::AtRisk,
            &[("imo", "9456789"), ("call_sign", "EADW")],
        ),
        seed(
            "v4",
            "Southern Cross",
            "Australia",
            "Southern Ocean",
            &["Southern Bluefin Tuna", "Toothfish"],
            VesselStatus::Compliant,
            &[("mmsi", "503789000")],
        ),
    ]
}

fn seed(
    id: &str,
    name: &str,
    flag: &str,
    zone: &str,
    species: &[&str],
    status: VesselStatus,
    identifiers: &[(&str, &str)],
) -> Vessel {
    Vessel {
        id: id.to_string(),
        name: name.to_string(),
        flag: flag.to_string(),
        zone: zone.to_string(),
        species: species.iter().map(|s| s.to_string()).collect(),
        status,
        identifiers: identifiers
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect::<BTreeMap<_, _>>(),
        last_position: None,
    }
}
