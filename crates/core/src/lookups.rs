//! Closed registries of named lookup tables.
//!
//! Compliance reports reference five `{id, name}` tables describing the
//! board, and eight `{id, number}` tables of brand-share-of-voice scores.
//! Table names are only ever taken from these enums, never from input.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// `{id, name}` tables describing a billboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LookupKind {
    Structure,
    Poster,
    Illumination,
    Route,
    Side,
}

impl LookupKind {
    pub const ALL: [LookupKind; 5] = [
        LookupKind::Structure,
        LookupKind::Poster,
        LookupKind::Illumination,
        LookupKind::Route,
        LookupKind::Side,
    ];

    /// Path segment, e.g. `/lookups/illumination`.
    pub fn as_str(self) -> &'static str {
        match self {
            LookupKind::Structure => "structure",
            LookupKind::Poster => "poster",
            LookupKind::Illumination => "illumination",
            LookupKind::Route => "route",
            LookupKind::Side => "side",
        }
    }

    pub fn table(self) -> &'static str {
        match self {
            LookupKind::Structure => "structures",
            LookupKind::Poster => "posters",
            LookupKind::Illumination => "illuminations",
            LookupKind::Route => "routes",
            LookupKind::Side => "sides",
        }
    }
}

/// Brand-share-of-voice score tables (`{id, number}`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BsvKind {
    VisibilityDistance,
    TrafficDensity,
    TrafficSpeed,
    AngleVision,
    ClutterBillboard,
    ClutterFormat,
    ProximityCompetition,
    PedestrianTraffic,
}

impl BsvKind {
    pub const ALL: [BsvKind; 8] = [
        BsvKind::VisibilityDistance,
        BsvKind::TrafficDensity,
        BsvKind::TrafficSpeed,
        BsvKind::AngleVision,
        BsvKind::ClutterBillboard,
        BsvKind::ClutterFormat,
        BsvKind::ProximityCompetition,
        BsvKind::PedestrianTraffic,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            BsvKind::VisibilityDistance => "visibility_distance",
            BsvKind::TrafficDensity => "traffic_density",
            BsvKind::TrafficSpeed => "traffic_speed",
            BsvKind::AngleVision => "angle_vision",
            BsvKind::ClutterBillboard => "clutter_billboard",
            BsvKind::ClutterFormat => "clutter_format",
            BsvKind::ProximityCompetition => "proximity_competition",
            BsvKind::PedestrianTraffic => "pedestrian_traffic",
        }
    }

    pub fn table(self) -> &'static str {
        match self {
            BsvKind::VisibilityDistance => "bsv_visibility_distances",
            BsvKind::TrafficDensity => "bsv_traffic_densities",
            BsvKind::TrafficSpeed => "bsv_traffic_speeds",
            BsvKind::AngleVision => "bsv_angle_visions",
            BsvKind::ClutterBillboard => "bsv_clutter_billboards",
            BsvKind::ClutterFormat => "bsv_clutter_formats",
            BsvKind::ProximityCompetition => "bsv_proximity_competitions",
            BsvKind::PedestrianTraffic => "bsv_pedestrian_traffic",
        }
    }
}

macro_rules! impl_kind_text {
    ($kind:ty, $label:literal) => {
        impl fmt::Display for $kind {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $kind {
            type Err = CoreError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::ALL
                    .into_iter()
                    .find(|kind| kind.as_str() == s)
                    .ok_or_else(|| {
                        let known: Vec<&str> = Self::ALL.iter().map(|k| k.as_str()).collect();
                        CoreError::validation(format!(
                            concat!("Unknown ", $label, " '{}'. Must be one of: {}"),
                            s,
                            known.join(", ")
                        ))
                    })
            }
        }
    };
}

impl_kind_text!(LookupKind, "lookup");
impl_kind_text!(BsvKind, "BSV table");
