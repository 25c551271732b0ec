//! Verkehrszeichen mit Zusatzzeichen und Spurzuordnung.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::ids::Id;

/// Zeichentyp, Wert entspricht der Katalognummer (z. B. 274 = Höchstgeschwindigkeit).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TrafficSignType {
    #[default]
    Undefined = 0,
    GiveWay = 205,
    Stop = 206,
    DoNotEnter = 267,
    EnvironmentalZoneBegin = 2701,
    EnvironmentalZoneEnd = 2702,
    MaximumSpeedLimit = 274,
    SpeedLimitZoneBegin = 2741,
    SpeedLimitZoneEnd = 2742,
    MinimumSpeedLimit = 275,
    OvertakingBanBegin = 276,
    OvertakingBanTrucksBegin = 277,
    EndOfMaximumSpeedLimit = 278,
    EndOfMinimumSpeedLimit = 279,
    OvertakingBanEnd = 280,
    OvertakingBanTrucksEnd = 281,
    EndOfAllSpeedLimitsAndOvertakingRestrictions = 282,
    RightOfWayNextIntersection = 301,
    RightOfWayBegin = 306,
    RightOfWayEnd = 307,
    TownBegin = 310,
    TownEnd = 311,
    TrafficCalmedDistrictBegin = 3251,
    TrafficCalmedDistrictEnd = 3252,
    HighWayBegin = 3301,
    HighWayEnd = 3302,
    HighWayExit = 333,
    AnnounceHighwayExit = 448,
    HighwayExitPole = 450,
    AnnounceRightLaneEnd = 5311,
    AnnounceLeftLaneEnd = 5312,
    DistanceIndication = 1004,
}

impl TrafficSignType {
    pub fn code(self) -> u32 {
        self as u32
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SignUnit {
    #[default]
    None,
    Kilogram,
    MeterPerSecond,
    Meter,
    Percentage,
    Second,
}

/// Inhalt eines Zeichens, wie ihn der Importer liefert.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TrafficSignSpec {
    pub sign_type: TrafficSignType,
    pub value: f64,
    pub unit: SignUnit,
    pub text: String,
    /// s-Position ab Straßenanfang
    pub s: f64,
    /// Weltposition, falls bekannt (für Sichtfeld-Filter)
    pub position: Option<DVec2>,
    pub supplementary_signs: Vec<TrafficSignSpec>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TrafficSign {
    pub(crate) id: Id,
    pub(crate) external_id: String,
    pub(crate) spec: TrafficSignSpec,
    pub(crate) valid_lanes: Vec<Id>,
}

impl TrafficSign {
    pub(crate) fn new(id: Id, external_id: String, spec: TrafficSignSpec) -> Self {
        Self {
            id,
            external_id,
            spec,
            valid_lanes: Vec::new(),
        }
    }

    pub fn id(&self) -> Id {
        self.id
    }

    pub fn external_id(&self) -> &str {
        &self.external_id
    }

    pub fn spec(&self) -> &TrafficSignSpec {
        &self.spec
    }

    pub fn s(&self) -> f64 {
        self.spec.s
    }

    pub fn position(&self) -> Option<DVec2> {
        self.spec.position
    }

    pub fn valid_lanes(&self) -> &[Id] {
        &self.valid_lanes
    }

    pub fn supplementary_signs(&self) -> &[TrafficSignSpec] {
        &self.spec.supplementary_signs
    }

    pub(crate) fn add_valid_lane(&mut self, lane: Id) {
        if !self.valid_lanes.contains(&lane) {
            self.valid_lanes.push(lane);
        }
    }

    /// Aufbereitete Sicht auf das Zeichen mit relativem Abstand.
    pub fn specification(&self, relative_distance: f64) -> TrafficSignEntity {
        TrafficSignEntity::from_spec(&self.spec, relative_distance)
    }
}

/// Zeichen aus Sicht eines Abfragenden (relativer Abstand zum Suchstart).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrafficSignEntity {
    pub sign_type: TrafficSignType,
    pub unit: SignUnit,
    pub distance_to_start_of_road: f64,
    pub relative_distance: f64,
    pub value: f64,
    pub text: String,
    pub supplementary_signs: Vec<TrafficSignEntity>,
}

impl TrafficSignEntity {
    fn from_spec(spec: &TrafficSignSpec, relative_distance: f64) -> Self {
        Self {
            sign_type: spec.sign_type,
            unit: spec.unit,
            distance_to_start_of_road: spec.s,
            relative_distance,
            value: spec.value,
            text: spec.text.clone(),
            supplementary_signs: spec
                .supplementary_signs
                .iter()
                .map(|s| Self::from_spec(s, relative_distance))
                .collect(),
        }
    }
}
