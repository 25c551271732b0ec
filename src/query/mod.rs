//! Abfrage-Fassade über [`WorldData`]: Lookups, Streams, Objekt- und Kreuzungsabfragen.
//!
//! Die Fassade hält nur eine geteilte Referenz und ist damit beliebig oft
//! gleichzeitig nutzbar, solange die Welt nicht verändert wird.

mod junctions;
mod lookup;
mod markings;
mod objects;
mod obstruction;
mod relative;
pub mod stream;
mod streams;

use serde::{Deserialize, Serialize};

use crate::core::{
    Id, IntersectingConnectionRank, LaneMarkingColor, LaneMarkingType, LaneType, OdId, INVALID_ID,
};
use crate::world_data::WorldData;

pub use stream::{LaneStream, RoadStream, Stream, StreamElement, StreamInfo};

/// Straße einer Route samt Befahrungsrichtung.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteElement {
    pub road_id: String,
    pub in_road_direction: bool,
}

impl RouteElement {
    pub fn new(road_id: impl Into<String>, in_road_direction: bool) -> Self {
        Self {
            road_id: road_id.into(),
            in_road_direction,
        }
    }
}

/// Geplante Route: Straßen in Fahrtreihenfolge plus durchfahrene Kreuzungen.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    pub roads: Vec<RouteElement>,
    pub junctions: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RoadNetworkElementType {
    Road,
    Junction,
    #[default]
    None,
}

/// Nachbar einer Straße im Straßennetz.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RoadNetworkElement {
    pub element_type: RoadNetworkElementType,
    pub id: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LaneCategory {
    #[default]
    Undefined,
    RegularLane,
    RightMostLane,
}

/// Ergebnis einer Spurabfrage.
#[derive(Debug, Clone, PartialEq)]
pub struct LaneQueryResult {
    /// Erste Spur des Spur-Streams, identifiziert den Stream
    pub stream_id: Id,
    pub start_distance: f64,
    pub end_distance: f64,
    pub category: LaneCategory,
    pub is_driving_lane: bool,
}

impl LaneQueryResult {
    pub fn invalid() -> Self {
        Self {
            stream_id: INVALID_ID,
            start_distance: 0.0,
            end_distance: 0.0,
            category: LaneCategory::Undefined,
            is_driving_lane: false,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.stream_id != INVALID_ID
    }
}

/// Befahrbare Verbindung über eine Kreuzung.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JunctionConnection {
    pub connecting_road_id: String,
    pub outgoing_road_id: String,
    pub outgoing_stream_direction: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntersectingConnection {
    pub id: String,
    pub rank: IntersectingConnectionRank,
}

/// Vorfahrt zwischen zwei Verbindungsstraßen (externe IDs).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JunctionConnectorPriority {
    pub high: String,
    pub low: String,
}

/// Markierungsabschnitt relativ zur Suchposition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LaneMarkingEntity {
    pub relative_start_distance: f64,
    pub width: f64,
    pub marking_type: LaneMarkingType,
    pub color: LaneMarkingColor,
}

/// Seitliche Überdeckung eines Objekts mit dem eigenen Fahrschlauch.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Obstruction {
    pub valid: bool,
    /// Größter Abstand einer Ecke links der eigenen Bahn
    pub left: f64,
    /// Kleinster Abstand einer Ecke (negativ = rechts)
    pub right: f64,
    pub is_overlapping: bool,
}

impl Obstruction {
    pub fn new(left: f64, right: f64) -> Self {
        Self {
            valid: true,
            left,
            right,
            is_overlapping: left > 0.0 && right < 0.0,
        }
    }

    pub fn invalid() -> Self {
        Self::default()
    }
}

/// Spur relativ zur Ego-Spur (0 = Ego, positiv = links in Stream-Richtung).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelativeLane {
    pub id: OdId,
    pub in_driving_direction: bool,
    pub lane_type: LaneType,
    pub predecessor: Option<OdId>,
    pub successor: Option<OdId>,
}

/// Stream-Intervall mit konstanter Spuraufteilung.
#[derive(Debug, Clone, PartialEq)]
pub struct LanesInterval {
    pub start_s: f64,
    pub end_s: f64,
    pub lanes: Vec<RelativeLane>,
}

/// Verbindungsstraße einer Kreuzung relativ zur Suchposition.
#[derive(Debug, Clone, PartialEq)]
pub struct RelativeJunction {
    pub start_s: f64,
    pub end_s: f64,
    pub connecting_road_id: String,
}

/// Lesende Abfragen auf einer fertig aufgebauten Welt.
#[derive(Debug, Clone, Copy)]
pub struct WorldDataQuery<'a> {
    world: &'a WorldData,
}

impl<'a> WorldDataQuery<'a> {
    pub fn new(world: &'a WorldData) -> Self {
        Self { world }
    }

    pub fn world(&self) -> &'a WorldData {
        self.world
    }

    /// Externe ID einer Straße, leer wenn unbekannt.
    fn road_name(&self, road: Id) -> String {
        self.world
            .road_id_mapping()
            .external(road)
            .cloned()
            .unwrap_or_default()
    }
}
