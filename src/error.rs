//! Fehlertypen der Weltdaten.
//!
//! Konstruktionsfehler (unbekannte Referenzen, doppelt gesetzte Links) werden
//! an den Importer propagiert. Abwesenheit bei Abfragen ist kein Fehler,
//! sondern ein Sentinel-Wert.

use std::fmt;

use thiserror::Error;

use crate::core::{Id, LaneMarkingType};

/// Art der betroffenen Entität in einer Fehlermeldung.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Road,
    Section,
    Lane,
    Junction,
    LaneBoundary,
    MovingObject,
    StationaryObject,
    TrafficSign,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EntityKind::Road => "Road",
            EntityKind::Section => "Section",
            EntityKind::Lane => "Lane",
            EntityKind::Junction => "Junction",
            EntityKind::LaneBoundary => "LaneBoundary",
            EntityKind::MovingObject => "MovingObject",
            EntityKind::StationaryObject => "StationaryObject",
            EntityKind::TrafficSign => "TrafficSign",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum WorldError {
    /// Externe ID ohne registriertes Mapping (falsche Aufrufreihenfolge im Importer).
    #[error("unknown reference: {kind} '{id}' has no registered mapping")]
    UnknownReference { kind: EntityKind, id: String },

    #[error("{kind} {id}: successor is already set")]
    SuccessorAlreadySet { kind: EntityKind, id: Id },

    #[error("{kind} {id}: predecessor is already set")]
    PredecessorAlreadySet { kind: EntityKind, id: Id },

    /// Zwei parallele Markierungen lassen sich nicht zu einer Doppellinie kombinieren.
    #[error("invalid type of double lane boundary: left {left:?}, right {right:?}")]
    InvalidDoubleBoundary {
        left: LaneMarkingType,
        right: LaneMarkingType,
    },

    #[error("no junction found for connecting road '{road}'")]
    JunctionOfConnectorNotFound { road: String },

    #[error("no moving object linked to agent {agent}")]
    UnknownAgent { agent: i64 },

    #[error("retrieved invalidated lazy value")]
    InvalidatedCache,
}

impl WorldError {
    pub(crate) fn unknown(kind: EntityKind, id: impl fmt::Display) -> Self {
        WorldError::UnknownReference {
            kind,
            id: id.to_string(),
        }
    }
}

pub type WorldResult<T> = Result<T, WorldError>;
