//! Weltdatenmodell einer Fahrsimulation mit räumlicher Abfrage-Engine.
//!
//! [`WorldData`] besitzt den Straßengraphen (Straßen, Abschnitte, Spuren,
//! Markierungen, Kreuzungen) und alle Objekte. [`WorldDataQuery`] beantwortet
//! lesende Fragen darauf, [`ground_truth`] liefert die serialisierbare Sensorsicht.

pub mod core;
pub mod error;
pub mod ground_truth;
pub mod query;
pub mod shared;
pub mod world_data;

pub use core::{
    Id, IdMapping, Lane, LaneKey, LaneType, LinkedObject, MovingObject, OdId, Road, Section,
    SectionKey, StationaryObject, TrafficSign, WorldObject, WorldObjectRef, INVALID_ID,
    INVALID_LANE,
};
pub use error::{EntityKind, WorldError, WorldResult};
pub use ground_truth::{SensorView, SensorViewConfiguration};
pub use query::{LaneStream, RoadStream, Route, RouteElement, Stream, WorldDataQuery};
pub use shared::WorldOptions;
pub use world_data::WorldData;
