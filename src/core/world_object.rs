//! Weltobjekte: bewegte und stationäre Objekte mit Straßenverortung.
//!
//! Die Unterscheidung läuft über [`ObjectKind`] statt über Downcasts.
//! Der Rückverweis auf das externe Objekt (Agent, Hindernis) ist ein
//! nicht-besitzender [`LinkedObject`]-Handle.

use std::cell::Cell;

use glam::{DVec2, DVec3};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::geometry::{Dimension, Orientation};
use super::ids::{Id, OdId};
use super::lane::MeasurementPoint;
use crate::error::{WorldError, WorldResult};

/// Konkrete Art eines Weltobjekts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObjectKind {
    Moving,
    Stationary,
}

/// Filter für Objektsuchen entlang eines Streams.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ObjectCategory {
    #[default]
    Any,
    Moving,
    Stationary,
}

impl ObjectCategory {
    pub fn matches(self, kind: ObjectKind) -> bool {
        match self {
            ObjectCategory::Any => true,
            ObjectCategory::Moving => kind == ObjectKind::Moving,
            ObjectCategory::Stationary => kind == ObjectKind::Stationary,
        }
    }
}

/// Handle auf das extern verwaltete Gegenstück (z. B. Agenten-ID).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LinkedObject(pub i64);

/// Position auf einer Straße (s/t-Koordinaten).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GlobalRoadPosition {
    pub road_id: String,
    pub lane_id: OdId,
    pub s: f64,
    pub t: f64,
    pub hdg: f64,
}

/// Von einem Objekt belegter Bereich auf einer Straße.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoadInterval {
    pub lanes: Vec<OdId>,
    pub s_start: f64,
    pub s_end: f64,
}

impl Default for RoadInterval {
    fn default() -> Self {
        Self {
            lanes: Vec::new(),
            s_start: f64::MAX,
            s_end: 0.0,
        }
    }
}

/// Straßenbezogene Verortung eines Objekts.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ObjectPosition {
    pub reference_point: GlobalRoadPosition,
    pub main_locate_point: GlobalRoadPosition,
    /// Externe Straßen-ID → belegter Bereich
    pub touched_roads: IndexMap<String, RoadInterval>,
}

/// Zwischengespeicherter Wert, der explizit invalidiert wird.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Lazy<T: Copy> {
    value: Cell<Option<T>>,
}

impl<T: Copy> Lazy<T> {
    pub fn update(&self, value: T) {
        self.value.set(Some(value));
    }

    pub fn invalidate(&self) {
        self.value.set(None);
    }

    pub fn get(&self) -> WorldResult<T> {
        self.value.get().ok_or(WorldError::InvalidatedCache)
    }

    pub fn is_valid(&self) -> bool {
        self.value.get().is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum IndicatorState {
    #[default]
    Off,
    Left,
    Right,
    Warning,
}

/// Gemeinsame Daten aller Weltobjekte.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectBase {
    pub(crate) id: Id,
    pub(crate) link: LinkedObject,
    pub(crate) dimension: Dimension,
    /// Mittelpunkt der Bounding-Box
    pub(crate) position: DVec3,
    pub(crate) orientation: Orientation,
    pub(crate) located: ObjectPosition,
    pub(crate) assigned_lanes: Vec<Id>,
}

impl ObjectBase {
    pub(crate) fn new(id: Id, link: LinkedObject) -> Self {
        Self {
            id,
            link,
            dimension: Dimension::default(),
            position: DVec3::ZERO,
            orientation: Orientation::default(),
            located: ObjectPosition::default(),
            assigned_lanes: Vec::new(),
        }
    }
}

/// Lesezugriff auf alle Weltobjekte.
pub trait WorldObject {
    fn base(&self) -> &ObjectBase;

    fn kind(&self) -> ObjectKind;

    fn reference_point_position(&self) -> DVec3;

    fn id(&self) -> Id {
        self.base().id
    }

    fn link(&self) -> LinkedObject {
        self.base().link
    }

    fn dimension(&self) -> Dimension {
        self.base().dimension
    }

    fn orientation(&self) -> Orientation {
        self.base().orientation
    }

    /// Mittelpunkt der Bounding-Box.
    fn bounding_box_center(&self) -> DVec3 {
        self.base().position
    }

    fn located_position(&self) -> &ObjectPosition {
        &self.base().located
    }

    fn assigned_lanes(&self) -> &[Id] {
        &self.base().assigned_lanes
    }

    /// s-Start bzw. s-Ende auf der gegebenen Straße, `NaN` wenn nicht berührt.
    fn distance(&self, point: MeasurementPoint, road_id: &str) -> f64 {
        match self.base().located.touched_roads.get(road_id) {
            Some(interval) => match point {
                MeasurementPoint::RoadStart => interval.s_start,
                MeasurementPoint::RoadEnd => interval.s_end,
            },
            None => f64::NAN,
        }
    }

    /// Eckpunkte der Bounding-Box in der Ebene.
    ///
    /// Reihenfolge: vorne links, vorne rechts, hinten rechts, hinten links.
    fn corners(&self) -> [DVec2; 4] {
        let center = self.bounding_box_center().truncate();
        let dimension = self.dimension();
        let forward = DVec2::from_angle(self.orientation().yaw) * (dimension.length * 0.5);
        let left = forward.perp().normalize_or_zero() * (dimension.width * 0.5);
        [
            center + forward + left,
            center + forward - left,
            center - forward - left,
            center - forward + left,
        ]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StationaryObject {
    pub(crate) base: ObjectBase,
}

impl StationaryObject {
    pub(crate) fn new(id: Id, link: LinkedObject) -> Self {
        Self {
            base: ObjectBase::new(id, link),
        }
    }

    pub fn set_reference_point_position(&mut self, position: DVec3) {
        self.base.position = position;
    }

    pub fn set_dimension(&mut self, dimension: Dimension) {
        self.base.dimension = dimension;
    }

    pub fn set_orientation(&mut self, orientation: Orientation) {
        self.base.orientation = orientation;
    }

    pub fn set_located_position(&mut self, position: ObjectPosition) {
        self.base.located = position;
    }
}

impl WorldObject for StationaryObject {
    fn base(&self) -> &ObjectBase {
        &self.base
    }

    fn kind(&self) -> ObjectKind {
        ObjectKind::Stationary
    }

    fn reference_point_position(&self) -> DVec3 {
        self.base.position
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MovingObject {
    pub(crate) base: ObjectBase,
    pub(crate) velocity: DVec3,
    pub(crate) acceleration: DVec3,
    pub(crate) orientation_rate: Orientation,
    /// Vektor vom Bounding-Box-Mittelpunkt zur Hinterachse (Referenzpunkt)
    pub(crate) bbcenter_to_rear: DVec3,
    pub(crate) indicator: IndicatorState,
    pub(crate) brake_light: bool,
    pub(crate) head_light: bool,
    pub(crate) high_beam: bool,
    front: Lazy<DVec2>,
    rear: Lazy<DVec2>,
}

impl MovingObject {
    pub(crate) fn new(id: Id, link: LinkedObject) -> Self {
        Self {
            base: ObjectBase::new(id, link),
            velocity: DVec3::ZERO,
            acceleration: DVec3::ZERO,
            orientation_rate: Orientation::default(),
            bbcenter_to_rear: DVec3::ZERO,
            indicator: IndicatorState::Off,
            brake_light: false,
            head_light: false,
            high_beam: false,
            front: Lazy::default(),
            rear: Lazy::default(),
        }
    }

    pub fn velocity(&self) -> DVec3 {
        self.velocity
    }

    pub fn abs_velocity(&self) -> f64 {
        self.velocity.length()
    }

    pub fn acceleration(&self) -> DVec3 {
        self.acceleration
    }

    pub fn orientation_rate(&self) -> Orientation {
        self.orientation_rate
    }

    pub fn bbcenter_to_rear(&self) -> DVec3 {
        self.bbcenter_to_rear
    }

    pub fn indicator_state(&self) -> IndicatorState {
        self.indicator
    }

    pub fn brake_light(&self) -> bool {
        self.brake_light
    }

    pub fn head_light(&self) -> bool {
        self.head_light
    }

    pub fn high_beam(&self) -> bool {
        self.high_beam
    }

    pub fn distance_reference_point_to_leading_edge(&self) -> f64 {
        self.base.dimension.length * 0.5 - self.bbcenter_to_rear.x
    }

    fn heading_vector(&self) -> DVec2 {
        DVec2::from_angle(self.base.orientation.yaw)
    }

    /// Mittelpunkt der Frontkante (zwischengespeichert).
    pub fn front_position(&self) -> DVec2 {
        if let Ok(front) = self.front.get() {
            return front;
        }
        let half_length = self.heading_vector() * (self.base.dimension.length * 0.5);
        let front = self.base.position.truncate() + half_length;
        self.front.update(front);
        front
    }

    /// Mittelpunkt der Heckkante (zwischengespeichert).
    pub fn rear_position(&self) -> DVec2 {
        if let Ok(rear) = self.rear.get() {
            return rear;
        }
        let half_length = self.heading_vector() * (self.base.dimension.length * 0.5);
        let rear = self.base.position.truncate() - half_length;
        self.rear.update(rear);
        rear
    }

    /// `true`, solange Front- und Heckposition zwischengespeichert sind.
    pub fn edge_cache_valid(&self) -> bool {
        self.front.is_valid() && self.rear.is_valid()
    }

    fn invalidate_edges(&self) {
        self.front.invalidate();
        self.rear.invalidate();
    }

    /// Setzt den Referenzpunkt; der Bounding-Box-Mittelpunkt folgt.
    pub fn set_reference_point_position(&mut self, position: DVec3) {
        let offset = self.heading_vector() * self.bbcenter_to_rear.x;
        self.base.position = DVec3::new(position.x - offset.x, position.y - offset.y, position.z);
        self.invalidate_edges();
    }

    pub fn set_x(&mut self, x: f64) {
        let mut reference = self.reference_point_position();
        reference.x = x;
        self.set_reference_point_position(reference);
    }

    pub fn set_y(&mut self, y: f64) {
        let mut reference = self.reference_point_position();
        reference.y = y;
        self.set_reference_point_position(reference);
    }

    /// Ändert die Ausrichtung bei festem Referenzpunkt.
    pub fn set_orientation(&mut self, orientation: Orientation) {
        let reference = self.reference_point_position();
        self.base.orientation = orientation;
        self.set_reference_point_position(reference);
    }

    pub fn set_yaw(&mut self, yaw: f64) {
        let reference = self.reference_point_position();
        self.base.orientation.yaw = yaw;
        self.set_reference_point_position(reference);
    }

    pub fn set_pitch(&mut self, pitch: f64) {
        self.base.orientation.pitch = pitch;
    }

    pub fn set_roll(&mut self, roll: f64) {
        self.base.orientation.roll = roll;
    }

    pub fn set_dimension(&mut self, dimension: Dimension) {
        self.base.dimension = dimension;
        self.invalidate_edges();
    }

    /// Setzt den Hinterachs-Versatz bei festem Referenzpunkt.
    pub fn set_bbcenter_to_rear(&mut self, offset: DVec3) {
        let reference = self.reference_point_position();
        self.bbcenter_to_rear = offset;
        self.set_reference_point_position(reference);
    }

    pub fn set_velocity(&mut self, velocity: DVec3) {
        self.velocity = velocity;
    }

    pub fn set_acceleration(&mut self, acceleration: DVec3) {
        self.acceleration = acceleration;
    }

    pub fn set_orientation_rate(&mut self, rate: Orientation) {
        self.orientation_rate = rate;
    }

    pub fn set_indicator_state(&mut self, state: IndicatorState) {
        self.indicator = state;
    }

    pub fn set_brake_light(&mut self, on: bool) {
        self.brake_light = on;
    }

    pub fn set_head_light(&mut self, on: bool) {
        self.head_light = on;
    }

    pub fn set_high_beam(&mut self, on: bool) {
        self.high_beam = on;
    }

    pub fn set_located_position(&mut self, position: ObjectPosition) {
        self.base.located = position;
    }
}

impl WorldObject for MovingObject {
    fn base(&self) -> &ObjectBase {
        &self.base
    }

    fn kind(&self) -> ObjectKind {
        ObjectKind::Moving
    }

    fn reference_point_position(&self) -> DVec3 {
        let offset = self.heading_vector() * self.bbcenter_to_rear.x;
        self.base.position + offset.extend(0.0)
    }
}

/// Geliehene Referenz auf ein beliebiges Weltobjekt.
#[derive(Debug, Clone, Copy)]
pub enum WorldObjectRef<'a> {
    Moving(&'a MovingObject),
    Stationary(&'a StationaryObject),
}

impl<'a> WorldObjectRef<'a> {
    pub fn as_object(&self) -> &'a dyn WorldObject {
        match *self {
            WorldObjectRef::Moving(o) => o,
            WorldObjectRef::Stationary(o) => o,
        }
    }

    pub fn as_moving(&self) -> Option<&'a MovingObject> {
        match *self {
            WorldObjectRef::Moving(o) => Some(o),
            WorldObjectRef::Stationary(_) => None,
        }
    }

    pub fn as_stationary(&self) -> Option<&'a StationaryObject> {
        match *self {
            WorldObjectRef::Moving(_) => None,
            WorldObjectRef::Stationary(o) => Some(o),
        }
    }

    pub fn id(&self) -> Id {
        self.as_object().id()
    }

    pub fn kind(&self) -> ObjectKind {
        self.as_object().kind()
    }
}

impl PartialEq for WorldObjectRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}
