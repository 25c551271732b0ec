//! Spur: Geometrie, Nachbarschaft, Vorgänger/Nachfolger und belegte Objekte.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::geometry::{lerp, JointPoints, LaneGeometryJoint};
use super::ids::{Id, INVALID_ID};

/// Spurtyp (geschlossene Aufzählung).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum LaneType {
    #[default]
    Undefined,
    None,
    Driving,
    Stop,
    Shoulder,
    Biking,
    Sidewalk,
    Border,
    Restricted,
    Parking,
    Bidirectional,
    Median,
    Special1,
    Special2,
    Special3,
    Roadworks,
    Tram,
    Rail,
    Entry,
    Exit,
    OffRamp,
    OnRamp,
}

/// Messpunkt entlang einer Straße.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeasurementPoint {
    RoadStart,
    RoadEnd,
}

/// Leere Spur, die bei fehlgeschlagenen Lookups zurückgegeben wird.
pub static INVALID_LANE: Lane = Lane::invalid();

#[derive(Debug, Clone, PartialEq)]
pub struct Lane {
    pub(crate) id: Id,
    pub(crate) section: Id,
    pub(crate) road: Id,
    pub(crate) lane_type: LaneType,
    pub(crate) in_road_direction: bool,
    pub(crate) joints: Vec<LaneGeometryJoint>,
    pub(crate) length: f64,
    pub(crate) next: Vec<Id>,
    pub(crate) previous: Vec<Id>,
    pub(crate) left_lane: Id,
    pub(crate) right_lane: Id,
    pub(crate) left_boundaries: Vec<Id>,
    pub(crate) right_boundaries: Vec<Id>,
    pub(crate) world_objects: Vec<Id>,
    pub(crate) stationary_objects: Vec<Id>,
    pub(crate) traffic_signs: Vec<Id>,
}

impl Lane {
    pub(crate) fn new(
        id: Id,
        section: Id,
        road: Id,
        lane_type: LaneType,
        in_road_direction: bool,
    ) -> Self {
        Self {
            id,
            section,
            road,
            lane_type,
            in_road_direction,
            ..Self::invalid()
        }
    }

    const fn invalid() -> Self {
        Self {
            id: INVALID_ID,
            section: INVALID_ID,
            road: INVALID_ID,
            lane_type: LaneType::Undefined,
            in_road_direction: true,
            joints: Vec::new(),
            length: 0.0,
            next: Vec::new(),
            previous: Vec::new(),
            left_lane: INVALID_ID,
            right_lane: INVALID_ID,
            left_boundaries: Vec::new(),
            right_boundaries: Vec::new(),
            world_objects: Vec::new(),
            stationary_objects: Vec::new(),
            traffic_signs: Vec::new(),
        }
    }

    pub fn exists(&self) -> bool {
        self.id != INVALID_ID
    }

    pub fn id(&self) -> Id {
        self.id
    }

    pub fn section_id(&self) -> Id {
        self.section
    }

    pub fn road_id(&self) -> Id {
        self.road
    }

    pub fn lane_type(&self) -> LaneType {
        self.lane_type
    }

    /// `true`, wenn die Spur in Straßenrichtung befahren wird.
    pub fn in_road_direction(&self) -> bool {
        self.in_road_direction
    }

    pub fn length(&self) -> f64 {
        self.length
    }

    pub fn joints(&self) -> &[LaneGeometryJoint] {
        &self.joints
    }

    pub fn next(&self) -> &[Id] {
        &self.next
    }

    pub fn previous(&self) -> &[Id] {
        &self.previous
    }

    /// ID der linken Nachbarspur oder `INVALID_ID`.
    pub fn left_lane_id(&self) -> Id {
        self.left_lane
    }

    /// ID der rechten Nachbarspur oder `INVALID_ID`.
    pub fn right_lane_id(&self) -> Id {
        self.right_lane
    }

    pub fn left_boundaries(&self) -> &[Id] {
        &self.left_boundaries
    }

    pub fn right_boundaries(&self) -> &[Id] {
        &self.right_boundaries
    }

    /// Alle aktuell auf der Spur verorteten Objekte (bewegt und stationär).
    pub fn world_objects(&self) -> &[Id] {
        &self.world_objects
    }

    pub fn traffic_signs(&self) -> &[Id] {
        &self.traffic_signs
    }

    /// s-Koordinate am Spuranfang bzw. -ende (0.0 ohne Geometrie).
    pub fn distance(&self, point: MeasurementPoint) -> f64 {
        let joint = match point {
            MeasurementPoint::RoadStart => self.joints.first(),
            MeasurementPoint::RoadEnd => self.joints.last(),
        };
        joint.map_or(0.0, |j| j.s_offset)
    }

    /// Prüft, ob `distance` auf der Spur liegt.
    ///
    /// Ohne Nachfolger gehört das Spurende nicht mehr dazu.
    pub fn covers(&self, distance: f64) -> bool {
        if self.distance(MeasurementPoint::RoadStart) > distance {
            return false;
        }
        let end = self.distance(MeasurementPoint::RoadEnd);
        if self.next.is_empty() {
            end > distance
        } else {
            end >= distance
        }
    }

    fn neighbouring_joints(
        &self,
        distance: f64,
    ) -> (Option<&LaneGeometryJoint>, Option<&LaneGeometryJoint>) {
        let next_index = self.joints.partition_point(|j| j.s_offset <= distance);
        let next = self.joints.get(next_index);
        let prev = next_index.checked_sub(1).and_then(|i| self.joints.get(i));
        (prev, next)
    }

    fn interpolate<T>(
        &self,
        distance: f64,
        before_start: impl Fn(&LaneGeometryJoint) -> T,
        value: impl Fn(&LaneGeometryJoint) -> T,
        blend: impl Fn(T, T, f64) -> T,
        empty: T,
    ) -> T {
        match self.neighbouring_joints(distance) {
            (None, None) => empty,
            (Some(prev), None) => value(prev),
            (None, Some(next)) => before_start(next),
            (Some(prev), Some(next)) => {
                let factor = (distance - prev.s_offset) / (next.s_offset - prev.s_offset);
                blend(value(prev), value(next), factor)
            }
        }
    }

    /// Interpolierte Links-/Mitte-/Rechts-Punkte an `distance`.
    pub fn interpolated_points_at(&self, distance: f64) -> JointPoints {
        self.interpolate(
            distance,
            |j| j.points,
            |j| j.points,
            |a, b, f| JointPoints {
                left: a.left.lerp(b.left, f),
                center: a.center.lerp(b.center, f),
                right: a.right.lerp(b.right, f),
            },
            JointPoints::default(),
        )
    }

    pub fn curvature_at(&self, distance: f64) -> f64 {
        self.interpolate(distance, |_| 0.0, |j| j.curvature, lerp, 0.0)
    }

    pub fn width_at(&self, distance: f64) -> f64 {
        self.interpolate(
            distance,
            |_| 0.0,
            |j| j.points.left.distance(j.points.right),
            lerp,
            0.0,
        )
    }

    pub fn direction_at(&self, distance: f64) -> f64 {
        self.interpolate(distance, |_| 0.0, |j| j.heading, lerp, 0.0)
    }

    /// Hängt einen Stützpunkt an. Gibt `false` zurück, wenn `s` nicht größer
    /// als der letzte Stützpunkt ist.
    pub(crate) fn add_geometry_joint(
        &mut self,
        points: JointPoints,
        s_offset: f64,
        curvature: f64,
        heading: f64,
    ) -> bool {
        if let Some(last) = self.joints.last() {
            if last.s_offset >= s_offset {
                return false;
            }
        }
        self.joints.push(LaneGeometryJoint {
            points,
            s_offset,
            curvature,
            heading,
        });
        self.length =
            self.distance(MeasurementPoint::RoadEnd) - self.distance(MeasurementPoint::RoadStart);
        true
    }

    pub(crate) fn add_next(&mut self, lane: Id) {
        if !self.next.contains(&lane) {
            self.next.push(lane);
        }
    }

    pub(crate) fn add_previous(&mut self, lane: Id) {
        if !self.previous.contains(&lane) {
            self.previous.push(lane);
        }
    }

    pub(crate) fn add_moving_object(&mut self, object: Id) {
        if !self.world_objects.contains(&object) {
            self.world_objects.push(object);
        }
    }

    pub(crate) fn add_stationary_object(&mut self, object: Id) {
        if !self.stationary_objects.contains(&object) {
            self.stationary_objects.push(object);
            self.world_objects.push(object);
        }
    }

    pub(crate) fn remove_world_object(&mut self, object: Id) {
        self.world_objects.retain(|id| *id != object);
        self.stationary_objects.retain(|id| *id != object);
    }

    /// Entfernt alle bewegten Objekte, stationäre bleiben erhalten.
    pub(crate) fn clear_moving_objects(&mut self) {
        self.world_objects.clone_from(&self.stationary_objects);
    }

    pub(crate) fn add_traffic_sign(&mut self, sign: Id) {
        if !self.traffic_signs.contains(&sign) {
            self.traffic_signs.push(sign);
        }
    }
}

/// Mittelpunkte aller Stützpunkte der Spur.
pub(crate) fn lane_center_points(lane: &Lane) -> impl Iterator<Item = DVec2> + '_ {
    lane.joints.iter().map(|j| j.points.center)
}
