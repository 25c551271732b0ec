//! Externes Ground-Truth-Schema (OSI-Struktur) für Sensor-Sichten.
//!
//! Die Records sind reine Datenträger; befüllt werden sie von
//! `WorldData::sensor_view`.

use glam::{DVec2, DVec3};
use serde::{Deserialize, Serialize};

use crate::core::{
    BoundaryPoint, Dimension, IndicatorState, Lane, LaneBoundary, LaneMarkingColor,
    LaneMarkingType, LaneType, MovingObject, Orientation, SignUnit, StationaryObject,
    TrafficSign, TrafficSignSpec, WorldObject, INVALID_ID,
};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl From<DVec3> for Vector3 {
    fn from(v: DVec3) -> Self {
        Self {
            x: v.x,
            y: v.y,
            z: v.z,
        }
    }
}

impl From<DVec2> for Vector3 {
    fn from(v: DVec2) -> Self {
        Self {
            x: v.x,
            y: v.y,
            z: 0.0,
        }
    }
}

impl From<Vector3> for DVec3 {
    fn from(v: Vector3) -> Self {
        DVec3::new(v.x, v.y, v.z)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Orientation3 {
    pub yaw: f64,
    pub pitch: f64,
    pub roll: f64,
}

impl From<Orientation> for Orientation3 {
    fn from(o: Orientation) -> Self {
        Self {
            yaw: o.yaw,
            pitch: o.pitch,
            roll: o.roll,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Dimension3 {
    pub length: f64,
    pub width: f64,
    pub height: f64,
}

impl From<Dimension> for Dimension3 {
    fn from(d: Dimension) -> Self {
        Self {
            length: d.length,
            width: d.width,
            height: d.height,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterfaceVersion {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

/// Schema-Version der erzeugten Records.
pub const CURRENT_INTERFACE_VERSION: InterfaceVersion = InterfaceVersion {
    major: 3,
    minor: 1,
    patch: 2,
};

impl Default for InterfaceVersion {
    fn default() -> Self {
        CURRENT_INTERFACE_VERSION
    }
}

// ── Sensor-Konfiguration ────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MountingPosition {
    /// Versatz relativ zum Referenzpunkt des Fahrzeugs (Fahrzeugkoordinaten)
    pub position: Vector3,
    pub orientation: Orientation3,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SensorViewConfiguration {
    pub sensor_id: u64,
    #[serde(default)]
    pub mounting_position: MountingPosition,
    /// Horizontaler Öffnungswinkel (rad)
    pub field_of_view_horizontal: f64,
    /// Reichweite (m)
    pub range: f64,
}

// ── Basis-Records ───────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BaseMoving {
    pub dimension: Dimension3,
    pub position: Vector3,
    pub orientation: Orientation3,
    pub velocity: Vector3,
    pub acceleration: Vector3,
    pub orientation_rate: Orientation3,
    pub orientation_acceleration: Orientation3,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BaseStationary {
    pub dimension: Dimension3,
    pub position: Vector3,
    pub orientation: Orientation3,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LightState {
    pub indicator: IndicatorState,
    pub brake_light: bool,
    pub head_light: bool,
    pub high_beam: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GtMovingObject {
    pub id: u64,
    pub base: BaseMoving,
    pub light_state: LightState,
    pub bbcenter_to_rear: Vector3,
    pub assigned_lane_ids: Vec<u64>,
}

impl From<&MovingObject> for GtMovingObject {
    fn from(object: &MovingObject) -> Self {
        Self {
            id: object.id(),
            base: BaseMoving {
                dimension: object.dimension().into(),
                position: object.bounding_box_center().into(),
                orientation: object.orientation().into(),
                velocity: object.velocity().into(),
                acceleration: object.acceleration().into(),
                orientation_rate: object.orientation_rate().into(),
                orientation_acceleration: Orientation3::default(),
            },
            light_state: LightState {
                indicator: object.indicator_state(),
                brake_light: object.brake_light(),
                head_light: object.head_light(),
                high_beam: object.high_beam(),
            },
            bbcenter_to_rear: object.bbcenter_to_rear().into(),
            assigned_lane_ids: object.assigned_lanes().to_vec(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GtStationaryObject {
    pub id: u64,
    pub base: BaseStationary,
    pub assigned_lane_ids: Vec<u64>,
}

impl From<&StationaryObject> for GtStationaryObject {
    fn from(object: &StationaryObject) -> Self {
        Self {
            id: object.id(),
            base: BaseStationary {
                dimension: object.dimension().into(),
                position: object.reference_point_position().into(),
                orientation: object.orientation().into(),
            },
            assigned_lane_ids: object.assigned_lanes().to_vec(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GtSignValue {
    pub sign_type: u32,
    pub value: f64,
    pub unit: SignUnit,
    pub text: String,
}

impl From<&TrafficSignSpec> for GtSignValue {
    fn from(spec: &TrafficSignSpec) -> Self {
        Self {
            sign_type: spec.sign_type.code(),
            value: spec.value,
            unit: spec.unit,
            text: spec.text.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GtTrafficSign {
    pub id: u64,
    pub main_sign: GtSignValue,
    pub position: Option<Vector3>,
    pub assigned_lane_ids: Vec<u64>,
    pub supplementary_signs: Vec<GtSignValue>,
}

impl From<&TrafficSign> for GtTrafficSign {
    fn from(sign: &TrafficSign) -> Self {
        Self {
            id: sign.id(),
            main_sign: sign.spec().into(),
            position: sign.position().map(Vector3::from),
            assigned_lane_ids: sign.valid_lanes().to_vec(),
            supplementary_signs: sign.supplementary_signs().iter().map(GtSignValue::from).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GtLane {
    pub id: u64,
    pub lane_type: LaneType,
    pub centerline_is_driving_direction: bool,
    pub centerline: Vec<Vector3>,
    pub left_adjacent_lane_id: Vec<u64>,
    pub right_adjacent_lane_id: Vec<u64>,
    pub left_lane_boundary_ids: Vec<u64>,
    pub right_lane_boundary_ids: Vec<u64>,
    pub predecessor_lane_ids: Vec<u64>,
    pub successor_lane_ids: Vec<u64>,
}

fn existing(id: u64) -> Vec<u64> {
    if id == INVALID_ID {
        Vec::new()
    } else {
        vec![id]
    }
}

impl From<&Lane> for GtLane {
    fn from(lane: &Lane) -> Self {
        Self {
            id: lane.id(),
            lane_type: lane.lane_type(),
            centerline_is_driving_direction: lane.in_road_direction(),
            centerline: lane.joints().iter().map(|j| j.points.center.into()).collect(),
            left_adjacent_lane_id: existing(lane.left_lane_id()),
            right_adjacent_lane_id: existing(lane.right_lane_id()),
            left_lane_boundary_ids: lane.left_boundaries().to_vec(),
            right_lane_boundary_ids: lane.right_boundaries().to_vec(),
            predecessor_lane_ids: lane.previous().to_vec(),
            successor_lane_ids: lane.next().to_vec(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GtBoundaryPoint {
    pub position: Vector3,
    pub width: f64,
}

impl From<&BoundaryPoint> for GtBoundaryPoint {
    fn from(point: &BoundaryPoint) -> Self {
        Self {
            position: point.position.into(),
            width: point.width,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GtLaneBoundary {
    pub id: u64,
    pub marking_type: LaneMarkingType,
    pub color: LaneMarkingColor,
    pub boundary_line: Vec<GtBoundaryPoint>,
}

impl From<&LaneBoundary> for GtLaneBoundary {
    fn from(boundary: &LaneBoundary) -> Self {
        Self {
            id: boundary.id(),
            marking_type: boundary.marking_type(),
            color: boundary.color(),
            boundary_line: boundary.points().iter().map(GtBoundaryPoint::from).collect(),
        }
    }
}

// ── Gesamtsicht ─────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GroundTruth {
    pub version: InterfaceVersion,
    pub moving_objects: Vec<GtMovingObject>,
    pub stationary_objects: Vec<GtStationaryObject>,
    pub traffic_signs: Vec<GtTrafficSign>,
    pub lanes: Vec<GtLane>,
    pub lane_boundaries: Vec<GtLaneBoundary>,
}

impl GroundTruth {
    pub fn moving_object(&self, id: u64) -> Option<&GtMovingObject> {
        self.moving_objects.iter().find(|o| o.id == id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct HostVehicleData {
    pub location: BaseMoving,
    pub location_rmse: BaseMoving,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SensorView {
    pub version: InterfaceVersion,
    pub sensor_id: u64,
    pub mounting_position: MountingPosition,
    pub mounting_position_rmse: MountingPosition,
    pub host_vehicle_id: u64,
    pub global_ground_truth: GroundTruth,
    pub host_vehicle_data: HostVehicleData,
}

impl SensorView {
    /// Serialisiert die Sicht als JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(content: &str) -> serde_json::Result<Self> {
        serde_json::from_str(content)
    }
}
