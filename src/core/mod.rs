//! Core-Domänentypen: Straßen, Abschnitte, Spuren, Kreuzungen, Objekte, Spatial-Index.

pub mod geometry;
pub mod ids;
pub mod junction;
pub mod lane;
pub mod lane_boundary;
pub mod road;
pub mod section;
pub mod spatial;
pub mod traffic_sign;
pub mod world_object;

pub use geometry::{
    normalize_angle, rotate_yaw, signed_perpendicular_distance, Dimension, JointPoints,
    LaneGeometryJoint, Orientation, Position,
};
pub use ids::{Id, IdGenerator, IdMapping, LaneKey, OdId, SectionKey, INVALID_ID};
pub use junction::{IntersectingConnectionRank, IntersectionInfo, Junction};
pub use lane::{Lane, LaneType, MeasurementPoint, INVALID_LANE};
pub use lane_boundary::{
    BoundaryPoint, LaneBoundary, LaneMarkingColor, LaneMarkingSide, LaneMarkingType,
    MarkingWeight, RoadMarking,
};
pub use road::Road;
pub use section::Section;
pub use spatial::{Sector, SpatialIndex, SECTOR_ANGLE_EPSILON};
pub use traffic_sign::{SignUnit, TrafficSign, TrafficSignEntity, TrafficSignSpec, TrafficSignType};
pub use world_object::{
    GlobalRoadPosition, IndicatorState, Lazy, LinkedObject, MovingObject, ObjectBase,
    ObjectCategory, ObjectKind, ObjectPosition, RoadInterval, StationaryObject, WorldObject,
    WorldObjectRef,
};
