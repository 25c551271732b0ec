//! Erzeugung der gefilterten Ground-Truth-Sicht eines Sensors.

use std::collections::BTreeSet;
use std::f64::consts::{PI, TAU};

use super::WorldData;
use crate::core::{lane::lane_center_points, rotate_yaw, LinkedObject, MovingObject, WorldObject};
use crate::error::{WorldError, WorldResult};
use crate::ground_truth::{
    BaseMoving, GroundTruth, GtLane, GtLaneBoundary, GtMovingObject, GtStationaryObject,
    GtTrafficSign, HostVehicleData, SensorView, SensorViewConfiguration, CURRENT_INTERFACE_VERSION,
};

impl WorldData {
    /// Baut die Sensor-Sicht des Agenten `link`.
    ///
    /// Der Host selbst ist immer enthalten, auch außerhalb des eigenen Sektors.
    pub fn sensor_view(
        &self,
        config: &SensorViewConfiguration,
        link: LinkedObject,
    ) -> WorldResult<SensorView> {
        let host = self
            .moving_objects
            .values()
            .find(|object| object.link() == link)
            .ok_or(WorldError::UnknownAgent { agent: link.0 })?;

        let ground_truth = self.filtered_ground_truth(config, host);
        let location = GtMovingObject::from(host).base;

        Ok(SensorView {
            version: CURRENT_INTERFACE_VERSION,
            sensor_id: config.sensor_id,
            mounting_position: config.mounting_position,
            mounting_position_rmse: config.mounting_position,
            host_vehicle_id: host.id(),
            global_ground_truth: ground_truth,
            host_vehicle_data: HostVehicleData {
                location,
                location_rmse: BaseMoving::default(),
            },
        })
    }

    fn filtered_ground_truth(
        &self,
        config: &SensorViewConfiguration,
        host: &MovingObject,
    ) -> GroundTruth {
        let host_yaw = host.orientation().yaw;
        let mounting = &config.mounting_position;
        let origin = (host.reference_point_position()
            + rotate_yaw(mounting.position.into(), host_yaw))
        .truncate();

        let field_of_view = config.field_of_view_horizontal;
        let (yaw_min, yaw_max) = if field_of_view >= TAU {
            (-PI, PI)
        } else {
            let yaw = host_yaw + mounting.orientation.yaw;
            (yaw - field_of_view / 2.0, yaw + field_of_view / 2.0)
        };
        let range = config.range;

        let mut ground_truth = GroundTruth::default();

        let moving = self.moving_objects_in_sector(origin, range, yaw_min, yaw_max);
        let host_added = moving.iter().any(|object| object.id() == host.id());
        ground_truth.moving_objects = moving.into_iter().map(GtMovingObject::from).collect();
        if !host_added {
            ground_truth.moving_objects.push(GtMovingObject::from(host));
        }

        ground_truth.stationary_objects = self
            .stationary_objects_in_sector(origin, range, yaw_min, yaw_max)
            .into_iter()
            .map(GtStationaryObject::from)
            .collect();

        ground_truth.traffic_signs = self
            .traffic_signs_in_sector(origin, range, yaw_min, yaw_max)
            .into_iter()
            .map(GtTrafficSign::from)
            .collect();

        let sector = self.sector(origin, range, yaw_min, yaw_max);
        let lanes: Vec<_> = self
            .lanes
            .values()
            .filter(|lane| lane_center_points(lane).any(|point| sector.contains(point)))
            .collect();

        let boundary_ids: BTreeSet<_> = lanes
            .iter()
            .flat_map(|lane| lane.left_boundaries().iter().chain(lane.right_boundaries()))
            .copied()
            .collect();
        ground_truth.lane_boundaries = boundary_ids
            .into_iter()
            .filter_map(|id| self.lane_boundaries.get(&id))
            .map(GtLaneBoundary::from)
            .collect();
        ground_truth.lanes = lanes.into_iter().map(GtLane::from).collect();

        log::debug!(
            "Sensor {}: {} bewegte Objekte, {} Spuren sichtbar",
            config.sensor_id,
            ground_truth.moving_objects.len(),
            ground_truth.lanes.len()
        );
        ground_truth
    }
}
