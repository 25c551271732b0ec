//! Dynamische Inhalte: bewegte/stationäre Objekte, Verkehrszeichen, Sektor-Filter.

use glam::DVec2;

use super::WorldData;
use crate::core::{
    Id, LinkedObject, MovingObject, Sector, SpatialIndex, StationaryObject, TrafficSign,
    TrafficSignSpec, WorldObject,
};
use crate::error::{EntityKind, WorldError, WorldResult};

impl WorldData {
    pub fn add_moving_object(&mut self, link: LinkedObject) -> Id {
        let id = self.id_generator.next_id();
        self.moving_objects.insert(id, MovingObject::new(id, link));
        id
    }

    pub fn add_stationary_object(&mut self, link: LinkedObject) -> Id {
        let id = self.id_generator.next_id();
        self.stationary_objects.insert(id, StationaryObject::new(id, link));
        id
    }

    pub fn add_traffic_sign(&mut self, external_id: &str, spec: TrafficSignSpec) -> Id {
        let id = self.id_generator.next_id();
        self.traffic_signs
            .insert(id, TrafficSign::new(id, external_id.to_owned(), spec));
        self.traffic_sign_ids.insert(external_id.to_owned(), id);
        id
    }

    /// Entfernt ein bewegtes Objekt samt Spurbelegung. Unbekannte IDs sind ein No-op.
    pub fn remove_moving_object_by_id(&mut self, id: Id) {
        let Some(object) = self.moving_objects.swap_remove(&id) else {
            return;
        };
        for lane_id in object.assigned_lanes() {
            if let Some(lane) = self.lanes.get_mut(lane_id) {
                lane.remove_world_object(id);
            }
        }
    }

    /// Verknüpft Zeichen und Spur in beide Richtungen.
    pub fn assign_traffic_sign_to_lane(&mut self, lane_id: Id, sign_id: Id) -> WorldResult<()> {
        let sign = self
            .traffic_signs
            .get_mut(&sign_id)
            .ok_or_else(|| WorldError::unknown(EntityKind::TrafficSign, sign_id))?;
        let lane = self
            .lanes
            .get_mut(&lane_id)
            .ok_or_else(|| WorldError::unknown(EntityKind::Lane, lane_id))?;
        lane.add_traffic_sign(sign_id);
        sign.add_valid_lane(lane_id);
        Ok(())
    }

    /// Verortet ein Objekt auf einer Spur (Spur und Objekt kennen sich danach gegenseitig).
    pub fn assign_object_to_lane(&mut self, lane_id: Id, object_id: Id) -> WorldResult<()> {
        let lane = self
            .lanes
            .get_mut(&lane_id)
            .ok_or_else(|| WorldError::unknown(EntityKind::Lane, lane_id))?;

        if let Some(object) = self.moving_objects.get_mut(&object_id) {
            lane.add_moving_object(object_id);
            if !object.base.assigned_lanes.contains(&lane_id) {
                object.base.assigned_lanes.push(lane_id);
            }
            return Ok(());
        }
        if let Some(object) = self.stationary_objects.get_mut(&object_id) {
            lane.add_stationary_object(object_id);
            if !object.base.assigned_lanes.contains(&lane_id) {
                object.base.assigned_lanes.push(lane_id);
            }
            return Ok(());
        }
        Err(WorldError::unknown(EntityKind::MovingObject, object_id))
    }

    /// Löst alle bewegten Objekte von ihren Spuren (Beginn eines neuen Ticks).
    pub fn clear_moving_objects_on_lanes(&mut self) {
        for lane in self.lanes.values_mut() {
            lane.clear_moving_objects();
        }
        for object in self.moving_objects.values_mut() {
            object.base.assigned_lanes.clear();
        }
    }

    // ── Sektor-Filter ───────────────────────────────────────────────

    pub(super) fn sector(&self, origin: DVec2, radius: f64, yaw_min: f64, yaw_max: f64) -> Sector {
        Sector::new(origin, radius, yaw_min, yaw_max, self.options.sector_angle_epsilon)
    }

    /// Bewegte Objekte, deren Referenzpunkt im Sektor liegt (aufsteigend nach ID).
    pub fn moving_objects_in_sector(
        &self,
        origin: DVec2,
        radius: f64,
        yaw_min: f64,
        yaw_max: f64,
    ) -> Vec<&MovingObject> {
        let sector = self.sector(origin, radius, yaw_min, yaw_max);
        let index = SpatialIndex::from_positions(
            self.moving_objects
                .values()
                .map(|o| (o.id(), o.reference_point_position().truncate())),
        );
        index
            .within_sector(&sector)
            .into_iter()
            .filter_map(|id| self.moving_objects.get(&id))
            .collect()
    }

    pub fn stationary_objects_in_sector(
        &self,
        origin: DVec2,
        radius: f64,
        yaw_min: f64,
        yaw_max: f64,
    ) -> Vec<&StationaryObject> {
        let sector = self.sector(origin, radius, yaw_min, yaw_max);
        let index = SpatialIndex::from_positions(
            self.stationary_objects
                .values()
                .map(|o| (o.id(), o.reference_point_position().truncate())),
        );
        index
            .within_sector(&sector)
            .into_iter()
            .filter_map(|id| self.stationary_objects.get(&id))
            .collect()
    }

    /// Verkehrszeichen im Sektor. Zeichen ohne Weltposition werden immer geliefert.
    pub fn traffic_signs_in_sector(
        &self,
        origin: DVec2,
        radius: f64,
        yaw_min: f64,
        yaw_max: f64,
    ) -> Vec<&TrafficSign> {
        let sector = self.sector(origin, radius, yaw_min, yaw_max);
        let index = SpatialIndex::from_positions(
            self.traffic_signs
                .values()
                .filter_map(|sign| Some((sign.id(), sign.position()?))),
        );
        let visible = index.within_sector(&sector);

        self.traffic_signs
            .values()
            .filter(|sign| sign.position().is_none() || visible.binary_search(&sign.id()).is_ok())
            .collect()
    }
}
