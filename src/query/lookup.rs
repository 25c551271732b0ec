//! Lookups über externe IDs und s-Koordinaten sowie Spurabfragen.

use super::{LaneCategory, LaneQueryResult, LaneStream, Side, WorldDataQuery};
use crate::core::{
    Junction, Lane, LaneType, MeasurementPoint, OdId, Position, Road, Section, INVALID_LANE,
};

impl<'a> WorldDataQuery<'a> {
    pub fn road_by_od_id(&self, road_id: &str) -> Option<&'a Road> {
        self.world.road(self.world.road_id(road_id)?)
    }

    pub fn junction_by_od_id(&self, junction_id: &str) -> Option<&'a Junction> {
        self.world.junction(self.world.junction_id(junction_id)?)
    }

    /// Kreuzung, zu der die Verbindungsstraße gehört.
    pub fn junction_of_connector(&self, connecting_road_id: &str) -> Option<&'a Junction> {
        let road = self.world.road_id(connecting_road_id)?;
        self.world
            .junctions()
            .find(|junction| junction.has_connecting_road(road))
    }

    /// Erster Abschnitt der Straße, der `distance` (auf ≥ 0 begrenzt) abdeckt.
    pub fn section_by_distance(&self, road_id: &str, distance: f64) -> Option<&'a Section> {
        let distance = distance.max(0.0);
        self.road_by_od_id(road_id)?
            .sections()
            .iter()
            .filter_map(|id| self.world.section(*id))
            .find(|section| section.covers(distance))
    }

    pub fn lanes_of_lane_type_at_distance(
        &self,
        road_id: &str,
        distance: f64,
        lane_types: &[LaneType],
    ) -> Vec<&'a Lane> {
        let Some(section) = self.section_by_distance(road_id, distance) else {
            return Vec::new();
        };
        section
            .lanes()
            .iter()
            .map(|id| self.world.lane(*id))
            .filter(|lane| lane_types.contains(&lane.lane_type()))
            .collect()
    }

    /// Spur mit externer ID `lane_id` an `distance`, sonst [`INVALID_LANE`].
    pub fn lane_by_od_id(&self, road_id: &str, lane_id: OdId, distance: f64) -> &'a Lane {
        let Some(section) = self.section_by_distance(road_id, distance) else {
            return &INVALID_LANE;
        };
        section
            .lanes()
            .iter()
            .find(|id| self.world.od_lane_id(**id) == Some(lane_id))
            .map_or(&INVALID_LANE, |id| self.world.lane(*id))
    }

    pub fn is_s_valid_on_lane(&self, road_id: &str, lane_id: OdId, distance: f64) -> bool {
        if distance < 0.0 {
            return false;
        }
        self.lane_by_od_id(road_id, lane_id, distance).exists()
    }

    pub fn number_of_lanes(&self, road_id: &str, distance: f64) -> usize {
        self.section_by_distance(road_id, distance)
            .map_or(0, |section| section.lanes().len())
    }

    /// `true`, wenn auf `side` eine Fahrspur (Typ `Driving`) anliegt.
    pub fn exists_driving_lane_on_side(
        &self,
        road_id: &str,
        lane_id: OdId,
        distance: f64,
        side: Side,
    ) -> bool {
        let lane = self.lane_by_od_id(road_id, lane_id, distance);
        let neighbour = match side {
            Side::Left => self.world.lane(lane.left_lane_id()),
            Side::Right => self.world.lane(lane.right_lane_id()),
        };
        neighbour.exists() && neighbour.lane_type() == LaneType::Driving
    }

    /// Nächstes gültiges s stromabwärts in Schritten von `step`.
    ///
    /// `+∞`, wenn innerhalb des Ereignishorizonts nichts gefunden wird.
    pub fn next_valid_s_on_lane_in_downstream(
        &self,
        road_id: &str,
        lane_id: OdId,
        initial_distance: f64,
        step: f64,
    ) -> f64 {
        if step <= 0.0 {
            return f64::INFINITY;
        }
        let max_distance = initial_distance + self.world.options().event_horizon;
        let mut s = initial_distance + step;
        while s < max_distance {
            if self.is_s_valid_on_lane(road_id, lane_id, s) {
                return s;
            }
            s += step;
        }
        f64::INFINITY
    }

    /// Letztes gültiges s stromaufwärts, `-∞` wenn keins existiert.
    pub fn last_valid_s_in_upstream(
        &self,
        road_id: &str,
        lane_id: OdId,
        initial_distance: f64,
        step: f64,
    ) -> f64 {
        if step <= 0.0 {
            return f64::NEG_INFINITY;
        }
        let min_distance = (initial_distance - self.world.options().event_horizon).max(0.0);
        let mut s = initial_distance - step;
        while !self.is_s_valid_on_lane(road_id, lane_id, s) && s > min_distance {
            s -= step;
        }
        if self.is_s_valid_on_lane(road_id, lane_id, s) {
            s
        } else {
            f64::NEG_INFINITY
        }
    }

    /// Abstand bis zum Ende der zusammenhängenden Spuren der gewünschten Typen.
    ///
    /// `+∞`, wenn das Ende außerhalb von `max_search_length` liegt.
    pub fn distance_to_end_of_lane(
        &self,
        stream: &LaneStream<'_>,
        initial_position: f64,
        max_search_length: f64,
        lane_types: &[LaneType],
    ) -> f64 {
        let search_end = initial_position + max_search_length;
        for info in stream.elements() {
            if info.end_s() < initial_position {
                continue;
            }
            if info.start_s() > search_end {
                return f64::INFINITY;
            }
            if !lane_types.contains(&info.element.lane_type()) {
                return info.start_s() - initial_position;
            }
            if info.end_s() > search_end {
                return f64::INFINITY;
            }
        }
        match stream.last() {
            Some(last) => (last.end_s() - initial_position).max(0.0),
            None => f64::INFINITY,
        }
    }

    pub fn query_lane(&self, road_id: &str, lane_id: OdId, distance: f64) -> LaneQueryResult {
        self.build_lane_query_result(self.lane_by_od_id(road_id, lane_id, distance))
    }

    /// Je Spur-Stream ein Ergebnis für alle Abschnitte im Intervall.
    pub fn query_lanes(
        &self,
        road_id: &str,
        start_distance: f64,
        end_distance: f64,
    ) -> Vec<LaneQueryResult> {
        let Some(road) = self.road_by_od_id(road_id) else {
            return Vec::new();
        };
        let mut results: Vec<LaneQueryResult> = Vec::new();
        let sections = road
            .sections()
            .iter()
            .filter_map(|id| self.world.section(*id))
            .filter(|section| section.covers_interval(start_distance, end_distance));
        for section in sections {
            for lane_id in section.lanes() {
                let lane = self.world.lane(*lane_id);
                let stream = self.own_road_lane_stream(lane);
                let Some(first) = stream.first() else {
                    continue;
                };
                let stream_id = first.element.id();
                if results.iter().all(|result| result.stream_id != stream_id) {
                    results.push(self.build_lane_query_result(lane));
                }
            }
        }
        results
    }

    fn build_lane_query_result(&self, lane: &Lane) -> LaneQueryResult {
        if !lane.exists() {
            return LaneQueryResult::invalid();
        }
        let stream = self.own_road_lane_stream(lane);
        let (Some(first), Some(last)) = (stream.first(), stream.last()) else {
            return LaneQueryResult::invalid();
        };
        let category = if self.world.lane(lane.right_lane_id()).exists() {
            LaneCategory::RegularLane
        } else {
            LaneCategory::RightMostLane
        };
        LaneQueryResult {
            stream_id: first.element.id(),
            start_distance: first.element.distance(MeasurementPoint::RoadStart),
            end_distance: last.element.distance(MeasurementPoint::RoadStart),
            category,
            is_driving_lane: lane.lane_type() == LaneType::Driving,
        }
    }

    /// Spur-Stream über die eigene Straße der Spur, in Straßenrichtung.
    fn own_road_lane_stream(&self, lane: &Lane) -> LaneStream<'a> {
        let road = self.road_name(lane.road_id());
        let od_id = self.world.od_lane_id(lane.id()).unwrap_or_default();
        self.create_lane_stream(
            &[super::RouteElement::new(road.clone(), true)],
            &road,
            od_id,
            lane.distance(MeasurementPoint::RoadStart),
        )
    }

    /// Weltposition zu (s, t) auf einer Spur.
    pub fn position_by_distance_and_lane(
        &self,
        lane: &Lane,
        distance: f64,
        offset: f64,
    ) -> Position {
        let center = lane.interpolated_points_at(distance).center;
        let yaw = lane.direction_at(distance);
        Position {
            x: center.x - yaw.sin() * offset,
            y: center.y + yaw.cos() * offset,
            yaw,
            curvature: lane.curvature_at(distance),
        }
    }
}
