//! Aufbau von Spur- und Straßen-Streams entlang einer Route und Abstände darauf.

use super::{LaneStream, RoadStream, Route, RouteElement, StreamInfo, WorldDataQuery};
use crate::core::{Id, Lane, ObjectPosition, OdId, Road};

impl<'a> WorldDataQuery<'a> {
    /// Längster Spur-Stream entlang `route`, der die Startspur enthält.
    ///
    /// Der Stream beginnt bei der am weitesten stromaufwärts liegenden Spur,
    /// die lückenlos über Vorgänger mit der Startspur verbunden ist. Existiert
    /// die Startspur nicht, ist der Stream leer.
    pub fn create_lane_stream(
        &self,
        route: &[RouteElement],
        start_road_id: &str,
        start_lane_id: OdId,
        start_distance: f64,
    ) -> LaneStream<'a> {
        let Some(mut lane) =
            self.originating_route_lane(route, start_road_id, start_lane_id, start_distance)
        else {
            return LaneStream::default();
        };
        let lane_road = self.road_name(lane.road_id());
        let Some(mut cursor) = route.iter().position(|element| element.road_id == lane_road) else {
            return LaneStream::default();
        };
        let Some(mut road) = self.world.road_id(&route[cursor].road_id) else {
            return LaneStream::default();
        };

        let mut elements = Vec::new();
        let mut current_s = 0.0;
        loop {
            let in_stream_direction = route[cursor].in_road_direction;
            let s_offset = if in_stream_direction {
                current_s
            } else {
                current_s + lane.length()
            };
            elements.push(StreamInfo::new(lane, s_offset, in_stream_direction));
            current_s += lane.length();

            let successors = if in_stream_direction { lane.next() } else { lane.previous() };
            if let Some(next) = self.lane_on_road(road, successors) {
                lane = next;
                continue;
            }
            cursor += 1;
            let Some(element) = route.get(cursor) else {
                break;
            };
            let Some(next_road) = self.world.road_id(&element.road_id) else {
                log::warn!("Unbekannte Straße '{}' in Route", element.road_id);
                break;
            };
            road = next_road;
            match self.lane_on_road(road, successors) {
                Some(next) => lane = next,
                None => {
                    log::debug!(
                        "Spur-Stream endet an Spur {} vor Straße '{}' ({} Routenelemente übrig)",
                        lane.id(),
                        element.road_id,
                        route.len() - cursor
                    );
                    break;
                }
            }
        }
        LaneStream::new(elements)
    }

    /// Straßen-Stream über alle bekannten Straßen der Route.
    pub fn create_road_stream(&self, route: &[RouteElement]) -> RoadStream<'a> {
        let mut current_s = 0.0;
        let elements = route
            .iter()
            .filter_map(|element| {
                let road = self.road_by_od_id(&element.road_id);
                if road.is_none() {
                    log::warn!(
                        "Unbekannte Straße '{}' in Route wird übersprungen",
                        element.road_id
                    );
                }
                road.map(|road| (road, element.in_road_direction))
            })
            .map(|(road, in_stream_direction)| {
                let s_offset = if in_stream_direction {
                    current_s
                } else {
                    current_s + road.length()
                };
                current_s += road.length();
                StreamInfo::new(road, s_offset, in_stream_direction)
            })
            .collect();
        RoadStream::new(elements)
    }

    fn lane_on_road(&self, road: Id, candidates: &[Id]) -> Option<&'a Lane> {
        candidates
            .iter()
            .map(|id| self.world.lane(*id))
            .find(|lane| lane.exists() && lane.road_id() == road)
    }

    /// Am weitesten stromaufwärts liegende Spur der Route, von der aus die
    /// Startspur ohne Unterbrechung erreichbar ist.
    fn originating_route_lane(
        &self,
        route: &[RouteElement],
        start_road_id: &str,
        start_lane_id: OdId,
        start_distance: f64,
    ) -> Option<&'a Lane> {
        let mut lane = self.lane_by_od_id(start_road_id, start_lane_id, start_distance);
        if !lane.exists() {
            return None;
        }
        // Index in der Route, rückwärts gesucht
        let mut cursor = route.iter().rposition(|element| element.road_id == start_road_id)?;
        let mut in_stream_direction = route[cursor].in_road_direction;

        loop {
            let upstream = if in_stream_direction { lane.previous() } else { lane.next() };
            if upstream.is_empty() {
                break;
            }
            let mut found = self.lane_on_route_road(upstream, &route[cursor]);
            if found.is_none() {
                let Some(previous) = cursor.checked_sub(1) else {
                    break;
                };
                cursor = previous;
                found = self.lane_on_route_road(upstream, &route[cursor]);
            }
            let Some(upstream_lane) = found else {
                break;
            };
            in_stream_direction = route[cursor].in_road_direction;
            lane = upstream_lane;
        }
        Some(lane)
    }

    fn lane_on_route_road(&self, candidates: &[Id], element: &RouteElement) -> Option<&'a Lane> {
        let road = self.world.road_id(&element.road_id)?;
        self.lane_on_road(road, candidates)
    }

    /// Minimale und maximale Stream-Position eines Objekts, `None` abseits des Streams.
    fn object_extent_on_stream(
        &self,
        stream: &RoadStream<'_>,
        position: &ObjectPosition,
    ) -> Option<(f64, f64)> {
        let mut min = f64::MAX;
        let mut max = 0.0_f64;
        let mut on_stream = false;
        for (road_id, interval) in &position.touched_roads {
            let Some(road) = self.road_by_od_id(road_id) else {
                continue;
            };
            let (Some(start), Some(end)) = (
                stream.position_by_element_and_s(road, interval.s_start),
                stream.position_by_element_and_s(road, interval.s_end),
            ) else {
                continue;
            };
            min = min.min(start).min(end);
            max = max.max(start).max(end);
            on_stream = true;
        }
        on_stream.then_some((min, max))
    }

    /// Vorzeichenbehafteter Abstand zwischen zwei Objekten entlang des Streams.
    ///
    /// Negativ, wenn das Ziel hinter dem Objekt liegt, 0 bei Überlappung und
    /// `f64::MAX`, wenn eines der Objekte nicht auf dem Stream liegt.
    pub fn distance_between_objects(
        &self,
        stream: &RoadStream<'_>,
        object: &ObjectPosition,
        target: &ObjectPosition,
    ) -> f64 {
        let Some((object_min, object_max)) = self.object_extent_on_stream(stream, object) else {
            return f64::MAX;
        };
        let Some((target_min, target_max)) = self.object_extent_on_stream(stream, target) else {
            return f64::MAX;
        };
        if object_min > target_max {
            target_max - object_min
        } else if target_min > object_max {
            target_min - object_max
        } else {
            0.0
        }
    }

    /// Erste Kreuzung der Route ab der Straße, auf der das Objekt steht.
    pub fn next_junction_id_on_route(
        &self,
        route: &Route,
        position: &ObjectPosition,
    ) -> Option<String> {
        let start = route
            .roads
            .iter()
            .position(|element| position.touched_roads.contains_key(&element.road_id))?;

        route.roads[start..].iter().find_map(|element| {
            let road = self.world.road_id(&element.road_id)?;
            route
                .junctions
                .iter()
                .find(|junction_id| {
                    self.junction_by_od_id(junction_id)
                        .is_some_and(|junction| junction.has_connecting_road(road))
                })
                .cloned()
        })
    }

    /// Abstand vom Hauptverortungspunkt bis zum Beginn der Kreuzung entlang der Route.
    ///
    /// `f64::MAX`, wenn die Kreuzung nicht auf der Route liegt.
    pub fn distance_to_junction(
        &self,
        route: &Route,
        position: &ObjectPosition,
        junction_id: &str,
    ) -> f64 {
        if !route.junctions.iter().any(|id| id == junction_id) {
            return f64::MAX;
        }
        let Some(junction) = self.junction_by_od_id(junction_id) else {
            return f64::MAX;
        };
        let stream = self.create_road_stream(&route.roads);
        let Some(connector) = stream
            .elements()
            .iter()
            .find(|info| junction.has_connecting_road(info.element.id()))
        else {
            return f64::MAX;
        };

        let main = &position.main_locate_point;
        self.road_by_od_id(&main.road_id)
            .and_then(|road: &Road| stream.position_by_element_and_s(road, main.s))
            .map_or(f64::MAX, |object_s| connector.start_s() - object_s)
    }
}
