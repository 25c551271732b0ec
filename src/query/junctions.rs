//! Kreuzungsabfragen: Verbindungen, Vorfahrt, Überschneidungen und Zufahrtsrouten.

use super::{
    IntersectingConnection, JunctionConnection, JunctionConnectorPriority, RelativeJunction,
    RoadNetworkElement, RoadNetworkElementType, RoadStream, RouteElement, WorldDataQuery,
};
use crate::core::{Id, IntersectionInfo, Junction, ObjectPosition, OdId};
use crate::error::{EntityKind, WorldError, WorldResult};

/// Welches Ende des Überschneidungsintervalls gemessen wird.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum IntersectionEdge {
    Enter,
    Leave,
}

impl<'a> WorldDataQuery<'a> {
    /// Verbindungsstraßen der Kreuzung, die von `incoming_road_id` aus beginnen.
    pub fn connections_on_junction(
        &self,
        junction_id: &str,
        incoming_road_id: &str,
    ) -> Vec<JunctionConnection> {
        let (Some(junction), Some(incoming)) = (
            self.junction_by_od_id(junction_id),
            self.world.road_id(incoming_road_id),
        ) else {
            return Vec::new();
        };

        junction
            .connecting_roads()
            .iter()
            .filter_map(|id| self.world.road(*id))
            .filter(|connector| connector.predecessor() == incoming)
            .filter_map(|connector| {
                let outgoing = self.world.road(connector.successor())?;
                let entry = if outgoing.is_in_stream_direction() {
                    outgoing.predecessor()
                } else {
                    outgoing.successor()
                };
                Some(JunctionConnection {
                    connecting_road_id: self.road_name(connector.id()),
                    outgoing_road_id: self.road_name(outgoing.id()),
                    outgoing_stream_direction: entry == junction.id(),
                })
            })
            .collect()
    }

    /// Alle Verbindungen, die die gegebene Verbindungsstraße kreuzen.
    pub fn intersecting_connections(
        &self,
        connecting_road_id: &str,
    ) -> WorldResult<Vec<IntersectingConnection>> {
        let (junction_road, junction) = self.junction_and_connector(connecting_road_id)?;
        Ok(junction
            .intersections_of(junction_road)
            .iter()
            .map(|info| IntersectingConnection {
                id: self.road_name(info.intersecting_road),
                rank: info.relative_rank,
            })
            .collect())
    }

    pub fn priorities_on_junction(&self, junction_id: &str) -> Vec<JunctionConnectorPriority> {
        let Some(junction) = self.junction_by_od_id(junction_id) else {
            return Vec::new();
        };
        junction
            .priorities()
            .iter()
            .map(|(high, low)| JunctionConnectorPriority {
                high: self.road_name(*high),
                low: self.road_name(*low),
            })
            .collect()
    }

    pub fn road_successor(&self, road_id: &str) -> RoadNetworkElement {
        self.road_by_od_id(road_id)
            .map(|road| self.network_element(road.successor()))
            .unwrap_or_default()
    }

    pub fn road_predecessor(&self, road_id: &str) -> RoadNetworkElement {
        self.road_by_od_id(road_id)
            .map(|road| self.network_element(road.predecessor()))
            .unwrap_or_default()
    }

    fn network_element(&self, id: Id) -> RoadNetworkElement {
        if let Some(road) = self.world.road_id_mapping().external(id) {
            return RoadNetworkElement {
                element_type: RoadNetworkElementType::Road,
                id: road.clone(),
            };
        }
        if let Some(junction) = self.world.junction_id_mapping().external(id) {
            return RoadNetworkElement {
                element_type: RoadNetworkElementType::Junction,
                id: junction.clone(),
            };
        }
        RoadNetworkElement::default()
    }

    fn junction_and_connector(&self, connecting_road_id: &str) -> WorldResult<(Id, &'a Junction)> {
        let road = self
            .world
            .road_id(connecting_road_id)
            .ok_or_else(|| WorldError::unknown(EntityKind::Road, connecting_road_id))?;
        let junction = self
            .junction_of_connector(connecting_road_id)
            .ok_or_else(|| WorldError::JunctionOfConnectorNotFound {
                road: connecting_road_id.to_owned(),
            })?;
        Ok((road, junction))
    }

    /// Straßenfolge, die auf die Verbindungsstraße zuführt, inklusive der Verbindung selbst.
    ///
    /// Die Zufahrt wird so weit rückwärts verlängert, wie Straßen direkt
    /// aneinander anschließen.
    pub fn route_leading_to_connector(
        &self,
        connecting_road_id: &str,
    ) -> WorldResult<Vec<RouteElement>> {
        let (_, junction) = self.junction_and_connector(connecting_road_id)?;
        let junction_name = self
            .world
            .junction_id_mapping()
            .external(junction.id())
            .cloned()
            .unwrap_or_default();

        let incoming = self.road_predecessor(connecting_road_id);
        if incoming.element_type != RoadNetworkElementType::Road {
            return Ok(vec![RouteElement::new(connecting_road_id, true)]);
        }
        let leads_to_junction = self.road_successor(&incoming.id).id == junction_name;

        let mut route = vec![RouteElement::new(incoming.id.clone(), leads_to_junction)];
        let mut current = incoming.id;
        loop {
            let upstream = if leads_to_junction {
                self.road_predecessor(&current)
            } else {
                self.road_successor(&current)
            };
            let is_new_road = upstream.element_type == RoadNetworkElementType::Road
                && route.iter().all(|element| element.road_id != upstream.id);
            if !is_new_road {
                break;
            }
            route.insert(0, RouteElement::new(upstream.id.clone(), leads_to_junction));
            current = upstream.id;
        }
        route.push(RouteElement::new(connecting_road_id, true));
        Ok(route)
    }

    /// Abstand der Objektfront bis zum Beginn der Überschneidung mit der
    /// kreuzenden Verbindung. `f64::MAX`, wenn sich die Verbindungen nicht kreuzen.
    pub fn distance_until_object_enters_connector(
        &self,
        position: &ObjectPosition,
        intersecting_connector_id: &str,
        intersecting_lane_id: OdId,
        own_connector_id: &str,
    ) -> WorldResult<f64> {
        self.distance_to_intersection(
            position,
            intersecting_connector_id,
            intersecting_lane_id,
            own_connector_id,
            IntersectionEdge::Enter,
        )
    }

    /// Abstand des Objekthecks bis zum Ende der Überschneidung.
    pub fn distance_until_object_leaves_connector(
        &self,
        position: &ObjectPosition,
        intersecting_connector_id: &str,
        intersecting_lane_id: OdId,
        own_connector_id: &str,
    ) -> WorldResult<f64> {
        self.distance_to_intersection(
            position,
            intersecting_connector_id,
            intersecting_lane_id,
            own_connector_id,
            IntersectionEdge::Leave,
        )
    }

    fn distance_to_intersection(
        &self,
        position: &ObjectPosition,
        intersecting_connector_id: &str,
        intersecting_lane_id: OdId,
        own_connector_id: &str,
        edge: IntersectionEdge,
    ) -> WorldResult<f64> {
        let (intersecting_road, junction) = self.junction_and_connector(intersecting_connector_id)?;
        let Some(own_road) = self.world.road_id(own_connector_id) else {
            return Err(WorldError::unknown(EntityKind::Road, own_connector_id));
        };
        let Some(intersection) = junction
            .intersections_of(intersecting_road)
            .iter()
            .find(|info| info.intersecting_road == own_road)
        else {
            return Ok(f64::MAX);
        };

        let route = self.route_leading_to_connector(own_connector_id)?;
        let main = &position.main_locate_point;
        let stream = self.create_lane_stream(&route, &main.road_id, main.lane_id, main.s);
        let object_lane = self.lane_by_od_id(&main.road_id, main.lane_id, main.s);
        let Some(touched) = position.touched_roads.get(&main.road_id) else {
            return Ok(f64::MAX);
        };
        let (Some(start), Some(end)) = (
            stream.position_by_element_and_s(object_lane, touched.s_start),
            stream.position_by_element_and_s(object_lane, touched.s_end),
        ) else {
            return Ok(f64::MAX);
        };

        let intersecting_lane =
            self.lane_by_od_id(intersecting_connector_id, intersecting_lane_id, 0.0);
        let Some(own_lane) = stream.last().map(|info| info.element) else {
            return Ok(f64::MAX);
        };
        let Some(interval) = interval_of(intersection, intersecting_lane.id(), own_lane.id()) else {
            return Ok(f64::MAX);
        };

        let (intersection_s, object_s) = match edge {
            IntersectionEdge::Enter => (interval.0, start.max(end)),
            IntersectionEdge::Leave => (interval.1, start.min(end)),
        };
        Ok(stream
            .position_by_element_and_s(own_lane, intersection_s)
            .map_or(f64::MAX, |intersection_on_stream| intersection_on_stream - object_s))
    }

    /// Verbindungsstraßen auf dem Stream im Bereich `[start, start + range]`.
    pub fn relative_junctions(
        &self,
        stream: &RoadStream<'a>,
        start_position: f64,
        range: f64,
    ) -> Vec<RelativeJunction> {
        let mut junctions = Vec::new();
        for info in stream.elements() {
            if info.end_s() < start_position {
                continue;
            }
            if info.start_s() > start_position + range {
                break;
            }
            let road_id = info.element.id();
            if self.world.junctions().any(|junction| junction.has_connecting_road(road_id)) {
                junctions.push(RelativeJunction {
                    start_s: info.start_s() - start_position,
                    end_s: info.end_s() - start_position,
                    connecting_road_id: self.road_name(road_id),
                });
            }
        }
        junctions
    }
}

fn interval_of(info: &IntersectionInfo, intersecting_lane: Id, own_lane: Id) -> Option<(f64, f64)> {
    info.s_offsets.get(&(intersecting_lane, own_lane)).copied()
}
