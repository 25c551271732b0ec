//! Objektsuche entlang von Spur-Streams.

use super::{LaneStream, StreamInfo, WorldDataQuery};
use crate::core::{Lane, LaneType, MeasurementPoint, ObjectCategory, WorldObjectRef};

impl<'a> WorldDataQuery<'a> {
    /// Stream-Positionen (Anfang, Ende) eines Objekts auf der Spur, `NaN` wenn nicht verortet.
    fn object_stream_span(
        &self,
        info: &StreamInfo<'a, Lane>,
        object: WorldObjectRef<'a>,
    ) -> (f64, f64) {
        let road = self.road_name(info.element.road_id());
        let lane_start = info.element.distance(MeasurementPoint::RoadStart);
        let object = object.as_object();
        (
            info.stream_position(object.distance(MeasurementPoint::RoadStart, &road) - lane_start),
            info.stream_position(object.distance(MeasurementPoint::RoadEnd, &road) - lane_start),
        )
    }

    fn object_in_range(
        &self,
        info: &StreamInfo<'a, Lane>,
        object: WorldObjectRef<'a>,
        category: ObjectCategory,
        min_s: f64,
        max_s: f64,
    ) -> bool {
        if !category.matches(object.kind()) {
            return false;
        }
        let (at_road_start, at_road_end) = self.object_stream_span(info, object);
        at_road_end > min_s && at_road_start < max_s
    }

    fn objects_on_lane(&self, lane: &'a Lane) -> impl Iterator<Item = WorldObjectRef<'a>> + '_ {
        lane.world_objects()
            .iter()
            .filter_map(|id| self.world.world_object(*id))
    }

    /// Erstes Objekt der Kategorie ab `initial_distance` in Stream-Richtung.
    pub fn next_object_in_lane(
        &self,
        stream: &LaneStream<'a>,
        initial_distance: f64,
        max_search_length: f64,
        category: ObjectCategory,
    ) -> Option<WorldObjectRef<'a>> {
        let search_end = initial_distance + max_search_length;
        for info in stream.elements() {
            if info.end_s() < initial_distance {
                continue;
            }
            if info.start_s() > search_end {
                break;
            }
            let nearest = self
                .objects_on_lane(info.element)
                .filter(|object| {
                    self.object_in_range(info, *object, category, initial_distance, search_end)
                })
                .map(|object| (self.object_stream_span(info, object).0, object))
                .min_by(|a, b| a.0.total_cmp(&b.0));
            if let Some((_, object)) = nearest {
                return Some(object);
            }
        }
        None
    }

    /// Letztes Objekt der Kategorie im Suchbereich, gesucht vom Ende her.
    pub fn last_object_in_lane(
        &self,
        stream: &LaneStream<'a>,
        initial_distance: f64,
        max_search_length: f64,
        category: ObjectCategory,
    ) -> Option<WorldObjectRef<'a>> {
        let search_end = initial_distance + max_search_length;
        for info in stream.elements().iter().rev() {
            if info.start_s() > search_end {
                continue;
            }
            if info.end_s() < initial_distance {
                break;
            }
            let farthest = self
                .objects_on_lane(info.element)
                .filter(|object| {
                    self.object_in_range(info, *object, category, initial_distance, search_end)
                })
                .map(|object| (self.object_stream_span(info, object).0, object))
                .max_by(|a, b| a.0.total_cmp(&b.0));
            if let Some((_, object)) = farthest {
                return Some(object);
            }
        }
        None
    }

    /// Alle Objekte der Kategorie zwischen `start_distance` und `end_distance`.
    ///
    /// Pro Spur in Stream-Richtung sortiert, jedes Objekt nur einmal.
    pub fn objects_of_type_in_range(
        &self,
        stream: &LaneStream<'a>,
        start_distance: f64,
        end_distance: f64,
        category: ObjectCategory,
    ) -> Vec<WorldObjectRef<'a>> {
        let mut found: Vec<WorldObjectRef<'a>> = Vec::new();
        for info in stream.elements() {
            if info.end_s() < start_distance {
                continue;
            }
            if info.start_s() > end_distance {
                break;
            }
            let road = self.road_name(info.element.road_id());
            let mut sorted: Vec<_> = self.objects_on_lane(info.element).collect();
            sorted.sort_by(|a, b| {
                let a = a.as_object().distance(MeasurementPoint::RoadStart, &road);
                let b = b.as_object().distance(MeasurementPoint::RoadStart, &road);
                if info.in_stream_direction {
                    a.total_cmp(&b)
                } else {
                    b.total_cmp(&a)
                }
            });
            for object in sorted {
                if self.object_in_range(info, object, category, start_distance, end_distance)
                    && !found.contains(&object)
                {
                    found.push(object);
                }
            }
        }
        found
    }

    /// Bewegte Objekte auf der Verbindungsstraße und ihren Zufahrten innerhalb
    /// von `range` vor dem Ende der Verbindung.
    pub fn moving_objects_in_range_of_junction_connection(
        &self,
        connecting_road_id: &str,
        range: f64,
    ) -> Vec<WorldObjectRef<'a>> {
        let Ok(route) = self.route_leading_to_connector(connecting_road_id) else {
            return Vec::new();
        };
        let mut found: Vec<WorldObjectRef<'a>> = Vec::new();
        let driving_lanes =
            self.lanes_of_lane_type_at_distance(connecting_road_id, 0.0, &[LaneType::Driving]);
        for lane in driving_lanes {
            let Some(od_id) = self.world.od_lane_id(lane.id()) else {
                continue;
            };
            let stream = self.create_lane_stream(&route, connecting_road_id, od_id, 0.0);
            let Some(last) = stream.last() else {
                continue;
            };
            let end = last.end_s();
            let moving =
                self.objects_of_type_in_range(&stream, end - range, end, ObjectCategory::Moving);
            for object in moving {
                if !found.contains(&object) {
                    found.push(object);
                }
            }
        }
        found
    }
}
