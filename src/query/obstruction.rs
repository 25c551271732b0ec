//! Seitliche Überdeckung eines fremden Objekts mit der eigenen Bahn.

use glam::DVec2;

use super::{LaneStream, Obstruction, WorldDataQuery};
use crate::core::{signed_perpendicular_distance, Lane, MeasurementPoint, ObjectPosition, Position};

impl<'a> WorldDataQuery<'a> {
    /// Weltposition zu (s, t), sofern `s` auf der Spur liegt.
    fn position_if_on_lane(&self, s: f64, t: f64, lane: &Lane) -> Option<Position> {
        let start = lane.distance(MeasurementPoint::RoadStart);
        let end = lane.distance(MeasurementPoint::RoadEnd);
        (start <= s && s <= end).then(|| self.position_by_distance_and_lane(lane, s, t))
    }

    /// Wie weit ragt ein Objekt links bzw. rechts über die eigene Bahn bei Querablage `t`?
    ///
    /// Die Bahn wird auf Höhe des Objekts als Gerade zwischen dessen s-Anfang
    /// und s-Ende angenähert.
    pub fn obstruction(
        &self,
        stream: &LaneStream<'a>,
        t: f64,
        other: &ObjectPosition,
        corners: &[DVec2],
    ) -> Obstruction {
        if corners.is_empty() {
            return Obstruction::invalid();
        }
        let mut first: Option<Position> = None;
        let mut second: Option<Position> = None;

        for info in stream.elements() {
            let road = self.road_name(info.element.road_id());
            let Some(interval) = other.touched_roads.get(&road) else {
                continue;
            };
            let (first_s, second_s, offset) = if info.in_stream_direction {
                (interval.s_start, interval.s_end, t)
            } else {
                (interval.s_end, interval.s_start, -t)
            };
            if first.is_none() {
                first = self.position_if_on_lane(first_s, offset, info.element);
            }
            if second.is_none() {
                second = self.position_if_on_lane(second_s, offset, info.element);
            }
            if first.is_some() && second.is_some() {
                break;
            }
        }

        let (Some(first), Some(second)) = (first, second) else {
            return Obstruction::invalid();
        };
        let start = DVec2::new(first.x, first.y);
        let end = DVec2::new(second.x, second.y);

        let (left, right) = corners.iter().fold((f64::MIN, f64::MAX), |(left, right), corner| {
            let distance = signed_perpendicular_distance(*corner, start, end);
            (left.max(distance), right.min(distance))
        });
        Obstruction::new(left, right)
    }
}
