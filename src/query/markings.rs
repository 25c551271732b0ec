//! Verkehrszeichen und Fahrbahnmarkierungen entlang eines Spur-Streams.

use super::{LaneMarkingEntity, LaneStream, Side, WorldDataQuery};
use crate::core::{LaneMarkingSide, LaneMarkingType, MeasurementPoint, TrafficSign};
use crate::error::{WorldError, WorldResult};

impl<'a> WorldDataQuery<'a> {
    /// Zeichen im Bereich `[start, start + range]`, jeweils mit Abstand zu `start`.
    pub fn traffic_signs_in_range(
        &self,
        stream: &LaneStream<'a>,
        start_distance: f64,
        search_range: f64,
    ) -> Vec<(f64, &'a TrafficSign)> {
        let search_end = start_distance + search_range;
        let mut found = Vec::new();
        for info in stream.elements() {
            if info.end_s() < start_distance {
                continue;
            }
            if info.start_s() > search_end {
                break;
            }
            let lane_start = info.element.distance(MeasurementPoint::RoadStart);
            let mut signs: Vec<(f64, &'a TrafficSign)> = info
                .element
                .traffic_signs()
                .iter()
                .filter_map(|id| self.world.traffic_sign(*id))
                .map(|sign| (info.stream_position(sign.s() - lane_start), sign))
                .collect();
            signs.sort_by(|a, b| a.0.total_cmp(&b.0));

            found.extend(
                signs
                    .into_iter()
                    .filter(|(position, _)| *position >= start_distance && *position <= search_end)
                    .map(|(position, sign)| (position - start_distance, sign)),
            );
        }
        found
    }

    /// Markierungen auf `side` der Spuren im Bereich `[start, start + range]`.
    ///
    /// Die beiden Linien einer Doppelmarkierung erscheinen als ein Eintrag mit
    /// kombiniertem Typ.
    pub fn lane_markings(
        &self,
        stream: &LaneStream<'a>,
        start_distance: f64,
        range: f64,
        side: Side,
    ) -> WorldResult<Vec<LaneMarkingEntity>> {
        let search_end = start_distance + range;
        let mut markings = Vec::new();
        // Hälften von Doppellinien, nach relativem Start
        let mut pending: Vec<LaneMarkingEntity> = Vec::new();

        for info in stream.elements() {
            if info.end_s() < start_distance {
                continue;
            }
            if info.start_s() > search_end {
                break;
            }
            let lane = info.element;
            let lane_start = lane.distance(MeasurementPoint::RoadStart);
            let boundaries = match side {
                Side::Left => lane.left_boundaries(),
                Side::Right => lane.right_boundaries(),
            };

            for boundary in boundaries.iter().filter_map(|id| self.world.lane_boundary(*id)) {
                let begin = info.stream_position(boundary.s_start() - lane_start);
                let end = info.stream_position(boundary.s_end() - lane_start);
                if begin > search_end || end < start_distance {
                    continue;
                }
                let mut marking = LaneMarkingEntity {
                    relative_start_distance: begin - start_distance,
                    width: boundary.width(),
                    marking_type: boundary.marking_type(),
                    color: boundary.color(),
                };
                if boundary.side() == LaneMarkingSide::Single {
                    markings.push(marking);
                    continue;
                }
                let Some(other) = pending
                    .iter()
                    .find(|other| other.relative_start_distance == marking.relative_start_distance)
                else {
                    pending.push(marking);
                    continue;
                };
                let (left, right) = if boundary.side() == LaneMarkingSide::Left {
                    (marking.marking_type, other.marking_type)
                } else {
                    (other.marking_type, marking.marking_type)
                };
                marking.marking_type = LaneMarkingType::combine(left, right)
                    .ok_or(WorldError::InvalidDoubleBoundary { left, right })?;
                markings.push(marking);
            }
        }
        Ok(markings)
    }
}
