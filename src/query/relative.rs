//! Spuraufteilung relativ zur Ego-Spur entlang eines Straßen-Streams.

use std::collections::BTreeMap;

use super::{LanesInterval, RelativeLane, RoadStream, WorldDataQuery};
use crate::core::{Id, OdId, Section};

/// Relative Spur-ID → interne Spur-ID eines Abschnitts.
type RelativeIds = BTreeMap<OdId, Id>;

impl<'a> WorldDataQuery<'a> {
    /// Spurintervalle je Abschnitt im Bereich `[start, start + range]`.
    ///
    /// Endet die Ego-Spur, beziehen sich die folgenden IDs auf die Straßenmitte.
    pub fn relative_lanes(
        &self,
        stream: &RoadStream<'a>,
        start_position: f64,
        start_lane_id: OdId,
        range: f64,
    ) -> Vec<LanesInterval> {
        let search_end = start_position + range;
        let mut intervals: Vec<LanesInterval> = Vec::new();
        let mut previous_ids = RelativeIds::new();

        for info in stream.elements() {
            if info.end_s() < start_position {
                continue;
            }
            if info.start_s() > search_end {
                return intervals;
            }
            let direction = info.in_stream_direction;
            let mut sections: Vec<&Section> = info
                .element
                .sections()
                .iter()
                .filter_map(|id| self.world.section(*id))
                .collect();
            if !direction {
                sections.reverse();
            }

            for section in sections {
                let (near, far) = if direction {
                    (section.s_offset(), section.s_offset() + section.length())
                } else {
                    (section.s_offset() + section.length(), section.s_offset())
                };
                let start_s = info.stream_position(near);
                let end_s = info.stream_position(far);
                if end_s < start_position {
                    continue;
                }
                if start_s > search_end {
                    return intervals;
                }

                let ego = if previous_ids.is_empty() {
                    start_lane_id
                } else {
                    self.next_ego_lane_id(section, direction, &previous_ids)
                };
                let mut interval = LanesInterval {
                    start_s,
                    end_s,
                    lanes: Vec::new(),
                };
                previous_ids = self.add_lanes_of_section(
                    section,
                    direction,
                    ego,
                    &previous_ids,
                    intervals.last_mut(),
                    &mut interval,
                );
                intervals.push(interval);
            }
        }
        intervals
    }

    fn predecessors_of(&self, lane_id: Id, direction: bool) -> &'a [Id] {
        let lane = self.world.lane(lane_id);
        if direction {
            lane.previous()
        } else {
            lane.next()
        }
    }

    /// Spur des Abschnitts, deren Vorgänger die bisherige Ego-Spur war.
    fn next_ego_lane_id(
        &self,
        section: &Section,
        direction: bool,
        previous_ids: &RelativeIds,
    ) -> OdId {
        section
            .lanes()
            .iter()
            .find(|lane| {
                predecessor_relative_id(self.predecessors_of(**lane, direction), previous_ids)
                    == Some(0)
            })
            .and_then(|lane| self.world.od_lane_id(*lane))
            .unwrap_or(0)
    }

    fn add_lanes_of_section(
        &self,
        section: &Section,
        direction: bool,
        ego: OdId,
        previous_ids: &RelativeIds,
        mut previous_interval: Option<&mut LanesInterval>,
        interval: &mut LanesInterval,
    ) -> RelativeIds {
        let mut ids = RelativeIds::new();
        for lane_id in section.lanes() {
            let lane = self.world.lane(*lane_id);
            let od_id = self.world.od_lane_id(*lane_id).unwrap_or_default();
            let mut relative = if direction { od_id - ego } else { ego - od_id };
            // Über die Mittellinie hinweg gibt es keine Spur 0
            if ego != 0 && ego.signum() * od_id.signum() < 0 {
                relative += if relative > 0 { -1 } else { 1 };
            }
            ids.insert(relative, *lane_id);

            let predecessor =
                predecessor_relative_id(self.predecessors_of(*lane_id, direction), previous_ids);
            interval.lanes.push(RelativeLane {
                id: relative,
                in_driving_direction: if direction { od_id < 0 } else { od_id > 0 },
                lane_type: lane.lane_type(),
                predecessor,
                successor: None,
            });

            if let (Some(predecessor), Some(previous)) =
                (predecessor, previous_interval.as_deref_mut())
            {
                if let Some(previous_lane) =
                    previous.lanes.iter_mut().find(|l| l.id == predecessor)
                {
                    previous_lane.successor = Some(relative);
                }
            }
        }
        ids
    }
}

/// Relative ID des ersten Vorgängers (in ID-Reihenfolge) im vorigen Abschnitt.
fn predecessor_relative_id(predecessors: &[Id], previous_ids: &RelativeIds) -> Option<OdId> {
    previous_ids
        .iter()
        .find(|(_, id)| predecessors.contains(id))
        .map(|(relative, _)| *relative)
}
