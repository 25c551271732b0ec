//! Aufbau der Topologie: Straßen, Abschnitte, Spuren, Markierungen, Kreuzungen.
//!
//! Links/rechts beziehen sich immer auf die Referenzrichtung der Straße.
//! Linke Spuren (positive ID) besitzen ihre linken, rechte Spuren ihre
//! rechten Begrenzungen; die innere Begrenzung wird vom Nachbarn übernommen.

use glam::DVec2;

use super::WorldData;
use crate::core::{
    Id, IntersectionInfo, JointPoints, Junction, Lane, LaneBoundary, LaneKey, LaneMarkingSide,
    LaneType, MarkingWeight, OdId, Road, RoadMarking, Section, SectionKey,
};
use crate::error::{EntityKind, WorldError, WorldResult};

impl WorldData {
    /// Registriert eine Straße. Eine bereits bekannte ID liefert die vorhandene Straße.
    pub fn add_road(&mut self, road_id: &str, in_stream_direction: bool) -> WorldResult<Id> {
        if let Some(existing) = self.road_id(road_id) {
            log::warn!("Straße '{}' ist bereits registriert", road_id);
            return Ok(existing);
        }
        let id = self.id_generator.next_id();
        self.roads.insert(id, Road::new(id, in_stream_direction));
        self.road_ids.insert(road_id.to_owned(), id);
        Ok(id)
    }

    /// Hängt einen Abschnitt an die Straße an.
    pub fn add_section(&mut self, road_id: &str, s_offset: f64) -> WorldResult<SectionKey> {
        let road_internal = self.road_internal(road_id)?;
        let id = self.id_generator.next_id();
        let road = self
            .roads
            .get_mut(&road_internal)
            .ok_or_else(|| WorldError::unknown(EntityKind::Road, road_id))?;

        let key = SectionKey::new(road_id, road.sections.len());
        road.add_section(id);
        self.sections.insert(id, Section::new(id, road_internal, s_offset));
        self.section_ids.insert(key.clone(), id);
        Ok(key)
    }

    /// Fügt eine Spur ein und verknüpft sie mit ihren Nachbarn im Abschnitt.
    ///
    /// `outer_boundaries` sind die Begrenzungen auf der straßenmittenabgewandten
    /// Seite (links für positive, rechts für negative IDs).
    pub fn add_lane(
        &mut self,
        section_key: &SectionKey,
        od_lane_id: OdId,
        lane_type: LaneType,
        in_road_direction: bool,
        outer_boundaries: &[Id],
    ) -> WorldResult<Id> {
        let section_id = self.section_internal(section_key)?;
        let section = self
            .sections
            .get(&section_id)
            .ok_or_else(|| WorldError::unknown(EntityKind::Section, section_key))?;
        let road_id = section.road;
        let center_boundaries = section.center_lane_boundaries.clone();
        let siblings: Vec<(Id, OdId)> = section
            .lanes
            .iter()
            .filter_map(|&lane| Some((lane, self.od_lane_id(lane)?)))
            .collect();

        let id = self.id_generator.next_id();
        let mut lane = Lane::new(id, section_id, road_id, lane_type, in_road_direction);
        let is_left = od_lane_id > 0;
        if is_left {
            lane.left_boundaries = outer_boundaries.to_vec();
        } else {
            lane.right_boundaries = outer_boundaries.to_vec();
        }

        let left_od = if od_lane_id == -1 { 1 } else { od_lane_id + 1 };
        let right_od = if od_lane_id == 1 { -1 } else { od_lane_id - 1 };

        for (sibling_id, sibling_od) in siblings {
            let across_center = sibling_od.signum() != od_lane_id.signum();
            let Some(sibling) = self.lanes.get_mut(&sibling_id) else {
                continue;
            };
            if sibling_od == left_od {
                lane.left_lane = sibling_id;
                sibling.right_lane = id;
                if !across_center {
                    if is_left {
                        sibling.right_boundaries.extend_from_slice(&lane.left_boundaries);
                    } else {
                        lane.left_boundaries.extend_from_slice(&sibling.right_boundaries);
                    }
                }
            } else if sibling_od == right_od {
                lane.right_lane = sibling_id;
                sibling.left_lane = id;
                if !across_center {
                    if is_left {
                        lane.right_boundaries.extend_from_slice(&sibling.left_boundaries);
                    } else {
                        sibling.left_boundaries.extend_from_slice(&lane.right_boundaries);
                    }
                }
            }
        }

        match od_lane_id {
            -1 => lane.left_boundaries.extend_from_slice(&center_boundaries),
            1 => lane.right_boundaries.extend_from_slice(&center_boundaries),
            _ => {}
        }

        self.lanes.insert(id, lane);
        if let Some(section) = self.sections.get_mut(&section_id) {
            section.add_lane(id);
        }
        self.lane_ids.insert(section_key.lane(od_lane_id), id);
        Ok(id)
    }

    /// Legt eine Fahrbahnmarkierung an. Das Intervall wird road-absolut gespeichert.
    pub fn add_lane_boundary(
        &mut self,
        marking: RoadMarking,
        section_start: f64,
        side: LaneMarkingSide,
    ) -> Id {
        let width = match marking.weight {
            MarkingWeight::Standard => self.options.standard_marking_width,
            MarkingWeight::Bold => self.options.bold_marking_width,
            MarkingWeight::Unknown => 0.0,
        };
        let id = self.id_generator.next_id();
        self.lane_boundaries.insert(
            id,
            LaneBoundary::new(
                id,
                width,
                section_start + marking.s_offset,
                section_start + marking.s_end,
                marking.marking_type,
                marking.color,
                side,
            ),
        );
        id
    }

    pub fn set_center_lane_boundaries(
        &mut self,
        section_key: &SectionKey,
        boundaries: Vec<Id>,
    ) -> WorldResult<()> {
        let section_id = self.section_internal(section_key)?;
        if let Some(section) = self.sections.get_mut(&section_id) {
            section.set_center_lane_boundaries(boundaries);
        }
        Ok(())
    }

    /// Hängt einen Geometrie-Stützpunkt an eine Spur an.
    ///
    /// Punkte ohne wachsendes `s` werden verworfen. Der äußere Punkt wird an
    /// alle äußeren Begrenzungen weitergereicht, die `s` enthalten.
    #[allow(clippy::too_many_arguments)]
    pub fn add_lane_geometry_point(
        &mut self,
        lane_key: &LaneKey,
        left: DVec2,
        center: DVec2,
        right: DVec2,
        s: f64,
        curvature: f64,
        heading: f64,
    ) -> WorldResult<()> {
        let lane_id = self.lane_internal(lane_key)?;
        let Some(lane) = self.lanes.get_mut(&lane_id) else {
            return Err(WorldError::unknown(EntityKind::Lane, lane_key));
        };

        if !lane.add_geometry_joint(JointPoints { left, center, right }, s, curvature, heading) {
            log::debug!(
                "Stützpunkt bei s={} für Spur {} verworfen (s nicht steigend)",
                s,
                lane_key
            );
            return Ok(());
        }

        let is_left = lane_key.lane > 0;
        let (outer_point, outer_boundaries) = if is_left {
            (left, lane.left_boundaries.clone())
        } else {
            (right, lane.right_boundaries.clone())
        };
        let section_id = lane.section;

        let double_line_distance = self.options.double_line_distance;
        for boundary_id in outer_boundaries {
            if let Some(boundary) = self.lane_boundaries.get_mut(&boundary_id) {
                if boundary.contains_s(s) {
                    boundary.add_boundary_point(outer_point, heading, double_line_distance);
                }
            }
        }

        self.update_lengths(section_id);
        Ok(())
    }

    /// Reicht einen Mittellinienpunkt an die Mittelbegrenzungen des Abschnitts weiter.
    pub fn add_center_line_point(
        &mut self,
        section_key: &SectionKey,
        center: DVec2,
        s: f64,
        heading: f64,
    ) -> WorldResult<()> {
        let section_id = self.section_internal(section_key)?;
        let boundaries = self
            .sections
            .get(&section_id)
            .map(|section| section.center_lane_boundaries.clone())
            .unwrap_or_default();

        let double_line_distance = self.options.double_line_distance;
        for boundary_id in boundaries {
            if let Some(boundary) = self.lane_boundaries.get_mut(&boundary_id) {
                if boundary.contains_s(s) {
                    boundary.add_boundary_point(center, heading, double_line_distance);
                }
            }
        }
        Ok(())
    }

    /// Section-Länge = Mittel der Spurlängen, Straßenlänge = Summe der Sections.
    fn update_lengths(&mut self, section_id: Id) {
        let Some(section) = self.sections.get(&section_id) else {
            return;
        };
        let road_id = section.road;
        let lane_lengths: Vec<f64> = section
            .lanes
            .iter()
            .filter_map(|lane| self.lanes.get(lane).map(Lane::length))
            .collect();
        let section_length = if lane_lengths.is_empty() {
            0.0
        } else {
            lane_lengths.iter().sum::<f64>() / lane_lengths.len() as f64
        };
        if let Some(section) = self.sections.get_mut(&section_id) {
            section.set_length(section_length);
        }

        let Some(road) = self.roads.get(&road_id) else {
            return;
        };
        let road_length = road
            .sections
            .iter()
            .filter_map(|section| self.sections.get(section).map(Section::length))
            .sum();
        if let Some(road) = self.roads.get_mut(&road_id) {
            road.set_length(road_length);
        }
    }

    // ── Kreuzungen ──────────────────────────────────────────────────

    /// Registriert eine Kreuzung mit ihren Verbindungsstraßen.
    pub fn add_junction(
        &mut self,
        junction_id: &str,
        connecting_roads: &[&str],
    ) -> WorldResult<Id> {
        let roads = connecting_roads
            .iter()
            .map(|road| self.road_internal(road))
            .collect::<WorldResult<Vec<_>>>()?;

        let id = match self.junction_id(junction_id) {
            Some(existing) => existing,
            None => {
                let id = self.id_generator.next_id();
                self.junctions.insert(id, Junction::new(id));
                self.junction_ids.insert(junction_id.to_owned(), id);
                id
            }
        };
        if let Some(junction) = self.junctions.get_mut(&id) {
            for road in roads {
                junction.add_connecting_road(road);
            }
        }
        Ok(id)
    }

    pub fn add_junction_connection(&mut self, junction_id: &str, road_id: &str) -> WorldResult<()> {
        let road = self.road_internal(road_id)?;
        self.junction_mut(junction_id)?.add_connecting_road(road);
        Ok(())
    }

    /// Trägt eine Vorfahrtsbeziehung ein: `high` hat Vorrang vor `low`.
    pub fn add_junction_priority(
        &mut self,
        junction_id: &str,
        high: &str,
        low: &str,
    ) -> WorldResult<()> {
        let high = self.road_internal(high)?;
        let low = self.road_internal(low)?;
        self.junction_mut(junction_id)?.add_priority(high, low);
        Ok(())
    }

    /// Hinterlegt die Überschneidung von `road_id` mit `info.intersecting_road`.
    pub fn add_intersection_info(
        &mut self,
        junction_id: &str,
        road_id: &str,
        info: IntersectionInfo,
    ) -> WorldResult<()> {
        let road = self.road_internal(road_id)?;
        if !self.roads.contains_key(&info.intersecting_road) {
            return Err(WorldError::unknown(EntityKind::Road, info.intersecting_road));
        }
        self.junction_mut(junction_id)?.add_intersection_info(road, info);
        Ok(())
    }

    fn junction_mut(&mut self, junction_id: &str) -> WorldResult<&mut Junction> {
        let id = self.junction_internal(junction_id)?;
        self.junctions
            .get_mut(&id)
            .ok_or_else(|| WorldError::unknown(EntityKind::Junction, junction_id))
    }

    // ── Verknüpfungen ───────────────────────────────────────────────

    pub fn add_lane_successor(
        &mut self,
        lane_key: &LaneKey,
        successor: &LaneKey,
    ) -> WorldResult<()> {
        let next = self.lane_internal(successor)?;
        self.lane_mut(lane_key)?.add_next(next);
        Ok(())
    }

    pub fn add_lane_predecessor(
        &mut self,
        lane_key: &LaneKey,
        predecessor: &LaneKey,
    ) -> WorldResult<()> {
        let previous = self.lane_internal(predecessor)?;
        self.lane_mut(lane_key)?.add_previous(previous);
        Ok(())
    }

    fn lane_mut(&mut self, lane_key: &LaneKey) -> WorldResult<&mut Lane> {
        let id = self.lane_internal(lane_key)?;
        self.lanes
            .get_mut(&id)
            .ok_or_else(|| WorldError::unknown(EntityKind::Lane, lane_key))
    }

    fn section_mut(&mut self, key: &SectionKey) -> WorldResult<&mut Section> {
        let id = self.section_internal(key)?;
        self.sections
            .get_mut(&id)
            .ok_or_else(|| WorldError::unknown(EntityKind::Section, key))
    }

    fn road_mut(&mut self, road_id: &str) -> WorldResult<&mut Road> {
        let id = self.road_internal(road_id)?;
        self.roads
            .get_mut(&id)
            .ok_or_else(|| WorldError::unknown(EntityKind::Road, road_id))
    }

    pub fn set_section_successor(
        &mut self,
        key: &SectionKey,
        successor: &SectionKey,
    ) -> WorldResult<()> {
        let next = self.section_internal(successor)?;
        self.section_mut(key)?.set_next(next)
    }

    pub fn set_section_predecessor(
        &mut self,
        key: &SectionKey,
        predecessor: &SectionKey,
    ) -> WorldResult<()> {
        let previous = self.section_internal(predecessor)?;
        self.section_mut(key)?.set_previous(previous)
    }

    pub fn set_road_successor(&mut self, road_id: &str, successor: &str) -> WorldResult<()> {
        let next = self.road_internal(successor)?;
        self.road_mut(road_id)?.set_successor(next)
    }

    pub fn set_road_predecessor(&mut self, road_id: &str, predecessor: &str) -> WorldResult<()> {
        let previous = self.road_internal(predecessor)?;
        self.road_mut(road_id)?.set_predecessor(previous)
    }

    pub fn set_road_successor_junction(
        &mut self,
        road_id: &str,
        junction_id: &str,
    ) -> WorldResult<()> {
        let junction = self.junction_internal(junction_id)?;
        self.road_mut(road_id)?.set_successor(junction)
    }

    pub fn set_road_predecessor_junction(
        &mut self,
        road_id: &str,
        junction_id: &str,
    ) -> WorldResult<()> {
        let junction = self.junction_internal(junction_id)?;
        self.road_mut(road_id)?.set_predecessor(junction)
    }
}
