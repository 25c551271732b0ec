//! Spurabschnitt (Lane Section) einer Straße.

use super::ids::{Id, INVALID_ID};
use crate::error::{EntityKind, WorldError, WorldResult};

#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub(crate) id: Id,
    pub(crate) road: Id,
    pub(crate) s_offset: f64,
    pub(crate) length: f64,
    pub(crate) lanes: Vec<Id>,
    pub(crate) next: Option<Id>,
    pub(crate) previous: Option<Id>,
    pub(crate) center_lane_boundaries: Vec<Id>,
}

impl Section {
    pub(crate) fn new(id: Id, road: Id, s_offset: f64) -> Self {
        Self {
            id,
            road,
            s_offset,
            length: 0.0,
            lanes: Vec::new(),
            next: None,
            previous: None,
            center_lane_boundaries: Vec::new(),
        }
    }

    pub fn exists(&self) -> bool {
        self.id != INVALID_ID
    }

    pub fn id(&self) -> Id {
        self.id
    }

    pub fn road_id(&self) -> Id {
        self.road
    }

    pub fn s_offset(&self) -> f64 {
        self.s_offset
    }

    /// Mittlere Länge aller Spuren des Abschnitts.
    pub fn length(&self) -> f64 {
        self.length
    }

    pub fn lanes(&self) -> &[Id] {
        &self.lanes
    }

    pub fn next(&self) -> Option<Id> {
        self.next
    }

    pub fn previous(&self) -> Option<Id> {
        self.previous
    }

    pub fn center_lane_boundaries(&self) -> &[Id] {
        &self.center_lane_boundaries
    }

    /// Prüft, ob `distance` im Abschnitt liegt.
    ///
    /// Der letzte Abschnitt einer Straße schließt das Straßenende mit ein.
    pub fn covers(&self, distance: f64) -> bool {
        if self.s_offset > distance {
            return false;
        }
        let end = self.s_offset + self.length;
        if self.next.is_none() {
            end >= distance
        } else {
            end > distance
        }
    }

    /// Prüft, ob sich `[start, end]` mit dem Abschnitt überschneidet.
    ///
    /// Grenzen zu Nachbarabschnitten zählen nicht als Überschneidung.
    pub fn covers_interval(&self, start: f64, end: f64) -> bool {
        let section_end = self.s_offset + self.length;
        let starts_before_end = if self.next.is_none() {
            start <= section_end
        } else {
            start < section_end
        };
        let ends_after_start = if self.previous.is_none() {
            end >= self.s_offset
        } else {
            end > self.s_offset
        };
        starts_before_end && ends_after_start
    }

    pub(crate) fn set_next(&mut self, section: Id) -> WorldResult<()> {
        if self.next.is_some() {
            return Err(WorldError::SuccessorAlreadySet {
                kind: EntityKind::Section,
                id: self.id,
            });
        }
        self.next = Some(section);
        Ok(())
    }

    pub(crate) fn set_previous(&mut self, section: Id) -> WorldResult<()> {
        if self.previous.is_some() {
            return Err(WorldError::PredecessorAlreadySet {
                kind: EntityKind::Section,
                id: self.id,
            });
        }
        self.previous = Some(section);
        Ok(())
    }

    pub(crate) fn add_lane(&mut self, lane: Id) {
        self.lanes.push(lane);
    }

    pub(crate) fn set_length(&mut self, length: f64) {
        self.length = length;
    }

    pub(crate) fn set_center_lane_boundaries(&mut self, boundaries: Vec<Id>) {
        self.center_lane_boundaries = boundaries;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn section(s_offset: f64, length: f64) -> Section {
        let mut section = Section::new(1, 0, s_offset);
        section.set_length(length);
        section
    }

    #[test]
    fn set_next_only_once() {
        let mut s = section(0.0, 10.0);
        assert!(s.set_next(2).is_ok());
        assert_eq!(
            s.set_next(3),
            Err(WorldError::SuccessorAlreadySet {
                kind: EntityKind::Section,
                id: 1
            })
        );
        assert_eq!(s.next(), Some(2));
    }

    #[test]
    fn set_previous_only_once() {
        let mut s = section(0.0, 10.0);
        s.set_previous(5).expect("erster Vorgänger");
        assert!(s.set_previous(6).is_err());
    }

    #[test]
    fn covers_includes_end_of_last_section() {
        let mut s = section(100.0, 50.0);
        assert!(s.covers(150.0));
        assert!(!s.covers(150.5));
        assert!(!s.covers(99.9));

        s.set_next(9).expect("Nachfolger");
        assert!(!s.covers(150.0));
        assert!(s.covers(149.9));
    }

    #[test]
    fn covers_interval_detects_overlap() {
        let s = section(10.0, 10.0);
        assert!(s.covers_interval(5.0, 12.0));
        assert!(s.covers_interval(15.0, 30.0));
        assert!(s.covers_interval(0.0, 30.0));
        assert!(!s.covers_interval(21.0, 30.0));
        assert!(s.covers_interval(20.0, 30.0));
        assert!(s.covers_interval(0.0, 10.0));
    }

    #[test]
    fn covers_interval_excludes_shared_boundaries() {
        let mut s = section(10.0, 10.0);
        s.set_next(9).expect("Nachfolger");
        s.set_previous(8).expect("Vorgänger");

        assert!(!s.covers_interval(20.0, 30.0));
        assert!(!s.covers_interval(0.0, 10.0));
        assert!(s.covers_interval(19.9, 30.0));
        assert!(s.covers_interval(0.0, 10.1));
    }
}
