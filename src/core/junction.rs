//! Kreuzung: verbindende Straßen, Vorfahrtsbeziehungen und Überschneidungen.

use std::collections::BTreeMap;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::ids::Id;

/// Rang einer kreuzenden Verbindung relativ zur eigenen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum IntersectingConnectionRank {
    #[default]
    Undefined,
    Higher,
    Lower,
}

/// Überschneidung der eigenen Verbindungsstraße mit einer anderen.
#[derive(Debug, Clone, PartialEq)]
pub struct IntersectionInfo {
    pub intersecting_road: Id,
    pub relative_rank: IntersectingConnectionRank,
    /// (Spur der kreuzenden Straße, eigene Spur) → (s-Start, s-Ende) in eigenen Koordinaten
    pub s_offsets: BTreeMap<(Id, Id), (f64, f64)>,
}

impl IntersectionInfo {
    pub fn new(intersecting_road: Id, relative_rank: IntersectingConnectionRank) -> Self {
        Self {
            intersecting_road,
            relative_rank,
            s_offsets: BTreeMap::new(),
        }
    }

    pub fn with_interval(
        mut self,
        intersecting_lane: Id,
        own_lane: Id,
        s_start: f64,
        s_end: f64,
    ) -> Self {
        self.s_offsets.insert((intersecting_lane, own_lane), (s_start, s_end));
        self
    }

    /// Vereinigt die Intervalle einer zweiten Info für dasselbe Straßenpaar.
    fn merge(&mut self, other: IntersectionInfo) {
        for (lanes, (start, end)) in other.s_offsets {
            self.s_offsets
                .entry(lanes)
                .and_modify(|(s, e)| {
                    *s = s.min(start);
                    *e = e.max(end);
                })
                .or_insert((start, end));
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Junction {
    pub(crate) id: Id,
    pub(crate) connecting_roads: Vec<Id>,
    pub(crate) priorities: Vec<(Id, Id)>,
    pub(crate) intersections: IndexMap<Id, Vec<IntersectionInfo>>,
}

impl Junction {
    pub(crate) fn new(id: Id) -> Self {
        Self {
            id,
            connecting_roads: Vec::new(),
            priorities: Vec::new(),
            intersections: IndexMap::new(),
        }
    }

    pub fn id(&self) -> Id {
        self.id
    }

    pub fn connecting_roads(&self) -> &[Id] {
        &self.connecting_roads
    }

    /// Vorfahrtspaare (hoch, niedrig).
    pub fn priorities(&self) -> &[(Id, Id)] {
        &self.priorities
    }

    /// Überschneidungen der gegebenen Verbindungsstraße (leer, wenn keine).
    pub fn intersections_of(&self, road: Id) -> &[IntersectionInfo] {
        self.intersections
            .get(&road)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn intersections(&self) -> &IndexMap<Id, Vec<IntersectionInfo>> {
        &self.intersections
    }

    pub fn has_connecting_road(&self, road: Id) -> bool {
        self.connecting_roads.contains(&road)
    }

    pub(crate) fn add_connecting_road(&mut self, road: Id) {
        if !self.has_connecting_road(road) {
            self.connecting_roads.push(road);
        }
    }

    pub(crate) fn add_priority(&mut self, high: Id, low: Id) {
        if !self.priorities.contains(&(high, low)) {
            self.priorities.push((high, low));
        }
    }

    pub(crate) fn add_intersection_info(&mut self, road: Id, info: IntersectionInfo) {
        let infos = self.intersections.entry(road).or_default();
        match infos
            .iter_mut()
            .find(|existing| existing.intersecting_road == info.intersecting_road)
        {
            Some(existing) => existing.merge(info),
            None => infos.push(info),
        }
    }
}
