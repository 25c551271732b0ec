//! Interne Identifikatoren, ID-Generator und Mapping-Tabellen extern ↔ intern.

use std::fmt;
use std::hash::Hash;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Interne 64-bit-ID einer Graph-Entität.
pub type Id = u64;

/// Sentinel für „ungültig / nicht vorhanden“.
pub const INVALID_ID: Id = u64::MAX;

/// Externe (autorenseitige) Spur-ID. Vorzeichenbehaftet, 0 ist die Mittellinie.
pub type OdId = i64;

/// Externer Schlüssel einer Section: Straße plus Ordinalzahl innerhalb der Straße.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SectionKey {
    pub road: String,
    pub index: usize,
}

impl SectionKey {
    pub fn new(road: impl Into<String>, index: usize) -> Self {
        Self {
            road: road.into(),
            index,
        }
    }

    /// Baut den Schlüssel einer Spur dieser Section.
    pub fn lane(&self, lane: OdId) -> LaneKey {
        LaneKey {
            road: self.road.clone(),
            section: self.index,
            lane,
        }
    }
}

impl fmt::Display for SectionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.road, self.index)
    }
}

/// Externer Schlüssel einer Spur.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LaneKey {
    pub road: String,
    pub section: usize,
    pub lane: OdId,
}

impl LaneKey {
    pub fn new(road: impl Into<String>, section: usize, lane: OdId) -> Self {
        Self {
            road: road.into(),
            section,
            lane,
        }
    }

    pub fn section_key(&self) -> SectionKey {
        SectionKey::new(self.road.clone(), self.section)
    }
}

impl fmt::Display for LaneKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}:{}", self.road, self.section, self.lane)
    }
}

/// Vergibt IDs für genau eine Szenario-Instanz.
#[derive(Debug, Clone, Default)]
pub struct IdGenerator {
    next: Id,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Liefert die nächste freie ID. IDs werden nie wiederverwendet.
    pub fn next_id(&mut self) -> Id {
        let id = self.next;
        self.next += 1;
        id
    }

    /// Anzahl bisher vergebener IDs.
    pub fn issued(&self) -> u64 {
        self.next
    }

    /// Startet einen neuen Zähler (nur beim Entladen der Szenerie).
    pub fn restart(&mut self) {
        self.next = 0;
    }
}

/// Bijektive Zuordnung externer Schlüssel zu internen IDs.
///
/// Beide Richtungen werden in Einfügereihenfolge iteriert.
#[derive(Debug, Clone)]
pub struct IdMapping<K: Clone + Eq + Hash> {
    to_internal: IndexMap<K, Id>,
    to_external: IndexMap<Id, K>,
}

impl<K: Clone + Eq + Hash> Default for IdMapping<K> {
    fn default() -> Self {
        Self {
            to_internal: IndexMap::new(),
            to_external: IndexMap::new(),
        }
    }
}

impl<K: Clone + Eq + Hash> IdMapping<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registriert ein Paar. Vorhandene Einträge zum Schlüssel oder zur ID werden
    /// in beiden Richtungen ersetzt.
    pub fn insert(&mut self, external: K, id: Id) {
        if let Some(stale) = self.to_external.shift_remove(&id) {
            self.to_internal.shift_remove(&stale);
        }
        if let Some(old) = self.to_internal.insert(external.clone(), id) {
            self.to_external.shift_remove(&old);
        }
        self.to_external.insert(id, external);
    }

    pub fn internal(&self, external: &K) -> Option<Id> {
        self.to_internal.get(external).copied()
    }

    pub fn external(&self, id: Id) -> Option<&K> {
        self.to_external.get(&id)
    }

    pub fn contains_internal(&self, id: Id) -> bool {
        self.to_external.contains_key(&id)
    }

    /// Entfernt das Paar zur internen ID.
    pub fn remove_internal(&mut self, id: Id) -> Option<K> {
        let external = self.to_external.shift_remove(&id)?;
        self.to_internal.shift_remove(&external);
        Some(external)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Id, &K)> {
        self.to_external.iter().map(|(id, ext)| (*id, ext))
    }

    pub fn len(&self) -> usize {
        self.to_external.len()
    }

    pub fn is_empty(&self) -> bool {
        self.to_external.is_empty()
    }

    pub fn clear(&mut self) {
        self.to_internal.clear();
        self.to_external.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generator_never_repeats_ids() {
        let mut ids = IdGenerator::new();
        let a = ids.next_id();
        let b = ids.next_id();
        let c = ids.next_id();

        assert!(a < b && b < c);
        assert_eq!(ids.issued(), 3);
    }

    #[test]
    fn mapping_round_trip() {
        let mut mapping: IdMapping<String> = IdMapping::new();
        mapping.insert("road_a".into(), 4);
        mapping.insert("road_b".into(), 9);

        let id = mapping.internal(&"road_b".to_string()).expect("Mapping erwartet");
        assert_eq!(mapping.external(id).map(String::as_str), Some("road_b"));
        assert_eq!(mapping.len(), 2);
    }

    #[test]
    fn remove_internal_erases_both_directions() {
        let mut mapping: IdMapping<String> = IdMapping::new();
        mapping.insert("x".into(), 1);

        assert_eq!(mapping.remove_internal(1).as_deref(), Some("x"));
        assert!(mapping.internal(&"x".to_string()).is_none());
        assert!(mapping.remove_internal(1).is_none());
        assert!(mapping.is_empty());
    }

    #[test]
    fn reinsert_keeps_mapping_bijective() {
        let mut mapping: IdMapping<String> = IdMapping::new();
        mapping.insert("x".into(), 1);
        mapping.insert("x".into(), 2);

        assert!(!mapping.contains_internal(1));
        assert_eq!(mapping.internal(&"x".to_string()), Some(2));
        assert_eq!(mapping.len(), 1);
    }

    #[test]
    fn rekeyed_id_drops_old_external_key() {
        let mut mapping: IdMapping<String> = IdMapping::new();
        mapping.insert("x".into(), 1);
        mapping.insert("y".into(), 1);

        assert!(mapping.internal(&"x".to_string()).is_none());
        assert_eq!(mapping.internal(&"y".to_string()), Some(1));
        assert_eq!(mapping.external(1).map(String::as_str), Some("y"));
        assert_eq!(mapping.len(), 1);
        assert_eq!(mapping.iter().count(), 1);
    }

    #[test]
    fn lane_key_from_section_key() {
        let section = SectionKey::new("r1", 2);
        let lane = section.lane(-1);

        assert_eq!(lane.section_key(), section);
        assert_eq!(lane.to_string(), "r1#2:-1");
    }
}
