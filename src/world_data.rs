//! Die zentrale WorldData-Struktur: Besitz aller Graph-Entitäten und Objekte.
//!
//! Alle Entitäten liegen in ID-indizierten Arenen. Externe Schlüssel
//! (Straßen-, Section-, Spur- und Kreuzungs-IDs des Importers) werden über
//! bijektive [`IdMapping`]s übersetzt.

mod builder;
mod objects;
mod sensor_view;


use indexmap::IndexMap;

use crate::core::{
    IdGenerator, IdMapping, Junction, Lane, LaneBoundary, LaneKey, LinkedObject, MovingObject,
    OdId, Road, Section, SectionKey, StationaryObject, TrafficSign, WorldObject, WorldObjectRef,
    Id, INVALID_ID, INVALID_LANE,
};
use crate::error::{EntityKind, WorldError, WorldResult};
use crate::shared::WorldOptions;

/// Graph-Speicher einer Szenario-Instanz.
#[derive(Debug, Clone, Default)]
pub struct WorldData {
    options: WorldOptions,
    id_generator: IdGenerator,

    roads: IndexMap<Id, Road>,
    sections: IndexMap<Id, Section>,
    lanes: IndexMap<Id, Lane>,
    lane_boundaries: IndexMap<Id, LaneBoundary>,
    junctions: IndexMap<Id, Junction>,
    moving_objects: IndexMap<Id, MovingObject>,
    stationary_objects: IndexMap<Id, StationaryObject>,
    traffic_signs: IndexMap<Id, TrafficSign>,

    road_ids: IdMapping<String>,
    section_ids: IdMapping<SectionKey>,
    lane_ids: IdMapping<LaneKey>,
    junction_ids: IdMapping<String>,
    traffic_sign_ids: IdMapping<String>,
}

impl WorldData {
    /// Erstellt leere Weltdaten mit Standard-Optionen
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: WorldOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    pub fn options(&self) -> &WorldOptions {
        &self.options
    }

    // ── Lebenszyklus ────────────────────────────────────────────────

    /// Verwirft alle bewegten Objekte samt Spurbelegung.
    ///
    /// Topologie, stationäre Objekte und Zeichen bleiben erhalten.
    pub fn reset(&mut self) {
        self.moving_objects.clear();
        for lane in self.lanes.values_mut() {
            lane.clear_moving_objects();
        }
        log::debug!("Bewegte Objekte verworfen");
    }

    /// Entlädt das Szenario vollständig, inklusive ID-Zähler und Mappings.
    pub fn clear(&mut self) {
        self.roads.clear();
        self.sections.clear();
        self.lanes.clear();
        self.lane_boundaries.clear();
        self.junctions.clear();
        self.moving_objects.clear();
        self.stationary_objects.clear();
        self.traffic_signs.clear();

        self.road_ids.clear();
        self.section_ids.clear();
        self.lane_ids.clear();
        self.junction_ids.clear();
        self.traffic_sign_ids.clear();

        self.id_generator.restart();
        log::info!("Weltdaten geleert");
    }

    // ── Lookups per interner ID ─────────────────────────────────────

    /// Spur zur ID, bei unbekannter ID die leere [`INVALID_LANE`].
    pub fn lane(&self, id: Id) -> &Lane {
        self.lanes.get(&id).unwrap_or(&INVALID_LANE)
    }

    pub fn section(&self, id: Id) -> Option<&Section> {
        self.sections.get(&id)
    }

    pub fn road(&self, id: Id) -> Option<&Road> {
        self.roads.get(&id)
    }

    pub fn junction(&self, id: Id) -> Option<&Junction> {
        self.junctions.get(&id)
    }

    pub fn lane_boundary(&self, id: Id) -> Option<&LaneBoundary> {
        self.lane_boundaries.get(&id)
    }

    pub fn moving_object(&self, id: Id) -> Option<&MovingObject> {
        self.moving_objects.get(&id)
    }

    pub fn stationary_object(&self, id: Id) -> Option<&StationaryObject> {
        self.stationary_objects.get(&id)
    }

    /// Bewegtes oder stationäres Objekt zur ID.
    pub fn world_object(&self, id: Id) -> Option<WorldObjectRef<'_>> {
        if let Some(object) = self.moving_objects.get(&id) {
            return Some(WorldObjectRef::Moving(object));
        }
        self.stationary_objects.get(&id).map(WorldObjectRef::Stationary)
    }

    pub fn traffic_sign(&self, id: Id) -> Option<&TrafficSign> {
        self.traffic_signs.get(&id)
    }

    pub fn moving_object_mut(&mut self, id: Id) -> Option<&mut MovingObject> {
        self.moving_objects.get_mut(&id)
    }

    pub fn stationary_object_mut(&mut self, id: Id) -> Option<&mut StationaryObject> {
        self.stationary_objects.get_mut(&id)
    }

    // ── Iteration ───────────────────────────────────────────────────

    pub fn roads(&self) -> impl Iterator<Item = &Road> {
        self.roads.values()
    }

    pub fn sections(&self) -> impl Iterator<Item = &Section> {
        self.sections.values()
    }

    pub fn lanes(&self) -> impl Iterator<Item = &Lane> {
        self.lanes.values()
    }

    pub fn lane_boundaries(&self) -> impl Iterator<Item = &LaneBoundary> {
        self.lane_boundaries.values()
    }

    pub fn junctions(&self) -> impl Iterator<Item = &Junction> {
        self.junctions.values()
    }

    pub fn moving_objects(&self) -> impl Iterator<Item = &MovingObject> {
        self.moving_objects.values()
    }

    pub fn stationary_objects(&self) -> impl Iterator<Item = &StationaryObject> {
        self.stationary_objects.values()
    }

    pub fn traffic_signs(&self) -> impl Iterator<Item = &TrafficSign> {
        self.traffic_signs.values()
    }

    // ── Mappings ────────────────────────────────────────────────────

    pub fn road_id_mapping(&self) -> &IdMapping<String> {
        &self.road_ids
    }

    pub fn section_id_mapping(&self) -> &IdMapping<SectionKey> {
        &self.section_ids
    }

    pub fn lane_id_mapping(&self) -> &IdMapping<LaneKey> {
        &self.lane_ids
    }

    pub fn junction_id_mapping(&self) -> &IdMapping<String> {
        &self.junction_ids
    }

    pub fn traffic_sign_id_mapping(&self) -> &IdMapping<String> {
        &self.traffic_sign_ids
    }

    /// Interne ID einer Straße.
    pub fn road_id(&self, road_id: &str) -> Option<Id> {
        self.road_ids.internal(&road_id.to_owned())
    }

    /// Interne ID einer Kreuzung.
    pub fn junction_id(&self, junction_id: &str) -> Option<Id> {
        self.junction_ids.internal(&junction_id.to_owned())
    }

    /// Externe ID einer Straße oder Kreuzung.
    pub fn external_road_or_junction_id(&self, id: Id) -> Option<&str> {
        self.road_ids
            .external(id)
            .or_else(|| self.junction_ids.external(id))
            .map(String::as_str)
    }

    /// Externe (autorenseitige) Spur-ID.
    pub fn od_lane_id(&self, lane_id: Id) -> Option<OdId> {
        self.lane_ids.external(lane_id).map(|key| key.lane)
    }

    /// Interne ID des bewegten Objekts zu einem Agenten, `INVALID_ID` wenn unbekannt.
    pub fn owl_id(&self, link: LinkedObject) -> Id {
        self.moving_objects
            .values()
            .find(|object| object.link() == link)
            .map_or(INVALID_ID, |object| object.id())
    }

    /// Agent hinter einem bewegten Objekt.
    pub fn agent_id(&self, owl_id: Id) -> WorldResult<LinkedObject> {
        self.moving_objects
            .get(&owl_id)
            .map(|object| object.link())
            .ok_or_else(|| WorldError::unknown(EntityKind::MovingObject, owl_id))
    }

    /// Anzahl aller bisher vergebenen IDs
    pub fn issued_ids(&self) -> u64 {
        self.id_generator.issued()
    }

    fn road_internal(&self, road_id: &str) -> WorldResult<Id> {
        self.road_id(road_id)
            .ok_or_else(|| WorldError::unknown(EntityKind::Road, road_id))
    }

    fn junction_internal(&self, junction_id: &str) -> WorldResult<Id> {
        self.junction_id(junction_id)
            .ok_or_else(|| WorldError::unknown(EntityKind::Junction, junction_id))
    }

    fn section_internal(&self, key: &SectionKey) -> WorldResult<Id> {
        self.section_ids
            .internal(key)
            .ok_or_else(|| WorldError::unknown(EntityKind::Section, key))
    }

    fn lane_internal(&self, key: &LaneKey) -> WorldResult<Id> {
        self.lane_ids
            .internal(key)
            .ok_or_else(|| WorldError::unknown(EntityKind::Lane, key))
    }
}
