//! Gemeinsame Straßennetz-Fixtures für die Integrationstests.
//!
//! ```text
//!            D (50 m, nach Norden)
//!            │
//!   A ═══════╪══ C1 ══ B          A: 2 Abschnitte à 50 m, Spuren -1, -2 (nur Abschnitt 0), 1
//!  0        100  120   220        C1, C2: Verbindungsstraßen der Kreuzung "J"
//!            C2
//! ```
#![allow(dead_code)]

use glam::{DVec2, DVec3};
use sim_world::core::{
    Dimension, GlobalRoadPosition, IntersectingConnectionRank, IntersectionInfo, LaneKey,
    LaneMarkingColor, LaneMarkingSide, LaneMarkingType, LaneType, LinkedObject, MarkingWeight,
    ObjectPosition, OdId, Orientation, RoadInterval, RoadMarking, SectionKey, TrafficSignSpec,
    TrafficSignType,
};
use sim_world::{Id, WorldData, INVALID_ID};

pub const LANE_WIDTH: f64 = 3.5;

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn marking(length: f64, marking_type: LaneMarkingType) -> RoadMarking {
    RoadMarking {
        s_offset: 0.0,
        s_end: length,
        marking_type,
        color: LaneMarkingColor::White,
        weight: MarkingWeight::Standard,
    }
}

/// Querablage der Spurmitte (links der Referenzrichtung positiv).
pub fn lane_center_t(od: OdId) -> f64 {
    let offset = (od.abs() as f64 - 0.5) * LANE_WIDTH;
    if od > 0 {
        offset
    } else {
        -offset
    }
}

/// Gerade Spurgeometrie ab `origin` in Richtung `heading`, Stützpunkte alle 10 m.
pub fn add_straight_lane_geometry(
    world: &mut WorldData,
    key: &LaneKey,
    origin: DVec2,
    heading: f64,
    s_start: f64,
    length: f64,
) {
    let direction = DVec2::from_angle(heading);
    let normal = direction.perp();
    let t = lane_center_t(key.lane);
    let steps = (length / 10.0).round() as usize;
    for step in 0..=steps {
        let s = s_start + step as f64 * 10.0;
        let center = origin + direction * s + normal * t;
        world
            .add_lane_geometry_point(
                key,
                center + normal * (LANE_WIDTH / 2.0),
                center,
                center - normal * (LANE_WIDTH / 2.0),
                s,
                0.0,
                heading,
            )
            .expect("Spur ist registriert");
    }
}

pub const SINGLE_SOLID: &[(LaneMarkingType, LaneMarkingSide)] =
    &[(LaneMarkingType::Solid, LaneMarkingSide::Single)];

/// Abschnitt mit den angegebenen Spuren samt Geometrie und Außenmarkierungen.
///
/// `center` beschreibt die Mittelmarkierung (eine Linie oder die Hälften einer Doppellinie).
#[allow(clippy::too_many_arguments)]
pub fn add_section_with_lanes(
    world: &mut WorldData,
    road: &str,
    s_start: f64,
    length: f64,
    lanes: &[(OdId, LaneType)],
    center: &[(LaneMarkingType, LaneMarkingSide)],
    origin: DVec2,
    heading: f64,
) -> SectionKey {
    let key = world.add_section(road, s_start).expect("Straße ist registriert");
    let center = center
        .iter()
        .map(|(marking_type, side)| {
            world.add_lane_boundary(marking(length, *marking_type), s_start, *side)
        })
        .collect();
    world
        .set_center_lane_boundaries(&key, center)
        .expect("Abschnitt ist registriert");
    for &(od, lane_type) in lanes {
        let outer = world.add_lane_boundary(
            marking(length, LaneMarkingType::Broken),
            s_start,
            LaneMarkingSide::Single,
        );
        world
            .add_lane(&key, od, lane_type, od < 0, &[outer])
            .expect("Spur angelegt");
        add_straight_lane_geometry(world, &key.lane(od), origin, heading, s_start, length);
    }
    key
}

pub fn link_lanes(world: &mut WorldData, from: &LaneKey, to: &LaneKey) {
    world.add_lane_successor(from, to).expect("Nachfolger");
    world.add_lane_predecessor(to, from).expect("Vorgänger");
}

pub fn lane_id(world: &WorldData, key: &LaneKey) -> Id {
    world.lane_id_mapping().internal(key).unwrap_or(INVALID_ID)
}

pub fn road_id(world: &WorldData, road: &str) -> Id {
    world.road_id(road).unwrap_or(INVALID_ID)
}

pub fn a0(lane: OdId) -> LaneKey {
    LaneKey::new("A", 0, lane)
}

pub fn a1(lane: OdId) -> LaneKey {
    LaneKey::new("A", 1, lane)
}

pub fn lane_key(road: &str, lane: OdId) -> LaneKey {
    LaneKey::new(road, 0, lane)
}

/// Straßennetz aus dem Modulkommentar, ohne Objekte.
pub fn junction_network() -> WorldData {
    init_logging();
    let mut world = WorldData::new();
    for road in ["A", "C1", "B", "D", "C2"] {
        world.add_road(road, true).expect("Straße");
    }

    let a0_key = add_section_with_lanes(
        &mut world,
        "A",
        0.0,
        50.0,
        &[(-1, LaneType::Driving), (-2, LaneType::Shoulder), (1, LaneType::Driving)],
        SINGLE_SOLID,
        DVec2::ZERO,
        0.0,
    );
    let a1_key = add_section_with_lanes(
        &mut world,
        "A",
        50.0,
        50.0,
        &[(-1, LaneType::Driving), (1, LaneType::Driving)],
        &[
            (LaneMarkingType::Solid, LaneMarkingSide::Left),
            (LaneMarkingType::Broken, LaneMarkingSide::Right),
        ],
        DVec2::ZERO,
        0.0,
    );
    world.set_section_successor(&a0_key, &a1_key).expect("Abschnittsfolge");
    world.set_section_predecessor(&a1_key, &a0_key).expect("Abschnittsfolge");

    let driving = &[(-1, LaneType::Driving)];
    let c1_origin = DVec2::new(100.0, 0.0);
    let b_origin = DVec2::new(120.0, 0.0);
    add_section_with_lanes(&mut world, "C1", 0.0, 20.0, driving, SINGLE_SOLID, c1_origin, 0.0);
    add_section_with_lanes(&mut world, "B", 0.0, 100.0, driving, SINGLE_SOLID, b_origin, 0.0);
    // Bordstein + Linie ergibt keine gültige Doppelmarkierung
    add_section_with_lanes(
        &mut world,
        "D",
        0.0,
        50.0,
        driving,
        &[
            (LaneMarkingType::Curb, LaneMarkingSide::Left),
            (LaneMarkingType::Solid, LaneMarkingSide::Right),
        ],
        DVec2::new(110.0, 60.0),
        -std::f64::consts::FRAC_PI_2,
    );
    add_section_with_lanes(
        &mut world,
        "C2",
        0.0,
        20.0,
        driving,
        SINGLE_SOLID,
        DVec2::new(110.0, 10.0),
        -std::f64::consts::FRAC_PI_2,
    );

    link_lanes(&mut world, &a0(-1), &a1(-1));
    link_lanes(&mut world, &a0(1), &a1(1));
    link_lanes(&mut world, &a1(-1), &lane_key("C1", -1));
    link_lanes(&mut world, &lane_key("C1", -1), &lane_key("B", -1));
    link_lanes(&mut world, &lane_key("D", -1), &lane_key("C2", -1));
    link_lanes(&mut world, &lane_key("C2", -1), &lane_key("B", -1));

    world.add_junction("J", &["C1", "C2"]).expect("Kreuzung");
    world.set_road_successor_junction("A", "J").expect("A → J");
    world.set_road_predecessor("C1", "A").expect("C1 ← A");
    world.set_road_successor("C1", "B").expect("C1 → B");
    world.set_road_predecessor_junction("B", "J").expect("B ← J");
    world.set_road_successor_junction("D", "J").expect("D → J");
    world.set_road_predecessor("C2", "D").expect("C2 ← D");
    world.set_road_successor("C2", "B").expect("C2 → B");
    world.add_junction_priority("J", "C1", "C2").expect("Vorfahrt");

    let c1 = road_id(&world, "C1");
    let c2 = road_id(&world, "C2");
    let c1_lane = lane_id(&world, &lane_key("C1", -1));
    let c2_lane = lane_id(&world, &lane_key("C2", -1));
    world
        .add_intersection_info(
            "J",
            "C1",
            IntersectionInfo::new(c2, IntersectingConnectionRank::Lower)
                .with_interval(c1_lane, c2_lane, 9.0, 11.0),
        )
        .expect("Überschneidung C1");
    world
        .add_intersection_info(
            "J",
            "C2",
            IntersectionInfo::new(c1, IntersectingConnectionRank::Higher)
                .with_interval(c2_lane, c1_lane, 8.0, 12.0),
        )
        .expect("Überschneidung C2");
    world
}

/// Verortung eines Objekts auf einer einzelnen Straße.
pub fn position_on(road: &str, lane: OdId, s_start: f64, s_end: f64) -> ObjectPosition {
    let main = GlobalRoadPosition {
        road_id: road.to_owned(),
        lane_id: lane,
        s: (s_start + s_end) / 2.0,
        t: 0.0,
        hdg: 0.0,
    };
    let mut position = ObjectPosition {
        reference_point: main.clone(),
        main_locate_point: main,
        ..ObjectPosition::default()
    };
    position.touched_roads.insert(
        road.to_owned(),
        RoadInterval {
            lanes: vec![lane],
            s_start,
            s_end,
        },
    );
    position
}

/// Legt ein Fahrzeug auf `lane_key` an, Bounding-Box entlang der x-Achse.
pub fn place_car(
    world: &mut WorldData,
    agent: i64,
    key: &LaneKey,
    s_start: f64,
    s_end: f64,
    world_x: f64,
) -> Id {
    let id = world.add_moving_object(LinkedObject(agent));
    let object = world.moving_object_mut(id).expect("gerade angelegt");
    object.set_dimension(Dimension {
        length: s_end - s_start,
        width: 2.0,
        height: 1.5,
    });
    object.set_orientation(Orientation::default());
    object.set_reference_point_position(DVec3::new(world_x, lane_center_t(key.lane), 0.0));
    object.set_located_position(position_on(&key.road, key.lane, s_start, s_end));
    let lane = lane_id(world, key);
    world.assign_object_to_lane(lane, id).expect("Spur existiert");
    id
}

pub fn place_cone(
    world: &mut WorldData,
    key: &LaneKey,
    s_start: f64,
    s_end: f64,
    world_x: f64,
) -> Id {
    let id = world.add_stationary_object(LinkedObject(-1));
    let object = world.stationary_object_mut(id).expect("gerade angelegt");
    object.set_reference_point_position(DVec3::new(world_x, lane_center_t(key.lane), 0.0));
    object.set_located_position(position_on(&key.road, key.lane, s_start, s_end));
    let lane = lane_id(world, key);
    world.assign_object_to_lane(lane, id).expect("Spur existiert");
    id
}

pub fn speed_limit(s: f64) -> TrafficSignSpec {
    TrafficSignSpec {
        sign_type: TrafficSignType::default(),
        value: 50.0,
        s,
        ..TrafficSignSpec::default()
    }
}

/// Netz mit zwei Fahrzeugen, einem Leitkegel und einem Tempolimit.
pub struct Scenario {
    pub world: WorldData,
    /// Agent 1 auf A, Spur -1, s 20..25
    pub car1: Id,
    /// Agent 2 auf B, Spur -1, s 10..15
    pub car2: Id,
    /// Leitkegel auf C1, s 5..6
    pub cone: Id,
    /// Tempolimit auf A, s 30
    pub sign: Id,
}

pub fn scenario() -> Scenario {
    let mut world = junction_network();
    let car1 = place_car(&mut world, 1, &a0(-1), 20.0, 25.0, 22.5);
    let car2 = place_car(&mut world, 2, &lane_key("B", -1), 10.0, 15.0, 132.5);
    let cone = place_cone(&mut world, &lane_key("C1", -1), 5.0, 6.0, 105.5);
    let sign = world.add_traffic_sign("sign-30", speed_limit(30.0));
    let lane = lane_id(&world, &a0(-1));
    world.assign_traffic_sign_to_lane(lane, sign).expect("Spur existiert");
    Scenario {
        world,
        car1,
        car2,
        cone,
        sign,
    }
}

pub fn route(roads: &[(&str, bool)]) -> Vec<sim_world::RouteElement> {
    roads
        .iter()
        .map(|(road, direction)| sim_world::RouteElement::new(*road, *direction))
        .collect()
}
