//! Integrationstests für Kreuzungsabfragen:
//! - Verbindungen, Vorfahrt und Überschneidungen
//! - Nachbarn im Straßennetz und Zufahrtsrouten
//! - Abstände bis zum Ein- und Ausfahren in kreuzende Verbindungen

mod common;

use approx::assert_relative_eq;
use common::{junction_network, route, scenario};
use sim_world::core::IntersectingConnectionRank;
use sim_world::query::{JunctionConnection, RoadNetworkElementType};
use sim_world::{EntityKind, WorldDataQuery, WorldError, WorldObject};

// ─── Verbindungen ────────────────────────────────────────────────────────────

#[test]
fn test_connections_on_junction_je_zufahrt() {
    let world = junction_network();
    let query = WorldDataQuery::new(&world);

    assert_eq!(
        query.connections_on_junction("J", "A"),
        vec![JunctionConnection {
            connecting_road_id: "C1".to_owned(),
            outgoing_road_id: "B".to_owned(),
            outgoing_stream_direction: true,
        }]
    );
    let from_d = query.connections_on_junction("J", "D");
    assert_eq!(from_d.len(), 1);
    assert_eq!(from_d[0].connecting_road_id, "C2");

    assert!(query.connections_on_junction("J", "B").is_empty());
    assert!(query.connections_on_junction("K", "A").is_empty());
}

#[test]
fn test_junction_of_connector() {
    let world = junction_network();
    let query = WorldDataQuery::new(&world);

    let junction = query.junction_of_connector("C2").expect("C2 gehört zu J");
    assert_eq!(Some(junction.id()), world.junction_id("J"));
    assert!(query.junction_of_connector("A").is_none());
}

#[test]
fn test_priorities_on_junction() {
    let world = junction_network();
    let query = WorldDataQuery::new(&world);

    let priorities = query.priorities_on_junction("J");
    assert_eq!(priorities.len(), 1);
    assert_eq!(priorities[0].high, "C1");
    assert_eq!(priorities[0].low, "C2");
    assert!(query.priorities_on_junction("K").is_empty());
}

#[test]
fn test_intersecting_connections() {
    let world = junction_network();
    let query = WorldDataQuery::new(&world);

    let crossing = query.intersecting_connections("C1").expect("C1 ist Verbindungsstraße");
    assert_eq!(crossing.len(), 1);
    assert_eq!(crossing[0].id, "C2");
    assert_eq!(crossing[0].rank, IntersectingConnectionRank::Lower);

    let crossing = query.intersecting_connections("C2").expect("C2 ist Verbindungsstraße");
    assert_eq!(crossing[0].rank, IntersectingConnectionRank::Higher);
}

#[test]
fn test_intersecting_connections_fehlerfaelle() {
    let world = junction_network();
    let query = WorldDataQuery::new(&world);

    assert!(matches!(
        query.intersecting_connections("A"),
        Err(WorldError::JunctionOfConnectorNotFound { road }) if road == "A"
    ));
    assert!(matches!(
        query.intersecting_connections("X"),
        Err(WorldError::UnknownReference { kind: EntityKind::Road, .. })
    ));
}

// ─── Straßennetz ─────────────────────────────────────────────────────────────

#[test]
fn test_road_successor_und_predecessor() {
    let world = junction_network();
    let query = WorldDataQuery::new(&world);

    let successor = query.road_successor("A");
    assert_eq!(successor.element_type, RoadNetworkElementType::Junction);
    assert_eq!(successor.id, "J");

    let successor = query.road_successor("C1");
    assert_eq!(successor.element_type, RoadNetworkElementType::Road);
    assert_eq!(successor.id, "B");

    assert_eq!(query.road_predecessor("A").element_type, RoadNetworkElementType::None);
    assert_eq!(query.road_successor("X").element_type, RoadNetworkElementType::None);
}

#[test]
fn test_route_leading_to_connector() {
    let world = junction_network();
    let query = WorldDataQuery::new(&world);

    assert_eq!(
        query.route_leading_to_connector("C1").expect("Verbindungsstraße"),
        route(&[("A", true), ("C1", true)])
    );
    assert_eq!(
        query.route_leading_to_connector("C2").expect("Verbindungsstraße"),
        route(&[("D", true), ("C2", true)])
    );
    assert!(query.route_leading_to_connector("B").is_err());
}

// ─── Ein- und Ausfahrt ───────────────────────────────────────────────────────

#[test]
fn test_abstand_bis_zur_ueberschneidung() {
    let scenario = scenario();
    let world = &scenario.world;
    let query = WorldDataQuery::new(world);
    let car1 = world.moving_object(scenario.car1).expect("car1").located_position();

    // Überschneidung auf C1 bei s 8..12, also Stream-Position 108..112;
    // car1 belegt 20..25
    let enters = query
        .distance_until_object_enters_connector(car1, "C2", -1, "C1")
        .expect("bekannte Straßen");
    let leaves = query
        .distance_until_object_leaves_connector(car1, "C2", -1, "C1")
        .expect("bekannte Straßen");

    assert_relative_eq!(enters, 83.0);
    assert_relative_eq!(leaves, 92.0);
}

#[test]
fn test_keine_ueberschneidung_ergibt_max() {
    let scenario = scenario();
    let world = &scenario.world;
    let query = WorldDataQuery::new(world);
    let car1 = world.moving_object(scenario.car1).expect("car1").located_position();
    let car2 = world.moving_object(scenario.car2).expect("car2").located_position();

    // B kreuzt C2 nicht
    assert_eq!(
        query
            .distance_until_object_enters_connector(car1, "C2", -1, "B")
            .expect("bekannte Straßen"),
        f64::MAX
    );
    // car2 steht nicht auf der Zufahrt zu C1
    assert_eq!(
        query
            .distance_until_object_leaves_connector(car2, "C2", -1, "C1")
            .expect("bekannte Straßen"),
        f64::MAX
    );
}

#[test]
fn test_unbekannte_verbindung_ist_fehler() {
    let scenario = scenario();
    let world = &scenario.world;
    let query = WorldDataQuery::new(world);
    let car1 = world.moving_object(scenario.car1).expect("car1").located_position();

    assert!(query.distance_until_object_enters_connector(car1, "C2", -1, "X").is_err());
    assert!(query.distance_until_object_enters_connector(car1, "A", -1, "C1").is_err());
}
