//! Integrationstests für die Sensor-Sicht:
//! - Sensor-Konfiguration aus TOML-Optionen
//! - Sichtfeld-Filter für Objekte, Zeichen und Spuren
//! - JSON-Export der Sicht

mod common;

use common::scenario;
use sim_world::core::LinkedObject;
use sim_world::{SensorView, WorldError, WorldOptions};

const OPTIONS: &str = r#"
event_horizon = 500.0

[[sensors]]
sensor_id = 7
field_of_view_horizontal = 1.5707963267948966
range = 200.0

[[sensors]]
sensor_id = 8
field_of_view_horizontal = 1.5707963267948966
range = 50.0

[sensors.mounting_position.position]
x = -5.0
y = 0.0
z = 0.0

[sensors.mounting_position.orientation]
yaw = 3.141592653589793
pitch = 0.0
roll = 0.0
"#;

fn options() -> WorldOptions {
    WorldOptions::from_toml_str(OPTIONS).expect("Optionen gültig")
}

#[test]
fn test_sensoren_aus_toml() {
    let options = options();

    assert_eq!(options.event_horizon, 500.0);
    assert_eq!(options.sensors.len(), 2);
    let rear = options.sensor(8).expect("Sensor 8");
    assert_eq!(rear.mounting_position.position.x, -5.0);
    assert_eq!(rear.range, 50.0);
    // nicht angegebene Werte fallen auf Standardwerte zurück
    assert_eq!(options.sensor(7).expect("Sensor 7").mounting_position.position.x, 0.0);
    assert_eq!(options.standard_marking_width, WorldOptions::default().standard_marking_width);
    assert!(options.sensor(9).is_none());
}

#[test]
fn test_frontsensor_sieht_objekte_vor_dem_host() {
    let scenario = scenario();
    let options = options();
    let front = options.sensor(7).expect("Sensor 7");

    let view = scenario.world.sensor_view(front, LinkedObject(1)).expect("Agent 1 existiert");
    let ground_truth = &view.global_ground_truth;

    assert_eq!(view.sensor_id, 7);
    assert_eq!(view.host_vehicle_id, scenario.car1);
    let moving: Vec<_> = ground_truth.moving_objects.iter().map(|o| o.id).collect();
    assert_eq!(moving, vec![scenario.car1, scenario.car2]);
    let stationary: Vec<_> = ground_truth.stationary_objects.iter().map(|o| o.id).collect();
    assert_eq!(stationary, vec![scenario.cone]);
    // Zeichen ohne Weltposition sind immer sichtbar
    assert_eq!(ground_truth.traffic_signs.len(), 1);
    assert!(!ground_truth.lanes.is_empty());
    assert!(!ground_truth.lane_boundaries.is_empty());
}

#[test]
fn test_hecksensor_enthaelt_immer_den_host() {
    let scenario = scenario();
    let options = options();
    let rear = options.sensor(8).expect("Sensor 8");

    let view = scenario.world.sensor_view(rear, LinkedObject(1)).expect("Agent 1 existiert");
    let ground_truth = &view.global_ground_truth;

    let moving: Vec<_> = ground_truth.moving_objects.iter().map(|o| o.id).collect();
    assert_eq!(moving, vec![scenario.car1]);
    assert!(ground_truth.stationary_objects.is_empty());
    assert!(ground_truth.moving_object(scenario.car2).is_none());
}

#[test]
fn test_unbekannter_agent_ist_fehler() {
    let scenario = scenario();
    let options = options();

    let result = scenario.world.sensor_view(options.sensor(7).expect("Sensor 7"), LinkedObject(99));
    assert!(matches!(result, Err(WorldError::UnknownAgent { agent: 99 })));
}

#[test]
fn test_sensor_view_json_export() {
    let scenario = scenario();
    let options = options();
    let view = scenario
        .world
        .sensor_view(options.sensor(7).expect("Sensor 7"), LinkedObject(1))
        .expect("Agent 1 existiert");

    let json = view.to_json().expect("serialisierbar");
    assert!(json.contains("\"host_vehicle_id\""));
    let parsed = SensorView::from_json(&json).expect("gültiges JSON");
    assert_eq!(parsed, view);
}
