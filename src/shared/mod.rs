//! Geteilte Konfiguration für Aufbau und Abfragen.

pub mod options;

pub use options::WorldOptions;
pub use options::{
    BOLD_MARKING_WIDTH, DOUBLE_LINE_DISTANCE, EVENT_HORIZON, SECTOR_ANGLE_EPSILON,
    STANDARD_MARKING_WIDTH,
};
