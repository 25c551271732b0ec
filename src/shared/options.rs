//! Zentrale Konfiguration der Weltdaten.
//!
//! `WorldOptions` enthält alle einstellbaren Konstanten der Abfragen.
//! Die `const`-Werte bleiben als Fallback/Default erhalten.

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::ground_truth::SensorViewConfiguration;

// ── Suche ───────────────────────────────────────────────────────────

/// Maximale Vorausschau für schrittweise Suchen entlang einer Spur (m).
pub const EVENT_HORIZON: f64 = 2000.0;

// ── Markierungen ────────────────────────────────────────────────────

/// Breite einer Standard-Markierung (m).
pub const STANDARD_MARKING_WIDTH: f64 = 0.15;
/// Breite einer fetten Markierung (m).
pub const BOLD_MARKING_WIDTH: f64 = 0.3;
/// Seitlicher Versatz der Einzellinien einer Doppelmarkierung (m).
pub const DOUBLE_LINE_DISTANCE: f64 = 0.15;

// ── Sichtfeld ───────────────────────────────────────────────────────

/// Toleranz beim Vergleich der Sektorgrenzen (rad).
pub const SECTOR_ANGLE_EPSILON: f64 = crate::core::SECTOR_ANGLE_EPSILON;

fn default_event_horizon() -> f64 {
    EVENT_HORIZON
}

fn default_standard_marking_width() -> f64 {
    STANDARD_MARKING_WIDTH
}

fn default_bold_marking_width() -> f64 {
    BOLD_MARKING_WIDTH
}

fn default_double_line_distance() -> f64 {
    DOUBLE_LINE_DISTANCE
}

fn default_sector_angle_epsilon() -> f64 {
    SECTOR_ANGLE_EPSILON
}

/// Laufzeit-Optionen der Weltdaten (serialisierbar als TOML).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldOptions {
    /// Suchhorizont für `next_valid_s…`/`last_valid_s…`
    #[serde(default = "default_event_horizon")]
    pub event_horizon: f64,
    #[serde(default = "default_standard_marking_width")]
    pub standard_marking_width: f64,
    #[serde(default = "default_bold_marking_width")]
    pub bold_marking_width: f64,
    #[serde(default = "default_double_line_distance")]
    pub double_line_distance: f64,
    #[serde(default = "default_sector_angle_epsilon")]
    pub sector_angle_epsilon: f64,
    /// Vorkonfigurierte Sensoren für `sensor_view`
    #[serde(default)]
    pub sensors: Vec<SensorViewConfiguration>,
}

impl Default for WorldOptions {
    fn default() -> Self {
        Self {
            event_horizon: EVENT_HORIZON,
            standard_marking_width: STANDARD_MARKING_WIDTH,
            bold_marking_width: BOLD_MARKING_WIDTH,
            double_line_distance: DOUBLE_LINE_DISTANCE,
            sector_angle_epsilon: SECTOR_ANGLE_EPSILON,
            sensors: Vec::new(),
        }
    }
}

impl WorldOptions {
    /// Parst Optionen aus einem TOML-String.
    pub fn from_toml_str(content: &str) -> anyhow::Result<Self> {
        toml::from_str(content).context("Optionen konnten nicht gelesen werden")
    }

    /// Lädt Optionen aus einer TOML-Datei.
    pub fn load_from_path(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Optionen-Datei nicht lesbar: {}", path.display()))?;
        Self::from_toml_str(&content)
    }

    /// Lädt Optionen, fällt bei Fehlern auf Standardwerte zurück.
    pub fn load_from_file(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(opts) => {
                    log::info!("Optionen geladen aus: {}", path.display());
                    opts
                }
                Err(e) => {
                    log::warn!("Optionen-Datei fehlerhaft, verwende Standardwerte: {}", e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Keine Optionen-Datei gefunden, verwende Standardwerte");
                Self::default()
            }
        }
    }

    /// Speichert Optionen als TOML-Datei.
    pub fn save_to_file(&self, path: &Path) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)
            .with_context(|| format!("Optionen-Datei nicht schreibbar: {}", path.display()))?;
        log::info!("Optionen gespeichert nach: {}", path.display());
        Ok(())
    }

    /// Sensor-Konfiguration mit der gegebenen ID.
    pub fn sensor(&self, sensor_id: u64) -> Option<&SensorViewConfiguration> {
        self.sensors.iter().find(|s| s.sensor_id == sensor_id)
    }
}
