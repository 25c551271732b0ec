//! Geometrie-Grundtypen: Spur-Stützpunkte, Positionen, Ausrichtung.

use std::f64::consts::PI;

use glam::{DVec2, DVec3};
use serde::{Deserialize, Serialize};

/// Linker, mittlerer und rechter Punkt an einer Stelle der Spur.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct JointPoints {
    pub left: DVec2,
    pub center: DVec2,
    pub right: DVec2,
}

/// Ein Stützpunkt der Spurgeometrie.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LaneGeometryJoint {
    pub points: JointPoints,
    /// s-Koordinate ab Straßenanfang
    pub s_offset: f64,
    pub curvature: f64,
    /// Fahrtrichtung im globalen System (rad)
    pub heading: f64,
}

/// Position auf einer Spur in Weltkoordinaten.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub yaw: f64,
    pub curvature: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Dimension {
    pub length: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Orientation {
    pub yaw: f64,
    pub pitch: f64,
    pub roll: f64,
}

/// Normalisiert einen Winkel auf (-π, π].
pub fn normalize_angle(angle: f64) -> f64 {
    let mut angle = angle % (2.0 * PI);
    if angle <= -PI {
        angle += 2.0 * PI;
    }
    if angle > PI {
        angle -= 2.0 * PI;
    }
    angle
}

/// Dreht einen Vektor um die z-Achse.
pub fn rotate_yaw(v: DVec3, yaw: f64) -> DVec3 {
    let (sin, cos) = yaw.sin_cos();
    DVec3::new(v.x * cos - v.y * sin, v.x * sin + v.y * cos, v.z)
}

/// Vorzeichenbehafteter Lotabstand eines Punktes zur Geraden `start → end`.
///
/// Positiv links der Richtung, negativ rechts.
pub fn signed_perpendicular_distance(point: DVec2, start: DVec2, end: DVec2) -> f64 {
    let direction = end - start;
    let denominator = direction.dot(direction);
    if denominator == 0.0 {
        return (point - start).length();
    }
    let lambda = direction.dot(point - start) / denominator;
    let foot = start + direction * lambda;
    let offset = point - foot;
    let to_left = direction.perp();
    if offset.dot(to_left) >= 0.0 {
        offset.length()
    } else {
        -offset.length()
    }
}

/// Lineare Interpolation zwischen zwei Werten.
pub(crate) fn lerp(a: f64, b: f64, factor: f64) -> f64 {
    a + (b - a) * factor
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn normalize_angle_maps_into_half_open_interval() {
        assert_relative_eq!(normalize_angle(3.0 * PI), PI, epsilon = 1e-12);
        assert_relative_eq!(normalize_angle(-PI), PI, epsilon = 1e-12);
        assert_relative_eq!(normalize_angle(-3.0 * PI / 2.0), PI / 2.0, epsilon = 1e-12);
        assert_relative_eq!(normalize_angle(0.25), 0.25);
    }

    #[test]
    fn perpendicular_distance_is_positive_on_left() {
        let start = DVec2::new(0.0, 0.0);
        let end = DVec2::new(10.0, 0.0);

        assert_relative_eq!(signed_perpendicular_distance(DVec2::new(3.0, 2.0), start, end), 2.0);
        assert_relative_eq!(signed_perpendicular_distance(DVec2::new(3.0, -1.5), start, end), -1.5);
    }

    #[test]
    fn rotate_yaw_quarter_turn() {
        let rotated = rotate_yaw(DVec3::new(1.0, 0.0, 2.0), PI / 2.0);

        assert_relative_eq!(rotated.x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(rotated.y, 1.0, epsilon = 1e-12);
        assert_relative_eq!(rotated.z, 2.0);
    }
}
