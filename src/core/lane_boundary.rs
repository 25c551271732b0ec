//! Fahrbahnmarkierungen (Spurbegrenzungen).

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::ids::Id;

/// Markierungstyp einer Begrenzungslinie.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LaneMarkingType {
    #[default]
    None,
    Solid,
    Broken,
    SolidSolid,
    SolidBroken,
    BrokenSolid,
    BrokenBroken,
    Grass,
    BottsDots,
    Curb,
}

impl LaneMarkingType {
    /// Kombiniert zwei parallele Einzellinien (links, rechts) zu einer Doppellinie.
    pub fn combine(left: Self, right: Self) -> Option<Self> {
        use LaneMarkingType::*;
        match (left, right) {
            (Solid, Solid) => Some(SolidSolid),
            (Solid, Broken) => Some(SolidBroken),
            (Broken, Solid) => Some(BrokenSolid),
            (Broken, Broken) => Some(BrokenBroken),
            _ => Option::None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LaneMarkingColor {
    #[default]
    White,
    Yellow,
    Red,
    Blue,
    Green,
}

/// Lage einer Linie innerhalb einer (Doppel-)Markierung.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LaneMarkingSide {
    Left,
    Right,
    #[default]
    Single,
}

/// Strichstärke laut Straßennetzbeschreibung.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MarkingWeight {
    #[default]
    Standard,
    Bold,
    Unknown,
}

/// Markierungsbeschreibung aus dem Straßennetz, relativ zum Section-Anfang.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoadMarking {
    pub s_offset: f64,
    pub s_end: f64,
    pub marking_type: LaneMarkingType,
    pub color: LaneMarkingColor,
    pub weight: MarkingWeight,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundaryPoint {
    pub position: DVec2,
    pub width: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LaneBoundary {
    pub(crate) id: Id,
    pub(crate) width: f64,
    pub(crate) s_start: f64,
    pub(crate) s_end: f64,
    pub(crate) marking_type: LaneMarkingType,
    pub(crate) color: LaneMarkingColor,
    pub(crate) side: LaneMarkingSide,
    pub(crate) points: Vec<BoundaryPoint>,
}

impl LaneBoundary {
    pub fn new(
        id: Id,
        width: f64,
        s_start: f64,
        s_end: f64,
        marking_type: LaneMarkingType,
        color: LaneMarkingColor,
        side: LaneMarkingSide,
    ) -> Self {
        Self {
            id,
            width,
            s_start,
            s_end,
            marking_type,
            color,
            side,
            points: Vec::new(),
        }
    }

    pub fn id(&self) -> Id {
        self.id
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn s_start(&self) -> f64 {
        self.s_start
    }

    pub fn s_end(&self) -> f64 {
        self.s_end
    }

    pub fn marking_type(&self) -> LaneMarkingType {
        self.marking_type
    }

    pub fn color(&self) -> LaneMarkingColor {
        self.color
    }

    pub fn side(&self) -> LaneMarkingSide {
        self.side
    }

    pub fn points(&self) -> &[BoundaryPoint] {
        &self.points
    }

    /// `true`, wenn `s` im Gültigkeitsintervall liegt (beidseitig inklusiv).
    pub fn contains_s(&self, s: f64) -> bool {
        self.s_start <= s && s <= self.s_end
    }

    /// Fügt einen Linienpunkt hinzu.
    ///
    /// Linke und rechte Linien einer Doppelmarkierung werden um
    /// `double_line_distance` senkrecht zur Fahrtrichtung versetzt.
    pub fn add_boundary_point(&mut self, point: DVec2, heading: f64, double_line_distance: f64) {
        let normal = DVec2::new(-heading.sin(), heading.cos()) * double_line_distance;
        let position = match self.side {
            LaneMarkingSide::Single => point,
            LaneMarkingSide::Left => point + normal,
            LaneMarkingSide::Right => point - normal,
        };
        self.points.push(BoundaryPoint {
            position,
            width: self.width,
        });
    }
}
