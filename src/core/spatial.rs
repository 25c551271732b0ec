//! Spatial-Index (KD-Tree) und Sektor-Filter für Sichtfeld-Abfragen.

use glam::DVec2;
use kiddo::{KdTree, SquaredEuclidean};

use super::geometry::normalize_angle;
use super::ids::Id;

/// Standard-Toleranz für den Vergleich der Sektorgrenzen.
pub const SECTOR_ANGLE_EPSILON: f64 = 1e-9;

/// Kreissektor um einen Ursprung.
///
/// `left` ist der größere, `right` der kleinere Winkel (gegen den Uhrzeigersinn).
/// Reichweite und Winkelgrenzen sind inklusiv.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sector {
    pub origin: DVec2,
    pub radius: f64,
    left: f64,
    right: f64,
    empty: bool,
    full_circle: bool,
}

impl Sector {
    /// Baut einen Sektor aus den absoluten Gierwinkel-Grenzen.
    pub fn new(origin: DVec2, radius: f64, yaw_min: f64, yaw_max: f64, epsilon: f64) -> Self {
        let empty = (yaw_max - yaw_min).abs() <= epsilon || radius <= 0.0;
        let left = normalize_angle(yaw_max);
        let right = normalize_angle(yaw_min);
        Self {
            origin,
            radius,
            left,
            right,
            empty,
            // volle Umdrehung fällt nach der Normalisierung zusammen
            full_circle: (left - right).abs() <= epsilon,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.empty
    }

    pub fn contains(&self, point: DVec2) -> bool {
        if self.empty {
            return false;
        }
        let relative = point - self.origin;
        let distance = relative.length();
        if distance > self.radius {
            return false;
        }
        if self.full_circle || distance == 0.0 {
            return true;
        }
        let direction = relative.y.atan2(relative.x);
        if self.left < self.right {
            !(direction < self.right && direction > self.left)
        } else {
            !(direction < self.right || direction > self.left)
        }
    }
}

/// Read-only Spatial-Index über Objektpositionen eines Ticks.
#[derive(Debug, Clone)]
pub struct SpatialIndex {
    tree: KdTree<f64, 2>,
    ids: Vec<Id>,
    positions: Vec<DVec2>,
}

impl SpatialIndex {
    /// Baut einen neuen Index aus `(ID, Position)`-Paaren.
    pub fn from_positions(items: impl IntoIterator<Item = (Id, DVec2)>) -> Self {
        let (ids, positions): (Vec<Id>, Vec<DVec2>) = items.into_iter().unzip();
        let entries: Vec<[f64; 2]> = positions.iter().map(|p| [p.x, p.y]).collect();
        let tree: KdTree<f64, 2> = (&entries).into();

        Self {
            tree,
            ids,
            positions,
        }
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Indizes aller Einträge mit Abstand `<= radius`.
    fn candidates(&self, query: DVec2, radius: f64) -> Vec<usize> {
        if self.is_empty() || radius.is_sign_negative() {
            return Vec::new();
        }

        // KD-Tree als Vorfilter mit etwas Luft, exakte Prüfung danach
        let padded = radius * (1.0 + 1e-9) + 1e-9;
        self.tree
            .within::<SquaredEuclidean>(&[query.x, query.y], padded * padded)
            .into_iter()
            .filter_map(|entry| {
                let index = entry.item as usize;
                let distance = self.positions.get(index)?.distance(query);
                (distance <= radius).then_some(index)
            })
            .collect()
    }

    /// Alle Objekte innerhalb des Sektors, aufsteigend nach ID.
    pub fn within_sector(&self, sector: &Sector) -> Vec<Id> {
        if sector.is_empty() {
            return Vec::new();
        }

        let mut ids: Vec<Id> = self
            .candidates(sector.origin, sector.radius)
            .into_iter()
            .filter_map(|index| {
                let position = self.positions.get(index)?;
                let id = self.ids.get(index)?;
                sector.contains(*position).then_some(*id)
            })
            .collect();
        ids.sort_unstable();
        ids
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};

    fn sample_index() -> SpatialIndex {
        SpatialIndex::from_positions([
            (1, DVec2::new(0.0, 0.0)),
            (2, DVec2::new(10.0, 0.0)),
            (3, DVec2::new(4.0, 3.0)),
            (4, DVec2::new(-5.0, 0.0)),
        ])
    }

    #[test]
    fn sector_boundaries_are_inclusive() {
        let sector = Sector::new(DVec2::ZERO, 10.0, -FRAC_PI_4, FRAC_PI_4, SECTOR_ANGLE_EPSILON);

        assert!(sector.contains(DVec2::new(10.0, 0.0)));
        assert!(!sector.contains(DVec2::new(10.01, 0.0)));
        assert!(sector.contains(DVec2::from_angle(FRAC_PI_4) * 5.0));
        assert!(!sector.contains(DVec2::from_angle(FRAC_PI_4 + 0.01) * 5.0));
        assert!(sector.contains(DVec2::ZERO));
    }

    #[test]
    fn wrapped_sector_around_pi() {
        let sector = Sector::new(DVec2::ZERO, 10.0, PI - 0.5, PI + 0.5, SECTOR_ANGLE_EPSILON);

        assert!(sector.contains(DVec2::new(-5.0, 0.0)));
        assert!(sector.contains(DVec2::from_angle(-PI + 0.4) * 5.0));
        assert!(!sector.contains(DVec2::new(5.0, 0.0)));
        assert!(!sector.contains(DVec2::new(0.0, 5.0)));
    }

    #[test]
    fn degenerate_sectors_are_empty() {
        let no_angle = Sector::new(DVec2::ZERO, 10.0, 0.3, 0.3, SECTOR_ANGLE_EPSILON);
        let no_range = Sector::new(DVec2::ZERO, 0.0, -1.0, 1.0, SECTOR_ANGLE_EPSILON);

        assert!(no_angle.is_empty());
        assert!(!no_angle.contains(DVec2::new(1.0, 0.3)));
        assert!(no_range.is_empty());
    }

    #[test]
    fn full_circle_accepts_every_direction() {
        let sector = Sector::new(DVec2::ZERO, 10.0, -PI, PI, SECTOR_ANGLE_EPSILON);

        assert!(sector.contains(DVec2::new(-3.0, -3.0)));
        assert!(sector.contains(DVec2::new(0.0, 9.0)));
    }

    #[test]
    fn sector_query_filters_by_angle() {
        let index = sample_index();
        let sector = Sector::new(DVec2::ZERO, 20.0, -0.1, FRAC_PI_2, SECTOR_ANGLE_EPSILON);

        assert_eq!(index.within_sector(&sector), vec![1, 2, 3]);
    }

    #[test]
    fn sector_query_includes_range_boundary() {
        let index = sample_index();
        let sector = Sector::new(DVec2::ZERO, 5.0, -PI, PI, SECTOR_ANGLE_EPSILON);

        assert_eq!(index.within_sector(&sector), vec![1, 3, 4]);
    }

    #[test]
    fn empty_index_yields_no_sector_hits() {
        let index = SpatialIndex::from_positions(Vec::new());
        let sector = Sector::new(DVec2::ZERO, 100.0, -PI, PI, SECTOR_ANGLE_EPSILON);

        assert!(index.is_empty());
        assert_eq!(index.len(), 0);
        assert!(index.within_sector(&sector).is_empty());
    }
}
