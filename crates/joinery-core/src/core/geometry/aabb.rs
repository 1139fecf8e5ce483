use super::Axis;
use super::interval::Interval;
use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};

/// A world-space axis-aligned bounding box.
///
/// Used wherever a conservative envelope of a rotated part is enough: contact
/// detection, support detection, and fastener bridging tests.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Point3<f64>,
    pub max: Point3<f64>,
}

impl Aabb {
    /// Tight bounds of a set of points. Panics on an empty slice in debug
    /// builds; callers always pass the 8 corners of a box.
    pub fn from_points(points: &[Point3<f64>]) -> Self {
        debug_assert!(!points.is_empty());
        let mut min = points[0];
        let mut max = points[0];
        for p in &points[1..] {
            min = Point3::new(min.x.min(p.x), min.y.min(p.y), min.z.min(p.z));
            max = Point3::new(max.x.max(p.x), max.y.max(p.y), max.z.max(p.z));
        }
        Self { min, max }
    }

    pub fn center(&self) -> Point3<f64> {
        Point3::from((self.min.coords + self.max.coords) / 2.0)
    }

    pub fn size(&self) -> Vector3<f64> {
        self.max - self.min
    }

    /// The box's extent along one world axis as an interval.
    pub fn range(&self, axis: Axis) -> Interval {
        let i = axis.index();
        Interval::new(self.min[i], self.max[i])
    }

    /// Overlap length with another box along one world axis (zero when disjoint).
    pub fn overlap_on(&self, other: &Aabb, axis: Axis) -> f64 {
        self.range(axis).overlap(&other.range(axis))
    }

    /// Separation from another box along one world axis (zero when overlapping).
    pub fn gap_on(&self, other: &Aabb, axis: Axis) -> f64 {
        self.range(axis).gap(&other.range(axis))
    }

    /// Whether the boxes overlap on all three axes, each expanded by `tolerance`.
    pub fn intersects(&self, other: &Aabb, tolerance: f64) -> bool {
        Axis::ALL.iter().all(|&axis| self.gap_on(other, axis) <= tolerance)
    }

    /// Smallest box containing both.
    pub fn union(&self, other: &Aabb) -> Aabb {
        Aabb {
            min: Point3::new(
                self.min.x.min(other.min.x),
                self.min.y.min(other.min.y),
                self.min.z.min(other.min.z),
            ),
            max: Point3::new(
                self.max.x.max(other.max.x),
                self.max.y.max(other.max.y),
                self.max.z.max(other.max.z),
            ),
        }
    }

    /// Footprint overlap area with another box in the horizontal (X/Z) plane.
    pub fn horizontal_overlap_area(&self, other: &Aabb) -> f64 {
        self.overlap_on(other, Axis::X) * self.overlap_on(other, Axis::Z)
    }

    /// Center of the horizontal overlap region, as world X/Z coordinates.
    /// Meaningful only when `horizontal_overlap_area` is positive.
    pub fn horizontal_overlap_center(&self, other: &Aabb) -> [f64; 2] {
        let x = self
            .range(Axis::X)
            .intersection(&other.range(Axis::X))
            .map(|i| i.center())
            .unwrap_or_else(|| (self.center().x + other.center().x) / 2.0);
        let z = self
            .range(Axis::Z)
            .intersection(&other.range(Axis::Z))
            .map(|i| i.center())
            .unwrap_or_else(|| (self.center().z + other.center().z) / 2.0);
        [x, z]
    }
}
