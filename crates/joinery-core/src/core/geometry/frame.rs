use super::aabb::Aabb;
use super::interval::Interval;
use crate::core::models::part::Part;
use nalgebra::{Point3, Rotation3, Vector3};

/// A part's oriented box in world space: center, half-extents, and three
/// orthonormal axis vectors.
///
/// Frames are built per operation from a part snapshot and dropped when the
/// operation finishes; they are never persisted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrientedFrame {
    pub center: Point3<f64>,
    pub half: Vector3<f64>,
    pub axes: [Vector3<f64>; 3],
}

impl OrientedFrame {
    /// Builds the frame from a part's position, size, and orientation.
    ///
    /// The orientation is applied in fixed order: X rotation first, then Y,
    /// then Z (`from_euler_angles` composes exactly that way). Contact and
    /// screw math depend on this order.
    pub fn from_part(part: &Part) -> Self {
        let rotation = Rotation3::from_euler_angles(
            part.orientation.x,
            part.orientation.y,
            part.orientation.z,
        );
        Self {
            center: part.position,
            half: part.size / 2.0,
            axes: [
                rotation * Vector3::x(),
                rotation * Vector3::y(),
                rotation * Vector3::z(),
            ],
        }
    }

    /// The 8 corners of the oriented box in world space.
    pub fn corners(&self) -> [Point3<f64>; 8] {
        let mut corners = [Point3::origin(); 8];
        for (i, corner) in corners.iter_mut().enumerate() {
            let sx = if i & 1 == 0 { -1.0 } else { 1.0 };
            let sy = if i & 2 == 0 { -1.0 } else { 1.0 };
            let sz = if i & 4 == 0 { -1.0 } else { 1.0 };
            *corner = self.center
                + self.axes[0] * (sx * self.half.x)
                + self.axes[1] * (sy * self.half.y)
                + self.axes[2] * (sz * self.half.z);
        }
        corners
    }

    /// Tight world-space axis-aligned bounds of the oriented box.
    pub fn world_bounds(&self) -> Aabb {
        Aabb::from_points(&self.corners())
    }

    /// Exact projection of the oriented box onto an arbitrary unit direction
    /// (support-function projection): `center·d ± Σ |d·axisᵢ|·halfᵢ`.
    pub fn projected_range(&self, direction: &Vector3<f64>) -> Interval {
        let center = self.center.coords.dot(direction);
        let radius = self.axes[0].dot(direction).abs() * self.half.x
            + self.axes[1].dot(direction).abs() * self.half.y
            + self.axes[2].dot(direction).abs() * self.half.z;
        Interval::new(center - radius, center + radius)
    }

    /// A world point expressed in the frame's local coordinates.
    pub fn to_local(&self, point: &Point3<f64>) -> Vector3<f64> {
        let rel = point - self.center;
        Vector3::new(
            rel.dot(&self.axes[0]),
            rel.dot(&self.axes[1]),
            rel.dot(&self.axes[2]),
        )
    }

    /// Slab-test intersection of an infinite line with the oriented box, the
    /// box expanded by `tolerance` on every face.
    ///
    /// Returns the parametric entry/exit interval along `direction` (measured
    /// from `origin`), or `None` when the line misses.
    pub fn intersect_line(
        &self,
        origin: &Point3<f64>,
        direction: &Vector3<f64>,
        tolerance: f64,
    ) -> Option<Interval> {
        let local_origin = self.to_local(origin);
        let local_dir = Vector3::new(
            direction.dot(&self.axes[0]),
            direction.dot(&self.axes[1]),
            direction.dot(&self.axes[2]),
        );

        let mut t_min = f64::NEG_INFINITY;
        let mut t_max = f64::INFINITY;
        for i in 0..3 {
            let extent = self.half[i] + tolerance;
            if local_dir[i].abs() < 1e-12 {
                // Line parallel to this slab: misses unless the origin lies
                // within the expanded extent.
                if local_origin[i].abs() > extent {
                    return None;
                }
                continue;
            }
            let t0 = (-extent - local_origin[i]) / local_dir[i];
            let t1 = (extent - local_origin[i]) / local_dir[i];
            let (near, far) = if t0 <= t1 { (t0, t1) } else { (t1, t0) };
            t_min = t_min.max(near);
            t_max = t_max.min(far);
            if t_min > t_max {
                return None;
            }
        }
        Some(Interval::new(t_min, t_max))
    }
}
