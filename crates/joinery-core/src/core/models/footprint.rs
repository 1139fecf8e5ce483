use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// A part's 2D cross-section profile, expressed in the part's local X/Z plane.
///
/// The profile is extruded along the part's local Y axis (its height) to form
/// the solid. Coordinates are centered on the part: a part of size `w × h × d`
/// occupies local X in `[-w/2, w/2]` and local Z in `[-d/2, d/2]`.
///
/// Containment tests against the true profile are what let the screw placement
/// search reject positions that plain bounding-box math would accept, e.g. a
/// screw aimed through the void of an L-shaped notch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Footprint {
    /// The full `width × depth` rectangle.
    Rectangle,
    /// An L-shape: the rectangle with its +X/+Z corner removed.
    CornerNotch {
        /// Extent of the notch along local X, measured in from the +X edge.
        notch_width: f64,
        /// Extent of the notch along local Z, measured in from the +Z edge.
        notch_depth: f64,
    },
    /// An arbitrary simple polygon in local X/Z coordinates.
    Polygon { points: Vec<[f64; 2]> },
    /// A prism whose +Z end is cut at an angle: the +X side of the end face is
    /// pulled back by `width · tan(angle)`.
    AngledEnd {
        /// Cut angle in radians, measured from the local X axis. Zero degrades
        /// to the full rectangle.
        angle: f64,
    },
}

impl Default for Footprint {
    fn default() -> Self {
        Footprint::Rectangle
    }
}

impl Footprint {
    /// The profile outline as a closed polygon (last edge implied), in local
    /// X/Z coordinates for a part of the given size.
    pub fn outline(&self, size: &Vector3<f64>) -> Vec<[f64; 2]> {
        let hx = size.x / 2.0;
        let hz = size.z / 2.0;
        match self {
            Footprint::Rectangle => {
                vec![[-hx, -hz], [hx, -hz], [hx, hz], [-hx, hz]]
            }
            Footprint::CornerNotch {
                notch_width,
                notch_depth,
            } => {
                let nw = notch_width.clamp(0.0, size.x);
                let nd = notch_depth.clamp(0.0, size.z);
                vec![
                    [-hx, -hz],
                    [hx, -hz],
                    [hx, hz - nd],
                    [hx - nw, hz - nd],
                    [hx - nw, hz],
                    [-hx, hz],
                ]
            }
            Footprint::Polygon { points } => points.clone(),
            Footprint::AngledEnd { angle } => {
                let setback = (size.x * angle.tan()).clamp(0.0, size.z);
                vec![[-hx, -hz], [hx, -hz], [hx, hz - setback], [-hx, hz]]
            }
        }
    }

    /// The profile area for a part of the given size (shoelace formula).
    pub fn area(&self, size: &Vector3<f64>) -> f64 {
        match self {
            Footprint::Rectangle => size.x * size.z,
            _ => shoelace_area(&self.outline(size)),
        }
    }

    /// Tests whether a local X/Z point lies inside the profile, treating points
    /// within `tolerance` of the outline as inside.
    pub fn contains(&self, size: &Vector3<f64>, x: f64, z: f64, tolerance: f64) -> bool {
        if let Footprint::Rectangle = self {
            let hx = size.x / 2.0 + tolerance;
            let hz = size.z / 2.0 + tolerance;
            return x.abs() <= hx && z.abs() <= hz;
        }
        let outline = self.outline(size);
        if outline.len() < 3 {
            return false;
        }
        point_in_polygon(&outline, x, z) || distance_to_outline(&outline, x, z) <= tolerance
    }
}

fn shoelace_area(outline: &[[f64; 2]]) -> f64 {
    if outline.len() < 3 {
        return 0.0;
    }
    let mut twice_area = 0.0;
    for i in 0..outline.len() {
        let [x0, z0] = outline[i];
        let [x1, z1] = outline[(i + 1) % outline.len()];
        twice_area += x0 * z1 - x1 * z0;
    }
    twice_area.abs() / 2.0
}

/// Even-odd rule containment test.
fn point_in_polygon(outline: &[[f64; 2]], x: f64, z: f64) -> bool {
    let mut inside = false;
    let mut j = outline.len() - 1;
    for i in 0..outline.len() {
        let [xi, zi] = outline[i];
        let [xj, zj] = outline[j];
        if (zi > z) != (zj > z) {
            let crossing_x = (xj - xi) * (z - zi) / (zj - zi) + xi;
            if x < crossing_x {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

fn distance_to_outline(outline: &[[f64; 2]], x: f64, z: f64) -> f64 {
    let mut best = f64::INFINITY;
    for i in 0..outline.len() {
        let a = outline[i];
        let b = outline[(i + 1) % outline.len()];
        best = best.min(distance_to_segment(a, b, x, z));
    }
    best
}

fn distance_to_segment(a: [f64; 2], b: [f64; 2], x: f64, z: f64) -> f64 {
    let (ax, az) = (a[0], a[1]);
    let (bx, bz) = (b[0], b[1]);
    let (dx, dz) = (bx - ax, bz - az);
    let len_sq = dx * dx + dz * dz;
    let t = if len_sq > 0.0 {
        (((x - ax) * dx + (z - az) * dz) / len_sq).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let (px, pz) = (ax + t * dx, az + t * dz);
    ((x - px) * (x - px) + (z - pz) * (z - pz)).sqrt()
}
