use super::footprint::Footprint;
use super::ids::PartId;
use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The broad stock category a part belongs to.
///
/// Contact detection, screw placement, and scoring all operate on wood parts
/// (`Lumber` and `Sheet`); `Hardware` parts are never analyzed as structure but
/// may contribute fastener links when they bridge wood parts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PartCategory {
    /// Dimensional lumber (studs, boards, posts).
    #[default]
    Lumber,
    /// Sheet goods (plywood, MDF, panels).
    Sheet,
    /// Hardware items (fasteners, hinges, brackets).
    Hardware,
}

/// A finer classification for `Hardware` parts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HardwareKind {
    /// A screw or other fastener; the only kind the engine reasons about.
    Fastener,
    Hinge,
    Bracket,
    Other,
}

/// A single part in an assembly.
///
/// Parts are plain value types owned by the host application's collection.
/// The engine receives them as a read-only snapshot, derives everything else
/// (frames, bounds, contacts, scores) on the fly, and never mutates or retains
/// them. Sizes and positions are in inches; the world ground plane is Y = 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Part {
    /// Stable caller-assigned identifier.
    pub id: PartId,
    /// Display label (e.g. `"2x4 stud"`, `"#8 x 2\" wood screw"`).
    pub name: String,
    /// Stock category.
    pub category: PartCategory,
    /// Hardware classification, for `Hardware` parts only.
    pub hardware: Option<HardwareKind>,
    /// Extents along the part's local X, Y, and Z axes (width, height, depth).
    pub size: Vector3<f64>,
    /// World-space position of the part's center.
    pub position: Point3<f64>,
    /// Orientation as fixed-order Euler angles in radians: the X rotation is
    /// applied first, then Y, then Z. Contact and screw math rely on this
    /// exact order.
    pub orientation: Vector3<f64>,
    /// Cross-section profile in the local X/Z plane, extruded along local Y.
    pub footprint: Footprint,
}

impl Part {
    /// Creates a part of the given category at the origin with unit size,
    /// no rotation, and a full rectangular footprint.
    pub fn new(id: PartId, name: &str, category: PartCategory) -> Self {
        Self {
            id,
            name: name.to_string(),
            category,
            hardware: None,
            size: Vector3::new(1.0, 1.0, 1.0),
            position: Point3::origin(),
            orientation: Vector3::zeros(),
            footprint: Footprint::Rectangle,
        }
    }

    pub fn with_size(mut self, width: f64, height: f64, depth: f64) -> Self {
        self.size = Vector3::new(width, height, depth);
        self
    }

    pub fn with_position(mut self, x: f64, y: f64, z: f64) -> Self {
        self.position = Point3::new(x, y, z);
        self
    }

    pub fn with_orientation(mut self, rx: f64, ry: f64, rz: f64) -> Self {
        self.orientation = Vector3::new(rx, ry, rz);
        self
    }

    pub fn with_hardware(mut self, kind: HardwareKind) -> Self {
        self.category = PartCategory::Hardware;
        self.hardware = Some(kind);
        self
    }

    pub fn with_footprint(mut self, footprint: Footprint) -> Self {
        self.footprint = footprint;
        self
    }

    /// Whether the part is structural wood (lumber or sheet goods).
    pub fn is_wood(&self) -> bool {
        matches!(self.category, PartCategory::Lumber | PartCategory::Sheet)
    }

    /// Whether the part is a fastener.
    pub fn is_fastener(&self) -> bool {
        self.category == PartCategory::Hardware && self.hardware == Some(HardwareKind::Fastener)
    }

    /// Cross-section area in the local X/Z plane, honoring the footprint profile.
    pub fn footprint_area(&self) -> f64 {
        self.footprint.area(&self.size)
    }

    /// Solid volume: profile area extruded over the part's height.
    pub fn volume(&self) -> f64 {
        self.footprint_area() * self.size.y
    }
}

impl FromStr for PartCategory {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "lumber" => Ok(PartCategory::Lumber),
            "sheet" => Ok(PartCategory::Sheet),
            "hardware" => Ok(PartCategory::Hardware),
            _ => Err(()),
        }
    }
}
