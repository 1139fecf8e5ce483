//! Pairwise analysis passes over a part snapshot.
//!
//! Each task is a free function taking the prepared wood-part views and
//! returning a list of relations. The O(n²) scans are acceptable at
//! interactive assembly sizes; a spatial index can replace their interiors
//! without changing the contracts.

pub(crate) mod bridging;
pub(crate) mod contact_graph;
pub(crate) mod support;

use crate::core::geometry::aabb::Aabb;
use crate::core::geometry::frame::OrientedFrame;
use crate::core::models::part::Part;

/// A wood part with its world bounds and derived measures, computed once per
/// analysis and shared by every task.
pub(crate) struct WoodView<'a> {
    pub part: &'a Part,
    pub bounds: Aabb,
    pub footprint_area: f64,
    pub volume: f64,
}

impl<'a> WoodView<'a> {
    pub fn new(part: &'a Part) -> Self {
        let bounds = OrientedFrame::from_part(part).world_bounds();
        Self {
            part,
            bounds,
            footprint_area: part.footprint_area(),
            volume: part.volume(),
        }
    }

    /// Footprint area of the world bounds, used when relating world-space
    /// overlap regions to the part.
    pub fn horizontal_bounds_area(&self) -> f64 {
        let size = self.bounds.size();
        size.x * size.z
    }
}
