use super::WoodView;
use crate::core::models::ids::PartId;
use crate::engine::config::ScoringConfig;
use serde::{Deserialize, Serialize};

/// A vertical support relationship: the lower part's top face holds up the
/// upper part's bottom face over some horizontal region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupportRelation {
    /// The lower part providing support.
    pub supporter: PartId,
    /// The upper part being held up.
    pub supported: PartId,
    /// Horizontal overlap area of the two footprints, square inches.
    pub area: f64,
    /// Center of the overlap region, world X/Z.
    pub point: [f64; 2],
}

/// Result of the vertical scan: direct support relations, per-part grounding,
/// and the volumetric load demand each part carries from parts above it.
pub(crate) struct SupportScan {
    pub relations: Vec<SupportRelation>,
    /// Indexed like the view slice.
    pub grounded: Vec<bool>,
    /// Indexed like the view slice, cubic inches.
    pub load_demand: Vec<f64>,
}

/// Scans for direct face-on-face support, ground contact, and stacked load.
///
/// Load demand includes transitive stacking: any part strictly above another
/// with overlapping horizontal footprints contributes volume proportional to
/// the overlap fraction, whether or not the two are in direct contact.
pub(crate) fn run(views: &[WoodView<'_>], config: &ScoringConfig) -> SupportScan {
    let mut relations = Vec::new();
    let mut grounded = vec![false; views.len()];
    let mut load_demand = vec![0.0; views.len()];

    for (i, view) in views.iter().enumerate() {
        grounded[i] = view.bounds.min.y.abs() <= config.ground_tolerance;
    }

    for upper_idx in 0..views.len() {
        for lower_idx in 0..views.len() {
            if upper_idx == lower_idx {
                continue;
            }
            let upper = &views[upper_idx];
            let lower = &views[lower_idx];

            let overlap_area = upper.bounds.horizontal_overlap_area(&lower.bounds);
            if overlap_area <= 0.0 {
                continue;
            }

            let seam = upper.bounds.min.y - lower.bounds.max.y;
            if seam.abs() <= config.support_tolerance && overlap_area >= config.min_support_area {
                relations.push(SupportRelation {
                    supporter: lower.part.id,
                    supported: upper.part.id,
                    area: overlap_area,
                    point: upper.bounds.horizontal_overlap_center(&lower.bounds),
                });
            }

            // Stacked load, direct or transitive: anything above presses down
            // in proportion to the shared footprint.
            if seam >= -config.support_tolerance {
                let fraction = (overlap_area / upper.horizontal_bounds_area().max(1e-9)).min(1.0);
                load_demand[lower_idx] += upper.volume * fraction;
            }
        }
    }

    SupportScan {
        relations,
        grounded,
        load_demand,
    }
}
