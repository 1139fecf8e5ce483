use crate::core::geometry::Axis;
use crate::core::models::ids::PartId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Letter grade bands for the overall assembly score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Grade {
    APlus,
    A,
    B,
    C,
    D,
    E,
    F,
    /// No wood parts to grade.
    NotApplicable,
}

impl Grade {
    /// Maps a rescaled assembly score to its fixed band.
    pub fn from_score(score: f64) -> Self {
        if score >= 0.90 {
            Grade::APlus
        } else if score >= 0.80 {
            Grade::A
        } else if score >= 0.70 {
            Grade::B
        } else if score >= 0.60 {
            Grade::C
        } else if score >= 0.52 {
            Grade::D
        } else if score >= 0.45 {
            Grade::E
        } else {
            Grade::F
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Grade::APlus => "A+",
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
            Grade::D => "D",
            Grade::E => "E",
            Grade::F => "F",
            Grade::NotApplicable => "N/A",
        }
    }
}

impl std::fmt::Display for Grade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-part analysis detail, used by the host for overlays and inspectors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartField {
    /// World X/Z points where the part is supported from below.
    pub support_points: Vec<[f64; 2]>,
    /// World X/Z points where other parts press on this one from above.
    pub load_points: Vec<[f64; 2]>,
    /// Accumulated fastener link credit (1 per bridging fastener touching
    /// this part, partial credit for singly-engaged fasteners).
    pub fastener_links: f64,
    /// Footprint area supported from below, square inches.
    pub support_area: f64,
    /// Total contact area with neighboring parts, square inches.
    pub contact_area: f64,
    /// Distinct world axes along which this part touches neighbors.
    pub contact_axes: Vec<Axis>,
    /// Volumetric load demand from parts stacked above, cubic inches.
    pub load_demand: f64,
    /// Whether the part rests at ground level.
    pub grounded: bool,
    /// Spread-of-support sub-score in `[0, 1]`.
    pub pattern_score: f64,
    /// World axis of the part's largest extent.
    pub span_axis: Axis,
}

impl PartField {
    pub fn new(span_axis: Axis) -> Self {
        Self {
            support_points: Vec::new(),
            load_points: Vec::new(),
            fastener_links: 0.0,
            support_area: 0.0,
            contact_area: 0.0,
            contact_axes: Vec::new(),
            load_demand: 0.0,
            grounded: false,
            pattern_score: 0.0,
            span_axis,
        }
    }
}

/// Display-only summary statistics for the whole assembly. None of these feed
/// back into the score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct AssemblyStats {
    /// Total wood volume, cubic inches.
    pub total_volume: f64,
    /// Estimated weight at the configured softwood density, pounds.
    pub estimated_weight: f64,
    /// Horizontal footprint area of the assembly bounds, square inches.
    pub footprint_area: f64,
    /// Overall height, inches.
    pub height: f64,
    /// Height of the center of mass, inches.
    pub center_of_mass_height: f64,
    /// Horizontal spans along world X and Z, inches.
    pub span: [f64; 2],
    /// Mass-balance symmetry across world X and Z, each in `[0, 1]`.
    pub symmetry: [f64; 2],
    /// Number of connected components in the contact graph.
    pub connected_components: usize,
    /// Number of contact edges.
    pub contact_count: usize,
    /// Number of fastener parts in the snapshot.
    pub fastener_count: usize,
    /// Number of fasteners bridging two or more wood parts.
    pub bridging_fastener_count: usize,
}

/// An immutable snapshot of the structural analysis of one part collection.
///
/// Recomputed from scratch on every call; carries no identity or history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructuralReport {
    /// Overall assembly score in `[score_floor, 1]`, or 0 for an empty assembly.
    pub overall_score: f64,
    /// Letter grade for the overall score.
    pub grade: Grade,
    /// User-presentable recommendation, chosen by fixed priority.
    pub recommendation: String,
    /// Stability score per wood part, each in `[0, 1]`.
    pub part_scores: HashMap<PartId, f64>,
    /// Analysis detail per wood part.
    pub part_fields: HashMap<PartId, PartField>,
    /// Parts scoring below the weak threshold, ascending by id.
    pub weak_parts: Vec<PartId>,
    /// Display-only summary statistics.
    pub stats: AssemblyStats,
}

impl StructuralReport {
    /// The defined report for an assembly with no wood parts.
    pub fn empty() -> Self {
        Self {
            overall_score: 0.0,
            grade: Grade::NotApplicable,
            recommendation: "Add parts to analyze the structure.".to_string(),
            part_scores: HashMap::new(),
            part_fields: HashMap::new(),
            weak_parts: Vec::new(),
            stats: AssemblyStats::default(),
        }
    }
}
