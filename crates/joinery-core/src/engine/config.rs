use serde::{Deserialize, Serialize};

/// One entry of the fixed wood-screw catalog.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScrewPreset {
    /// Display name, also used as the synthesized fastener part's name.
    pub name: &'static str,
    /// Shank diameter in inches.
    pub diameter: f64,
    /// Overall length in inches.
    pub length: f64,
}

/// Three common #8 wood-screw sizes, longest first. The placement search
/// prefers the longest preset that fits the joint.
pub const SCREW_PRESETS: [ScrewPreset; 3] = [
    ScrewPreset {
        name: "#8 x 2-1/2\" wood screw",
        diameter: 0.164,
        length: 2.5,
    },
    ScrewPreset {
        name: "#8 x 2\" wood screw",
        diameter: 0.164,
        length: 2.0,
    },
    ScrewPreset {
        name: "#8 x 1-1/4\" wood screw",
        diameter: 0.164,
        length: 1.25,
    },
];

/// Tunables of the automatic screw placement search. All lengths are inches.
///
/// The defaults reflect common woodworking practice (3/8" edge clearance
/// against blow-out, a touch of head protrusion, a quarter-inch seam
/// tolerance) and are deliberate accuracy/performance tradeoffs where noted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacementConfig {
    /// Minimum cosine between a candidate insertion direction and the
    /// center-to-center delta of the two parts.
    pub min_direction_alignment: f64,
    /// Largest projected gap along a direction for the parts to count as
    /// touching along it.
    pub contact_gap_tolerance: f64,
    /// Largest projected overlap along a direction; beyond this the parts
    /// interpenetrate rather than meet at a seam.
    pub max_direction_overlap: f64,
    /// Minimum extent of the shared projection rectangle on each plane axis.
    pub min_plane_overlap: f64,
    /// Minimum length of either part's interval along the insertion line.
    pub min_span_length: f64,
    /// Largest gap between the two parts' intervals along the insertion line.
    pub max_seam_gap: f64,
    /// How far the screw head may sit proud of the entry face.
    pub head_protrusion: f64,
    /// Margin kept between the screw tip and the far face of the second part.
    pub exit_margin: f64,
    /// Minimum embedment per part, as a fraction of the screw length.
    pub min_embed_fraction: f64,
    /// Absolute floor on embedment per part.
    pub min_embed_floor: f64,
    /// Fraction of the screw length aimed into the second part before the
    /// head-protrusion clamp is applied.
    pub preferred_bite_fraction: f64,
    /// Minimum distance from a screw to the edges of the shared region.
    pub edge_clearance: f64,
    /// Screw pair spacing as a fraction of the larger shared-region extent.
    pub spacing_fraction: f64,
    /// Absolute floor on screw pair spacing.
    pub min_spacing: f64,
    /// Number of points sampled along the screw span when testing the true
    /// cross-section. Accuracy/performance tradeoff; 31 matches interactive
    /// use well.
    pub span_samples: usize,
    /// Cosine above which two candidate directions are considered parallel
    /// and deduplicated.
    pub parallel_cosine: f64,
    /// Face expansion used when intersecting the insertion line with a frame.
    pub line_tolerance: f64,
    /// Score weight on distance from the shared region's edges.
    pub edge_score_weight: f64,
    /// Score penalty per inch of open gap at the seam.
    pub seam_gap_penalty: f64,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            min_direction_alignment: 0.35,
            contact_gap_tolerance: 0.25,
            max_direction_overlap: 0.75,
            min_plane_overlap: 0.75,
            min_span_length: 0.4,
            max_seam_gap: 0.25,
            head_protrusion: 0.04,
            exit_margin: 0.05,
            min_embed_fraction: 0.3,
            min_embed_floor: 0.45,
            preferred_bite_fraction: 0.6,
            edge_clearance: 0.375,
            spacing_fraction: 0.3,
            min_spacing: 0.75,
            span_samples: 31,
            parallel_cosine: 0.995,
            line_tolerance: 0.02,
            edge_score_weight: 0.8,
            seam_gap_penalty: 1.5,
        }
    }
}

/// Weights combined into a part's stability score. The positive terms sum
/// slightly above 1 and the result is clamped, so a part does not need every
/// bonus to reach a perfect score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringWeights {
    /// Weight on the supported-footprint ratio.
    pub support: f64,
    /// Weight on the support-pattern sub-score (spread of support points).
    pub pattern: f64,
    /// Weight on contact area relative to footprint area.
    pub contact: f64,
    /// Stepped bonus for 1, 2, and 3+ distinct contact axes.
    pub axis_bonus: [f64; 3],
    /// Bonus per fastener link.
    pub fastener_link: f64,
    /// Cap on the total fastener-link bonus.
    pub fastener_link_cap: f64,
    /// Bonus for resting at ground level.
    pub grounded_bonus: f64,
    /// Cap on the slenderness penalty for high-aspect-ratio parts.
    pub slenderness_cap: f64,
    /// Cantilever penalty for ungrounded, poorly supported parts, scaled by
    /// relative height.
    pub cantilever: f64,
    /// Support ratio below which the cantilever penalty applies.
    pub cantilever_support_threshold: f64,
    /// Pressure penalty per unit of load excess over the part's own volume.
    pub pressure_rate: f64,
    /// Cap on the pressure penalty for overloaded parts.
    pub pressure_cap: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            support: 0.40,
            pattern: 0.18,
            contact: 0.12,
            axis_bonus: [0.04, 0.08, 0.12],
            fastener_link: 0.05,
            fastener_link_cap: 0.15,
            grounded_bonus: 0.10,
            slenderness_cap: 0.15,
            cantilever: 0.25,
            cantilever_support_threshold: 0.3,
            pressure_rate: 0.1,
            pressure_cap: 0.25,
        }
    }
}

/// Weights combined into the assembly-level score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssemblyWeights {
    /// Weight on the √volume-weighted average of part scores.
    pub part_average: f64,
    /// Weight on average support coverage.
    pub support_coverage: f64,
    /// Weight on average connection count (saturating at two per part).
    pub connectivity: f64,
    /// Weight on mass-balance symmetry across the horizontal axes.
    pub symmetry: f64,
    /// Weight on the grounded-part ratio.
    pub grounded: f64,
    /// Weight on the bridging-fastener ratio.
    pub bridging: f64,
    /// Penalty per connected component beyond the first.
    pub extra_component_penalty: f64,
    /// Penalty when at least a quarter of parts are weak.
    pub weak_minor_penalty: f64,
    /// Penalty when at least half of parts are weak.
    pub weak_major_penalty: f64,
    /// Cap on the top-heavy penalty (center of mass high in the assembly).
    pub top_heavy_cap: f64,
}

impl Default for AssemblyWeights {
    fn default() -> Self {
        Self {
            part_average: 0.60,
            support_coverage: 0.10,
            connectivity: 0.08,
            symmetry: 0.07,
            grounded: 0.08,
            bridging: 0.07,
            extra_component_penalty: 0.10,
            weak_minor_penalty: 0.06,
            weak_major_penalty: 0.12,
            top_heavy_cap: 0.08,
        }
    }
}

/// Tunables of the structural integrity scorer. Lengths are inches, areas
/// square inches, weights pounds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Largest face-to-face gap that still counts as contact.
    pub contact_tolerance: f64,
    /// Minimum cross-axis overlap for a contact to register.
    pub min_contact_overlap: f64,
    /// Largest bottom-to-top gap that still counts as support.
    pub support_tolerance: f64,
    /// Minimum horizontal overlap area for a support relation.
    pub min_support_area: f64,
    /// How close a part's underside must be to Y = 0 to count as grounded.
    pub ground_tolerance: f64,
    /// Parts scoring below this are flagged weak.
    pub weak_threshold: f64,
    /// Softwood density used for the estimated weight, in lb/in³.
    pub density: f64,
    /// Aspect ratio at which the slenderness penalty begins.
    pub slenderness_onset: f64,
    /// Aspect ratio span over which the slenderness penalty ramps to its cap.
    pub slenderness_range: f64,
    /// Support-pattern sampling grid resolution per axis.
    pub pattern_grid: usize,
    /// Weight of the grid's center cell relative to its corners when
    /// averaging support distances.
    pub pattern_center_weight: f64,
    /// Lower bound of the rescaled assembly score; a non-empty assembly never
    /// scores exactly zero.
    pub score_floor: f64,
    /// Per-part score weights.
    pub weights: ScoringWeights,
    /// Assembly-level score weights.
    pub assembly: AssemblyWeights,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            contact_tolerance: 0.05,
            min_contact_overlap: 0.25,
            support_tolerance: 0.1,
            min_support_area: 0.5,
            ground_tolerance: 0.08,
            weak_threshold: 0.48,
            density: 0.016,
            slenderness_onset: 8.0,
            slenderness_range: 24.0,
            pattern_grid: 5,
            pattern_center_weight: 1.5,
            score_floor: 0.08,
            weights: ScoringWeights::default(),
            assembly: AssemblyWeights::default(),
        }
    }
}
