use crate::core::geometry::Axis;
use crate::core::geometry::aabb::Aabb;
use crate::core::models::part::Part;
use crate::engine::config::ScoringConfig;
use crate::engine::report::{AssemblyStats, Grade, PartField, StructuralReport};
use crate::engine::tasks::{WoodView, bridging, contact_graph, support};
use std::collections::HashMap;
use tracing::{debug, instrument};

const RECOMMEND_DISCONNECTED: &str =
    "Parts form disconnected clusters; connect them before adding load.";
const RECOMMEND_UNFASTENED: &str = "Joints lack fasteners; add screws across the main seams.";
const RECOMMEND_SEVERAL_WEAK: &str = "Several parts are unstable; add supports or fasteners.";
const RECOMMEND_SOME_WEAK: &str = "Some parts need more support; check the highlighted ones.";
const RECOMMEND_SOLID: &str = "Structure looks solid.";
const RECOMMEND_MODERATE: &str = "Moderately stable; reinforce the load-bearing joints.";

/// Scores the structural stability of the whole assembly.
///
/// Total function: always returns a well-formed report, including the defined
/// empty report when the snapshot holds no wood parts. The report is
/// recomputed from scratch; identical snapshots yield identical reports
/// regardless of input order.
#[instrument(skip_all, fields(part_count = parts.len()))]
pub fn run(parts: &[Part], config: &ScoringConfig) -> StructuralReport {
    // === Phase 0: Split and canonically order the snapshot ===
    let mut wood: Vec<WoodView<'_>> = parts.iter().filter(|p| p.is_wood()).map(WoodView::new).collect();
    wood.sort_by_key(|view| view.part.id);
    let mut hardware: Vec<&Part> = parts.iter().filter(|p| !p.is_wood()).collect();
    hardware.sort_by_key(|part| part.id);

    if wood.is_empty() {
        return StructuralReport::empty();
    }

    // === Phase 1: Pairwise relationship scans ===
    let edges = contact_graph::run(&wood, config);
    let (components, connections) = contact_graph::connectivity(&wood, &edges);
    let support_scan = support::run(&wood, config);
    let bridging_scan = bridging::run(&wood, &hardware, config);

    // === Phase 2: Accumulate per-part fields ===
    let index_of: HashMap<_, _> = wood
        .iter()
        .enumerate()
        .map(|(idx, view)| (view.part.id, idx))
        .collect();
    let mut fields: Vec<PartField> = wood.iter().map(|view| PartField::new(span_axis(view))).collect();

    for (idx, field) in fields.iter_mut().enumerate() {
        field.grounded = support_scan.grounded[idx];
        field.load_demand = support_scan.load_demand[idx];
        field.fastener_links = bridging_scan.links[idx];
    }
    for edge in &edges {
        for id in [edge.first, edge.second] {
            let field = &mut fields[index_of[&id]];
            field.contact_area += edge.area;
            if !field.contact_axes.contains(&edge.axis) {
                field.contact_axes.push(edge.axis);
            }
        }
    }
    for relation in &support_scan.relations {
        let supported = &mut fields[index_of[&relation.supported]];
        supported.support_points.push(relation.point);
        supported.support_area += relation.area;
        fields[index_of[&relation.supporter]]
            .load_points
            .push(relation.point);
    }

    let assembly_bounds = wood
        .iter()
        .skip(1)
        .fold(wood[0].bounds, |acc, view| acc.union(&view.bounds));
    let assembly_top = assembly_bounds.max.y.max(1e-9);

    for (idx, field) in fields.iter_mut().enumerate() {
        field.pattern_score = pattern_score(&wood[idx], field, config);
    }

    // === Phase 3: Per-part scores ===
    let mut part_scores = HashMap::new();
    let mut support_ratios = Vec::with_capacity(wood.len());
    let mut weak_parts = Vec::new();
    let mut scores = Vec::with_capacity(wood.len());
    for (idx, view) in wood.iter().enumerate() {
        let (score, support_ratio) = score_part(view, &fields[idx], assembly_top, config);
        part_scores.insert(view.part.id, score);
        support_ratios.push(support_ratio);
        scores.push(score);
        if score < config.weak_threshold {
            weak_parts.push(view.part.id);
        }
    }

    // === Phase 4: Assembly aggregation ===
    let stats = assembly_stats(
        &wood,
        &assembly_bounds,
        components,
        edges.len(),
        &bridging_scan,
        config,
    );
    let overall_score = assembly_score(
        &wood,
        &scores,
        &support_ratios,
        &connections,
        &stats,
        weak_parts.len(),
        config,
    );
    let grade = Grade::from_score(overall_score);
    let recommendation = recommendation(overall_score, &stats, weak_parts.len());

    debug!(
        overall = overall_score,
        components,
        weak = weak_parts.len(),
        "analysis finished"
    );

    let part_fields = wood
        .iter()
        .zip(fields)
        .map(|(view, field)| (view.part.id, field))
        .collect();

    StructuralReport {
        overall_score,
        grade,
        recommendation: recommendation.to_string(),
        part_scores,
        part_fields,
        weak_parts,
        stats,
    }
}

/// World axis of the part's largest extent.
fn span_axis(view: &WoodView<'_>) -> Axis {
    let size = view.bounds.size();
    let mut axis = Axis::X;
    let mut largest = size.x;
    if size.y > largest {
        axis = Axis::Y;
        largest = size.y;
    }
    if size.z > largest {
        axis = Axis::Z;
    }
    axis
}

/// Spread-of-support sub-score: average distance from a center-weighted
/// sample grid over the footprint to the nearest support point, normalized by
/// the footprint diagonal. Grounded parts are fully supported by definition.
fn pattern_score(view: &WoodView<'_>, field: &PartField, config: &ScoringConfig) -> f64 {
    if field.grounded {
        return 1.0;
    }
    if field.support_points.is_empty() {
        return 0.0;
    }
    let size = view.bounds.size();
    let diagonal = (size.x * size.x + size.z * size.z).sqrt();
    if diagonal < 1e-9 {
        return 0.0;
    }

    let grid = config.pattern_grid.max(1);
    let mut weighted_distance = 0.0;
    let mut total_weight = 0.0;
    for i in 0..grid {
        for j in 0..grid {
            let fx = (i as f64 + 0.5) / grid as f64;
            let fz = (j as f64 + 0.5) / grid as f64;
            let px = view.bounds.min.x + fx * size.x;
            let pz = view.bounds.min.z + fz * size.z;

            let center_offset = ((fx - 0.5).powi(2) + (fz - 0.5).powi(2)).sqrt();
            let weight = config.pattern_center_weight - center_offset;

            let nearest = field
                .support_points
                .iter()
                .map(|p| ((px - p[0]).powi(2) + (pz - p[1]).powi(2)).sqrt())
                .fold(f64::INFINITY, f64::min);

            weighted_distance += weight * nearest;
            total_weight += weight;
        }
    }
    let average = weighted_distance / total_weight;
    (1.0 - average / diagonal).clamp(0.0, 1.0)
}

/// Combines a part's field into its stability score; returns the score and
/// the support ratio (reused by the assembly aggregate).
fn score_part(
    view: &WoodView<'_>,
    field: &PartField,
    assembly_top: f64,
    config: &ScoringConfig,
) -> (f64, f64) {
    let weights = &config.weights;
    let footprint = view.footprint_area.max(1e-9);

    let mut supported_area = field.support_area;
    if field.grounded {
        supported_area += footprint;
    }
    let support_ratio = (supported_area / footprint).min(1.0);
    let contact_term = (field.contact_area / footprint).min(1.0);
    let axis_bonus = match field.contact_axes.len() {
        0 => 0.0,
        1 => weights.axis_bonus[0],
        2 => weights.axis_bonus[1],
        _ => weights.axis_bonus[2],
    };
    let fastener_bonus = (field.fastener_links * weights.fastener_link).min(weights.fastener_link_cap);
    let grounded_bonus = if field.grounded { weights.grounded_bonus } else { 0.0 };

    let size = view.part.size;
    let longest = size.x.max(size.y).max(size.z);
    let shortest = size.x.min(size.y).min(size.z).max(1e-9);
    let aspect = longest / shortest;
    let slenderness = ((aspect - config.slenderness_onset) / config.slenderness_range)
        .clamp(0.0, 1.0)
        * weights.slenderness_cap;

    let cantilever = if !field.grounded && support_ratio < weights.cantilever_support_threshold {
        let relative_height = (view.bounds.center().y / assembly_top).clamp(0.0, 1.0);
        weights.cantilever * relative_height
    } else {
        0.0
    };

    let excess = (field.load_demand - view.volume).max(0.0) / view.volume.max(1e-9);
    let pressure =
        (excess * weights.pressure_rate).min(weights.pressure_cap) * (1.0 - 0.7 * support_ratio);

    let score = (weights.support * support_ratio
        + weights.pattern * field.pattern_score
        + weights.contact * contact_term
        + axis_bonus
        + fastener_bonus
        + grounded_bonus
        - slenderness
        - cantilever
        - pressure)
        .clamp(0.0, 1.0);
    (score, support_ratio)
}

fn assembly_stats(
    wood: &[WoodView<'_>],
    bounds: &Aabb,
    components: usize,
    contact_count: usize,
    bridging_scan: &bridging::BridgingScan,
    config: &ScoringConfig,
) -> AssemblyStats {
    let total_volume: f64 = wood.iter().map(|view| view.volume).sum();
    let size = bounds.size();
    let center = bounds.center();

    let center_of_mass_height = if total_volume > 1e-9 {
        wood.iter()
            .map(|view| view.volume * view.bounds.center().y)
            .sum::<f64>()
            / total_volume
    } else {
        0.0
    };

    // Mass balance across each horizontal axis: 1.0 when the volume-weighted
    // centers line up with the assembly center, falling toward 0 as the mass
    // shifts to one side.
    let symmetry = [Axis::X, Axis::Z].map(|axis| {
        if total_volume <= 1e-9 {
            return 1.0;
        }
        let offset = wood
            .iter()
            .map(|view| view.volume * (view.bounds.center()[axis.index()] - center[axis.index()]))
            .sum::<f64>()
            / total_volume;
        let half_span = (size[axis.index()] / 2.0).max(1e-9);
        (1.0 - (offset.abs() / half_span).min(1.0)).clamp(0.0, 1.0)
    });

    AssemblyStats {
        total_volume,
        estimated_weight: total_volume * config.density,
        footprint_area: size.x * size.z,
        height: size.y,
        center_of_mass_height,
        span: [size.x, size.z],
        symmetry,
        connected_components: components,
        contact_count,
        fastener_count: bridging_scan.fastener_count,
        bridging_fastener_count: bridging_scan.bridging_count,
    }
}

#[allow(clippy::too_many_arguments)]
fn assembly_score(
    wood: &[WoodView<'_>],
    scores: &[f64],
    support_ratios: &[f64],
    connections: &[usize],
    stats: &AssemblyStats,
    weak_count: usize,
    config: &ScoringConfig,
) -> f64 {
    let aw = &config.assembly;
    let count = wood.len() as f64;

    // √volume weighting keeps a few large parts from dominating the average.
    let weight_total: f64 = wood.iter().map(|view| view.volume.sqrt()).sum();
    let weighted_average = if weight_total > 1e-9 {
        wood.iter()
            .zip(scores)
            .map(|(view, score)| view.volume.sqrt() * score)
            .sum::<f64>()
            / weight_total
    } else {
        scores.iter().sum::<f64>() / count
    };

    let average_support = support_ratios.iter().sum::<f64>() / count;
    let average_connections = connections.iter().sum::<usize>() as f64 / count;
    let connectivity_term = (average_connections / 2.0).min(1.0);
    let average_symmetry = (stats.symmetry[0] + stats.symmetry[1]) / 2.0;
    let grounded_ratio = wood
        .iter()
        .filter(|view| view.bounds.min.y.abs() <= config.ground_tolerance)
        .count() as f64
        / count;
    let bridging_ratio = if stats.fastener_count > 0 {
        stats.bridging_fastener_count as f64 / stats.fastener_count as f64
    } else {
        0.0
    };

    let raw = aw.part_average * weighted_average
        + aw.support_coverage * average_support
        + aw.connectivity * connectivity_term
        + aw.symmetry * average_symmetry
        + aw.grounded * grounded_ratio
        + aw.bridging * bridging_ratio;

    let mut penalty = aw.extra_component_penalty * (stats.connected_components - 1) as f64;
    let weak_ratio = weak_count as f64 / count;
    if weak_ratio >= 0.5 {
        penalty += aw.weak_major_penalty;
    } else if weak_ratio >= 0.25 {
        penalty += aw.weak_minor_penalty;
    }
    if stats.height > 1e-9 {
        let com_ratio = stats.center_of_mass_height / stats.height;
        if com_ratio > 0.6 {
            penalty += ((com_ratio - 0.6) / 0.4).clamp(0.0, 1.0) * aw.top_heavy_cap;
        }
    }

    // Rescale into [score_floor, 1]: a non-empty assembly never scores zero.
    config.score_floor + (raw - penalty).clamp(0.0, 1.0) * (1.0 - config.score_floor)
}

/// Picks the recommendation by fixed priority: disconnection first, then
/// missing fasteners, then weak parts, then the overall grade.
fn recommendation(overall_score: f64, stats: &AssemblyStats, weak_count: usize) -> &'static str {
    if stats.connected_components > 1 {
        RECOMMEND_DISCONNECTED
    } else if stats.contact_count > 0
        && (stats.fastener_count == 0
            || stats.bridging_fastener_count * 2 < stats.fastener_count)
    {
        RECOMMEND_UNFASTENED
    } else if weak_count >= 3 {
        RECOMMEND_SEVERAL_WEAK
    } else if weak_count >= 1 {
        RECOMMEND_SOME_WEAK
    } else if overall_score >= 0.85 {
        RECOMMEND_SOLID
    } else {
        RECOMMEND_MODERATE
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::footprint::Footprint;
    use crate::core::models::ids::PartId;
    use crate::core::models::part::{HardwareKind, PartCategory};

    fn slab(id: u64) -> Part {
        Part::new(PartId(id), "slab", PartCategory::Lumber)
            .with_size(10.0, 1.0, 10.0)
            .with_position(0.0, 0.5, 0.0)
    }

    fn block(id: u64, x: f64) -> Part {
        Part::new(PartId(id), "block", PartCategory::Lumber)
            .with_size(2.0, 4.0, 2.0)
            .with_position(x, 2.0, 0.0)
    }

    fn plank(id: u64) -> Part {
        Part::new(PartId(id), "plank", PartCategory::Lumber)
            .with_size(20.0, 1.0, 4.0)
            .with_position(0.0, 4.5, 0.0)
    }

    #[test]
    fn empty_input_yields_the_defined_empty_report() {
        let report = run(&[], &ScoringConfig::default());
        assert_eq!(report.overall_score, 0.0);
        assert_eq!(report.grade, Grade::NotApplicable);
        assert!(report.part_scores.is_empty());
    }

    #[test]
    fn hardware_only_input_yields_the_empty_report() {
        let screw = Part::new(PartId(1), "screw", PartCategory::Hardware)
            .with_hardware(HardwareKind::Fastener);
        let report = run(&[screw], &ScoringConfig::default());
        assert_eq!(report.grade, Grade::NotApplicable);
        assert_eq!(report.overall_score, 0.0);
    }

    #[test]
    fn repeated_analysis_is_deterministic() {
        let parts = vec![slab(1), block(2, -4.0), plank(3)];
        let config = ScoringConfig::default();
        let first = run(&parts, &config);
        let second = run(&parts, &config);
        assert_eq!(first, second);
    }

    #[test]
    fn input_order_does_not_change_the_report() {
        let parts = vec![block(1, -8.0), block(2, 8.0), plank(3), slab(4)];
        let mut reversed = parts.clone();
        reversed.reverse();
        let config = ScoringConfig::default();
        let a = run(&parts, &config);
        let b = run(&reversed, &config);
        assert_eq!(a.overall_score, b.overall_score);
        assert_eq!(a.part_scores, b.part_scores);
        assert_eq!(a.weak_parts, b.weak_parts);
        assert_eq!(a.stats, b.stats);
    }

    #[test]
    fn floating_isolated_part_scores_deep_in_the_weak_band() {
        let floating = Part::new(PartId(1), "floating", PartCategory::Lumber)
            .with_size(4.0, 1.0, 4.0)
            .with_position(0.0, 20.0, 0.0);
        let report = run(&[floating], &ScoringConfig::default());
        let score = report.part_scores[&PartId(1)];
        assert!(score <= 0.3, "floating part scored {score}");
        assert_eq!(report.weak_parts, vec![PartId(1)]);
    }

    #[test]
    fn grounded_part_outscores_a_floating_one() {
        let config = ScoringConfig::default();
        let grounded = run(&[slab(1)], &config);
        let floating = run(
            &[slab(1).with_position(0.0, 20.5, 0.0)],
            &config,
        );
        assert!(grounded.part_scores[&PartId(1)] > floating.part_scores[&PartId(1)]);
        assert!(grounded.overall_score > floating.overall_score);
    }

    #[test]
    fn adding_a_second_support_never_hurts_the_supported_part() {
        let config = ScoringConfig::default();
        let single = vec![block(1, -8.0), plank(3)];
        let double = vec![block(1, -8.0), block(2, 8.0), plank(3)];
        let single_score = run(&single, &config).part_scores[&PartId(3)];
        let double_score = run(&double, &config).part_scores[&PartId(3)];
        assert!(
            double_score >= single_score,
            "support regressed: {single_score} -> {double_score}"
        );
    }

    #[test]
    fn support_points_accrue_to_the_supported_part() {
        let parts = vec![block(1, -8.0), block(2, 8.0), plank(3)];
        let report = run(&parts, &ScoringConfig::default());
        let plank_field = &report.part_fields[&PartId(3)];
        assert_eq!(plank_field.support_points.len(), 2);
        assert!(plank_field.support_area > 0.0);
        let block_field = &report.part_fields[&PartId(1)];
        assert_eq!(block_field.load_points.len(), 1);
        assert!(block_field.grounded);
    }

    #[test]
    fn disconnected_clusters_drive_the_recommendation() {
        let far_slab = slab(2).with_position(100.0, 0.5, 0.0);
        let report = run(&[slab(1), far_slab], &ScoringConfig::default());
        assert_eq!(report.stats.connected_components, 2);
        assert_eq!(report.recommendation, RECOMMEND_DISCONNECTED);
    }

    #[test]
    fn unfastened_contacts_drive_the_recommendation_when_connected() {
        let lower = slab(1);
        let upper = slab(2).with_position(0.0, 1.5, 0.0);
        let report = run(&[lower, upper], &ScoringConfig::default());
        assert_eq!(report.stats.connected_components, 1);
        assert_eq!(report.recommendation, RECOMMEND_UNFASTENED);
    }

    #[test]
    fn bridging_fastener_raises_the_fastened_parts_score() {
        let lower = slab(1);
        let upper = slab(2).with_position(0.0, 1.5, 0.0);
        let config = ScoringConfig::default();
        let without = run(&[lower.clone(), upper.clone()], &config);

        let screw = Part::new(PartId(3), "#8 x 2\" wood screw", PartCategory::Hardware)
            .with_hardware(HardwareKind::Fastener)
            .with_size(0.164, 2.0, 0.164)
            .with_position(0.0, 1.0, 0.0);
        let with = run(&[lower, upper, screw], &config);

        assert!(with.part_scores[&PartId(1)] > without.part_scores[&PartId(1)]);
        assert_eq!(with.stats.fastener_count, 1);
        assert_eq!(with.stats.bridging_fastener_count, 1);
        assert!(with.overall_score > without.overall_score);
    }

    #[test]
    fn stats_report_volume_weight_and_extent() {
        let report = run(&[slab(1)], &ScoringConfig::default());
        let stats = &report.stats;
        assert!((stats.total_volume - 100.0).abs() < 1e-9);
        assert!((stats.estimated_weight - 1.6).abs() < 1e-9);
        assert!((stats.height - 1.0).abs() < 1e-9);
        assert!((stats.footprint_area - 100.0).abs() < 1e-9);
        assert!((stats.center_of_mass_height - 0.5).abs() < 1e-9);
        assert_eq!(stats.symmetry, [1.0, 1.0]);
        assert_eq!(stats.connected_components, 1);
    }

    #[test]
    fn notched_footprint_reduces_volume_statistics() {
        let solid = run(&[slab(1)], &ScoringConfig::default());
        let notched_slab = slab(1).with_footprint(Footprint::CornerNotch {
            notch_width: 5.0,
            notch_depth: 5.0,
        });
        let notched = run(&[notched_slab], &ScoringConfig::default());
        assert!(notched.stats.total_volume < solid.stats.total_volume);
    }

    #[test]
    fn overall_score_never_reaches_zero_for_a_real_assembly() {
        let floating = Part::new(PartId(1), "floating", PartCategory::Lumber)
            .with_size(4.0, 1.0, 4.0)
            .with_position(0.0, 20.0, 0.0);
        let report = run(&[floating], &ScoringConfig::default());
        assert!(report.overall_score >= ScoringConfig::default().score_floor);
        assert_eq!(report.grade, Grade::F);
    }
}
