use crate::core::geometry::frame::OrientedFrame;
use crate::core::geometry::interval::Interval;
use crate::core::models::part::Part;
use crate::engine::config::{PlacementConfig, SCREW_PRESETS, ScrewPreset};
use nalgebra::{Point3, Vector3};
use tracing::debug;

/// A part together with its oriented frame, built once per search.
pub(crate) struct PartGeom<'a> {
    pub part: &'a Part,
    pub frame: OrientedFrame,
}

impl<'a> PartGeom<'a> {
    pub fn new(part: &'a Part) -> Self {
        Self {
            part,
            frame: OrientedFrame::from_part(part),
        }
    }
}

/// One fully validated screw position.
#[derive(Debug, Clone)]
pub(crate) struct PlannedScrew {
    pub preset: ScrewPreset,
    /// A point on the insertion line (the line runs through it along
    /// `direction`).
    pub origin: Point3<f64>,
    /// Unit insertion direction, pointing from the first part toward the
    /// second.
    pub direction: Vector3<f64>,
    /// Parametric position of the screw head along the line.
    pub t_start: f64,
    /// Position in the shared-plane basis, used for pair spacing.
    pub plane: [f64; 2],
    pub score: f64,
}

impl PlannedScrew {
    /// World position of the screw head.
    pub fn head(&self) -> Point3<f64> {
        self.origin + self.direction * self.t_start
    }

    /// World position of the screw's midpoint.
    pub fn midpoint(&self) -> Point3<f64> {
        self.origin + self.direction * (self.t_start + self.preset.length / 2.0)
    }
}

/// The best screw pair found across all direction/basis combinations.
#[derive(Debug, Clone)]
pub(crate) struct ScrewPair {
    pub first: PlannedScrew,
    pub second: PlannedScrew,
    pub score: f64,
}

/// What the search established, for the failure taxonomy: whether any
/// direction made the parts touch, whether any basis had a usable shared
/// region, and the best pair if one exists.
pub(crate) struct SearchOutcome {
    pub best: Option<ScrewPair>,
    pub touching: bool,
    pub shared_region: bool,
}

/// Searches directions, perpendicular-plane bases, and sample grids for the
/// best-scoring pair of screws bridging the two parts.
pub(crate) fn search(
    first: &PartGeom<'_>,
    second: &PartGeom<'_>,
    config: &PlacementConfig,
) -> SearchOutcome {
    let mut outcome = SearchOutcome {
        best: None,
        touching: false,
        shared_region: false,
    };

    let delta = second.frame.center - first.frame.center;
    let distance = delta.norm();
    if distance < 1e-9 {
        return outcome;
    }
    let toward = delta / distance;

    // Candidate insertion directions: both parts' local axes, oriented from
    // the first part toward the second, deduplicated by parallelism.
    let mut directions: Vec<Vector3<f64>> = Vec::new();
    for axis in first.frame.axes.iter().chain(second.frame.axes.iter()) {
        let dir = if axis.dot(&toward) < 0.0 { -*axis } else { *axis };
        if directions
            .iter()
            .any(|existing| existing.dot(&dir).abs() > config.parallel_cosine)
        {
            continue;
        }
        directions.push(dir);
    }

    for direction in &directions {
        if direction.dot(&toward) < config.min_direction_alignment {
            continue;
        }
        let range_first = first.frame.projected_range(direction);
        let range_second = second.frame.projected_range(direction);
        if range_first.gap(&range_second) > config.contact_gap_tolerance {
            continue;
        }
        if range_first.overlap(&range_second) > config.max_direction_overlap {
            // Deep interpenetration along this axis: the parts do not meet at
            // a seam here.
            continue;
        }
        outcome.touching = true;

        for (u, v) in plane_bases(direction, config) {
            let Some(region_u) = first
                .frame
                .projected_range(&u)
                .intersection(&second.frame.projected_range(&u))
            else {
                continue;
            };
            let Some(region_v) = first
                .frame
                .projected_range(&v)
                .intersection(&second.frame.projected_range(&v))
            else {
                continue;
            };
            if region_u.length() < config.min_plane_overlap
                || region_v.length() < config.min_plane_overlap
            {
                continue;
            }
            outcome.shared_region = true;

            let candidates =
                collect_candidates(first, second, direction, &u, &v, &region_u, &region_v, config);
            if let Some(pair) = select_pair(candidates, &region_u, &region_v, config) {
                if outcome
                    .best
                    .as_ref()
                    .is_none_or(|current| pair.score > current.score)
                {
                    outcome.best = Some(pair);
                }
            }
        }
    }

    debug!(
        touching = outcome.touching,
        shared_region = outcome.shared_region,
        found = outcome.best.is_some(),
        "screw search finished"
    );
    outcome
}

/// Perpendicular-plane bases for a direction: cross products of the canonical
/// helper vectors with it, deduplicated by parallelism.
fn plane_bases(
    direction: &Vector3<f64>,
    config: &PlacementConfig,
) -> Vec<(Vector3<f64>, Vector3<f64>)> {
    let mut bases = Vec::new();
    let mut seen: Vec<Vector3<f64>> = Vec::new();
    for helper in [Vector3::x(), Vector3::y(), Vector3::z()] {
        let cross = helper.cross(direction);
        if cross.norm() < 1e-6 {
            continue;
        }
        let u = cross.normalize();
        if seen
            .iter()
            .any(|existing| existing.dot(&u).abs() > config.parallel_cosine)
        {
            continue;
        }
        seen.push(u);
        bases.push((u, direction.cross(&u)));
    }
    bases
}

/// Deterministic sample offsets around a region's center: always the center,
/// with symmetric additions as the region grows.
fn grid_offsets(length: f64) -> Vec<f64> {
    let mut offsets = vec![0.0];
    if length > 1.5 {
        offsets.push(-0.22 * length);
        offsets.push(0.22 * length);
    }
    if length > 6.0 {
        offsets.push(-0.40 * length);
        offsets.push(0.40 * length);
    }
    offsets
}

#[allow(clippy::too_many_arguments)]
fn collect_candidates(
    first: &PartGeom<'_>,
    second: &PartGeom<'_>,
    direction: &Vector3<f64>,
    u: &Vector3<f64>,
    v: &Vector3<f64>,
    region_u: &Interval,
    region_v: &Interval,
    config: &PlacementConfig,
) -> Vec<PlannedScrew> {
    let mut candidates = Vec::new();
    for offset_u in grid_offsets(region_u.length()) {
        for offset_v in grid_offsets(region_v.length()) {
            let su = region_u.center() + offset_u;
            let sv = region_v.center() + offset_v;

            let edge_distance = (su - region_u.min)
                .min(region_u.max - su)
                .min(sv - region_v.min)
                .min(region_v.max - sv);
            if edge_distance < config.edge_clearance {
                continue;
            }

            let origin = Point3::from(u * su + v * sv);
            let Some(span_first) = first
                .frame
                .intersect_line(&origin, direction, config.line_tolerance)
            else {
                continue;
            };
            let Some(span_second) = second
                .frame
                .intersect_line(&origin, direction, config.line_tolerance)
            else {
                continue;
            };
            if span_first.min > span_second.min + 1e-9 {
                // The line must pass through the first part before the second.
                continue;
            }
            if span_first.length() < config.min_span_length
                || span_second.length() < config.min_span_length
            {
                continue;
            }
            let seam_gap = span_first.gap(&span_second);
            if seam_gap > config.max_seam_gap {
                continue;
            }

            for preset in SCREW_PRESETS {
                let Some((t_start, pen_first, pen_second)) = fit_preset(
                    first,
                    second,
                    &origin,
                    direction,
                    &span_first,
                    &span_second,
                    &preset,
                    config,
                ) else {
                    continue;
                };
                let score = pen_first + pen_second + config.edge_score_weight * edge_distance
                    - config.seam_gap_penalty * seam_gap;
                candidates.push(PlannedScrew {
                    preset,
                    origin,
                    direction: *direction,
                    t_start,
                    plane: [su, sv],
                    score,
                });
                // Longest preset that fits wins for this sample.
                break;
            }
        }
    }
    candidates
}

/// Positions one preset along the line: aim the preferred bite into the
/// second part, clamp so the head sits no further out than the allowed
/// protrusion, then verify the tip margin and per-part embedment against both
/// the bounding intervals and the true cross-sections.
#[allow(clippy::too_many_arguments)]
fn fit_preset(
    first: &PartGeom<'_>,
    second: &PartGeom<'_>,
    origin: &Point3<f64>,
    direction: &Vector3<f64>,
    span_first: &Interval,
    span_second: &Interval,
    preset: &ScrewPreset,
    config: &PlacementConfig,
) -> Option<(f64, f64, f64)> {
    let bite = (preset.length * config.preferred_bite_fraction)
        .min(span_second.length() - config.exit_margin);
    if bite <= 0.0 {
        return None;
    }
    let head_limit = span_first.min - config.head_protrusion;
    let t_start = (span_second.min + bite - preset.length).max(head_limit);
    let t_end = t_start + preset.length;
    if t_end > span_second.max - config.exit_margin + 1e-9 {
        return None;
    }

    let min_embed = (preset.length * config.min_embed_fraction).max(config.min_embed_floor);
    let bound_first = (t_end.min(span_first.max) - t_start.max(span_first.min)).max(0.0);
    let bound_second = (t_end.min(span_second.max) - t_start.max(span_second.min)).max(0.0);
    if bound_first < min_embed || bound_second < min_embed {
        return None;
    }

    let (true_first, true_second) =
        sampled_penetration(first, second, origin, direction, t_start, t_end, config);
    if true_first < min_embed || true_second < min_embed {
        return None;
    }
    Some((t_start, true_first, true_second))
}

/// Measures how much of the screw span lies inside each part's true
/// cross-section by sampling points along the line and testing them against
/// the actual footprint profiles. This is what rejects placements through
/// notches and cutouts that bounding-box math alone would accept.
fn sampled_penetration(
    first: &PartGeom<'_>,
    second: &PartGeom<'_>,
    origin: &Point3<f64>,
    direction: &Vector3<f64>,
    t_start: f64,
    t_end: f64,
    config: &PlacementConfig,
) -> (f64, f64) {
    let samples = config.span_samples.max(2);
    let step = (t_end - t_start) / (samples - 1) as f64;
    let mut inside_first = 0usize;
    let mut inside_second = 0usize;
    for i in 0..samples {
        let point = origin + direction * (t_start + step * i as f64);
        if in_cross_section(first, &point, config.line_tolerance) {
            inside_first += 1;
        }
        if in_cross_section(second, &point, config.line_tolerance) {
            inside_second += 1;
        }
    }
    (
        inside_first as f64 * step,
        inside_second as f64 * step,
    )
}

fn in_cross_section(geom: &PartGeom<'_>, point: &Point3<f64>, tolerance: f64) -> bool {
    let local = geom.frame.to_local(point);
    local.y.abs() <= geom.frame.half.y + tolerance
        && geom
            .part
            .footprint
            .contains(&geom.part.size, local.x, local.z, tolerance)
}

/// Picks the best-scoring pair whose plane positions are separated by at
/// least the spacing threshold, spreading the two screws apart instead of
/// clustering them.
fn select_pair(
    candidates: Vec<PlannedScrew>,
    region_u: &Interval,
    region_v: &Interval,
    config: &PlacementConfig,
) -> Option<ScrewPair> {
    let min_spacing = (config.spacing_fraction * region_u.length().max(region_v.length()))
        .max(config.min_spacing);
    let mut best: Option<(usize, usize, f64)> = None;
    for i in 0..candidates.len() {
        for j in (i + 1)..candidates.len() {
            let du = candidates[i].plane[0] - candidates[j].plane[0];
            let dv = candidates[i].plane[1] - candidates[j].plane[1];
            if (du * du + dv * dv).sqrt() < min_spacing {
                continue;
            }
            let total = candidates[i].score + candidates[j].score;
            if best.is_none_or(|(_, _, score)| total > score) {
                best = Some((i, j, total));
            }
        }
    }
    best.map(|(i, j, score)| ScrewPair {
        first: candidates[i].clone(),
        second: candidates[j].clone(),
        score,
    })
}

/// End-to-end re-check of one planned screw against the true cross-sections,
/// run again on the winning pair before any fasteners are committed.
pub(crate) fn validate(
    screw: &PlannedScrew,
    first: &PartGeom<'_>,
    second: &PartGeom<'_>,
    config: &PlacementConfig,
) -> bool {
    let Some(span_first) =
        first
            .frame
            .intersect_line(&screw.origin, &screw.direction, config.line_tolerance)
    else {
        return false;
    };
    let Some(span_second) =
        second
            .frame
            .intersect_line(&screw.origin, &screw.direction, config.line_tolerance)
    else {
        return false;
    };
    let t_end = screw.t_start + screw.preset.length;
    if t_end > span_second.max - config.exit_margin + 1e-9 {
        return false;
    }
    if screw.t_start < span_first.min - config.head_protrusion - 1e-9 {
        return false;
    }
    let min_embed =
        (screw.preset.length * config.min_embed_fraction).max(config.min_embed_floor);
    let (true_first, true_second) = sampled_penetration(
        first,
        second,
        &screw.origin,
        &screw.direction,
        screw.t_start,
        t_end,
        config,
    );
    true_first >= min_embed && true_second >= min_embed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::footprint::Footprint;
    use crate::core::models::ids::PartId;
    use crate::core::models::part::{Part, PartCategory};

    fn stud_at(id: u64, z: f64) -> Part {
        Part::new(PartId(id), "2x4 stud", PartCategory::Lumber)
            .with_size(1.5, 3.5, 96.0)
            .with_position(0.0, 1.75, z)
    }

    #[test]
    fn butt_joint_yields_a_spaced_screw_pair() {
        let a = stud_at(1, 0.0);
        let b = stud_at(2, 96.0);
        let config = PlacementConfig::default();
        let outcome = search(&PartGeom::new(&a), &PartGeom::new(&b), &config);
        assert!(outcome.touching);
        assert!(outcome.shared_region);
        let pair = outcome.best.expect("expected a screw pair");

        // Insertion along the shared face normal.
        assert!((pair.first.direction - Vector3::z()).norm() < 1e-9);
        assert!((pair.second.direction - Vector3::z()).norm() < 1e-9);

        // Screws are spread apart, not clustered.
        let du = pair.first.plane[0] - pair.second.plane[0];
        let dv = pair.first.plane[1] - pair.second.plane[1];
        assert!((du * du + dv * dv).sqrt() >= config.min_spacing);

        // Both screws bridge the seam at z = 48.
        for screw in [&pair.first, &pair.second] {
            let head_z = screw.head().z;
            let tip_z = head_z + screw.preset.length;
            assert!(head_z < 48.0 && tip_z > 48.0);
        }
    }

    #[test]
    fn separated_parts_are_not_touching() {
        let a = stud_at(1, 0.0);
        let b = stud_at(2, 106.0);
        let outcome = search(
            &PartGeom::new(&a),
            &PartGeom::new(&b),
            &PlacementConfig::default(),
        );
        assert!(!outcome.touching);
        assert!(outcome.best.is_none());
    }

    #[test]
    fn notched_cross_section_rejects_every_sample() {
        // The second part's footprint is hollowed at exactly the quadrant the
        // first part touches: bounding boxes say yes, the true profile says no.
        let notched = Part::new(PartId(2), "notched block", PartCategory::Lumber)
            .with_size(4.0, 4.0, 4.0)
            .with_position(0.0, 2.0, 0.0)
            .with_footprint(Footprint::CornerNotch {
                notch_width: 2.0,
                notch_depth: 2.0,
            });
        let small = Part::new(PartId(1), "block", PartCategory::Lumber)
            .with_size(2.0, 4.0, 2.0)
            .with_position(1.0, 2.0, 3.0);
        let outcome = search(
            &PartGeom::new(&small),
            &PartGeom::new(&notched),
            &PlacementConfig::default(),
        );
        assert!(outcome.touching);
        assert!(outcome.shared_region);
        assert!(outcome.best.is_none());
    }

    #[test]
    fn solid_cross_section_accepts_the_same_joint() {
        // Identical geometry to the notch test, but with a solid profile.
        let solid = Part::new(PartId(2), "block", PartCategory::Lumber)
            .with_size(4.0, 4.0, 4.0)
            .with_position(0.0, 2.0, 0.0);
        let small = Part::new(PartId(1), "block", PartCategory::Lumber)
            .with_size(2.0, 4.0, 2.0)
            .with_position(1.0, 2.0, 3.0);
        let outcome = search(
            &PartGeom::new(&small),
            &PartGeom::new(&solid),
            &PlacementConfig::default(),
        );
        assert!(outcome.best.is_some());
    }

    #[test]
    fn thin_boards_get_the_short_preset() {
        let a = Part::new(PartId(1), "ply", PartCategory::Sheet)
            .with_size(12.0, 12.0, 0.75)
            .with_position(0.0, 6.0, 0.375);
        let b = Part::new(PartId(2), "ply", PartCategory::Sheet)
            .with_size(12.0, 12.0, 0.75)
            .with_position(0.0, 6.0, 1.125);
        let outcome = search(
            &PartGeom::new(&a),
            &PartGeom::new(&b),
            &PlacementConfig::default(),
        );
        let pair = outcome.best.expect("expected a screw pair");
        assert!((pair.first.preset.length - 1.25).abs() < 1e-9);
        assert!((pair.second.preset.length - 1.25).abs() < 1e-9);
    }

    #[test]
    fn winning_pair_survives_revalidation() {
        let a = stud_at(1, 0.0);
        let b = stud_at(2, 96.0);
        let config = PlacementConfig::default();
        let (ga, gb) = (PartGeom::new(&a), PartGeom::new(&b));
        let pair = search(&ga, &gb, &config).best.expect("expected a pair");
        assert!(validate(&pair.first, &ga, &gb, &config));
        assert!(validate(&pair.second, &ga, &gb, &config));
    }

    #[test]
    fn grid_offsets_scale_with_region_size() {
        assert_eq!(grid_offsets(1.0).len(), 1);
        assert_eq!(grid_offsets(3.0).len(), 3);
        assert_eq!(grid_offsets(10.0).len(), 5);
    }
}
