use crate::core::models::ids::PartId;
use crate::core::models::part::{HardwareKind, Part, PartCategory};
use crate::engine::config::PlacementConfig;
use crate::engine::error::PlacementError;
use crate::engine::placement::{self, PartGeom, PlannedScrew};
use nalgebra::{Rotation3, Vector3};
use tracing::{info, instrument};

/// Result of a successful placement: exactly two new fastener parts for the
/// caller to append to its collection.
#[derive(Debug, Clone)]
pub struct PlacementSuccess {
    /// The synthesized screws, with fresh ids above the snapshot's maximum.
    pub fasteners: Vec<Part>,
    /// Catalog name of the chosen screw preset.
    pub preset_name: String,
    /// Combined score of the winning pair, for diagnostics.
    pub score: f64,
}

impl PlacementSuccess {
    pub fn screw_count(&self) -> usize {
        self.fasteners.len()
    }
}

/// Searches for and validates an automatic two-screw placement bridging the
/// two identified parts.
///
/// The operation is atomic: on success exactly two fastener parts are
/// returned for the caller to commit; on failure the snapshot is untouched
/// and the error distinguishes input problems, non-touching parts, a missing
/// shared region, and search exhaustion.
#[instrument(skip(parts, config), fields(first = %first, second = %second))]
pub fn run(
    first: PartId,
    second: PartId,
    parts: &[Part],
    config: &PlacementConfig,
) -> Result<PlacementSuccess, PlacementError> {
    // === Phase 0: Input validation ===
    if first == second {
        return Err(PlacementError::SamePart);
    }
    let part_first = parts
        .iter()
        .find(|p| p.id == first)
        .ok_or(PlacementError::PartNotFound(first))?;
    let part_second = parts
        .iter()
        .find(|p| p.id == second)
        .ok_or(PlacementError::PartNotFound(second))?;
    if !part_first.is_wood() {
        return Err(PlacementError::NotWood(first));
    }
    if !part_second.is_wood() {
        return Err(PlacementError::NotWood(second));
    }

    // === Phase 1: Search directions, planes, and sample grids ===
    let geom_first = PartGeom::new(part_first);
    let geom_second = PartGeom::new(part_second);
    let outcome = placement::search(&geom_first, &geom_second, config);
    let pair = match outcome.best {
        Some(pair) => pair,
        None if !outcome.touching => return Err(PlacementError::NotTouching),
        None if !outcome.shared_region => return Err(PlacementError::NoSharedRegion),
        None => return Err(PlacementError::NoValidPlacement),
    };

    // === Phase 2: Re-validate the winning pair end-to-end ===
    // Guards against accumulated floating-point error between the search and
    // the committed placement; a failure here reports as search exhaustion
    // rather than committing a bad screw.
    if !placement::validate(&pair.first, &geom_first, &geom_second, config)
        || !placement::validate(&pair.second, &geom_first, &geom_second, config)
    {
        return Err(PlacementError::NoValidPlacement);
    }

    // === Phase 3: Synthesize the fastener parts ===
    let mut next_id = parts.iter().map(|p| p.id.0).max().unwrap_or(0);
    let fasteners: Vec<Part> = [&pair.first, &pair.second]
        .into_iter()
        .map(|screw| {
            next_id += 1;
            fastener_part(PartId(next_id), screw)
        })
        .collect();

    info!(
        preset = pair.first.preset.name,
        score = pair.score,
        "placed a screw pair"
    );
    Ok(PlacementSuccess {
        preset_name: pair.first.preset.name.to_string(),
        score: pair.score,
        fasteners,
    })
}

/// Builds the fastener part for one planned screw: hardware category,
/// fastener kind, catalog name, `[diameter, length, diameter]` dimensions,
/// centered on the screw's midpoint with local +Y aligned to the insertion
/// direction.
fn fastener_part(id: PartId, screw: &PlannedScrew) -> Part {
    let midpoint = screw.midpoint();
    let (rx, ry, rz) = orientation_toward(&screw.direction);
    Part::new(id, screw.preset.name, PartCategory::Hardware)
        .with_hardware(HardwareKind::Fastener)
        .with_size(screw.preset.diameter, screw.preset.length, screw.preset.diameter)
        .with_position(midpoint.x, midpoint.y, midpoint.z)
        .with_orientation(rx, ry, rz)
}

/// Euler angles (X-then-Y-then-Z order) rotating local +Y onto `direction`.
fn orientation_toward(direction: &Vector3<f64>) -> (f64, f64, f64) {
    match Rotation3::rotation_between(&Vector3::y(), direction) {
        Some(rotation) => rotation.euler_angles(),
        // Anti-parallel: flip about X.
        None => (std::f64::consts::PI, 0.0, 0.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geometry::frame::OrientedFrame;

    fn stud(id: u64) -> Part {
        Part::new(PartId(id), "2x4 stud", PartCategory::Lumber)
            .with_size(1.5, 3.5, 96.0)
            .with_position(0.0, 1.75, 0.0)
    }

    fn butt_joint() -> Vec<Part> {
        vec![stud(1), stud(2).with_position(0.0, 1.75, 96.0)]
    }

    #[test]
    fn touching_studs_get_exactly_two_screws() {
        let parts = butt_joint();
        let success = run(PartId(1), PartId(2), &parts, &PlacementConfig::default())
            .expect("placement should succeed");
        assert_eq!(success.screw_count(), 2);
        assert_eq!(success.fasteners.len(), 2);

        for fastener in &success.fasteners {
            assert!(fastener.is_fastener());
            assert_eq!(fastener.name, success.preset_name);
            // Insertion axis aligned with the shared face normal (world Z).
            let frame = OrientedFrame::from_part(fastener);
            assert!((frame.axes[1].dot(&Vector3::z()).abs() - 1.0).abs() < 1e-9);
            // Size is [diameter, length, diameter].
            assert!((fastener.size.x - fastener.size.z).abs() < 1e-12);
            assert!(fastener.size.y > fastener.size.x);
        }
    }

    #[test]
    fn synthesized_ids_extend_the_snapshot() {
        let parts = butt_joint();
        let success = run(PartId(1), PartId(2), &parts, &PlacementConfig::default()).unwrap();
        assert_eq!(success.fasteners[0].id, PartId(3));
        assert_eq!(success.fasteners[1].id, PartId(4));
    }

    #[test]
    fn parts_moved_apart_on_any_axis_are_not_touching() {
        let offsets = [
            Vector3::new(11.5, 0.0, 0.0), // 10" gap beyond the 1.5" widths
            Vector3::new(0.0, 13.5, 0.0), // 10" gap beyond the 3.5" heights
            Vector3::new(0.0, 0.0, 106.0), // 10" gap beyond the 96" depths
        ];
        for offset in offsets {
            let moved = stud(2).with_position(offset.x, 1.75 + offset.y, offset.z);
            let parts = vec![stud(1), moved];
            let result = run(PartId(1), PartId(2), &parts, &PlacementConfig::default());
            assert_eq!(result.unwrap_err(), PlacementError::NotTouching);
        }
    }

    #[test]
    fn same_id_twice_is_rejected_without_panicking() {
        let parts = butt_joint();
        let result = run(PartId(1), PartId(1), &parts, &PlacementConfig::default());
        assert_eq!(result.unwrap_err(), PlacementError::SamePart);
    }

    #[test]
    fn unknown_ids_are_rejected() {
        let parts = butt_joint();
        let result = run(PartId(1), PartId(99), &parts, &PlacementConfig::default());
        assert_eq!(result.unwrap_err(), PlacementError::PartNotFound(PartId(99)));
    }

    #[test]
    fn hardware_parts_cannot_be_screwed() {
        let mut parts = butt_joint();
        parts.push(
            Part::new(PartId(3), "hinge", PartCategory::Hardware)
                .with_hardware(HardwareKind::Hinge),
        );
        let result = run(PartId(1), PartId(3), &parts, &PlacementConfig::default());
        assert_eq!(result.unwrap_err(), PlacementError::NotWood(PartId(3)));
    }

    #[test]
    fn error_messages_match_the_diagnostic_contract() {
        let parts = vec![stud(1), stud(2).with_position(0.0, 1.75, 106.0)];
        let message = run(PartId(1), PartId(2), &parts, &PlacementConfig::default())
            .unwrap_err()
            .to_string();
        assert_eq!(message, "parts are not touching");
    }

    #[test]
    fn screws_straddle_the_seam() {
        let parts = butt_joint();
        let success = run(PartId(1), PartId(2), &parts, &PlacementConfig::default()).unwrap();
        for fastener in &success.fasteners {
            let half = fastener.size.y / 2.0;
            assert!(fastener.position.z - half < 48.0);
            assert!(fastener.position.z + half > 48.0);
        }
    }
}
