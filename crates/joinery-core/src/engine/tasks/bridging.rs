use super::WoodView;
use crate::core::geometry::frame::OrientedFrame;
use crate::core::models::part::Part;
use crate::engine::config::ScoringConfig;

/// Result of the fastener bridging scan.
pub(crate) struct BridgingScan {
    /// Link credit per wood part, indexed like the view slice: 1.0 for each
    /// bridging fastener touching the part, partial credit for fasteners
    /// engaged with that part alone.
    pub links: Vec<f64>,
    /// Total fastener parts in the snapshot.
    pub fastener_count: usize,
    /// Fasteners touching two or more distinct wood parts.
    pub bridging_count: usize,
}

/// Credit a fastener engaged with only one part receives, relative to a
/// bridging fastener's full credit.
const PARTIAL_LINK_CREDIT: f64 = 0.4;

/// Tests every fastener's bounds against every wood part. A fastener touching
/// two or more distinct wood parts bridges them and credits a full link to
/// each; touching exactly one yields partial credit.
pub(crate) fn run(
    views: &[WoodView<'_>],
    hardware: &[&Part],
    config: &ScoringConfig,
) -> BridgingScan {
    let mut links = vec![0.0; views.len()];
    let mut fastener_count = 0;
    let mut bridging_count = 0;

    for part in hardware {
        if !part.is_fastener() {
            continue;
        }
        fastener_count += 1;
        let bounds = OrientedFrame::from_part(part).world_bounds();

        let touched: Vec<usize> = views
            .iter()
            .enumerate()
            .filter(|(_, view)| bounds.intersects(&view.bounds, config.contact_tolerance))
            .map(|(idx, _)| idx)
            .collect();

        match touched.len() {
            0 => {}
            1 => links[touched[0]] += PARTIAL_LINK_CREDIT,
            _ => {
                bridging_count += 1;
                for idx in touched {
                    links[idx] += 1.0;
                }
            }
        }
    }

    BridgingScan {
        links,
        fastener_count,
        bridging_count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::ids::PartId;
    use crate::core::models::part::{HardwareKind, PartCategory};

    fn board(id: u64, z: f64) -> Part {
        Part::new(PartId(id), "board", PartCategory::Lumber)
            .with_size(4.0, 4.0, 8.0)
            .with_position(0.0, 2.0, z)
    }

    fn screw_at(id: u64, z: f64) -> Part {
        Part::new(PartId(id), "#8 x 2\" wood screw", PartCategory::Hardware)
            .with_hardware(HardwareKind::Fastener)
            .with_size(0.164, 2.0, 0.164)
            .with_orientation(std::f64::consts::FRAC_PI_2, 0.0, 0.0)
            .with_position(0.0, 2.0, z)
    }

    #[test]
    fn fastener_spanning_the_seam_bridges_both_parts() {
        let wood = [board(1, 0.0), board(2, 8.0)];
        let views: Vec<WoodView<'_>> = wood.iter().map(WoodView::new).collect();
        let screw = screw_at(3, 4.0);
        let scan = run(&views, &[&screw], &ScoringConfig::default());
        assert_eq!(scan.fastener_count, 1);
        assert_eq!(scan.bridging_count, 1);
        assert_eq!(scan.links, vec![1.0, 1.0]);
    }

    #[test]
    fn fastener_inside_one_part_gets_partial_credit() {
        let wood = [board(1, 0.0), board(2, 8.0)];
        let views: Vec<WoodView<'_>> = wood.iter().map(WoodView::new).collect();
        let screw = screw_at(3, 0.0);
        let scan = run(&views, &[&screw], &ScoringConfig::default());
        assert_eq!(scan.bridging_count, 0);
        assert_eq!(scan.links, vec![PARTIAL_LINK_CREDIT, 0.0]);
    }

    #[test]
    fn non_fastener_hardware_is_ignored() {
        let wood = [board(1, 0.0)];
        let views: Vec<WoodView<'_>> = wood.iter().map(WoodView::new).collect();
        let hinge = Part::new(PartId(9), "hinge", PartCategory::Hardware)
            .with_hardware(HardwareKind::Hinge)
            .with_position(0.0, 2.0, 0.0);
        let scan = run(&views, &[&hinge], &ScoringConfig::default());
        assert_eq!(scan.fastener_count, 0);
        assert_eq!(scan.links, vec![0.0]);
    }

    #[test]
    fn floating_fastener_touches_nothing() {
        let wood = [board(1, 0.0)];
        let views: Vec<WoodView<'_>> = wood.iter().map(WoodView::new).collect();
        let screw = screw_at(3, 50.0);
        let scan = run(&views, &[&screw], &ScoringConfig::default());
        assert_eq!(scan.fastener_count, 1);
        assert_eq!(scan.bridging_count, 0);
        assert_eq!(scan.links, vec![0.0]);
    }
}
