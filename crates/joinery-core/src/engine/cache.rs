use crate::core::models::part::Part;
use crate::engine::config::ScoringConfig;
use crate::engine::report::StructuralReport;
use crate::workflows::analyze;

/// Revision-keyed memoization of the structural report.
///
/// Analysis is a pure function of the part snapshot, so the host only needs
/// to recompute it when the collection actually changes — not on every frame.
/// The host bumps a revision counter (or content hash) on each edit and asks
/// the cache for the report under that revision.
#[derive(Debug, Default, Clone)]
pub struct ReportCache {
    revision: Option<u64>,
    report: Option<StructuralReport>,
}

impl ReportCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached report for `revision`, recomputing it only when the
    /// revision differs from the cached one.
    pub fn get_or_compute(
        &mut self,
        revision: u64,
        parts: &[Part],
        config: &ScoringConfig,
    ) -> &StructuralReport {
        if self.revision != Some(revision) || self.report.is_none() {
            self.report = Some(analyze::run(parts, config));
            self.revision = Some(revision);
        }
        self.report.as_ref().unwrap()
    }

    /// Drops any cached report; the next call recomputes.
    pub fn invalidate(&mut self) {
        self.revision = None;
        self.report = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::ids::PartId;
    use crate::core::models::part::{Part, PartCategory};

    fn slab(id: u64, y: f64) -> Part {
        Part::new(PartId(id), "slab", PartCategory::Lumber)
            .with_size(10.0, 1.0, 10.0)
            .with_position(0.0, y, 0.0)
    }

    #[test]
    fn same_revision_reuses_the_cached_report() {
        let parts = vec![slab(1, 0.5)];
        let config = ScoringConfig::default();
        let mut cache = ReportCache::new();
        let first = cache.get_or_compute(7, &parts, &config).clone();
        // Different snapshot, same revision: the stale report is returned by
        // contract, because the host promised nothing changed.
        let second = cache.get_or_compute(7, &[], &config).clone();
        assert_eq!(first, second);
    }

    #[test]
    fn new_revision_recomputes() {
        let parts = vec![slab(1, 0.5)];
        let config = ScoringConfig::default();
        let mut cache = ReportCache::new();
        let one_part = cache.get_or_compute(1, &parts, &config).clone();
        let empty = cache.get_or_compute(2, &[], &config).clone();
        assert_ne!(one_part.part_scores.len(), empty.part_scores.len());
    }

    #[test]
    fn invalidate_forces_a_recompute() {
        let parts = vec![slab(1, 0.5)];
        let config = ScoringConfig::default();
        let mut cache = ReportCache::new();
        cache.get_or_compute(1, &parts, &config);
        cache.invalidate();
        let report = cache.get_or_compute(1, &[], &config).clone();
        assert!(report.part_scores.is_empty());
    }
}
