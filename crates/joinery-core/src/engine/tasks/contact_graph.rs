use super::WoodView;
use crate::core::geometry::Axis;
use crate::core::models::ids::PartId;
use crate::engine::config::ScoringConfig;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// A detected touching relationship between two parts along one dominant
/// world axis, with its contact area.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactEdge {
    pub first: PartId,
    pub second: PartId,
    /// The world axis perpendicular to the touching faces.
    pub axis: Axis,
    /// Overlap area of the touching faces, square inches.
    pub area: f64,
}

/// Scans every unordered pair of wood parts for face contact.
///
/// A pair touches along an axis when the gap on that axis is within tolerance
/// while the overlaps on the other two axes both clear the minimum; the axis
/// with the largest resulting contact area wins.
pub(crate) fn run(views: &[WoodView<'_>], config: &ScoringConfig) -> Vec<ContactEdge> {
    let mut edges = Vec::new();
    for i in 0..views.len() {
        for j in (i + 1)..views.len() {
            if let Some(edge) = contact_between(&views[i], &views[j], config) {
                edges.push(edge);
            }
        }
    }
    edges
}

fn contact_between(
    a: &WoodView<'_>,
    b: &WoodView<'_>,
    config: &ScoringConfig,
) -> Option<ContactEdge> {
    let mut best: Option<(Axis, f64)> = None;
    for axis in Axis::ALL {
        if a.bounds.gap_on(&b.bounds, axis) > config.contact_tolerance {
            continue;
        }
        let [u, v] = axis.others();
        let overlap_u = a.bounds.overlap_on(&b.bounds, u);
        let overlap_v = a.bounds.overlap_on(&b.bounds, v);
        if overlap_u < config.min_contact_overlap || overlap_v < config.min_contact_overlap {
            continue;
        }
        let area = overlap_u * overlap_v;
        if best.is_none_or(|(_, best_area)| area > best_area) {
            best = Some((axis, area));
        }
    }
    best.map(|(axis, area)| ContactEdge {
        first: a.part.id,
        second: b.part.id,
        axis,
        area,
    })
}

/// Counts connected components of the contact graph by breadth-first
/// traversal from each unvisited part. Returns the component count and each
/// part's connection count, indexed like `views`.
pub(crate) fn connectivity(
    views: &[WoodView<'_>],
    edges: &[ContactEdge],
) -> (usize, Vec<usize>) {
    let index_of = |id: PartId| views.iter().position(|v| v.part.id == id);
    let mut adjacency = vec![Vec::new(); views.len()];
    let mut connections = vec![0usize; views.len()];
    for edge in edges {
        let (Some(i), Some(j)) = (index_of(edge.first), index_of(edge.second)) else {
            continue;
        };
        adjacency[i].push(j);
        adjacency[j].push(i);
        connections[i] += 1;
        connections[j] += 1;
    }

    let mut visited = vec![false; views.len()];
    let mut components = 0;
    for start in 0..views.len() {
        if visited[start] {
            continue;
        }
        components += 1;
        let mut queue = VecDeque::from([start]);
        visited[start] = true;
        while let Some(node) = queue.pop_front() {
            for &next in &adjacency[node] {
                if !visited[next] {
                    visited[next] = true;
                    queue.push_back(next);
                }
            }
        }
    }
    (components, connections)
}
