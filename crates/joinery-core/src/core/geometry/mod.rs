//! Pure geometric primitives shared by every higher layer.
//!
//! All types here are ephemeral values derived from a part snapshot: oriented
//! frames, world-space axis-aligned bounds, and 1D intervals. Every operation
//! returns a new value; nothing is mutated in place or persisted.

pub mod aabb;
pub mod frame;
pub mod interval;

use serde::{Deserialize, Serialize};

/// One of the three world coordinate axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// Index of the axis into a 3-component vector.
    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }

    /// The other two axes, in a fixed order.
    pub fn others(self) -> [Axis; 2] {
        match self {
            Axis::X => [Axis::Y, Axis::Z],
            Axis::Y => [Axis::X, Axis::Z],
            Axis::Z => [Axis::X, Axis::Y],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn others_never_contain_self() {
        for axis in Axis::ALL {
            assert!(!axis.others().contains(&axis));
        }
    }

    #[test]
    fn index_covers_all_components() {
        let indices: Vec<_> = Axis::ALL.iter().map(|a| a.index()).collect();
        assert_eq!(indices, vec![0, 1, 2]);
    }
}
