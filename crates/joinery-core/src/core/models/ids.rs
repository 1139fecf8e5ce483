use serde::{Deserialize, Serialize};
use std::fmt;

/// A stable, caller-assigned part identifier.
///
/// Identifiers are opaque to the engine: they are only compared for equality,
/// used as map keys in reports, and echoed back in diagnostics. When fastener
/// placement synthesizes new parts it allocates identifiers above the largest
/// one present in the snapshot, so committing the returned parts cannot
/// collide with caller-owned ids.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct PartId(pub u64);

impl fmt::Display for PartId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for PartId {
    fn from(raw: u64) -> Self {
        PartId(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_shows_raw_value() {
        assert_eq!(PartId(42).to_string(), "42");
    }

    #[test]
    fn ids_order_by_raw_value() {
        assert!(PartId(1) < PartId(2));
        assert_eq!(PartId::from(7), PartId(7));
    }
}
