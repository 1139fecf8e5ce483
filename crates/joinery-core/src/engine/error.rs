use crate::core::models::ids::PartId;
use thiserror::Error;

/// Why a fastener placement request produced no fasteners.
///
/// Every variant is an ordinary, user-presentable outcome; placement never
/// panics. Input errors reject before any geometry work, and the three
/// geometric outcomes are distinct so the host can give actionable feedback.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PlacementError {
    #[error("a part cannot be fastened to itself")]
    SamePart,

    #[error("part {0} was not found in the assembly")]
    PartNotFound(PartId),

    #[error("part {0} is hardware; screws can only join wood parts")]
    NotWood(PartId),

    #[error("parts are not touching")]
    NotTouching,

    #[error("no shared region for screws")]
    NoSharedRegion,

    #[error("no valid screw placement was found")]
    NoValidPlacement,
}
