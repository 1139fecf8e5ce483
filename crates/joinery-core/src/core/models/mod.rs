//! Data structures for parts and their cross-section profiles.
//!
//! Parts are owned by the surrounding application; this library receives them as
//! read-only snapshots and returns derived values (or, for fastener placement,
//! new parts for the caller to append).

pub mod footprint;
pub mod ids;
pub mod part;
