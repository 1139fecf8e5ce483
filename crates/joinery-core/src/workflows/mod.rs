//! # Workflows Module
//!
//! This module provides the high-level entry points of the engine, tying the
//! analysis tasks and the placement search into two complete operations.
//!
//! ## Architecture
//!
//! - **Fastener Placement** ([`place`]) - Given two wood parts, search
//!   directions, planes, and sample grids for a physically valid pair of
//!   screws bridging them, and synthesize the fastener parts on success.
//! - **Structural Analysis** ([`analyze`]) - Score every wood part and the
//!   whole assembly from the contact/support/fastener relationships, producing
//!   an immutable report for display.
//!
//! Both workflows are synchronous, bounded, pure functions of the part
//! snapshot they receive. Placement is atomic from the caller's perspective:
//! it returns either exactly two new fastener parts or a diagnostic error,
//! never a partial result.

pub mod analyze;
pub mod place;
