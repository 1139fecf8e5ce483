//! # Core Module
//!
//! This module provides the fundamental building blocks for assembly planning:
//! the part data model shared with the host application and the pure geometric
//! primitives every higher layer is built from.
//!
//! ## Architecture
//!
//! The module is organized into specialized submodules:
//!
//! - **Part Representation** ([`models`]) - Parts, categories, and footprint profiles
//! - **Geometric Primitives** ([`geometry`]) - Oriented frames, axis-aligned bounds,
//!   projections, line/box intersection, and interval arithmetic
//! - **Utilities** ([`utils`]) - Small pure helpers such as the score heat color ramp
//!
//! Everything here is stateless: values are built from a part snapshot, used within
//! a single operation, and dropped.

pub mod geometry;
pub mod models;
pub mod utils;
