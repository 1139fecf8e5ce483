//! # Engine Module
//!
//! This module implements the analysis engine behind fastener placement and
//! structural scoring: the pairwise relationship scans, the screw placement
//! search, and the report data the host application displays.
//!
//! ## Architecture
//!
//! The module is organized into specialized submodules:
//!
//! - **Configuration** ([`config`]) - Every tolerance, threshold, weight, and the
//!   screw catalog, as named and documented fields
//! - **Error Handling** ([`error`]) - The placement failure taxonomy
//! - **Reports** ([`report`]) - Structural analysis results and per-part fields
//! - **Analysis Tasks** ([`tasks`]) - Pairwise contact, support, and bridging scans
//! - **Caching** ([`cache`]) - Revision-keyed memoization of analysis reports
//!
//! The placement search itself lives in [`placement`] and is driven through the
//! workflow layer.

pub(crate) mod cache;
pub mod config;
pub mod error;
pub(crate) mod placement;
pub mod report;
pub(crate) mod tasks;

pub use cache::ReportCache;
