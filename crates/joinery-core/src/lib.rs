//! # Joinery Core Library
//!
//! A geometric relationship engine for planning wood assemblies: it models parts
//! as oriented boxes in 3D, detects how parts touch and support each other, searches
//! for physically valid screw placements bridging two parts, and scores the
//! structural stability of a whole assembly.
//!
//! ## Architectural Philosophy
//!
//! The library is designed with a strict three-layer architecture to ensure a clear
//! separation of concerns, making it modular, testable, and extensible.
//!
//! - **[`core`]: The Foundation.** Contains stateless data models (`Part`, footprint
//!   profiles) and pure geometric primitives (`OrientedFrame`, axis-aligned bounds,
//!   interval arithmetic). Nothing in this layer knows about screws or scoring.
//!
//! - **[`engine`]: The Logic Core.** This layer implements the pairwise analysis
//!   tasks (contact graph, support relations, fastener bridging), the screw
//!   placement search, the structural report types, and the named configuration
//!   structures holding every tolerance, threshold, and weight.
//!
//! - **[`workflows`]: The Public API.** The highest-level, user-facing layer. It
//!   ties `engine` and `core` together into two complete operations: automatic
//!   fastener placement between two chosen parts, and whole-assembly structural
//!   analysis. Every derived value is a pure function of the part snapshot the
//!   caller passes in; the engine never retains parts across calls.

pub mod core;
pub mod engine;
pub mod workflows;
