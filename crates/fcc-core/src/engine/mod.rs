//! # Engine Module
//!
//! Orchestration layer between the stateless lattice geometry and the public workflows.
//!
//! ## Architecture
//!
//! - **Configuration** ([`config`]) - Lattice and bounding-shape parameters with a checked builder
//! - **Site Enumeration** ([`canvas`]) - All lattice sites inside a shape and their neighbor graph
//! - **Progress Monitoring** ([`progress`]) - Callback-based progress reporting
//! - **Error Handling** ([`error`]) - Engine-level error types wrapping lattice and geometry errors

pub mod canvas;
pub mod config;
pub mod error;
pub mod progress;
