//! # Workflows Module
//!
//! High-level entry points that tie the lattice geometry and the engine together.
//!
//! ## Overview
//!
//! A workflow takes a complete configuration, builds every intermediate object it needs
//! and returns a finished result, reporting progress along the way.
//!
//! - **Build Workflow** ([`build`]) - Cut a nanoparticle canvas out of an oriented FCC
//!   lattice using a bounding shape.

pub mod build;
