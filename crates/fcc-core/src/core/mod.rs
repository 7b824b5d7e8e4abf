//! # Core Module
//!
//! Stateless building blocks for lattice-based nanoparticle modeling.
//!
//! ## Architecture
//!
//! - **Geometry** ([`geometry`]) - Points, bounding shapes, affine transform functions and
//!   the cubic tiling of space
//! - **Lattices** ([`lattice`]) - Unit cells, the generic unit-cell lattice engine and the
//!   FCC specialization with its crystallographic alignments
//! - **File I/O** ([`io`]) - Writing lattice sites to coordinate files
//!
//! ## Scientific Foundation
//!
//! - **Periodic tiling** of a reference unit cell generates the full lattice
//! - **Coordination shells** give the 12 nearest neighbors of every FCC site
//! - **Miller-index planes** {100}, {110} and {111} define layer spacings and alignments

pub mod geometry;
pub mod io;
pub mod lattice;
