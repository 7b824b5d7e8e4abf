//! # Lattice Module
//!
//! Periodic lattices built by tiling a reference unit cell through space.
//!
//! ## Overview
//!
//! A lattice keeps its reference unit cell untouched and records the coordinate
//! transforms applied to it as a single composed affine map. Queries convert ambient
//! points into the reference frame, answer them there, and convert results back.
//!
//! ## Key Components
//!
//! - [`unit_cell`] - A cubic tiling plus the fractional positions of the basis atoms
//! - [`unit_cell_lattice`] - The generic lattice engine and on-lattice membership test
//! - [`fcc`] - The face-centered cubic specialization with IAD-based neighbor queries
//! - [`orientation`] - Low-index crystallographic alignments and their rotations
//! - [`error`] - Lattice construction and transform errors

pub mod error;
pub mod fcc;
pub mod orientation;
pub mod unit_cell;
pub mod unit_cell_lattice;
