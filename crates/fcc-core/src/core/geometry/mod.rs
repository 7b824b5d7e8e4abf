//! # Geometry Module
//!
//! Geometric primitives shared by the lattice engine.
//!
//! - [`shapes`] - Bounded regions with a boundary-inclusive containment test
//! - [`transform`] - Scale, rotate, reflect and shift operations as affine maps
//! - [`tiling`] - Decomposition of space into repeated copies of a cubic cell
//! - [`error`] - Validation errors for malformed geometric parameters

pub mod error;
pub mod shapes;
pub mod tiling;
pub mod transform;

use nalgebra::{Point3, Vector3};

/// A position in ambient (lab) coordinates.
pub type Point = Point3<f64>;

/// A position relative to a unit cell, conceptually within `[0, 1)` on each axis.
pub type FractionalPosition = Vector3<f64>;
