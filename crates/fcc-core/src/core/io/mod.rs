//! # I/O Module
//!
//! Writers for exporting lattice sites to formats read by visualization and simulation
//! tools.
//!
//! - [`xyz`] - The plain XYZ coordinate format

pub mod xyz;
