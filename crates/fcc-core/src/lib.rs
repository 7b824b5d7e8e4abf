//! # fccnano Core Library
//!
//! Face-centered cubic (FCC) lattice construction and neighbor queries for exploring
//! candidate nanoparticle geometries.
//!
//! ## Architectural Philosophy
//!
//! The library follows a three-layer architecture so that pure geometry stays separate
//! from orchestration and from the user-facing entry points.
//!
//! - **[`core`]: The Foundation.** Stateless geometry primitives (`Shape`, `TransformFunc`,
//!   `CubicTiling`), the unit-cell lattice engine, the `FccLattice` specialization and
//!   coordinate output.
//!
//! - **[`engine`]: The Logic Core.** Build configuration, error types, progress reporting
//!   and the `Canvas`, which enumerates lattice sites inside a bounding shape together with
//!   their nearest-neighbor graph.
//!
//! - **[`workflows`]: The Public API.** End-to-end procedures such as building a
//!   nanoparticle canvas from a `BuildConfig`.

pub mod core;
pub mod engine;
pub mod workflows;
