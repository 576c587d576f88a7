// Copyright 2022 Chris Gubbin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! Vlasov Field is the electrostatic field stage of a discontinuous-Galerkin Vlasov-Poisson solver
//!
//! # Overview
//! At every timestep of a 1-D-in-space, 3-D-in-velocity plasma simulation the transport update needs
//! the electric field generated by the current distribution. This crate reduces the six DG coefficients
//! of every phase-space cell to charge-density moments, fixes the single free constant of the 1-D
//! Poisson problem from a global integral of the charge, and evaluates the potential and field in
//! closed form. It also precomputes, per spatial cell, the field integrals against the spatial basis
//! which the transport update multiplies into its force term.
//!
//! Two background regimes are supported: a uniform neutralising background under net neutrality, and a
//! step doping profile with Dirichlet boundary values.
//!
//! # Usage
//! The binary solves the field of a configured initial condition once and writes the sampled
//! potential and field. Settings are read from `.config/default.toml`:
//!
//! ```toml
//! [grid]
//! spatial_cells = 64
//! velocity_cells_per_dimension = 8
//! velocity_half_width = 5.0
//!
//! [field]
//! doping = false
//!
//! [initial_condition]
//! kind = "damping"
//! amplitude = 0.5
//! wavenumber = 0.5
//! ```
//!
//! As a library the entry point is the `FieldSolverBuilder`:
//!
//! ```
//! use vlasov_field::{background::Uniform, field::FieldSolverBuilder};
//! use vlasov_mesher::{PhaseSpaceGrid, VelocityGrid};
//!
//! let grid = PhaseSpaceGrid::new(4_f64, 4, VelocityGrid::new(1, 1.).unwrap()).unwrap();
//! let values = vec![0_f64; grid.number_of_coefficients()];
//! let solver = FieldSolverBuilder::new().with_grid(&grid).with_regime(&Uniform).build();
//! let snapshot = solver.solve(&values).unwrap();
//! let field = snapshot.field_at(1.0).unwrap();
//! ```

/// The command line application, configuration and tracing
pub mod app;

/// The background charge profile and its regime
pub mod background;

/// The boundary constant closing the Poisson problem
pub mod boundary;

/// Defaults
mod constants;

/// Sampling and output of the potential and field
pub mod diagnostics;

/// Error handling
mod error;

/// Potential, field and the cell-integral cache
pub mod field;

/// Charge moments of the coefficient array
pub mod moments;

pub use error::FieldError;
