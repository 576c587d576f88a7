// Copyright 2022 Chris Gubbin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! # Vlasov Mesher
//!
//! Phase-space discretisation for the field solver. The spatial direction is a uniform
//! 1-D line-segment mesh on `[0, L]`, each spatial cell carries the same set of velocity
//! cells, and every phase-space cell holds six discontinuous-Galerkin basis coefficients.

mod basis;
mod connectivity;
mod error;
mod generate;
mod mesh;
mod phase_space;
mod primitives;
mod velocity;

pub use basis::*;
pub use connectivity::*;
pub use error::MeshError;
pub use generate::*;
pub use mesh::*;
pub use phase_space::*;
pub use primitives::*;
pub use velocity::*;

use nalgebra::RealField;

/// The geometric queries the field solver makes of a spatial mesh
///
/// Cells are indexed `0..number_of_cells()` from left to right and all cells share one width.
pub trait CellMesh<T: RealField> {
    fn number_of_cells(&self) -> usize;
    fn cell_width(&self) -> T;
    fn domain_length(&self) -> T;
    /// The coordinate of the left edge of cell `index`, `x_{i-1/2}`
    fn cell_left_edge(&self, index: usize) -> T;
    /// The coordinate of the centre of cell `index`, `x_i`
    fn cell_centre(&self, index: usize) -> T;
    /// The cell containing `x`, or `None` if `x` lies outside the mesh
    fn locate(&self, x: T) -> Option<usize>;
}

impl<T: Copy + RealField> CellMesh<T> for Mesh1d<T> {
    fn number_of_cells(&self) -> usize {
        self.num_cells()
    }
    fn cell_width(&self) -> T {
        self.uniform_cell_width()
    }
    fn domain_length(&self) -> T {
        self.length()
    }
    fn cell_left_edge(&self, index: usize) -> T {
        self.left_edge(index)
    }
    fn cell_centre(&self, index: usize) -> T {
        self.element(index).midpoint().x
    }
    fn locate(&self, x: T) -> Option<usize> {
        self.find_cell(x)
    }
}
