// Copyright 2022 Chris Gubbin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! # Moments
//!
//! Reduces the phase-space coefficients to the charge-density moments the field needs.
//!
//! Within spatial cell `I_i` the velocity-integrated density is linear,
//! `ρ(x) = vol · Σ_j [(c0 + c5/4) + c1 (x - x_i)/dx]`, so two velocity sums per cell describe it
//! completely. `ChargeMoments` stores those sums together with running prefix sums of the
//! cumulative charge `Q(x) = ∫_0^x ρ` and of its integral `∫_0^x Q`, which turns every
//! "sum over all cells to the left" in the field formulas into a lookup.

mod reduction;

pub use reduction::{GlobalReduction, SingleProcess};

use nalgebra::RealField;
use rayon::prelude::*;
use vlasov_mesher::{CoefficientArray, PhaseSpaceGrid};

/// `Σ_j (c0 + c5/4)` over the velocity cells above spatial cell `spatial_index`
fn velocity_sum_of_density<T: Copy + RealField>(
    coefficients: &CoefficientArray<'_, T>,
    spatial_index: usize,
) -> T {
    (0..coefficients.number_of_velocity_cells()).fold(T::zero(), |sum, velocity_index| {
        sum + coefficients.density_weight(spatial_index, velocity_index)
    })
}

/// `Σ_j c1` over the velocity cells above spatial cell `spatial_index`
fn velocity_sum_of_slope<T: Copy + RealField>(
    coefficients: &CoefficientArray<'_, T>,
    spatial_index: usize,
) -> T {
    (0..coefficients.number_of_velocity_cells()).fold(T::zero(), |sum, velocity_index| {
        sum + coefficients.slope(spatial_index, velocity_index)
    })
}

/// The charge contained in spatial cell `spatial_index`, `∫_{I_i} ρ dx`
pub fn local_density<T: Copy + RealField>(
    grid: &PhaseSpaceGrid<T>,
    coefficients: &CoefficientArray<'_, T>,
    spatial_index: usize,
) -> T {
    grid.cell_width() * grid.velocity_cell_volume() * velocity_sum_of_density(coefficients, spatial_index)
}

/// The charge density `ρ(x)` at a point `x` inside spatial cell `spatial_index`
pub fn density_at<T: Copy + RealField>(
    grid: &PhaseSpaceGrid<T>,
    coefficients: &CoefficientArray<'_, T>,
    x: T,
    spatial_index: usize,
) -> T {
    let offset = (x - grid.cell_centre(spatial_index)) / grid.cell_width();
    let sum = (0..coefficients.number_of_velocity_cells()).fold(T::zero(), |sum, velocity_index| {
        sum + coefficients.density_weight(spatial_index, velocity_index)
            + coefficients.slope(spatial_index, velocity_index) * offset
    });
    grid.velocity_cell_volume() * sum
}

/// The charge in all cells strictly left of `spatial_index`, `Σ_{m=0}^{i-1} ∫_{I_m} ρ`
///
/// `spatial_index` may equal the number of cells, in which case this is the total charge.
/// Recomputes the sum on every call, `ChargeMoments::cumulative_charge` is the cached form.
pub fn cumulative_density<T: Copy + RealField>(
    grid: &PhaseSpaceGrid<T>,
    coefficients: &CoefficientArray<'_, T>,
    spatial_index: usize,
) -> T {
    (0..spatial_index)
        .into_par_iter()
        .map(|m| local_density(grid, coefficients, m))
        .reduce(T::zero, |a, b| a + b)
}

/// `∫_{I_i} [∫_{x_{i-1/2}}^x ρ(z) dz] dx`
#[numeric_literals::replace_float_literals(T::from_f64(literal).unwrap())]
pub fn integrated_cumulative_density<T: Copy + RealField>(
    grid: &PhaseSpaceGrid<T>,
    coefficients: &CoefficientArray<'_, T>,
    spatial_index: usize,
) -> T {
    let dx = grid.cell_width();
    let sum = 0.5 * velocity_sum_of_density(coefficients, spatial_index)
        - velocity_sum_of_slope(coefficients, spatial_index) / 12.0;
    sum * dx * dx * grid.velocity_cell_volume()
}

/// `∫_{I_i} (x - x_i)/dx [∫_{x_{i-1/2}}^x ρ(z) dz] dx`
#[numeric_literals::replace_float_literals(T::from_f64(literal).unwrap())]
pub fn first_moment_of_cumulative_density<T: Copy + RealField>(
    grid: &PhaseSpaceGrid<T>,
    coefficients: &CoefficientArray<'_, T>,
    spatial_index: usize,
) -> T {
    let dx = grid.cell_width();
    velocity_sum_of_density(coefficients, spatial_index) / 12.0
        * dx
        * dx
        * grid.velocity_cell_volume()
}

/// Charge moments of one timestep's coefficient array
#[derive(Clone, Debug)]
pub struct ChargeMoments<T> {
    cell_width: T,
    /// `vol · Σ_j (c0 + c5/4)` per spatial cell, the cell-averaged density
    density: Vec<T>,
    /// `vol · Σ_j c1` per spatial cell
    slope: Vec<T>,
    /// `Q(x_{i-1/2})` for `i = 0..=Nx`
    cumulative_charge: Vec<T>,
    /// `∫_0^{x_{i-1/2}} Q` for `i = 0..=Nx`
    integrated_charge: Vec<T>,
}

impl<T: Copy + RealField> ChargeMoments<T> {
    /// Reduces `coefficients` in O(Nx·Nv). The per-cell velocity sums are local partial sums
    /// handed to `reduction` before the prefix sums over the spatial direction are formed.
    #[tracing::instrument(name = "Charge moments", level = "debug", skip_all)]
    pub fn compute<R: GlobalReduction<T>>(
        grid: &PhaseSpaceGrid<T>,
        coefficients: &CoefficientArray<'_, T>,
        reduction: &R,
    ) -> Self {
        let number_of_cells = grid.number_of_spatial_cells();

        let (mut density, mut slope): (Vec<T>, Vec<T>) = (0..number_of_cells)
            .into_par_iter()
            .map(|i| {
                (
                    velocity_sum_of_density(coefficients, i),
                    velocity_sum_of_slope(coefficients, i),
                )
            })
            .unzip();

        reduction.all_reduce_sum(&mut density);
        reduction.all_reduce_sum(&mut slope);

        let volume = grid.velocity_cell_volume();
        for (density, slope) in density.iter_mut().zip(slope.iter_mut()) {
            *density *= volume;
            *slope *= volume;
        }

        Self::from_cell_sums(grid.cell_width(), density, slope)
    }

    /// Builds the prefix sums from already reduced, volume-scaled velocity sums
    #[numeric_literals::replace_float_literals(T::from_f64(literal).unwrap())]
    pub(crate) fn from_cell_sums(cell_width: T, density: Vec<T>, slope: Vec<T>) -> Self {
        let dx = cell_width;
        let mut cumulative_charge = Vec::with_capacity(density.len() + 1);
        let mut integrated_charge = Vec::with_capacity(density.len() + 1);
        cumulative_charge.push(T::zero());
        integrated_charge.push(T::zero());

        let (mut charge, mut integrated) = (T::zero(), T::zero());
        for (&density, &slope) in density.iter().zip(slope.iter()) {
            // ∫_{I_i} Q = dx Q(x_{i-1/2}) + ∫_{I_i} ∫_{x_{i-1/2}}^x ρ
            integrated += dx * charge + dx * dx * (0.5 * density - slope / 12.0);
            charge += dx * density;
            cumulative_charge.push(charge);
            integrated_charge.push(integrated);
        }

        Self {
            cell_width,
            density,
            slope,
            cumulative_charge,
            integrated_charge,
        }
    }

    pub fn number_of_cells(&self) -> usize {
        self.density.len()
    }

    /// The cell-averaged density `vol · Σ_j (c0 + c5/4)`
    pub fn density(&self, spatial_index: usize) -> T {
        self.density[spatial_index]
    }

    /// The density slope `vol · Σ_j c1`
    pub fn slope(&self, spatial_index: usize) -> T {
        self.slope[spatial_index]
    }

    /// `∫_{I_i} ρ`
    pub fn cell_charge(&self, spatial_index: usize) -> T {
        self.cell_width * self.density[spatial_index]
    }

    /// The charge strictly left of cell `spatial_index`, valid for `0..=Nx`
    pub fn cumulative_charge(&self, spatial_index: usize) -> T {
        self.cumulative_charge[spatial_index]
    }

    pub fn total_charge(&self) -> T {
        self.cumulative_charge[self.number_of_cells()]
    }

    /// `∫_0^{x_{i-1/2}} Q`, valid for `0..=Nx`
    pub fn integrated_charge(&self, spatial_index: usize) -> T {
        self.integrated_charge[spatial_index]
    }

    /// `∫_0^L Q`, the global sum closing the elliptic problem
    pub fn total_integrated_charge(&self) -> T {
        self.integrated_charge[self.number_of_cells()]
    }

    /// `ρ(x)` for `offset = x - x_{i-1/2}` inside cell `spatial_index`
    #[numeric_literals::replace_float_literals(T::from_f64(literal).unwrap())]
    pub fn density_at(&self, spatial_index: usize, offset: T) -> T {
        let normalised = (offset - 0.5 * self.cell_width) / self.cell_width;
        self.density[spatial_index] + self.slope[spatial_index] * normalised
    }

    /// `Q(x)` for `offset = x - x_{i-1/2}` inside cell `spatial_index`
    #[numeric_literals::replace_float_literals(T::from_f64(literal).unwrap())]
    pub fn charge_to(&self, spatial_index: usize, offset: T) -> T {
        let dx = self.cell_width;
        self.cumulative_charge[spatial_index]
            + self.density[spatial_index] * offset
            + self.slope[spatial_index] * (offset * offset - offset * dx) / (2.0 * dx)
    }

    /// `∫_0^x Q` for `offset = x - x_{i-1/2}` inside cell `spatial_index`
    #[numeric_literals::replace_float_literals(T::from_f64(literal).unwrap())]
    pub fn integrated_charge_to(&self, spatial_index: usize, offset: T) -> T {
        let dx = self.cell_width;
        let offset_squared = offset * offset;
        self.integrated_charge[spatial_index]
            + self.cumulative_charge[spatial_index] * offset
            + self.density[spatial_index] * offset_squared / 2.0
            + self.slope[spatial_index] * (offset_squared * offset / (6.0 * dx) - offset_squared / 4.0)
    }
}
