// Copyright 2022 Chris Gubbin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! # Field
//!
//! Closed-form electrostatic potential and field for one timestep.
//!
//! With `Q(x) = ∫_0^x ρ` and background `N` the solution is
//!
//! `Φ(x) = (∫_0^x Q - ∫_0^x ∫_0^y N) / ε + C_E x`,   `E(x) = -Φ'(x) = (∫_0^x N - Q(x)) / ε - C_E`.
//!
//! Both are exact antiderivatives of the piecewise-linear density, so they are continuous across
//! cell edges and need no linear solve. A `FieldSolver` is built once per run, every call to
//! `solve` reduces the coefficients, fixes `C_E` and fills the cell-integral cache, returning a
//! `FieldSnapshot` which answers point queries for that timestep.

mod cache;

pub use cache::{CellIntegralCache, CellIntegrals};

use crate::background::BackgroundProfile;
use crate::boundary;
use crate::error::FieldError;
use crate::moments::{ChargeMoments, GlobalReduction, SingleProcess};
use nalgebra::RealField;
use std::marker::PhantomData;
use vlasov_mesher::{CoefficientArray, PhaseSpaceGrid};

/// Builder for the `FieldSolver`
pub struct FieldSolverBuilder<T, RefGrid, RefBackground, Reduction> {
    grid: RefGrid,
    background: RefBackground,
    reduction: Reduction,
    marker: PhantomData<T>,
}

impl<T> FieldSolverBuilder<T, (), (), SingleProcess> {
    pub fn new() -> Self {
        Self {
            grid: (),
            background: (),
            reduction: SingleProcess,
            marker: PhantomData,
        }
    }
}

impl<T> Default for FieldSolverBuilder<T, (), (), SingleProcess> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, RefGrid, RefBackground, Reduction> FieldSolverBuilder<T, RefGrid, RefBackground, Reduction> {
    /// Attach the phase-space grid
    pub fn with_grid<Grid>(
        self,
        grid: &Grid,
    ) -> FieldSolverBuilder<T, &Grid, RefBackground, Reduction> {
        FieldSolverBuilder {
            grid,
            background: self.background,
            reduction: self.reduction,
            marker: PhantomData,
        }
    }

    /// Attach the background regime the run is solved in
    pub fn with_regime<Background>(
        self,
        background: &Background,
    ) -> FieldSolverBuilder<T, RefGrid, &Background, Reduction> {
        FieldSolverBuilder {
            grid: self.grid,
            background,
            reduction: self.reduction,
            marker: PhantomData,
        }
    }

    /// Replace the in-process reduction with one that combines sums across processes
    pub fn with_reduction<R>(self, reduction: R) -> FieldSolverBuilder<T, RefGrid, RefBackground, R> {
        FieldSolverBuilder {
            grid: self.grid,
            background: self.background,
            reduction,
            marker: PhantomData,
        }
    }
}

impl<'a, T, B, R> FieldSolverBuilder<T, &'a PhaseSpaceGrid<T>, &'a B, R>
where
    T: Copy + RealField,
    B: BackgroundProfile<T> + ?Sized,
    R: GlobalReduction<T>,
{
    pub fn build(self) -> FieldSolver<'a, T, B, R> {
        FieldSolver {
            grid: self.grid,
            background: self.background,
            reduction: self.reduction,
        }
    }
}

/// Computes the field of successive coefficient arrays on a fixed grid and regime
pub struct FieldSolver<'a, T: Copy + RealField, B: ?Sized, R> {
    grid: &'a PhaseSpaceGrid<T>,
    background: &'a B,
    reduction: R,
}

impl<'a, T, B, R> FieldSolver<'a, T, B, R>
where
    T: Copy + RealField,
    B: BackgroundProfile<T> + ?Sized,
    R: GlobalReduction<T>,
{
    pub fn grid(&self) -> &'a PhaseSpaceGrid<T> {
        self.grid
    }

    /// Reduces `values`, fixes the boundary constant and fills the cell-integral cache.
    ///
    /// The snapshot borrows `values`, which cannot be advanced while the snapshot is alive.
    #[tracing::instrument(name = "Field solve", level = "debug", skip_all)]
    pub fn solve<'c>(&self, values: &'c [T]) -> Result<FieldSnapshot<'a, 'c, T, B>, FieldError> {
        let coefficients = CoefficientArray::new(self.grid, values)?;
        let moments = ChargeMoments::compute(self.grid, &coefficients, &self.reduction);
        let boundary_constant =
            boundary::boundary_constant(&moments, self.background, self.grid.domain_length());
        let integrals =
            CellIntegralCache::compute(self.grid, &moments, self.background, boundary_constant);
        tracing::debug!(
            "Solved field with total charge {} and boundary constant {}",
            moments.total_charge(),
            boundary_constant
        );

        Ok(FieldSnapshot {
            grid: self.grid,
            background: self.background,
            coefficients,
            moments,
            boundary_constant,
            integrals,
        })
    }
}

/// The potential and field of one coefficient array
pub struct FieldSnapshot<'a, 'c, T: Copy + RealField, B: ?Sized> {
    grid: &'a PhaseSpaceGrid<T>,
    background: &'a B,
    coefficients: CoefficientArray<'c, T>,
    moments: ChargeMoments<T>,
    boundary_constant: T,
    integrals: CellIntegralCache<T>,
}

impl<'a, 'c, T, B> FieldSnapshot<'a, 'c, T, B>
where
    T: Copy + RealField,
    B: BackgroundProfile<T> + ?Sized,
{
    pub fn grid(&self) -> &'a PhaseSpaceGrid<T> {
        self.grid
    }

    pub fn moments(&self) -> &ChargeMoments<T> {
        &self.moments
    }

    /// The coefficient `C_E` of the linear term of the potential
    pub fn boundary_constant(&self) -> T {
        self.boundary_constant
    }

    /// `Φ(x)` for `x` inside spatial cell `spatial_index`. The pair is not checked.
    pub fn potential(&self, x: T, spatial_index: usize) -> T {
        let offset = x - self.grid.cell_left_edge(spatial_index);
        (self.moments.integrated_charge_to(spatial_index, offset)
            - self.background.double_integral_to(x, spatial_index))
            / self.background.permittivity()
            + self.boundary_constant * x
    }

    /// `E(x) = -Φ'(x)` for `x` inside spatial cell `spatial_index`. The pair is not checked.
    pub fn field(&self, x: T, spatial_index: usize) -> T {
        let offset = x - self.grid.cell_left_edge(spatial_index);
        (self.background.integral_to(x, spatial_index)
            - self.moments.charge_to(spatial_index, offset))
            / self.background.permittivity()
            - self.boundary_constant
    }

    fn locate(&self, x: T) -> Result<usize, FieldError> {
        self.grid
            .mesh()
            .find_cell(x)
            .ok_or_else(|| FieldError::OutsideDomain(format!("{x}")))
    }

    /// `Φ(x)`, locating the cell containing `x` first
    pub fn potential_at(&self, x: T) -> Result<T, FieldError> {
        Ok(self.potential(x, self.locate(x)?))
    }

    /// `E(x)`, locating the cell containing `x` first
    pub fn field_at(&self, x: T) -> Result<T, FieldError> {
        Ok(self.field(x, self.locate(x)?))
    }

    pub fn cell_integrals(&self, spatial_index: usize) -> &CellIntegrals<T> {
        self.integrals.get(spatial_index)
    }

    pub fn cell_integral_cache(&self) -> &CellIntegralCache<T> {
        &self.integrals
    }

    /// `∫ f E dx dv` over phase-space cell `(spatial_index, velocity_index)`, the force term of
    /// the transport update
    pub fn charge_field_integral(&self, spatial_index: usize, velocity_index: usize) -> T {
        let integrals = self.integrals.get(spatial_index);
        (self.coefficients.density_weight(spatial_index, velocity_index) * integrals.zeroth
            + self.coefficients.slope(spatial_index, velocity_index) * integrals.first)
            * self.grid.velocity_cell_volume()
    }
}

#[cfg(test)]
mod test {
    use super::FieldSolverBuilder;
    use crate::background::{DopingParameters, DopingProfile, Regime, Uniform};
    use approx::assert_relative_eq;
    use proptest::prelude::*;
    use rand::Rng;
    use vlasov_mesher::{PhaseSpaceGrid, VelocityGrid, DEGREES_OF_FREEDOM};

    fn grid(length: f64, nx: usize, nv: usize, volume: f64) -> PhaseSpaceGrid<f64> {
        PhaseSpaceGrid::new(length, nx, VelocityGrid::new(nv, volume).unwrap()).unwrap()
    }

    fn random_values(grid: &PhaseSpaceGrid<f64>) -> Vec<f64> {
        let mut rng = rand::thread_rng();
        (0..grid.number_of_coefficients())
            .map(|_| rng.gen_range(-1.0..1.0))
            .collect()
    }

    fn doping(grid: &PhaseSpaceGrid<f64>, high: f64, low: f64, right_potential: f64) -> DopingProfile<f64> {
        let nx = grid.number_of_spatial_cells();
        DopingProfile::new(
            DopingParameters {
                high,
                low,
                lower_cell: nx / 4 - 1,
                upper_cell: 3 * nx / 4 - 1,
                permittivity: 1.,
                right_potential,
            },
            grid,
        )
        .unwrap()
    }

    proptest! {
        #[test]
        fn potential_and_field_are_continuous_across_cell_edges(
            values in proptest::collection::vec(-1.0..1.0f64, 16 * 3 * DEGREES_OF_FREEDOM),
            length in 1.0..20.0f64,
            doped in any::<bool>(),
        ) {
            let grid = grid(length, 16, 3, 0.4);
            let regime = if doped {
                Regime::Doping(doping(&grid, 1., 0.1, 1.))
            } else {
                Regime::Uniform
            };
            let solver = FieldSolverBuilder::new().with_grid(&grid).with_regime(&regime).build();
            let snapshot = solver.solve(&values).unwrap();

            for i in 0..15 {
                let edge = grid.cell_left_edge(i + 1);
                let scale = 1. + snapshot.potential(edge, i).abs();
                prop_assert!((snapshot.potential(edge, i) - snapshot.potential(edge, i + 1)).abs() < 1e-9 * scale);
                let scale = 1. + snapshot.field(edge, i).abs();
                prop_assert!((snapshot.field(edge, i) - snapshot.field(edge, i + 1)).abs() < 1e-9 * scale);
            }
        }
    }

    #[test]
    fn neutral_plasma_has_no_field() {
        let grid = grid(4., 4, 1, 1.);
        let mut values = vec![0_f64; grid.number_of_coefficients()];
        for cell in values.chunks_exact_mut(DEGREES_OF_FREEDOM) {
            cell[0] = 1.;
        }
        let solver = FieldSolverBuilder::new().with_grid(&grid).with_regime(&Uniform).build();
        let snapshot = solver.solve(&values).unwrap();

        assert_relative_eq!(snapshot.boundary_constant(), 0., epsilon = 1e-14);
        for i in 0..4 {
            assert_relative_eq!(snapshot.moments().cell_charge(i), grid.cell_width());
            for fraction in [0., 0.25, 0.5, 0.75, 1.] {
                let x = grid.cell_left_edge(i) + fraction * grid.cell_width();
                assert_relative_eq!(snapshot.field(x, i), 0., epsilon = 1e-13);
                assert_relative_eq!(snapshot.potential(x, i), 0., epsilon = 1e-13);
            }
            for integral in snapshot.cell_integrals(i).as_array() {
                assert_relative_eq!(integral, 0., epsilon = 1e-13);
            }
        }
    }

    #[test]
    fn uniform_potential_vanishes_at_both_edges() {
        let grid = grid(6., 12, 2, 0.5);
        let values = random_values(&grid);
        let solver = FieldSolverBuilder::new().with_grid(&grid).with_regime(&Uniform).build();
        let snapshot = solver.solve(&values).unwrap();

        assert_relative_eq!(snapshot.potential(0., 0), 0.);
        assert_relative_eq!(snapshot.potential(6., 11), 0., epsilon = 1e-12);
    }

    #[test]
    fn equal_plateaus_reduce_to_the_uniform_regime() {
        let grid = grid(5., 16, 2, 0.7);
        let values = random_values(&grid);
        let profile = doping(&grid, 1., 1., 0.);

        let uniform = FieldSolverBuilder::new().with_grid(&grid).with_regime(&Uniform).build();
        let doped = FieldSolverBuilder::new().with_grid(&grid).with_regime(&profile).build();
        let uniform = uniform.solve(&values).unwrap();
        let doped = doped.solve(&values).unwrap();

        assert_relative_eq!(
            uniform.boundary_constant(),
            doped.boundary_constant(),
            epsilon = 1e-12,
            max_relative = 1e-12
        );
        for i in 0..16 {
            let x = grid.cell_centre(i) + 0.2 * grid.cell_width();
            assert_relative_eq!(uniform.potential(x, i), doped.potential(x, i), epsilon = 1e-12, max_relative = 1e-12);
            assert_relative_eq!(uniform.field(x, i), doped.field(x, i), epsilon = 1e-12, max_relative = 1e-12);
            for (a, b) in uniform
                .cell_integrals(i)
                .as_array()
                .into_iter()
                .zip(doped.cell_integrals(i).as_array())
            {
                assert_relative_eq!(a, b, epsilon = 1e-12, max_relative = 1e-12);
            }
        }
    }

    #[test]
    fn field_is_minus_the_derivative_of_the_potential() {
        let grid = grid(3., 10, 4, 0.25);
        let values = random_values(&grid);
        for regime in [Regime::Uniform, Regime::Doping(doping(&grid, 1., 0.1, 1.))] {
            let solver = FieldSolverBuilder::new().with_grid(&grid).with_regime(&regime).build();
            let snapshot = solver.solve(&values).unwrap();

            for i in 0..10 {
                let x = grid.cell_centre(i);
                let exact = -snapshot.field(x, i);
                let mut previous_error = f64::INFINITY;
                for h in [1e-2, 1e-3] {
                    let h = h * grid.cell_width();
                    let derivative =
                        (snapshot.potential(x + h, i) - snapshot.potential(x - h, i)) / (2. * h);
                    let error = (derivative - exact).abs();
                    assert!(error <= previous_error + 1e-9);
                    previous_error = error;
                }
                assert!(previous_error < 1e-6 * (1. + exact.abs()));
            }
        }
    }

    #[test]
    fn pure_doping_background_gives_the_step_poisson_solution() {
        let grid = grid(4., 16, 1, 1.);
        let values = vec![0_f64; grid.number_of_coefficients()];
        let profile = doping(&grid, 1., 0.1, 1.);
        let (a, b) = profile.band_edges();
        assert_relative_eq!(a, 1.);
        assert_relative_eq!(b, 3.);

        let solver = FieldSolverBuilder::new().with_grid(&grid).with_regime(&profile).build();
        let snapshot = solver.solve(&values).unwrap();

        assert_relative_eq!(snapshot.potential(0., 0), 0.);
        assert_relative_eq!(snapshot.potential(4., 15), 1., max_relative = 1e-12);

        // The field takes the slope of the local plateau and stays continuous at the band edges,
        // where its affine form picks up the offsets (NH - NL) a and (NL - NH) b
        let constant = snapshot.boundary_constant();
        let offset = |x: f64, cell: usize, density: f64| snapshot.field(x, cell) + constant - density * x;
        assert_relative_eq!(offset(0.5, 1, 1.), 0., epsilon = 1e-12);
        assert_relative_eq!(offset(2., 7, 0.1), (1. - 0.1) * a, max_relative = 1e-12);
        assert_relative_eq!(offset(3.5, 14, 1.), (1. - 0.1) * a + (0.1 - 1.) * b, max_relative = 1e-12);

        for (cell, edge) in [(3, a), (11, b)] {
            assert_relative_eq!(
                snapshot.field(edge, cell),
                snapshot.field(edge, cell + 1),
                max_relative = 1e-12
            );
        }
    }

    #[test]
    fn cached_integrals_match_quadrature_of_the_field() {
        let grid = grid(2., 8, 3, 0.3);
        let values = random_values(&grid);
        for regime in [Regime::Uniform, Regime::Doping(doping(&grid, 0.9, 0.2, 1.5))] {
            let solver = FieldSolverBuilder::new().with_grid(&grid).with_regime(&regime).build();
            let snapshot = solver.solve(&values).unwrap();

            // E is a quadratic on each cell, so three-point Gauss-Legendre is exact up to degree five
            let nodes = [-(0.6_f64).sqrt(), 0., (0.6_f64).sqrt()];
            let weights = [5. / 9., 8. / 9., 5. / 9.];
            let dx = grid.cell_width();
            for i in 0..8 {
                let mut quadrature = [0.; 3];
                for (&node, &weight) in nodes.iter().zip(weights.iter()) {
                    let phi = node / 2.;
                    let e = snapshot.field(grid.cell_centre(i) + phi * dx, i);
                    quadrature[0] += weight * e * dx / 2.;
                    quadrature[1] += weight * e * phi * dx / 2.;
                    quadrature[2] += weight * e * phi * phi * dx / 2.;
                }
                for (cached, expected) in snapshot.cell_integrals(i).as_array().into_iter().zip(quadrature) {
                    assert_relative_eq!(cached, expected, epsilon = 1e-12, max_relative = 1e-10);
                }
            }
        }
    }

    #[test]
    fn force_term_combines_density_and_field_integrals() {
        let grid = grid(2., 4, 2, 0.5);
        let mut values = vec![0_f64; grid.number_of_coefficients()];
        let offset = grid.coefficient_offset(2, 1);
        values[offset] = 2.;
        values[offset + 1] = 0.4;
        values[offset + 5] = 1.;
        let solver = FieldSolverBuilder::new().with_grid(&grid).with_regime(&Uniform).build();
        let snapshot = solver.solve(&values).unwrap();

        let integrals = snapshot.cell_integrals(2);
        assert_relative_eq!(
            snapshot.charge_field_integral(2, 1),
            0.5 * ((2. + 0.25) * integrals.zeroth + 0.4 * integrals.first)
        );
        assert_relative_eq!(snapshot.charge_field_integral(2, 0), 0.);
    }

    #[test]
    fn located_queries_reject_points_outside_the_domain() {
        let grid = grid(1., 4, 1, 1.);
        let values = random_values(&grid);
        let solver = FieldSolverBuilder::new().with_grid(&grid).with_regime(&Uniform).build();
        let snapshot = solver.solve(&values).unwrap();

        assert!(snapshot.field_at(1.5).is_err());
        assert!(snapshot.field_at(f64::NAN).is_err());
        assert!(snapshot.potential_at(f64::NAN).is_err());
        assert_relative_eq!(snapshot.field_at(0.6).unwrap(), snapshot.field(0.6, 2));
        assert_relative_eq!(snapshot.potential_at(0.6).unwrap(), snapshot.potential(0.6, 2));
    }

    #[test]
    fn wrongly_sized_coefficients_are_a_configuration_error() {
        let grid = grid(1., 4, 2, 1.);
        let solver = FieldSolverBuilder::new().with_grid(&grid).with_regime(&Uniform).build();
        assert!(solver.solve(&[0.; 7]).is_err());
    }
}
