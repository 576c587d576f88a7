// Copyright 2022 Chris Gubbin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! # Boundary
//!
//! Integrating `ε Φ'' = N - ρ` twice from the left edge with `Φ(0) = 0` leaves one free
//! constant, the slope `C_E` of the linear term in
//! `Φ(x) = (∫_0^x Q - ∫_0^x ∫_0^y N) / ε + C_E x`. It is fixed by a condition at the right edge
//! and depends on the charge of the whole domain through `∫_0^L Q`, so it has to be computed
//! after a full reduction and before any potential or field is evaluated.

use crate::background::{BackgroundProfile, DopingProfile};
use crate::moments::ChargeMoments;
use nalgebra::RealField;

/// `C_E` under net neutrality, `Φ(L) = Φ(0) = 0` against a unit background
#[numeric_literals::replace_float_literals(T::from_f64(literal).unwrap())]
pub fn neutral_boundary_constant<T: Copy + RealField>(integrated_charge: T, domain_length: T) -> T {
    0.5 * domain_length - integrated_charge / domain_length
}

/// `C_E` under the Dirichlet condition `Φ(L) = right_potential` against a step doping profile
#[numeric_literals::replace_float_literals(T::from_f64(literal).unwrap())]
pub fn dirichlet_boundary_constant<T: Copy + RealField>(
    profile: &DopingProfile<T>,
    integrated_charge: T,
    domain_length: T,
) -> T {
    let (a, b) = profile.band_edges();
    let (high, low) = (profile.high(), profile.low());
    let epsilon = profile.permittivity();
    let length = domain_length;

    profile.right_potential() / length + 0.5 * high * length / epsilon
        + (low - high) * (b - a) / epsilon
        - (0.5 * (low - high) * (b * b - a * a) + integrated_charge) / (length * epsilon)
}

/// Computes `C_E` for one timestep's moments
#[tracing::instrument(name = "Boundary constant", level = "debug", skip_all)]
pub fn boundary_constant<T, B>(moments: &ChargeMoments<T>, background: &B, domain_length: T) -> T
where
    T: Copy + RealField,
    B: BackgroundProfile<T> + ?Sized,
{
    let constant = background.boundary_constant(moments.total_integrated_charge(), domain_length);
    tracing::trace!("Boundary constant {constant}");
    constant
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::background::{DopingParameters, Uniform};
    use crate::moments::SingleProcess;
    use approx::assert_relative_eq;
    use rand::Rng;
    use vlasov_mesher::{CoefficientArray, PhaseSpaceGrid, VelocityGrid, DEGREES_OF_FREEDOM};

    /// The nested accumulation the constant is defined by, evaluated literally in O(Nx²·Nv)
    fn nested_integrated_charge(grid: &PhaseSpaceGrid<f64>, values: &[f64]) -> f64 {
        let coefficients = CoefficientArray::new(grid, values).unwrap();
        let (nx, nv) = (grid.number_of_spatial_cells(), grid.number_of_velocity_cells());
        let mut sum = 0.;
        for j in 0..nv {
            for q in 0..nx {
                for m in 0..q {
                    sum += coefficients.density_weight(m, j);
                }
                sum += 0.5 * coefficients.density_weight(q, j) - coefficients.slope(q, j) / 12.;
            }
        }
        sum * grid.velocity_cell_volume() * grid.cell_width() * grid.cell_width()
    }

    fn random_problem(nx: usize, nv: usize) -> (PhaseSpaceGrid<f64>, Vec<f64>) {
        let mut rng = rand::thread_rng();
        let grid = PhaseSpaceGrid::new(
            rng.gen_range(1.0..10.0),
            nx,
            VelocityGrid::new(nv, rng.gen_range(0.1..1.0)).unwrap(),
        )
        .unwrap();
        let values = (0..nx * nv * DEGREES_OF_FREEDOM)
            .map(|_| rng.gen_range(-1.0..1.0))
            .collect();
        (grid, values)
    }

    #[test]
    fn prefix_sum_reproduces_the_nested_accumulation() {
        let (grid, values) = random_problem(12, 5);
        let coefficients = CoefficientArray::new(&grid, &values).unwrap();
        let moments = ChargeMoments::compute(&grid, &coefficients, &SingleProcess);
        assert_relative_eq!(
            moments.total_integrated_charge(),
            nested_integrated_charge(&grid, &values),
            epsilon = 1e-10,
            max_relative = 1e-10
        );
    }

    #[test]
    fn neutral_plasma_has_vanishing_constant() {
        let grid = PhaseSpaceGrid::new(4_f64, 4, VelocityGrid::new(1, 1.).unwrap()).unwrap();
        let mut values = vec![0_f64; 4 * DEGREES_OF_FREEDOM];
        for cell in values.chunks_exact_mut(DEGREES_OF_FREEDOM) {
            cell[0] = 1.;
        }
        let coefficients = CoefficientArray::new(&grid, &values).unwrap();
        let moments = ChargeMoments::compute(&grid, &coefficients, &SingleProcess);

        assert_relative_eq!(moments.total_charge(), grid.domain_length());
        assert_relative_eq!(boundary_constant(&moments, &Uniform, grid.domain_length()), 0.);
    }

    #[test]
    fn dirichlet_constant_matches_the_generic_right_edge_condition() {
        let (grid, values) = random_problem(10, 2);
        let coefficients = CoefficientArray::new(&grid, &values).unwrap();
        let moments = ChargeMoments::compute(&grid, &coefficients, &SingleProcess);
        let profile = DopingProfile::new(
            DopingParameters {
                high: 1.,
                low: 0.3,
                lower_cell: 2,
                upper_cell: 6,
                permittivity: 0.8,
                right_potential: 1.,
            },
            &grid,
        )
        .unwrap();

        let length = grid.domain_length();
        let background = profile.double_integral_to(length, 9);
        let expected = (1. - (moments.total_integrated_charge() - background) / 0.8) / length;
        assert_relative_eq!(
            boundary_constant(&moments, &profile, length),
            expected,
            epsilon = 1e-12,
            max_relative = 1e-10
        );
    }
}
