//! # Initial conditions
//!
//! Distributions the binary projects onto the coefficient layout for a standalone field solve.
//! Both are separable, `f(x, v) = X(x) g(v1) m(v2) m(v3)` with `m` the unit Maxwellian, so the
//! cell averages factor into one-dimensional averages which are taken with three-point
//! Gauss-Legendre quadrature. Only the cell-average and x-slope slots are filled.

use nalgebra::RealField;
use rayon::prelude::*;
use serde::Deserialize;
use vlasov_mesher::{PhaseSpaceGrid, DEGREES_OF_FREEDOM};

#[derive(Clone, Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub(crate) enum InitialCondition<T> {
    /// Landau damping, `(1 + α cos kx) M(v)`
    Damping { amplitude: T, wavenumber: T },
    /// `(1 + α cos kx) v1² M(v)`, two counter-propagating beams along `v1`
    TwoStream {
        amplitude: T,
        wavenumber: Option<T>,
    },
}

/// `∫_a^b f / (b - a)` by three-point Gauss-Legendre
#[numeric_literals::replace_float_literals(T::from_f64(literal).unwrap())]
fn cell_average<T: Copy + RealField>(a: T, b: T, f: impl Fn(T) -> T) -> T {
    let (centre, half) = ((a + b) / 2.0, (b - a) / 2.0);
    let node = (0.6).sqrt() * half;
    (5.0 * f(centre - node) + 8.0 * f(centre) + 5.0 * f(centre + node)) / 18.0
}

/// The unit one-dimensional Maxwellian
#[numeric_literals::replace_float_literals(T::from_f64(literal).unwrap())]
fn maxwellian<T: Copy + RealField>(v: T) -> T {
    (-v * v / 2.0).exp() / T::two_pi().sqrt()
}

impl<T: Copy + RealField> InitialCondition<T> {
    fn amplitude(&self) -> T {
        match self {
            InitialCondition::Damping { amplitude, .. } => *amplitude,
            InitialCondition::TwoStream { amplitude, .. } => *amplitude,
        }
    }

    #[numeric_literals::replace_float_literals(T::from_f64(literal).unwrap())]
    pub(crate) fn wavenumber(&self) -> T {
        match self {
            InitialCondition::Damping { wavenumber, .. } => *wavenumber,
            InitialCondition::TwoStream { wavenumber, .. } => {
                wavenumber.unwrap_or_else(|| T::pi() / 2.0)
            }
        }
    }

    /// One wavelength of the spatial perturbation
    pub(crate) fn natural_length(&self) -> T {
        T::two_pi() / self.wavenumber()
    }

    fn spatial_profile(&self, x: T) -> T {
        T::one() + self.amplitude() * (self.wavenumber() * x).cos()
    }

    /// The factor of the distribution along `v1`
    fn streaming_profile(&self, v: T) -> T {
        match self {
            InitialCondition::Damping { .. } => maxwellian(v),
            InitialCondition::TwoStream { .. } => v * v * maxwellian(v),
        }
    }

    /// Projects the distribution onto `grid`, whose velocity space is the cube
    /// `[-half_width, half_width]^3` with `cells_per_dimension` cells along each axis
    #[numeric_literals::replace_float_literals(T::from_f64(literal).unwrap())]
    pub(crate) fn project(
        &self,
        grid: &PhaseSpaceGrid<T>,
        half_width: T,
        cells_per_dimension: usize,
    ) -> Vec<T> {
        let to_t = |index: usize| T::from_usize(index).expect("Must be able to fit usize in T");
        let dv = (half_width + half_width) / to_t(cells_per_dimension);
        let edge = |index: usize| -half_width + to_t(index) * dv;

        let streaming: Vec<T> = (0..cells_per_dimension)
            .map(|n| cell_average(edge(n), edge(n + 1), |v| self.streaming_profile(v)))
            .collect();
        let transverse: Vec<T> = (0..cells_per_dimension)
            .map(|n| cell_average(edge(n), edge(n + 1), maxwellian))
            .collect();
        let velocity_averages: Vec<T> = (0..cells_per_dimension.pow(3))
            .map(|j| {
                let (j1, j2, j3) = (
                    j / (cells_per_dimension * cells_per_dimension),
                    (j / cells_per_dimension) % cells_per_dimension,
                    j % cells_per_dimension,
                );
                streaming[j1] * transverse[j2] * transverse[j3]
            })
            .collect();

        let dx = grid.cell_width();
        (0..grid.number_of_spatial_cells())
            .into_par_iter()
            .flat_map_iter(|i| {
                let (left, centre) = (grid.cell_left_edge(i), grid.cell_centre(i));
                let average = cell_average(left, left + dx, |x| self.spatial_profile(x));
                // Coefficient of (x - x_i)/dx, whose square integrates to dx/12
                let slope = 12.0
                    * cell_average(left, left + dx, |x| {
                        self.spatial_profile(x) * (x - centre) / dx
                    });
                let velocity_averages = &velocity_averages;
                velocity_averages.iter().flat_map(move |&velocity| {
                    let mut cell = [T::zero(); DEGREES_OF_FREEDOM];
                    cell[0] = average * velocity;
                    cell[1] = slope * velocity;
                    cell
                })
            })
            .collect()
    }
}
