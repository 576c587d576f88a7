use super::BackgroundProfile;
use crate::{boundary, error::FieldError};
use nalgebra::RealField;
use serde::Deserialize;
use vlasov_mesher::PhaseSpaceGrid;

fn default_right_potential<T: RealField>() -> T {
    T::one()
}

/// Run-time parameters of a step doping profile, as read from configuration
#[derive(Clone, Debug, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de> + RealField"))]
pub struct DopingParameters<T> {
    /// Density outside the band, `NH`
    pub high: T,
    /// Density inside the band, `NL`
    pub low: T,
    /// The last cell of the left plateau
    pub lower_cell: usize,
    /// The last cell of the band
    pub upper_cell: usize,
    pub permittivity: T,
    /// The Dirichlet value `Φ(L)`
    #[serde(default = "default_right_potential")]
    pub right_potential: T,
}

/// A piecewise-constant doping profile: `NH` on cells `i <= lower_cell` and `i > upper_cell`,
/// `NL` on the band in between.
///
/// The band edges sit at `a = (lower_cell + 1) dx` and `b = (upper_cell + 1) dx`. The potential
/// is pinned to zero at the left edge and to `right_potential` at the right edge.
#[derive(Clone, Debug)]
pub struct DopingProfile<T> {
    high: T,
    low: T,
    lower_cell: usize,
    upper_cell: usize,
    permittivity: T,
    right_potential: T,
    lower_edge: T,
    upper_edge: T,
}

impl<T: Copy + RealField> DopingProfile<T> {
    pub fn new(parameters: DopingParameters<T>, grid: &PhaseSpaceGrid<T>) -> Result<Self, FieldError> {
        let number_of_cells = grid.number_of_spatial_cells();
        if parameters.lower_cell >= parameters.upper_cell || parameters.upper_cell >= number_of_cells
        {
            return Err(FieldError::DopingBand {
                lower_cell: parameters.lower_cell,
                upper_cell: parameters.upper_cell,
                number_of_cells,
            });
        }
        if parameters.permittivity <= T::zero() {
            return Err(FieldError::Permittivity(format!("{}", parameters.permittivity)));
        }

        let to_t = |index: usize| T::from_usize(index).expect("Must be able to fit usize in T");
        let dx = grid.cell_width();
        Ok(Self {
            high: parameters.high,
            low: parameters.low,
            lower_cell: parameters.lower_cell,
            upper_cell: parameters.upper_cell,
            permittivity: parameters.permittivity,
            right_potential: parameters.right_potential,
            lower_edge: to_t(parameters.lower_cell + 1) * dx,
            upper_edge: to_t(parameters.upper_cell + 1) * dx,
        })
    }

    pub fn high(&self) -> T {
        self.high
    }

    pub fn low(&self) -> T {
        self.low
    }

    pub fn right_potential(&self) -> T {
        self.right_potential
    }

    /// The edges `(a, b)` of the low-density band
    pub fn band_edges(&self) -> (T, T) {
        (self.lower_edge, self.upper_edge)
    }

    /// The constant `∫_0^x N - N_i x` picks up on crossing each band edge
    pub fn jump(&self, spatial_index: usize) -> T {
        let mut jump = T::zero();
        if spatial_index > self.lower_cell {
            jump += (self.high - self.low) * self.lower_edge;
        }
        if spatial_index > self.upper_cell {
            jump += (self.low - self.high) * self.upper_edge;
        }
        jump
    }
}

impl<T: Copy + RealField> BackgroundProfile<T> for DopingProfile<T> {
    fn density(&self, spatial_index: usize) -> T {
        if spatial_index <= self.lower_cell || spatial_index > self.upper_cell {
            self.high
        } else {
            self.low
        }
    }

    fn integral_to(&self, x: T, spatial_index: usize) -> T {
        self.density(spatial_index) * x + self.jump(spatial_index)
    }

    #[numeric_literals::replace_float_literals(T::from_f64(literal).unwrap())]
    fn double_integral_to(&self, x: T, spatial_index: usize) -> T {
        let mut integral = self.density(spatial_index) * x * x / 2.0;
        if spatial_index > self.lower_cell {
            let a = self.lower_edge;
            integral += (self.high - self.low) * a * (x - 0.5 * a);
        }
        if spatial_index > self.upper_cell {
            let b = self.upper_edge;
            integral += (self.low - self.high) * b * (x - 0.5 * b);
        }
        integral
    }

    fn permittivity(&self) -> T {
        self.permittivity
    }

    fn boundary_constant(&self, integrated_charge: T, domain_length: T) -> T {
        boundary::dirichlet_boundary_constant(self, integrated_charge, domain_length)
    }
}
