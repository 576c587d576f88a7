use crate::background::BackgroundProfile;
use crate::moments::ChargeMoments;
use nalgebra::RealField;
use rayon::prelude::*;
use vlasov_mesher::PhaseSpaceGrid;

/// Weighted integrals of the field over one spatial cell, with `φ1 = (x - x_i)/dx`
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CellIntegrals<T> {
    /// `∫_{I_i} E dx`
    pub zeroth: T,
    /// `∫_{I_i} E φ1 dx`
    pub first: T,
    /// `∫_{I_i} E φ1² dx`
    pub second: T,
}

impl<T: Copy + RealField> CellIntegrals<T> {
    /// Closed-form integrals of `E = (∫_0^x N - Q(x))/ε - C_E` over cell `spatial_index`.
    ///
    /// `∫_0^x N` is linear on a cell, so its averages reduce to the value at the centre.
    #[numeric_literals::replace_float_literals(T::from_f64(literal).unwrap())]
    fn compute<B>(
        grid: &PhaseSpaceGrid<T>,
        moments: &ChargeMoments<T>,
        background: &B,
        boundary_constant: T,
        spatial_index: usize,
    ) -> Self
    where
        B: BackgroundProfile<T> + ?Sized,
    {
        let dx = grid.cell_width();
        let epsilon = background.permittivity();
        let centre = grid.cell_centre(spatial_index);
        let background_at_centre = background.integral_to(centre, spatial_index);

        let density = moments.density(spatial_index);
        let slope = moments.slope(spatial_index);
        let charge_left = moments.cumulative_charge(spatial_index);

        // ∫ Q, ∫ Q φ1 and ∫ Q φ1² over the cell
        let charge_zeroth = dx * charge_left + dx * dx * (0.5 * density - slope / 12.0);
        let charge_first = density * dx * dx / 12.0;
        let charge_second =
            charge_left * dx / 12.0 + density * dx * dx / 24.0 - slope * dx * dx / 240.0;

        Self {
            zeroth: (background_at_centre * dx - charge_zeroth) / epsilon - boundary_constant * dx,
            first: (background.density(spatial_index) * dx * dx / 12.0 - charge_first) / epsilon,
            second: (background_at_centre * dx / 12.0 - charge_second) / epsilon
                - boundary_constant * dx / 12.0,
        }
    }

    pub fn as_array(&self) -> [T; 3] {
        [self.zeroth, self.first, self.second]
    }
}

/// The field integrals of every spatial cell for one timestep
#[derive(Clone, Debug)]
pub struct CellIntegralCache<T> {
    integrals: Vec<CellIntegrals<T>>,
}

impl<T: Copy + RealField> CellIntegralCache<T> {
    #[tracing::instrument(name = "Cell integral cache", level = "debug", skip_all)]
    pub(crate) fn compute<B>(
        grid: &PhaseSpaceGrid<T>,
        moments: &ChargeMoments<T>,
        background: &B,
        boundary_constant: T,
    ) -> Self
    where
        B: BackgroundProfile<T> + ?Sized,
    {
        let integrals = (0..grid.number_of_spatial_cells())
            .into_par_iter()
            .map(|i| CellIntegrals::compute(grid, moments, background, boundary_constant, i))
            .collect();
        Self { integrals }
    }

    pub fn get(&self, spatial_index: usize) -> &CellIntegrals<T> {
        &self.integrals[spatial_index]
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CellIntegrals<T>> {
        self.integrals.iter()
    }
}
