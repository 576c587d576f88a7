use crate::{MeshError, PhaseSpaceGrid};
use nalgebra::RealField;

/// Number of basis coefficients stored for every phase-space cell
pub const DEGREES_OF_FREEDOM: usize = 6;

/// The slots of the per-cell coefficient layout
///
/// With `φ1 = (x - x_i)/dx` and `ψk = (v_k - v_jk)/dv` the basis is
/// `{1, φ1, ψ1, ψ2, ψ3, ψ1² + ψ2² + ψ3²}`. The last function integrates to `1/4` over a
/// velocity cell, which is why every density-like reduction weights slot 5 by a quarter.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BasisSlot {
    Average = 0,
    SlopeX = 1,
    SlopeV1 = 2,
    SlopeV2 = 3,
    SlopeV3 = 4,
    VelocitySquare = 5,
}

impl BasisSlot {
    pub fn index(self) -> usize {
        self as usize
    }
}

/// A validated, read-only view of the caller-owned coefficient array
///
/// The layout is spatial-major then velocity-minor, six values per phase-space cell.
#[derive(Copy, Clone, Debug)]
pub struct CoefficientArray<'a, T> {
    values: &'a [T],
    number_of_spatial_cells: usize,
    number_of_velocity_cells: usize,
}

impl<'a, T: Copy + RealField> CoefficientArray<'a, T> {
    pub fn new(grid: &PhaseSpaceGrid<T>, values: &'a [T]) -> Result<Self, MeshError> {
        let expected = grid.number_of_coefficients();
        if values.len() != expected {
            return Err(MeshError::CoefficientLength {
                expected,
                found: values.len(),
            });
        }
        Ok(Self {
            values,
            number_of_spatial_cells: grid.number_of_spatial_cells(),
            number_of_velocity_cells: grid.number_of_velocity_cells(),
        })
    }

    pub fn number_of_spatial_cells(&self) -> usize {
        self.number_of_spatial_cells
    }

    pub fn number_of_velocity_cells(&self) -> usize {
        self.number_of_velocity_cells
    }


    /// The six coefficients of phase-space cell `(spatial_index, velocity_index)`
    pub fn cell(&self, spatial_index: usize, velocity_index: usize) -> &'a [T] {
        let values: &'a [T] = self.values;
        let offset = DEGREES_OF_FREEDOM
            * crate::linear_index(
                self.number_of_velocity_cells,
                spatial_index,
                velocity_index,
            );
        &values[offset..offset + DEGREES_OF_FREEDOM]
    }

    pub fn coefficient(&self, spatial_index: usize, velocity_index: usize, slot: BasisSlot) -> T {
        self.cell(spatial_index, velocity_index)[slot.index()]
    }

    /// The cell average of the density, `c0 + c5/4`
    pub fn density_weight(&self, spatial_index: usize, velocity_index: usize) -> T {
        let cell = self.cell(spatial_index, velocity_index);
        let four = T::from_usize(4).expect("Must be able to fit usize in T");
        cell[BasisSlot::Average.index()] + cell[BasisSlot::VelocitySquare.index()] / four
    }

    /// The linear-in-x coefficient `c1`
    pub fn slope(&self, spatial_index: usize, velocity_index: usize) -> T {
        self.coefficient(spatial_index, velocity_index, BasisSlot::SlopeX)
    }
}

#[cfg(test)]
mod test {
    use super::{BasisSlot, CoefficientArray, DEGREES_OF_FREEDOM};
    use crate::{PhaseSpaceGrid, VelocityGrid};
    use approx::assert_relative_eq;

    fn grid() -> PhaseSpaceGrid<f64> {
        PhaseSpaceGrid::new(1_f64, 3, VelocityGrid::new(2, 1_f64).unwrap()).unwrap()
    }

    #[test]
    fn mismatched_array_length_is_a_configuration_error() {
        let grid = grid();
        let values = vec![0_f64; 3 * 2 * DEGREES_OF_FREEDOM - 1];
        assert!(CoefficientArray::new(&grid, &values).is_err());
    }

    #[test]
    fn cells_are_laid_out_spatial_major() {
        let grid = grid();
        let values: Vec<f64> = (0..3 * 2 * DEGREES_OF_FREEDOM).map(|x| x as f64).collect();
        let coefficients = CoefficientArray::new(&grid, &values).unwrap();

        assert_relative_eq!(coefficients.coefficient(0, 1, BasisSlot::Average), 6.);
        assert_relative_eq!(coefficients.coefficient(1, 0, BasisSlot::Average), 12.);
        assert_relative_eq!(coefficients.slope(2, 1), 31.);
        assert_relative_eq!(coefficients.density_weight(0, 0), 0. + 5. / 4.);
        assert_eq!(coefficients.cell(1, 1), &values[18..24]);
    }
}
