use crate::MeshError;
use nalgebra::RealField;

/// The velocity discretisation attached to every spatial cell
///
/// The field solver only ever needs how many velocity cells sit above a spatial cell and
/// the volume each one scales its coefficients by.
#[derive(Copy, Clone, Debug)]
pub struct VelocityGrid<T> {
    number_of_cells: usize,
    cell_volume: T,
}

impl<T: Copy + RealField> VelocityGrid<T> {
    pub fn new(number_of_cells: usize, cell_volume: T) -> Result<Self, MeshError> {
        if number_of_cells == 0 {
            return Err(MeshError::EmptyVelocitySpace);
        }
        if cell_volume <= T::zero() {
            return Err(MeshError::NonPositiveVolume(format!("{cell_volume}")));
        }
        Ok(Self {
            number_of_cells,
            cell_volume,
        })
    }

    /// A three dimensional velocity box `[-half_width, half_width]^3` with `cells_per_dimension`
    /// cells along each axis
    pub fn cubic(cells_per_dimension: usize, half_width: T) -> Result<Self, MeshError> {
        let cells_as_t =
            T::from_usize(cells_per_dimension).expect("Must be able to fit usize in T");
        let cell_width = (half_width + half_width) / cells_as_t;
        Self::new(
            cells_per_dimension.pow(3),
            cell_width * cell_width * cell_width,
        )
    }

    pub fn number_of_cells(&self) -> usize {
        self.number_of_cells
    }

    pub fn cell_volume(&self) -> T {
        self.cell_volume
    }
}
