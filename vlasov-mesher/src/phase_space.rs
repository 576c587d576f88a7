use crate::{
    create_line_segment_mesh_1d, CellMesh, Mesh1d, MeshError, VelocityGrid, DEGREES_OF_FREEDOM,
};
use nalgebra::{RealField, Vector1};

/// Flattens a `(spatial, velocity)` cell pair into the position of the cell in the
/// coefficient array, counted in cells rather than values
pub fn linear_index(number_of_velocity_cells: usize, spatial_index: usize, velocity_index: usize) -> usize {
    spatial_index * number_of_velocity_cells + velocity_index
}

/// The full phase-space discretisation: a spatial mesh on `[0, L]` and the velocity grid
/// shared by every spatial cell. Immutable once built.
pub struct PhaseSpaceGrid<T: Copy + RealField> {
    mesh: Mesh1d<T>,
    velocity: VelocityGrid<T>,
}

impl<T: Copy + RealField> PhaseSpaceGrid<T> {
    pub fn new(
        domain_length: T,
        number_of_spatial_cells: usize,
        velocity: VelocityGrid<T>,
    ) -> Result<Self, MeshError> {
        let mesh = create_line_segment_mesh_1d(
            domain_length,
            number_of_spatial_cells,
            &Vector1::new(T::zero()),
        )?;
        Ok(Self { mesh, velocity })
    }

    pub fn mesh(&self) -> &Mesh1d<T> {
        &self.mesh
    }

    pub fn velocity(&self) -> &VelocityGrid<T> {
        &self.velocity
    }

    pub fn number_of_spatial_cells(&self) -> usize {
        self.mesh.number_of_cells()
    }

    pub fn number_of_velocity_cells(&self) -> usize {
        self.velocity.number_of_cells()
    }

    pub fn number_of_coefficients(&self) -> usize {
        DEGREES_OF_FREEDOM * self.number_of_spatial_cells() * self.number_of_velocity_cells()
    }

    pub fn cell_width(&self) -> T {
        self.mesh.cell_width()
    }

    pub fn domain_length(&self) -> T {
        self.mesh.domain_length()
    }

    pub fn velocity_cell_volume(&self) -> T {
        self.velocity.cell_volume()
    }

    pub fn cell_left_edge(&self, spatial_index: usize) -> T {
        self.mesh.cell_left_edge(spatial_index)
    }

    pub fn cell_centre(&self, spatial_index: usize) -> T {
        self.mesh.cell_centre(spatial_index)
    }

    pub fn linear_index(&self, spatial_index: usize, velocity_index: usize) -> usize {
        linear_index(self.number_of_velocity_cells(), spatial_index, velocity_index)
    }

    /// Offset of the first coefficient of cell `(spatial_index, velocity_index)`
    pub fn coefficient_offset(&self, spatial_index: usize, velocity_index: usize) -> usize {
        DEGREES_OF_FREEDOM * self.linear_index(spatial_index, velocity_index)
    }

}
