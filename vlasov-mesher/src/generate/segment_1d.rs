use crate::connectivity::Segment1dConnectivity;
use crate::mesh::Mesh1d;
use crate::MeshError;
use nalgebra::{Point1, RealField, Vector1};

/// Builds a uniform mesh of `number_of_cells` segments spanning `[left, left + domain_length]`
pub fn create_line_segment_mesh_1d<T>(
    domain_length: T,
    number_of_cells: usize,
    left: &Vector1<T>,
) -> Result<Mesh1d<T>, MeshError>
where
    T: Copy + RealField,
{
    if number_of_cells == 0 {
        return Err(MeshError::EmptyMesh);
    }
    if domain_length <= T::zero() {
        return Err(MeshError::NonPositiveLength(format!("{domain_length}")));
    }

    let cells_as_t = T::from_usize(number_of_cells).expect("Must be able to fit usize in T");
    let cell_size = domain_length / cells_as_t;
    let num_vertices_x = number_of_cells + 1;
    let mut vertices = Vec::with_capacity(num_vertices_x);
    let mut cells = Vec::with_capacity(number_of_cells);

    for i in 0..num_vertices_x {
        let i_as_t = T::from_usize(i).expect("Must be able to fit usize in T");
        let v = left + Vector1::new(i_as_t) * cell_size;
        vertices.push(Point1::from(v));
    }

    for i in 0..number_of_cells {
        cells.push(Segment1dConnectivity::new(i, i + 1));
    }

    Ok(Mesh1d::from_vertices_and_connectivity(vertices, cells))
}
