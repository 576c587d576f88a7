use crate::{Connectivity, LineSegment1d, Segment1dConnectivity};
use nalgebra::{allocator::Allocator, DefaultAllocator, DimName, OPoint, Point1, RealField, U1};

/// A generic `Mesh` object valid in all dimensions
pub struct Mesh<T: RealField, D, Connectivity>
where
    D: DimName,
    DefaultAllocator: Allocator<T, D>,
{
    vertices: Vec<OPoint<T, D>>,
    connectivity: Vec<Connectivity>,
}

/// Type aliases for implemented mesh dimensionalitys and discretisations
pub type Mesh1d<T> = Mesh<T, U1, Segment1dConnectivity>;

impl<T, D, C> Mesh<T, D, C>
where
    T: RealField,
    C: Connectivity,
    D: DimName,
    DefaultAllocator: Allocator<T, D>,
{
    pub fn num_nodes(&self) -> usize {
        self.vertices.len()
    }

    pub fn num_cells(&self) -> usize {
        self.connectivity.len()
    }

    pub fn vertices(&self) -> &[OPoint<T, D>] {
        &self.vertices
    }

    pub fn connectivity(&self) -> Vec<&[usize]> {
        self.connectivity.iter().map(|x| x.as_inner()).collect()
    }

    pub fn from_vertices_and_connectivity(
        vertices: Vec<OPoint<T, D>>,
        connectivity: Vec<C>,
    ) -> Self {
        Self {
            vertices,
            connectivity,
        }
    }
}

impl<T> Mesh1d<T>
where
    T: Copy + RealField,
{
    /// The line segment spanned by cell `index`
    pub fn element(&self, index: usize) -> LineSegment1d<T> {
        let cell = &self.connectivity[index];
        LineSegment1d::from_vertices(
            &[self.vertices[cell.left()], self.vertices[cell.right()]],
            &[cell.left(), cell.right()],
        )
    }

    pub fn left_boundary(&self) -> T {
        self.vertices[0].x
    }

    pub fn right_boundary(&self) -> T {
        self.vertices[self.vertices.len() - 1].x
    }

    pub fn length(&self) -> T {
        self.right_boundary() - self.left_boundary()
    }

    /// Every cell of a mesh built by `create_line_segment_mesh_1d` shares this width
    pub fn uniform_cell_width(&self) -> T {
        self.length() / T::from_usize(self.num_cells()).expect("Must be able to fit usize in T")
    }

    /// The left edge of cell `index`, computed from the uniform width so that it agrees exactly
    /// with the width used in closed-form cell integrals
    pub fn left_edge(&self, index: usize) -> T {
        let index_as_t = T::from_usize(index).expect("Must be able to fit usize in T");
        self.left_boundary() + index_as_t * self.uniform_cell_width()
    }

    /// The index of the cell containing `x`. The right boundary belongs to the last cell.
    pub fn find_cell(&self, x: T) -> Option<usize> {
        if !(x >= self.left_boundary() && x <= self.right_boundary()) {
            return None;
        }
        let offset = ((x - self.left_boundary()) / self.uniform_cell_width()).floor();
        let index = offset.to_subset().map(|offset: f64| offset as usize)?;
        Some(index.min(self.num_cells() - 1))
    }
}
