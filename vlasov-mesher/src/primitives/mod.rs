use nalgebra::{allocator::Allocator, DefaultAllocator, DimName, OPoint, Point1, RealField, U1};

pub trait Distance<T: RealField, Point> {
    fn distance(&self, point: &Point) -> T;
}

pub trait ElementMethods<T: RealField, GeometryDim: DimName>
where
    DefaultAllocator: Allocator<T, GeometryDim>,
{
    fn vertex_indices(&self) -> &[usize];
    fn midpoint(&self) -> OPoint<T, GeometryDim>;
    fn diameter(&self) -> T;
    fn contains(&self, point: &OPoint<T, GeometryDim>) -> bool;
}

/// A spatial cell `[x_{i-1/2}, x_{i+1/2}]`
#[derive(Debug)]
pub struct LineSegment1d<T>
where
    T: RealField,
{
    vertices: [Point1<T>; 2],
    vertex_indices: [usize; 2],
}

impl<T> LineSegment1d<T>
where
    T: Copy + RealField,
{
    pub fn from_vertices(vertices: &[Point1<T>; 2], vertex_indices: &[usize; 2]) -> Self {
        Self {
            vertices: vertices.to_owned(),
            vertex_indices: vertex_indices.to_owned(),
        }
    }
    pub fn left(&self) -> T {
        self.vertices[0].x
    }
    pub fn right(&self) -> T {
        self.vertices[1].x
    }
}

impl<T> Distance<T, Point1<T>> for LineSegment1d<T>
where
    T: Copy + RealField,
{
    /// Distance from the cell to `point`, zero when the point lies inside
    fn distance(&self, point: &Point1<T>) -> T {
        T::max(
            T::max(self.left() - point.x, point.x - self.right()),
            T::zero(),
        )
    }
}

impl<T: Copy + RealField> ElementMethods<T, U1> for LineSegment1d<T> {
    fn midpoint(&self) -> Point1<T> {
        Point1::new((self.vertices[0].x + self.vertices[1].x) / (T::one() + T::one()))
    }
    fn vertex_indices(&self) -> &[usize] {
        &self.vertex_indices
    }
    fn diameter(&self) -> T {
        (self.vertices[0].x - self.vertices[1].x).abs()
    }
    fn contains(&self, point: &Point1<T>) -> bool {
        self.distance(point) == T::zero()
    }
}
