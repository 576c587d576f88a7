/// The two vertices bounding a line-segment cell, ordered left to right
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Segment1dConnectivity([usize; 2]);

impl Segment1dConnectivity {
    pub fn new(left: usize, right: usize) -> Self {
        Self([left, right])
    }

    pub fn left(&self) -> usize {
        self.0[0]
    }

    pub fn right(&self) -> usize {
        self.0[1]
    }
}

pub trait Connectivity {
    fn as_inner(&self) -> &[usize];
}

impl Connectivity for Segment1dConnectivity {
    fn as_inner(&self) -> &[usize] {
        &self.0
    }
}
