//! # Diagnostics
//!
//! Samples the potential and field of a snapshot on a uniform sub-grid and writes them as two
//! parallel text streams. Each stream starts with a header row of the sampled coordinates and
//! gains one row per call to `DiagnosticWriter::write_sample`.

use crate::background::BackgroundProfile;
use crate::constants::{FIELD_FILE, POTENTIAL_FILE};
use crate::error::FieldError;
use crate::field::FieldSnapshot;
use nalgebra::RealField;
use rayon::prelude::*;
use std::fmt::LowerExp;
use std::io::Write;
use vlasov_mesher::CellMesh;

/// The sample points of a spatial mesh, `points_per_cell` evenly spaced points per cell starting
/// at each left edge
#[derive(Clone, Debug)]
pub struct FieldSampler<T> {
    /// The cell each point lies in, and its coordinate
    locations: Vec<(usize, T)>,
}

impl<T: Copy + RealField> FieldSampler<T> {
    pub fn new<M: CellMesh<T>>(mesh: &M, points_per_cell: usize) -> Result<Self, FieldError> {
        if points_per_cell == 0 {
            return Err(FieldError::EmptySampling);
        }
        let dx = mesh.cell_width();
        let spacing = dx / T::from_usize(points_per_cell).expect("Must be able to fit usize in T");

        let locations = (0..mesh.number_of_cells())
            .flat_map(|cell| {
                let left = mesh.cell_left_edge(cell);
                (0..points_per_cell).map(move |n| {
                    (cell, left + spacing * T::from_usize(n).expect("Must be able to fit usize in T"))
                })
            })
            .collect();

        Ok(Self { locations })
    }

    pub fn locations(&self) -> impl Iterator<Item = T> + '_ {
        self.locations.iter().map(|&(_, x)| x)
    }

    /// Evaluates the potential and field of `snapshot` at every sample point
    pub fn sample<B>(&self, snapshot: &FieldSnapshot<'_, '_, T, B>) -> FieldSample<T>
    where
        B: BackgroundProfile<T> + ?Sized,
    {
        let (potential, field) = self
            .locations
            .par_iter()
            .map(|&(cell, x)| (snapshot.potential(x, cell), snapshot.field(x, cell)))
            .unzip();
        FieldSample { potential, field }
    }
}

/// Potential and field values at the points of a `FieldSampler`
#[derive(Clone, Debug)]
pub struct FieldSample<T> {
    pub potential: Vec<T>,
    pub field: Vec<T>,
}

/// Writes the potential and field streams
pub struct DiagnosticWriter<W: Write> {
    potential: W,
    field: W,
}

impl DiagnosticWriter<std::io::BufWriter<std::fs::File>> {
    /// Creates `directory` if needed and opens fresh potential and field files inside it
    pub fn create(directory: &std::path::Path) -> Result<Self, FieldError> {
        if !directory.exists() {
            std::fs::create_dir_all(directory)?;
        }
        let open = |name: &str| -> Result<_, std::io::Error> {
            Ok(std::io::BufWriter::new(std::fs::File::create(
                directory.join(name),
            )?))
        };
        Ok(Self::new(open(POTENTIAL_FILE)?, open(FIELD_FILE)?))
    }
}

impl<W: Write> DiagnosticWriter<W> {
    pub fn new(potential: W, field: W) -> Self {
        Self { potential, field }
    }

    fn write_row<T: LowerExp>(
        writer: &mut W,
        values: impl Iterator<Item = T>,
    ) -> Result<(), std::io::Error> {
        let mut first = true;
        for value in values {
            if !first {
                write!(writer, " ")?;
            }
            write!(writer, "{:.8e}", value)?;
            first = false;
        }
        writeln!(writer)
    }

    /// Writes the header row of sample coordinates to both streams
    pub fn write_locations<T: Copy + RealField + LowerExp>(
        &mut self,
        sampler: &FieldSampler<T>,
    ) -> Result<(), FieldError> {
        Self::write_row(&mut self.potential, sampler.locations())?;
        Self::write_row(&mut self.field, sampler.locations())?;
        Ok(())
    }

    pub fn write_sample<T: Copy + LowerExp>(&mut self, sample: &FieldSample<T>) -> Result<(), FieldError> {
        Self::write_row(&mut self.potential, sample.potential.iter().copied())?;
        Self::write_row(&mut self.field, sample.field.iter().copied())?;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<(), FieldError> {
        self.potential.flush()?;
        self.field.flush()?;
        Ok(())
    }

    /// Returns the potential and field writers
    pub fn into_inner(self) -> (W, W) {
        (self.potential, self.field)
    }
}
