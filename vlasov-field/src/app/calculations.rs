//! # Calculations
//!
//! Delegated functions from `App` which turn a configuration into a field solve and its diagnostics
//!

use super::Configuration;
use crate::{
    background::{BackgroundProfile, Regime},
    diagnostics::{DiagnosticWriter, FieldSampler},
    field::{FieldSnapshot, FieldSolverBuilder},
};
use nalgebra::RealField;
use std::fmt::LowerExp;
use std::path::Path;

/// Solves the field of the configured initial condition once and writes the sampled streams
pub(crate) fn single_field_solve<T>(
    config: &Configuration<T>,
    output_directory: &Path,
) -> color_eyre::Result<()>
where
    T: Copy + RealField + LowerExp,
{
    let grid = config.grid.build(&config.initial_condition)?;
    let regime = Regime::select(config.field.doping, config.field.doping_profile.clone(), &grid)?;
    tracing::info!(
        "Grid of {} spatial and {} velocity cells on [0, {}], doped: {}",
        grid.number_of_spatial_cells(),
        grid.number_of_velocity_cells(),
        grid.domain_length(),
        regime.is_doped()
    );

    let values = config.initial_condition.project(
        &grid,
        config.grid.velocity_half_width,
        config.grid.velocity_cells_per_dimension,
    );

    let solver = FieldSolverBuilder::new()
        .with_grid(&grid)
        .with_regime(&regime)
        .build();
    let snapshot = solver.solve(&values)?;
    tracing::info!(
        "Total charge {}, boundary constant {}, net force {}",
        snapshot.moments().total_charge(),
        snapshot.boundary_constant(),
        net_force(&snapshot)
    );

    let sampler = FieldSampler::new(grid.mesh(), config.diagnostics.points_per_cell)?;
    let mut writer = DiagnosticWriter::create(output_directory)?;
    writer.write_locations(&sampler)?;
    writer.write_sample(&sampler.sample(&snapshot))?;
    writer.flush()?;
    tracing::info!("Diagnostics written to {}", output_directory.display());

    Ok(())
}

/// `Σ ∫ f E`, the rate of change of the total momentum along `x`
fn net_force<T, B>(snapshot: &FieldSnapshot<'_, '_, T, B>) -> T
where
    T: Copy + RealField,
    B: BackgroundProfile<T> + ?Sized,
{
    let grid = snapshot.grid();
    (0..grid.number_of_spatial_cells())
        .flat_map(|i| (0..grid.number_of_velocity_cells()).map(move |j| (i, j)))
        .fold(T::zero(), |sum, (i, j)| sum + snapshot.charge_field_integral(i, j))
}
