use super::initial_condition::InitialCondition;
use crate::background::DopingParameters;
use crate::constants::{DEFAULT_OUTPUT_DIRECTORY, DEFAULT_POINTS_PER_CELL};
use crate::error::FieldError;
use color_eyre::eyre::eyre;
use config::{Config, File};
use nalgebra::RealField;
use serde::{de::DeserializeOwned, Deserialize};
use std::env;
use std::path::{Path, PathBuf};
use vlasov_mesher::{PhaseSpaceGrid, VelocityGrid};

#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de> + RealField"))]
pub(crate) struct Configuration<T> {
    pub(crate) grid: GridConfiguration<T>,
    pub(crate) field: FieldConfiguration<T>,
    #[serde(default)]
    pub(crate) diagnostics: DiagnosticsConfiguration,
    pub(crate) initial_condition: InitialCondition<T>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GridConfiguration<T> {
    pub(crate) spatial_cells: usize,
    /// Defaults to one wavelength of the initial perturbation
    pub(crate) domain_length: Option<T>,
    pub(crate) velocity_cells_per_dimension: usize,
    pub(crate) velocity_half_width: T,
}

#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de> + RealField"))]
pub(crate) struct FieldConfiguration<T> {
    #[serde(default)]
    pub(crate) doping: bool,
    pub(crate) doping_profile: Option<DopingParameters<T>>,
}

fn default_points_per_cell() -> usize {
    DEFAULT_POINTS_PER_CELL
}

fn default_output_directory() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT_DIRECTORY)
}

#[derive(Debug, Deserialize)]
pub(crate) struct DiagnosticsConfiguration {
    #[serde(default = "default_points_per_cell")]
    pub(crate) points_per_cell: usize,
    #[serde(default = "default_output_directory")]
    pub(crate) output_directory: PathBuf,
}

impl Default for DiagnosticsConfiguration {
    fn default() -> Self {
        Self {
            points_per_cell: default_points_per_cell(),
            output_directory: default_output_directory(),
        }
    }
}

impl<T: Copy + RealField> GridConfiguration<T> {
    pub(crate) fn build(
        &self,
        initial_condition: &InitialCondition<T>,
    ) -> Result<PhaseSpaceGrid<T>, FieldError> {
        let domain_length = self
            .domain_length
            .unwrap_or_else(|| initial_condition.natural_length());
        let velocity = VelocityGrid::cubic(self.velocity_cells_per_dimension, self.velocity_half_width)?;
        Ok(PhaseSpaceGrid::new(domain_length, self.spatial_cells, velocity)?)
    }
}

impl<T: DeserializeOwned + RealField> Configuration<T> {
    /// Layers `.config/default`, the optional `.config/$RUN_MODE` and an optional user file
    pub(crate) fn build(user_file: Option<&Path>) -> color_eyre::Result<Self> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let mut builder = Config::builder()
            .add_source(File::with_name(".config/default"))
            .add_source(File::with_name(&format!(".config/{}", run_mode)).required(false));
        if let Some(path) = user_file {
            builder = builder.add_source(File::from(path));
        }

        builder
            .build()?
            .try_deserialize()
            .map_err(|e| eyre!(format!("Failed to deserialize the config file: {:?}", e)))
    }
}

#[cfg(test)]
mod test {
    use super::Configuration;
    use config::{Config, File, FileFormat};

    fn parse(source: &str) -> Configuration<f64> {
        Config::builder()
            .add_source(File::from_str(source, FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn uniform_run_fills_diagnostic_defaults() {
        let config = parse(
            r#"
            [grid]
            spatial_cells = 32
            velocity_cells_per_dimension = 8
            velocity_half_width = 5.0

            [field]
            doping = false

            [initial_condition]
            kind = "damping"
            amplitude = 0.5
            wavenumber = 0.5
            "#,
        );
        assert_eq!(config.diagnostics.points_per_cell, 4);
        assert!(config.field.doping_profile.is_none());

        let grid = config.grid.build(&config.initial_condition).unwrap();
        approx::assert_relative_eq!(grid.domain_length(), 4. * std::f64::consts::PI);
        assert_eq!(grid.number_of_velocity_cells(), 512);
    }

    #[test]
    fn doping_profile_defaults_the_right_potential() {
        let config = parse(
            r#"
            [grid]
            spatial_cells = 16
            domain_length = 4.0
            velocity_cells_per_dimension = 4
            velocity_half_width = 4.0

            [field]
            doping = true

            [field.doping_profile]
            high = 1.0
            low = 0.1
            lower_cell = 3
            upper_cell = 11
            permittivity = 1.0

            [initial_condition]
            kind = "two_stream"
            amplitude = 0.01
            "#,
        );
        approx::assert_relative_eq!(config.initial_condition.natural_length(), 4.);
        let profile = config.field.doping_profile.unwrap();
        assert_eq!(profile.right_potential, 1.);
        assert_eq!(profile.upper_cell, 11);
    }

    #[test]
    fn unknown_initial_condition_kind_is_rejected() {
        let parsed = Config::builder()
            .add_source(File::from_str(
                r#"
                [grid]
                spatial_cells = 16
                velocity_cells_per_dimension = 4
                velocity_half_width = 4.0

                [field]
                doping = false

                [initial_condition]
                kind = "four_hump"
                amplitude = 0.01
                wavenumber = 0.5
                "#,
                FileFormat::Toml,
            ))
            .build()
            .unwrap()
            .try_deserialize::<Configuration<f64>>();
        assert!(parsed.is_err());
    }
}
