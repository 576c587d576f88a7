/// This module governs the high-level implementation of the program
mod calculations;
mod configuration;
mod initial_condition;
mod telemetry;
pub(crate) use configuration::Configuration;

use clap::{ArgEnum, Parser};
use nalgebra::RealField;
use serde::de::DeserializeOwned;
use std::fmt::LowerExp;
use std::path::PathBuf;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct App {
    /// A configuration file layered over `.config/default`
    #[clap(short, long)]
    config: Option<PathBuf>,
    #[clap(arg_enum, short, long, default_value = "info")]
    log_level: LogLevel,
    /// Overrides the configured output directory
    #[clap(short, long)]
    output: Option<PathBuf>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, ArgEnum)]
enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let level = match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        };
        write!(f, "{}", level)
    }
}

pub fn run<T>() -> color_eyre::Result<()>
where
    T: Copy + DeserializeOwned + LowerExp + RealField,
{
    color_eyre::install()?;
    let cli = App::parse();

    let config: Configuration<T> = Configuration::build(cli.config.as_deref())?;
    let output_directory = cli
        .output
        .unwrap_or_else(|| config.diagnostics.output_directory.clone());
    if !output_directory.exists() {
        std::fs::create_dir_all(&output_directory)?;
    }

    let (subscriber, _guard) = telemetry::get_subscriber(cli.log_level, &output_directory);
    telemetry::init_subscriber(subscriber);
    tracing::info!("Initial condition: {:?}", config.initial_condition);

    calculations::single_field_solve(&config, &output_directory)
}
