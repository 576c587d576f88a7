// Copyright 2022 Chris Gubbin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! # Error
//! Configuration faults, detected before the numerical core runs, and diagnostic IO failures

use miette::Diagnostic;
use vlasov_mesher::MeshError;

#[derive(thiserror::Error, Debug, Diagnostic)]
pub enum FieldError {
    #[error(transparent)]
    #[diagnostic(code(vlasov_field::grid))]
    Grid(#[from] MeshError),
    #[error("the doping flag is set but no doping profile was configured")]
    #[diagnostic(
        code(vlasov_field::doping_profile),
        help("add a `[field.doping_profile]` table or set `doping = false`")
    )]
    MissingDopingProfile,
    #[error("doping band {lower_cell}..={upper_cell} does not fit a mesh of {number_of_cells} cells")]
    #[diagnostic(
        code(vlasov_field::doping_band),
        help("the band needs lower_cell < upper_cell < number of spatial cells")
    )]
    DopingBand {
        lower_cell: usize,
        upper_cell: usize,
        number_of_cells: usize,
    },
    #[error("the permittivity must be positive, found {0}")]
    #[diagnostic(code(vlasov_field::permittivity))]
    Permittivity(String),
    #[error("the point {0} lies outside the spatial domain")]
    #[diagnostic(code(vlasov_field::outside_domain))]
    OutsideDomain(String),
    #[error("diagnostics need at least one sample point per cell")]
    #[diagnostic(code(vlasov_field::sampling))]
    EmptySampling,
    #[error("IO failure: {0}")]
    #[diagnostic(code(vlasov_field::io_error))]
    Io(#[from] std::io::Error),
}
