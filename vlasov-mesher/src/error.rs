// Copyright 2022 Chris Gubbin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! # Error
//! Configuration faults raised while building the phase-space grid

use miette::Diagnostic;

#[derive(thiserror::Error, Debug, Diagnostic)]
pub enum MeshError {
    #[error("a spatial mesh needs at least one cell")]
    #[diagnostic(code(vlasov_mesher::empty_mesh))]
    EmptyMesh,
    #[error("the spatial domain length must be positive, found {0}")]
    #[diagnostic(code(vlasov_mesher::domain_length))]
    NonPositiveLength(String),
    #[error("each spatial cell needs at least one velocity cell")]
    #[diagnostic(code(vlasov_mesher::empty_velocity_space))]
    EmptyVelocitySpace,
    #[error("the velocity-cell volume must be positive, found {0}")]
    #[diagnostic(code(vlasov_mesher::velocity_volume))]
    NonPositiveVolume(String),
    #[error("coefficient array holds {found} values, the grid needs {expected}")]
    #[diagnostic(
        code(vlasov_mesher::coefficient_length),
        help("the layout is six values per (spatial, velocity) cell, spatial-major")
    )]
    CoefficientLength { expected: usize, found: usize },
}
