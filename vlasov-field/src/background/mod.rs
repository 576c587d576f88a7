//! # Background
//!
//! The fixed charge density `N(x)` the plasma is measured against. The elliptic problem is
//! `ε Φ'' = N - ρ` with `E = -Φ'`, so the field and potential formulas need `N`, its
//! integral `∫_0^x N` and its double integral `∫_0^x ∫_0^y N`, all available in closed form
//! because `N` is constant on every spatial cell.

mod doping;

pub use doping::{DopingParameters, DopingProfile};

use crate::{boundary, error::FieldError};
use nalgebra::RealField;
use vlasov_mesher::PhaseSpaceGrid;

/// A background charge profile together with the boundary condition it is solved under
pub trait BackgroundProfile<T: Copy + RealField>: Sync {
    /// `N` on spatial cell `spatial_index`
    fn density(&self, spatial_index: usize) -> T;
    /// `∫_0^x N` for `x` inside cell `spatial_index`
    fn integral_to(&self, x: T, spatial_index: usize) -> T;
    /// `∫_0^x ∫_0^y N` for `x` inside cell `spatial_index`
    fn double_integral_to(&self, x: T, spatial_index: usize) -> T;
    fn permittivity(&self) -> T;
    /// The coefficient `C_E` of the linear term of the potential, given `∫_0^L Q`
    fn boundary_constant(&self, integrated_charge: T, domain_length: T) -> T;
}

/// A neutralising background of unit density, closed by net neutrality `Φ(0) = Φ(L)`
#[derive(Copy, Clone, Debug, Default)]
pub struct Uniform;

impl<T: Copy + RealField> BackgroundProfile<T> for Uniform {
    fn density(&self, _spatial_index: usize) -> T {
        T::one()
    }

    fn integral_to(&self, x: T, _spatial_index: usize) -> T {
        x
    }

    fn double_integral_to(&self, x: T, _spatial_index: usize) -> T {
        x * x / (T::one() + T::one())
    }

    fn permittivity(&self) -> T {
        T::one()
    }

    fn boundary_constant(&self, integrated_charge: T, domain_length: T) -> T {
        boundary::neutral_boundary_constant(integrated_charge, domain_length)
    }
}

/// The background regime of a run, chosen once from configuration
#[derive(Clone, Debug)]
pub enum Regime<T> {
    Uniform,
    Doping(DopingProfile<T>),
}

impl<T: Copy + RealField> Regime<T> {
    /// Selects the regime from the run-wide doping flag
    pub fn select(
        doping: bool,
        parameters: Option<DopingParameters<T>>,
        grid: &PhaseSpaceGrid<T>,
    ) -> Result<Self, FieldError> {
        match (doping, parameters) {
            (false, _) => Ok(Regime::Uniform),
            (true, Some(parameters)) => Ok(Regime::Doping(DopingProfile::new(parameters, grid)?)),
            (true, None) => Err(FieldError::MissingDopingProfile),
        }
    }

    pub fn is_doped(&self) -> bool {
        matches!(self, Regime::Doping(_))
    }
}

impl<T: Copy + RealField> BackgroundProfile<T> for Regime<T> {
    fn density(&self, spatial_index: usize) -> T {
        match self {
            Regime::Uniform => BackgroundProfile::<T>::density(&Uniform, spatial_index),
            Regime::Doping(profile) => profile.density(spatial_index),
        }
    }

    fn integral_to(&self, x: T, spatial_index: usize) -> T {
        match self {
            Regime::Uniform => BackgroundProfile::<T>::integral_to(&Uniform, x, spatial_index),
            Regime::Doping(profile) => profile.integral_to(x, spatial_index),
        }
    }

    fn double_integral_to(&self, x: T, spatial_index: usize) -> T {
        match self {
            Regime::Uniform => BackgroundProfile::<T>::double_integral_to(&Uniform, x, spatial_index),
            Regime::Doping(profile) => profile.double_integral_to(x, spatial_index),
        }
    }

    fn permittivity(&self) -> T {
        match self {
            Regime::Uniform => BackgroundProfile::<T>::permittivity(&Uniform),
            Regime::Doping(profile) => profile.permittivity(),
        }
    }

    fn boundary_constant(&self, integrated_charge: T, domain_length: T) -> T {
        match self {
            Regime::Uniform => {
                BackgroundProfile::<T>::boundary_constant(&Uniform, integrated_charge, domain_length)
            }
            Regime::Doping(profile) => profile.boundary_constant(integrated_charge, domain_length),
        }
    }
}
