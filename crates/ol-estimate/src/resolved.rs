//! The resolved, queryable property set for one oil.

use std::collections::BTreeMap;

use crate::density::DensityCurve;
use crate::distillation::BoilingPointCurve;
use crate::viscosity::{ViscosityCurve, ViscositySample};
use ol_assay::{OilClass, ScalarKind};
use ol_core::units::{Density, KinVisc, Temperature, k, kgm3, m2ps};

/// Provenance annotations attached to a resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionFlag {
    /// Distillation cuts were culled to restore monotonicity.
    NonMonotonicCuts,
    /// No density measurements existed; the density curve was pinned
    /// from API gravity alone.
    DensityEstimatedFromApi,
}

/// Immutable resolved properties for one oil.
///
/// Built once by [`crate::Estimator::resolve`] and safe to share across
/// threads; every evaluation is a pure function of the captured curves.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedOilProperties {
    pub(crate) identifier: String,
    pub(crate) oil_class: OilClass,
    pub(crate) density: DensityCurve,
    pub(crate) viscosity: ViscosityCurve,
    pub(crate) boiling_point: BoilingPointCurve,
    pub(crate) scalars: BTreeMap<ScalarKind, f64>,
    pub(crate) flags: Vec<ResolutionFlag>,
}

impl ResolvedOilProperties {
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn oil_class(&self) -> OilClass {
        self.oil_class
    }

    /// Density at a temperature.
    pub fn density_at(&self, temp: Temperature) -> Density {
        kgm3(self.density.at(temp.value))
    }

    /// Kinematic viscosity at a temperature, clamped positive.
    pub fn kinematic_viscosity_at(&self, temp: Temperature) -> KinVisc {
        m2ps(self.viscosity.at(temp.value))
    }

    /// Kinematic viscosity with its confidence annotation.
    pub fn viscosity_sample_at(&self, temp: Temperature) -> ViscositySample {
        self.viscosity.evaluate(temp.value)
    }

    /// Vapor temperature at a cumulative distilled fraction in [0, 1].
    pub fn boiling_point_at(&self, fraction: f64) -> Temperature {
        k(self.boiling_point.at(fraction))
    }

    pub fn density_curve(&self) -> &DensityCurve {
        &self.density
    }

    pub fn viscosity_curve(&self) -> &ViscosityCurve {
        &self.viscosity
    }

    pub fn boiling_point_curve(&self) -> &BoilingPointCurve {
        &self.boiling_point
    }

    /// A scalar property in its canonical unit, measured or derived.
    /// Absent when neither measurement nor correlation could supply it.
    pub fn scalar(&self, kind: ScalarKind) -> Option<f64> {
        self.scalars.get(&kind).copied()
    }

    pub fn scalars(&self) -> &BTreeMap<ScalarKind, f64> {
        &self.scalars
    }

    pub fn api_gravity(&self) -> Option<f64> {
        self.scalar(ScalarKind::ApiGravity)
    }

    pub fn flags(&self) -> &[ResolutionFlag] {
        &self.flags
    }
}
