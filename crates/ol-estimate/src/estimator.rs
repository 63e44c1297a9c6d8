//! The estimation pipeline.

use crate::density::DensityCurve;
use crate::distillation::BoilingPointCurve;
use crate::error::EstimateResult;
use crate::params::EstimationParams;
use crate::resolved::{ResolutionFlag, ResolvedOilProperties};
use crate::scalars::derive_scalars;
use crate::viscosity::ViscosityCurve;
use ol_assay::{QualityFlag, RawAssayRecord};

/// Resolves raw assay records into queryable property sets.
///
/// Stateless apart from its parameters; `resolve` is deterministic, so
/// the same record and parameters always produce the same result.
#[derive(Debug, Clone, Default)]
pub struct Estimator {
    params: EstimationParams,
}

impl Estimator {
    pub fn new(params: EstimationParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &EstimationParams {
        &self.params
    }

    /// Run the full pipeline over one record.
    ///
    /// Density, viscosity and the boiling curve are required outputs:
    /// each fails with [`crate::EstimateError::InsufficientData`] when
    /// the record cannot support even its weakest fallback. Scalars are
    /// best-effort and never fail.
    pub fn resolve(&self, record: &RawAssayRecord) -> EstimateResult<ResolvedOilProperties> {
        let mut flags: Vec<ResolutionFlag> = record
            .quality_flags()
            .iter()
            .map(|f| match f {
                QualityFlag::NonMonotonicCuts => ResolutionFlag::NonMonotonicCuts,
            })
            .collect();

        let density = DensityCurve::build(record, &self.params, &mut flags)?;
        let viscosity = ViscosityCurve::build(record, &density, &self.params)?;
        let boiling_point = BoilingPointCurve::build(record, &self.params)?;
        let scalars = derive_scalars(record, &density, &viscosity, &boiling_point, &self.params);

        Ok(ResolvedOilProperties {
            identifier: record.identifier().to_string(),
            oil_class: record.oil_class(),
            density,
            viscosity,
            boiling_point,
            scalars,
            flags,
        })
    }
}
