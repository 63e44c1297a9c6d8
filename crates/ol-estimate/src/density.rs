//! Density-temperature resolution.

use crate::error::{EstimateError, EstimateResult};
use crate::interp::{lerp, segment};
use crate::params::EstimationParams;
use crate::resolved::ResolutionFlag;
use ol_assay::{DensityPoint, RawAssayRecord, ScalarKind};

/// Continuous density(T) function resolved from measured points.
///
/// Pure: evaluation depends only on the captured points/coefficients.
/// Outside the measured domain the curve extrapolates with the nearest
/// calibrated slope rather than failing.
#[derive(Debug, Clone, PartialEq)]
pub enum DensityCurve {
    /// Piecewise-linear through two or more measured points, with
    /// end-segment slopes continued outside the measured range.
    Interpolated { points: Vec<DensityPoint> },

    /// A single reference point expanded with a volumetric
    /// thermal-expansion coefficient.
    Expansion {
        ref_temp_k: f64,
        ref_kg_m3: f64,
        expansion_per_k: f64,
    },
}

impl DensityCurve {
    pub(crate) fn build(
        record: &RawAssayRecord,
        params: &EstimationParams,
        flags: &mut Vec<ResolutionFlag>,
    ) -> EstimateResult<Self> {
        let points = record.densities();
        let api = record.scalar(ScalarKind::ApiGravity);

        match points.len() {
            0 => {
                // Prefer estimation over total failure whenever any
                // usable scalar exists: API gravity pins a reference
                // density at 15 °C.
                let api = api.ok_or_else(|| {
                    EstimateError::insufficient(record.identifier(), "density")
                })?;
                flags.push(ResolutionFlag::DensityEstimatedFromApi);
                Ok(Self::Expansion {
                    ref_temp_k: params.ref_temp_k,
                    ref_kg_m3: params.density_from_api(api),
                    expansion_per_k: params.thermal_expansion(record.oil_class(), Some(api)),
                })
            }
            1 => {
                let p = points[0];
                let api = api.unwrap_or_else(|| params.api_from_density(p.kg_m3));
                Ok(Self::Expansion {
                    ref_temp_k: p.temp_k,
                    ref_kg_m3: p.kg_m3,
                    expansion_per_k: params.thermal_expansion(record.oil_class(), Some(api)),
                })
            }
            _ => Ok(Self::Interpolated {
                points: points.to_vec(),
            }),
        }
    }

    /// Density [kg/m³] at the given absolute temperature [K].
    pub fn at(&self, temp_k: f64) -> f64 {
        match self {
            Self::Interpolated { points } => {
                let (i, j) = segment(points, |p| p.temp_k, temp_k);
                lerp(
                    points[i].temp_k,
                    points[i].kg_m3,
                    points[j].temp_k,
                    points[j].kg_m3,
                    temp_k,
                )
            }
            Self::Expansion {
                ref_temp_k,
                ref_kg_m3,
                expansion_per_k,
            } => {
                // rho(T) = rho_ref / (1 - k * (T_ref - T)); the
                // denominator only approaches zero far outside any
                // physical temperature, where we pin it positive.
                let denom = (1.0 - expansion_per_k * (ref_temp_k - temp_k)).max(1e-3);
                ref_kg_m3 / denom
            }
        }
    }

    /// Temperature range covered by measurements [K]; degenerate for a
    /// single-point curve.
    pub fn domain(&self) -> (f64, f64) {
        match self {
            Self::Interpolated { points } => (
                points[0].temp_k,
                points[points.len() - 1].temp_k,
            ),
            Self::Expansion { ref_temp_k, .. } => (*ref_temp_k, *ref_temp_k),
        }
    }
}
