//! Kinematic viscosity resolution.
//!
//! Viscosity is modeled with the classical two-parameter exponential
//! `ln ν = A + B/T` (T absolute). With two or more measurements the
//! parameters come from a least-squares fit over all points; with one
//! measurement the class-default slope constant fills in for B.
//! Dynamic viscosity measurements are folded in by dividing by the
//! resolved density at their reference temperature.

use crate::density::DensityCurve;
use crate::error::{EstimateError, EstimateResult};
use crate::params::EstimationParams;
use ol_assay::{KinematicViscosityPoint, RawAssayRecord};

/// Two measurement temperatures closer than this count as the same point [K].
const TEMP_MATCH_TOL_K: f64 = 1e-6;

/// One evaluated viscosity, with its confidence annotation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViscositySample {
    pub m2_s: f64,
    /// True when the raw model value was non-positive or non-finite and
    /// the result was clamped to the configured floor.
    pub low_confidence: bool,
}

/// Continuous kinematic viscosity(T) function.
#[derive(Debug, Clone, PartialEq)]
pub struct ViscosityCurve {
    /// Intercept A of `ln ν = A + B/T`.
    ln_a: f64,
    /// Slope B [K].
    slope_k: f64,
    floor_m2_s: f64,
    /// The merged measurement set backing the fit, sorted by temperature.
    points: Vec<KinematicViscosityPoint>,
}

impl ViscosityCurve {
    pub(crate) fn build(
        record: &RawAssayRecord,
        density: &DensityCurve,
        params: &EstimationParams,
    ) -> EstimateResult<Self> {
        let mut points: Vec<KinematicViscosityPoint> = record.kinematic_viscosities().to_vec();

        // Fold in dynamic measurements; a measured kinematic point wins
        // over a converted one at the same temperature.
        for d in record.dynamic_viscosities() {
            if points
                .iter()
                .any(|p| (p.temp_k - d.temp_k).abs() < TEMP_MATCH_TOL_K)
            {
                continue;
            }
            let rho = density.at(d.temp_k);
            if rho > 0.0 {
                points.push(KinematicViscosityPoint {
                    temp_k: d.temp_k,
                    m2_s: d.pa_s / rho,
                });
            }
        }
        points.sort_by(|a, b| a.temp_k.total_cmp(&b.temp_k));

        let floor_m2_s = params.viscosity_floor_m2_s;
        match points.len() {
            0 => Err(EstimateError::insufficient(
                record.identifier(),
                "viscosity",
            )),
            1 => {
                let p = points[0];
                let slope_k = params
                    .class_defaults(record.oil_class())
                    .viscosity_slope_k;
                Ok(Self {
                    ln_a: p.m2_s.ln() - slope_k / p.temp_k,
                    slope_k,
                    floor_m2_s,
                    points,
                })
            }
            _ => {
                let (ln_a, slope_k) = fit_exponential(&points);
                Ok(Self {
                    ln_a,
                    slope_k,
                    floor_m2_s,
                    points,
                })
            }
        }
    }

    /// Evaluate at an absolute temperature [K], with the confidence
    /// annotation. The result is always strictly positive.
    pub fn evaluate(&self, temp_k: f64) -> ViscositySample {
        let nu = (self.ln_a + self.slope_k / temp_k).exp();
        if nu.is_finite() && nu > self.floor_m2_s {
            ViscositySample {
                m2_s: nu,
                low_confidence: false,
            }
        } else {
            ViscositySample {
                m2_s: self.floor_m2_s,
                low_confidence: true,
            }
        }
    }

    /// Kinematic viscosity [m²/s] at the given temperature [K].
    pub fn at(&self, temp_k: f64) -> f64 {
        self.evaluate(temp_k).m2_s
    }

    /// The merged measurement set backing the fit.
    pub fn points(&self) -> &[KinematicViscosityPoint] {
        &self.points
    }

    /// Temperature range covered by measurements [K].
    pub fn domain(&self) -> (f64, f64) {
        (
            self.points[0].temp_k,
            self.points[self.points.len() - 1].temp_k,
        )
    }
}

/// Least-squares fit of `ln ν = A + B/T` over all points.
fn fit_exponential(points: &[KinematicViscosityPoint]) -> (f64, f64) {
    let n = points.len() as f64;
    let x_mean = points.iter().map(|p| 1.0 / p.temp_k).sum::<f64>() / n;
    let y_mean = points.iter().map(|p| p.m2_s.ln()).sum::<f64>() / n;

    let mut sxx = 0.0;
    let mut sxy = 0.0;
    for p in points {
        let dx = 1.0 / p.temp_k - x_mean;
        let dy = p.m2_s.ln() - y_mean;
        sxx += dx * dx;
        sxy += dx * dy;
    }

    // Distinct temperatures make sxx positive; the guard only matters
    // for pathological near-equal inputs.
    let slope = if sxx > 0.0 { sxy / sxx } else { 0.0 };
    (y_mean - slope * x_mean, slope)
}
