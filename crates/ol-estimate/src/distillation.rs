//! Boiling point curve over cumulative mass fraction.

use crate::error::{EstimateError, EstimateResult};
use crate::interp::{lerp, segment};
use crate::params::EstimationParams;
use ol_assay::{DistillationCut, RawAssayRecord, ScalarKind};

/// Vapor temperature as a function of cumulative distilled fraction.
///
/// Backed by the assay's distillation cuts when present, otherwise by a
/// single bulk boiling point pinned at the midpoint fraction. Always
/// holds at least one cut.
#[derive(Debug, Clone, PartialEq)]
pub struct BoilingPointCurve {
    cuts: Vec<DistillationCut>,
}

impl BoilingPointCurve {
    pub(crate) fn build(
        record: &RawAssayRecord,
        _params: &EstimationParams,
    ) -> EstimateResult<Self> {
        let cuts = record.cuts();
        if !cuts.is_empty() {
            return Ok(Self {
                cuts: cuts.to_vec(),
            });
        }
        if let Some(bp) = record.scalar(ScalarKind::BoilingPoint) {
            return Ok(Self {
                cuts: vec![DistillationCut {
                    fraction: 0.5,
                    vapor_temp_k: bp,
                }],
            });
        }
        Err(EstimateError::insufficient(
            record.identifier(),
            "distillation curve",
        ))
    }

    /// Vapor temperature [K] at the given cumulative fraction.
    ///
    /// Fractions are clamped to [0, 1]. Queries beyond the last cut
    /// continue the end segment with its slope floored at zero so the
    /// curve never decreases.
    pub fn at(&self, fraction: f64) -> f64 {
        let f = fraction.clamp(0.0, 1.0);
        if self.cuts.len() == 1 {
            return self.cuts[0].vapor_temp_k;
        }

        let (i, j) = segment(&self.cuts, |c| c.fraction, f);
        let (c0, c1) = (&self.cuts[i], &self.cuts[j]);
        if f >= c0.fraction && f <= c1.fraction {
            return lerp(c0.fraction, c0.vapor_temp_k, c1.fraction, c1.vapor_temp_k, f);
        }

        // Outside the measured cuts: extrapolate with a non-negative slope.
        let slope =
            ((c1.vapor_temp_k - c0.vapor_temp_k) / (c1.fraction - c0.fraction)).max(0.0);
        if f < c0.fraction {
            c0.vapor_temp_k - slope * (c0.fraction - f)
        } else {
            c1.vapor_temp_k + slope * (f - c1.fraction)
        }
    }

    /// The resolved cuts, sorted by fraction.
    pub fn cuts(&self) -> &[DistillationCut] {
        &self.cuts
    }
}
