//! Best-effort derivation of scalar properties.
//!
//! Measured scalars always win; an estimate is only inserted where the
//! assay left the slot empty and a correlation has enough inputs to
//! produce a finite, physical value. A scalar that cannot be derived is
//! simply absent, never an error.

use std::collections::BTreeMap;

use crate::density::DensityCurve;
use crate::distillation::BoilingPointCurve;
use crate::params::EstimationParams;
use crate::viscosity::ViscosityCurve;
use ol_assay::{RawAssayRecord, ScalarKind};

pub(crate) fn derive_scalars(
    record: &RawAssayRecord,
    density: &DensityCurve,
    viscosity: &ViscosityCurve,
    boiling: &BoilingPointCurve,
    params: &EstimationParams,
) -> BTreeMap<ScalarKind, f64> {
    let mut scalars = record.scalars().clone();

    let ref_kg_m3 = density.at(params.ref_temp_k);
    scalars
        .entry(ScalarKind::ReferenceDensity)
        .or_insert(ref_kg_m3);

    scalars
        .entry(ScalarKind::ApiGravity)
        .or_insert_with(|| params.api_from_density(ref_kg_m3));
    let api = scalars[&ScalarKind::ApiGravity];

    if !scalars.contains_key(&ScalarKind::PourPoint) {
        let coldest = viscosity.points()[0];
        if let Some(pp) = params.pour_point_from_viscosity(coldest.m2_s, coldest.temp_k) {
            scalars.insert(ScalarKind::PourPoint, pp);
        }
    }

    if !scalars.contains_key(&ScalarKind::FlashPoint) {
        let fp = match record.cuts().first() {
            Some(cut) => params.flash_point_from_cut(cut.vapor_temp_k),
            None => params.flash_point_from_api(api),
        };
        if fp.is_finite() && fp > 0.0 {
            scalars.insert(ScalarKind::FlashPoint, fp);
        }
    }

    if !scalars.contains_key(&ScalarKind::BoilingPoint) && !record.cuts().is_empty() {
        scalars.insert(ScalarKind::BoilingPoint, boiling.at(0.5));
    }

    if !scalars.contains_key(&ScalarKind::MolecularWeight) {
        if let Some(&tb) = scalars.get(&ScalarKind::BoilingPoint) {
            let sg = ref_kg_m3 / params.api_water_density;
            let mw = params.riazi_daubert.molecular_weight(tb, sg);
            if mw.is_finite() && mw > 0.0 {
                scalars.insert(ScalarKind::MolecularWeight, mw);
            }
        }
    }

    scalars
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EstimateResult;
    use crate::resolved::ResolutionFlag;
    use ol_assay::{AssayFields, CutField, MeasuredPoint, MeasuredScalar};

    fn derive(fields: &AssayFields) -> EstimateResult<BTreeMap<ScalarKind, f64>> {
        let params = EstimationParams::default();
        let record = RawAssayRecord::from_fields(fields).unwrap();
        let mut flags: Vec<ResolutionFlag> = Vec::new();
        let density = DensityCurve::build(&record, &params, &mut flags)?;
        let viscosity = ViscosityCurve::build(&record, &density, &params)?;
        let boiling = BoilingPointCurve::build(&record, &params)?;
        Ok(derive_scalars(&record, &density, &viscosity, &boiling, &params))
    }

    fn base_fields() -> AssayFields {
        let mut fields = AssayFields::named("test-oil");
        fields.densities = vec![MeasuredPoint {
            value: 900.0,
            unit: "kg/m^3".into(),
            ref_temp: 15.0,
            temp_unit: "C".into(),
        }];
        fields.kinematic_viscosities = vec![MeasuredPoint {
            value: 50.0,
            unit: "cSt".into(),
            ref_temp: 15.0,
            temp_unit: "C".into(),
        }];
        fields.distillation_cuts = vec![
            CutField {
                fraction: 0.1,
                vapor_temp: 100.0,
                temp_unit: "C".into(),
            },
            CutField {
                fraction: 0.9,
                vapor_temp: 500.0,
                temp_unit: "C".into(),
            },
        ];
        fields
    }

    #[test]
    fn reference_density_and_api_are_derived() {
        let scalars = derive(&base_fields()).unwrap();
        let rho = scalars[&ScalarKind::ReferenceDensity];
        assert!((rho - 900.0).abs() < 1e-9);

        let params = EstimationParams::default();
        let api = scalars[&ScalarKind::ApiGravity];
        assert!((api - params.api_from_density(900.0)).abs() < 1e-9);
    }

    #[test]
    fn measured_api_wins_over_derived() {
        let mut fields = base_fields();
        fields.api_gravity = Some(42.0);
        let scalars = derive(&fields).unwrap();
        assert_eq!(scalars[&ScalarKind::ApiGravity], 42.0);
    }

    #[test]
    fn flash_point_prefers_first_cut() {
        let scalars = derive(&base_fields()).unwrap();
        let params = EstimationParams::default();
        let expected = params.flash_point_from_cut(373.15);
        assert!((scalars[&ScalarKind::FlashPoint] - expected).abs() < 1e-9);
    }

    #[test]
    fn flash_point_falls_back_to_api() {
        let mut fields = base_fields();
        fields.distillation_cuts.clear();
        fields.boiling_point = Some(MeasuredScalar {
            value: 400.0,
            unit: "K".into(),
        });
        let scalars = derive(&fields).unwrap();

        let params = EstimationParams::default();
        let api = scalars[&ScalarKind::ApiGravity];
        let expected = params.flash_point_from_api(api);
        assert!((scalars[&ScalarKind::FlashPoint] - expected).abs() < 1e-9);
    }

    #[test]
    fn boiling_point_is_midpoint_of_cuts() {
        let scalars = derive(&base_fields()).unwrap();
        // midpoint fraction 0.5 between (0.1, 373.15 K) and (0.9, 773.15 K)
        assert!((scalars[&ScalarKind::BoilingPoint] - 573.15).abs() < 1e-9);
    }

    #[test]
    fn molecular_weight_is_derived_when_possible() {
        let scalars = derive(&base_fields()).unwrap();
        let mw = scalars[&ScalarKind::MolecularWeight];
        assert!(mw > 0.0 && mw.is_finite());
    }

    #[test]
    fn measured_pour_point_survives() {
        let mut fields = base_fields();
        fields.pour_point = Some(MeasuredScalar {
            value: -30.0,
            unit: "C".into(),
        });
        let scalars = derive(&fields).unwrap();
        assert!((scalars[&ScalarKind::PourPoint] - 243.15).abs() < 1e-9);
    }
}
