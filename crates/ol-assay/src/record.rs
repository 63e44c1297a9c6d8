//! Normalized assay records.

use crate::error::{AssayError, AssayResult};
use crate::fields::{AssayFields, MeasuredPoint};
use ol_core::{Quantity, to_canonical};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Two temperatures closer than this are the same measurement point [K].
const TEMP_MERGE_TOL_K: f64 = 1e-6;

/// Product class of an oil, used to select class-default estimation
/// constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OilClass {
    #[default]
    Crude,
    Refined,
}

/// Scalar assay properties, stored in canonical units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ScalarKind {
    /// API gravity (dimensionless industry scale).
    ApiGravity,
    /// Density at the 15 °C reference temperature [kg/m³].
    ReferenceDensity,
    /// Pour point [K].
    PourPoint,
    /// Flash point [K].
    FlashPoint,
    /// Whole-oil boiling point [K].
    BoilingPoint,
    /// Oil/fresh-water interfacial tension [N/m].
    OilWaterTension,
    /// Oil/seawater interfacial tension [N/m].
    OilSeawaterTension,
    /// Sulfur content [mass fraction].
    SulfurFraction,
    /// Resin content [mass fraction].
    ResinFraction,
    /// Asphaltene content [mass fraction].
    AsphalteneFraction,
    /// Average molecular weight [g/mol].
    MolecularWeight,
}

/// A measured density [kg/m³] at a temperature [K].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DensityPoint {
    pub temp_k: f64,
    pub kg_m3: f64,
}

/// A measured kinematic viscosity [m²/s] at a temperature [K].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KinematicViscosityPoint {
    pub temp_k: f64,
    pub m2_s: f64,
}

/// A measured dynamic viscosity [Pa·s] at a temperature [K].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DynamicViscosityPoint {
    pub temp_k: f64,
    pub pa_s: f64,
}

/// One distillation cut after normalization.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DistillationCut {
    /// Cumulative fraction evaporated, in [0, 1].
    pub fraction: f64,
    /// Vapor temperature [K]; non-decreasing with fraction.
    pub vapor_temp_k: f64,
}

/// Non-fatal data-quality annotations recorded during normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QualityFlag {
    /// One or more distillation cuts violated the monotonic
    /// temperature-with-fraction invariant and were dropped.
    NonMonotonicCuts,
}

/// The immutable, as-measured data for one oil.
///
/// All temperatures are Kelvin, all values canonical SI. Density and
/// viscosity points are sorted ascending by temperature with duplicate
/// temperatures averaged; cuts are sorted by fraction with monotonicity
/// violations culled (and flagged). Constructed once via
/// [`RawAssayRecord::from_fields`]; never mutated by the estimator.
#[derive(Debug, Clone, PartialEq)]
pub struct RawAssayRecord {
    identifier: String,
    oil_class: OilClass,
    densities: Vec<DensityPoint>,
    kinematic_viscosities: Vec<KinematicViscosityPoint>,
    dynamic_viscosities: Vec<DynamicViscosityPoint>,
    cuts: Vec<DistillationCut>,
    scalars: BTreeMap<ScalarKind, f64>,
    quality_flags: Vec<QualityFlag>,
}

impl RawAssayRecord {
    /// Normalize loosely-typed assay fields into a canonical record.
    pub fn from_fields(fields: &AssayFields) -> AssayResult<Self> {
        let identifier = fields.identifier.trim().to_string();
        if identifier.is_empty() {
            return Err(AssayError::InvalidField {
                identifier,
                what: "empty identifier",
            });
        }

        let densities = normalize_points(
            &fields.densities,
            Quantity::Density,
            &identifier,
            "density",
        )?
        .into_iter()
        .map(|(temp_k, kg_m3)| DensityPoint { temp_k, kg_m3 })
        .collect();

        let kinematic_viscosities = normalize_points(
            &fields.kinematic_viscosities,
            Quantity::KinematicViscosity,
            &identifier,
            "kinematic viscosity",
        )?
        .into_iter()
        .map(|(temp_k, m2_s)| KinematicViscosityPoint { temp_k, m2_s })
        .collect();

        let dynamic_viscosities = normalize_points(
            &fields.dynamic_viscosities,
            Quantity::DynamicViscosity,
            &identifier,
            "dynamic viscosity",
        )?
        .into_iter()
        .map(|(temp_k, pa_s)| DynamicViscosityPoint { temp_k, pa_s })
        .collect();

        let mut quality_flags = Vec::new();
        let cuts = normalize_cuts(fields, &identifier, &mut quality_flags)?;
        let scalars = normalize_scalars(fields, &identifier)?;

        Ok(Self {
            identifier,
            oil_class: fields.product_class,
            densities,
            kinematic_viscosities,
            dynamic_viscosities,
            cuts,
            scalars,
            quality_flags,
        })
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn oil_class(&self) -> OilClass {
        self.oil_class
    }

    /// Measured densities, sorted ascending by temperature.
    pub fn densities(&self) -> &[DensityPoint] {
        &self.densities
    }

    /// Measured kinematic viscosities, sorted ascending by temperature.
    pub fn kinematic_viscosities(&self) -> &[KinematicViscosityPoint] {
        &self.kinematic_viscosities
    }

    /// Measured dynamic viscosities, sorted ascending by temperature.
    pub fn dynamic_viscosities(&self) -> &[DynamicViscosityPoint] {
        &self.dynamic_viscosities
    }

    /// Distillation cuts, sorted by fraction, monotone in temperature.
    pub fn cuts(&self) -> &[DistillationCut] {
        &self.cuts
    }

    /// A measured scalar in its canonical unit, or None if the lab did
    /// not report it.
    pub fn scalar(&self, kind: ScalarKind) -> Option<f64> {
        self.scalars.get(&kind).copied()
    }

    pub fn scalars(&self) -> &BTreeMap<ScalarKind, f64> {
        &self.scalars
    }

    pub fn quality_flags(&self) -> &[QualityFlag] {
        &self.quality_flags
    }
}

/// Convert, validate, sort and merge one measurement list.
///
/// Returns (temp_k, canonical value) pairs sorted ascending by temperature
/// with points at the same temperature averaged.
fn normalize_points(
    points: &[MeasuredPoint],
    quantity: Quantity,
    identifier: &str,
    what: &'static str,
) -> AssayResult<Vec<(f64, f64)>> {
    let mut converted = Vec::with_capacity(points.len());
    for p in points {
        let temp_k = to_canonical(p.ref_temp, &p.temp_unit, Quantity::Temperature)?;
        let value = to_canonical(p.value, &p.unit, quantity)?;

        if !temp_k.is_finite() || temp_k <= 0.0 {
            return Err(AssayError::InvalidField {
                identifier: identifier.to_string(),
                what: "non-positive absolute temperature",
            });
        }
        if !value.is_finite() || value <= 0.0 {
            return Err(AssayError::InvalidField {
                identifier: identifier.to_string(),
                what,
            });
        }

        converted.push((temp_k, value));
    }

    converted.sort_by(|a, b| a.0.total_cmp(&b.0));

    // Average runs of points at the same temperature: accumulate the
    // sum and count per run, divide once at the end.
    let mut runs: Vec<(f64, f64, usize)> = Vec::with_capacity(converted.len());
    for (temp_k, value) in converted {
        match runs.last_mut() {
            Some((prev_t, sum, n)) if (temp_k - *prev_t).abs() < TEMP_MERGE_TOL_K => {
                *sum += value;
                *n += 1;
            }
            _ => runs.push((temp_k, value, 1)),
        }
    }

    Ok(runs
        .into_iter()
        .map(|(temp_k, sum, n)| (temp_k, sum / n as f64))
        .collect())
}

fn normalize_cuts(
    fields: &AssayFields,
    identifier: &str,
    quality_flags: &mut Vec<QualityFlag>,
) -> AssayResult<Vec<DistillationCut>> {
    let mut cuts = Vec::with_capacity(fields.distillation_cuts.len());
    for c in &fields.distillation_cuts {
        let vapor_temp_k = to_canonical(c.vapor_temp, &c.temp_unit, Quantity::Temperature)?;

        if !c.fraction.is_finite() || !(0.0..=1.0).contains(&c.fraction) {
            return Err(AssayError::InvalidField {
                identifier: identifier.to_string(),
                what: "cut fraction outside [0, 1]",
            });
        }
        if !vapor_temp_k.is_finite() || vapor_temp_k <= 0.0 {
            return Err(AssayError::InvalidField {
                identifier: identifier.to_string(),
                what: "non-positive cut vapor temperature",
            });
        }

        cuts.push(DistillationCut {
            fraction: c.fraction,
            vapor_temp_k,
        });
    }

    cuts.sort_by(|a, b| a.fraction.total_cmp(&b.fraction));

    // Cull cuts that would make temperature decrease with fraction, or
    // that repeat a fraction. Degraded but usable; flag it.
    let mut culled: Vec<DistillationCut> = Vec::with_capacity(cuts.len());
    let mut dropped = false;
    for cut in cuts {
        match culled.last() {
            Some(prev) if cut.vapor_temp_k < prev.vapor_temp_k => dropped = true,
            Some(prev) if cut.fraction <= prev.fraction => dropped = true,
            _ => culled.push(cut),
        }
    }
    if dropped {
        quality_flags.push(QualityFlag::NonMonotonicCuts);
    }

    Ok(culled)
}

fn normalize_scalars(
    fields: &AssayFields,
    identifier: &str,
) -> AssayResult<BTreeMap<ScalarKind, f64>> {
    let mut scalars = BTreeMap::new();

    if let Some(api) = fields.api_gravity {
        if !api.is_finite() {
            return Err(AssayError::InvalidField {
                identifier: identifier.to_string(),
                what: "non-finite API gravity",
            });
        }
        scalars.insert(ScalarKind::ApiGravity, api);
    }

    for (kind, measured) in [
        (ScalarKind::PourPoint, &fields.pour_point),
        (ScalarKind::FlashPoint, &fields.flash_point),
        (ScalarKind::BoilingPoint, &fields.boiling_point),
    ] {
        if let Some(m) = measured {
            let temp_k = to_canonical(m.value, &m.unit, Quantity::Temperature)?;
            if !temp_k.is_finite() || temp_k <= 0.0 {
                return Err(AssayError::InvalidField {
                    identifier: identifier.to_string(),
                    what: "non-positive scalar temperature",
                });
            }
            scalars.insert(kind, temp_k);
        }
    }

    // Interfacial tensions pass through as measured; they are never
    // estimated from other properties.
    for (kind, measured) in [
        (ScalarKind::OilWaterTension, &fields.oil_water_tension),
        (ScalarKind::OilSeawaterTension, &fields.oil_seawater_tension),
    ] {
        if let Some(m) = measured {
            let n_m = to_canonical(m.value, &m.unit, Quantity::InterfacialTension)?;
            if !n_m.is_finite() || n_m <= 0.0 {
                return Err(AssayError::InvalidField {
                    identifier: identifier.to_string(),
                    what: "non-positive interfacial tension",
                });
            }
            scalars.insert(kind, n_m);
        }
    }

    for (kind, fraction) in [
        (ScalarKind::SulfurFraction, fields.sulfur_fraction),
        (ScalarKind::ResinFraction, fields.resin_fraction),
        (ScalarKind::AsphalteneFraction, fields.asphaltene_fraction),
    ] {
        if let Some(f) = fraction {
            if !f.is_finite() || !(0.0..=1.0).contains(&f) {
                return Err(AssayError::InvalidField {
                    identifier: identifier.to_string(),
                    what: "mass fraction outside [0, 1]",
                });
            }
            scalars.insert(kind, f);
        }
    }

    Ok(scalars)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::{CutField, MeasuredScalar};

    fn point(value: f64, unit: &str, ref_temp: f64, temp_unit: &str) -> MeasuredPoint {
        MeasuredPoint {
            value,
            unit: unit.into(),
            ref_temp,
            temp_unit: temp_unit.into(),
        }
    }

    #[test]
    fn temperatures_become_kelvin() {
        let mut fields = AssayFields::named("alpha");
        fields.densities = vec![point(0.9, "g/ml", 15.0, "C")];

        let record = RawAssayRecord::from_fields(&fields).unwrap();
        let d = record.densities()[0];
        assert!((d.temp_k - 288.15).abs() < 1e-9);
        assert!((d.kg_m3 - 900.0).abs() < 1e-9);
    }

    #[test]
    fn duplicate_temperatures_are_averaged_and_sorted() {
        let mut fields = AssayFields::named("alpha");
        fields.densities = vec![
            point(920.0, "kg/m^3", 50.0, "C"),
            point(900.0, "kg/m^3", 0.0, "C"),
            point(910.0, "kg/m^3", 0.0, "C"),
        ];

        let record = RawAssayRecord::from_fields(&fields).unwrap();
        let temps: Vec<f64> = record.densities().iter().map(|d| d.temp_k).collect();
        assert_eq!(record.densities().len(), 2);
        assert!(temps[0] < temps[1]);
        assert!((record.densities()[0].kg_m3 - 905.0).abs() < 1e-9);
    }

    #[test]
    fn three_duplicates_average_to_the_mean_in_any_order() {
        for densities in [[900.0, 910.0, 920.0], [920.0, 910.0, 900.0]] {
            let mut fields = AssayFields::named("alpha");
            fields.densities = densities
                .iter()
                .map(|&kg_m3| point(kg_m3, "kg/m^3", 15.0, "C"))
                .collect();

            let record = RawAssayRecord::from_fields(&fields).unwrap();
            assert_eq!(record.densities().len(), 1);
            assert!((record.densities()[0].kg_m3 - 910.0).abs() < 1e-9);
        }
    }

    #[test]
    fn non_monotonic_cuts_are_culled_and_flagged() {
        let mut fields = AssayFields::named("alpha");
        fields.distillation_cuts = vec![
            CutField {
                fraction: 0.1,
                vapor_temp: 350.0,
                temp_unit: "K".into(),
            },
            CutField {
                fraction: 0.3,
                vapor_temp: 340.0, // decreases: dropped
                temp_unit: "K".into(),
            },
            CutField {
                fraction: 0.5,
                vapor_temp: 420.0,
                temp_unit: "K".into(),
            },
        ];

        let record = RawAssayRecord::from_fields(&fields).unwrap();
        assert_eq!(record.cuts().len(), 2);
        assert_eq!(record.quality_flags(), &[QualityFlag::NonMonotonicCuts]);
    }

    #[test]
    fn well_formed_cuts_carry_no_flag() {
        let mut fields = AssayFields::named("alpha");
        fields.distillation_cuts = vec![
            CutField {
                fraction: 0.1,
                vapor_temp: 350.0,
                temp_unit: "K".into(),
            },
            CutField {
                fraction: 0.5,
                vapor_temp: 420.0,
                temp_unit: "K".into(),
            },
        ];

        let record = RawAssayRecord::from_fields(&fields).unwrap();
        assert!(record.quality_flags().is_empty());
    }

    #[test]
    fn missing_scalars_stay_absent() {
        let fields = AssayFields::named("alpha");
        let record = RawAssayRecord::from_fields(&fields).unwrap();
        assert!(record.scalar(ScalarKind::ApiGravity).is_none());
        assert!(record.scalar(ScalarKind::SulfurFraction).is_none());
        assert!(record.scalars().is_empty());
    }

    #[test]
    fn scalar_temperatures_are_converted() {
        let mut fields = AssayFields::named("alpha");
        fields.pour_point = Some(MeasuredScalar {
            value: -30.0,
            unit: "C".into(),
        });

        let record = RawAssayRecord::from_fields(&fields).unwrap();
        let pp = record.scalar(ScalarKind::PourPoint).unwrap();
        assert!((pp - 243.15).abs() < 1e-9);
    }

    #[test]
    fn interfacial_tensions_convert_to_newtons_per_meter() {
        let mut fields = AssayFields::named("alpha");
        fields.oil_water_tension = Some(MeasuredScalar {
            value: 25.0,
            unit: "dyne/cm".into(),
        });

        let record = RawAssayRecord::from_fields(&fields).unwrap();
        let tension = record.scalar(ScalarKind::OilWaterTension).unwrap();
        assert!((tension - 0.025).abs() < 1e-12);
        assert!(record.scalar(ScalarKind::OilSeawaterTension).is_none());
    }

    #[test]
    fn rejects_negative_density() {
        let mut fields = AssayFields::named("alpha");
        fields.densities = vec![point(-1.0, "kg/m^3", 288.15, "K")];
        let err = RawAssayRecord::from_fields(&fields).unwrap_err();
        assert!(matches!(err, AssayError::InvalidField { .. }));
    }

    #[test]
    fn rejects_unknown_unit() {
        let mut fields = AssayFields::named("alpha");
        fields.densities = vec![point(900.0, "smoots", 288.15, "K")];
        let err = RawAssayRecord::from_fields(&fields).unwrap_err();
        assert!(matches!(err, AssayError::Unit(_)));
    }

    #[test]
    fn rejects_cut_fraction_out_of_range() {
        let mut fields = AssayFields::named("alpha");
        fields.distillation_cuts = vec![CutField {
            fraction: 1.2,
            vapor_temp: 400.0,
            temp_unit: "K".into(),
        }];
        let err = RawAssayRecord::from_fields(&fields).unwrap_err();
        assert!(matches!(err, AssayError::InvalidField { .. }));
    }
}
