//! As-received assay fields, prior to normalization.
//!
//! This is the wire shape of the `AssayStore` contract: every measured
//! value still carries the unit tag the laboratory reported, and any
//! field may simply be absent. `RawAssayRecord::from_fields` is the only
//! consumer.

use crate::record::OilClass;
use serde::{Deserialize, Serialize};

/// A measured value with a reference temperature, both unit-tagged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasuredPoint {
    pub value: f64,
    pub unit: String,
    pub ref_temp: f64,
    pub temp_unit: String,
}

/// A scalar measurement with its unit tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasuredScalar {
    pub value: f64,
    pub unit: String,
}

/// One distillation cut: cumulative fraction evaporated at a vapor
/// temperature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CutField {
    pub fraction: f64,
    pub vapor_temp: f64,
    pub temp_unit: String,
}

/// Everything the assay store knows about one oil, as measured.
///
/// Missing fields stay missing; the estimator distinguishes "unknown"
/// from "measured as zero".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssayFields {
    pub identifier: String,

    #[serde(default)]
    pub product_class: OilClass,

    #[serde(default)]
    pub api_gravity: Option<f64>,

    #[serde(default)]
    pub densities: Vec<MeasuredPoint>,

    #[serde(default)]
    pub kinematic_viscosities: Vec<MeasuredPoint>,

    #[serde(default)]
    pub dynamic_viscosities: Vec<MeasuredPoint>,

    #[serde(default)]
    pub distillation_cuts: Vec<CutField>,

    #[serde(default)]
    pub pour_point: Option<MeasuredScalar>,

    #[serde(default)]
    pub flash_point: Option<MeasuredScalar>,

    #[serde(default)]
    pub boiling_point: Option<MeasuredScalar>,

    #[serde(default)]
    pub oil_water_tension: Option<MeasuredScalar>,

    #[serde(default)]
    pub oil_seawater_tension: Option<MeasuredScalar>,

    #[serde(default)]
    pub sulfur_fraction: Option<f64>,

    #[serde(default)]
    pub resin_fraction: Option<f64>,

    #[serde(default)]
    pub asphaltene_fraction: Option<f64>,
}

impl AssayFields {
    /// A bare record with just an identifier; every measurement absent.
    pub fn named(identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            product_class: OilClass::default(),
            api_gravity: None,
            densities: Vec::new(),
            kinematic_viscosities: Vec::new(),
            dynamic_viscosities: Vec::new(),
            distillation_cuts: Vec::new(),
            pour_point: None,
            flash_point: None,
            boiling_point: None,
            oil_water_tension: None,
            oil_seawater_tension: None,
            sulfur_fraction: None,
            resin_fraction: None,
            asphaltene_fraction: None,
        }
    }
}
