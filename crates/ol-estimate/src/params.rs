//! Empirical estimation parameters.
//!
//! The coefficients here are published correlation constants from the
//! ADIOS lineage of weathering models, not values derivable from an
//! assay itself. They live in one configurable structure so a caller
//! with a better calibration can override any of them; the estimation
//! code never hard-codes a coefficient at a call site.

use ol_assay::OilClass;
use ol_core::units::constants::REF_TEMP_K;

/// Per-class fallback constants, selected by [`OilClass`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassDefaults {
    /// Volumetric thermal expansion coefficient for oils lighter than
    /// the API cutoff [1/K].
    pub thermal_expansion_light: f64,
    /// Volumetric thermal expansion coefficient for heavier oils [1/K].
    pub thermal_expansion_heavy: f64,
    /// Viscosity-temperature slope constant B in `ln ν = A + B/T` [K].
    pub viscosity_slope_k: f64,
}

impl Default for ClassDefaults {
    fn default() -> Self {
        Self {
            thermal_expansion_light: 0.0009,
            thermal_expansion_heavy: 0.0008,
            viscosity_slope_k: 2416.0,
        }
    }
}

/// Riazi–Daubert molecular weight correlation coefficients.
///
/// `MW = a * exp(b*Tb + c*SG + d*Tb*SG) * Tb^p * SG^q` with Tb in Kelvin
/// and SG the specific gravity at the reference temperature. Nominal
/// validity is roughly 70–700 g/mol.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RiaziDaubert {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub p: f64,
    pub q: f64,
}

impl Default for RiaziDaubert {
    fn default() -> Self {
        Self {
            a: 42.965,
            b: 2.097e-4,
            c: -7.787_12,
            d: 2.084_76e-3,
            p: 1.260_07,
            q: 4.983_08,
        }
    }
}

impl RiaziDaubert {
    pub fn molecular_weight(&self, boiling_point_k: f64, specific_gravity: f64) -> f64 {
        self.a
            * (self.b * boiling_point_k
                + self.c * specific_gravity
                + self.d * boiling_point_k * specific_gravity)
                .exp()
            * boiling_point_k.powf(self.p)
            * specific_gravity.powf(self.q)
    }
}

/// Configurable empirical parameters for the estimator.
#[derive(Debug, Clone, PartialEq)]
pub struct EstimationParams {
    /// API gravity scale numerator (141.5 in the standard definition).
    pub api_scale: f64,
    /// API gravity scale offset (131.5 in the standard definition).
    pub api_offset: f64,
    /// Density of the fresh water backing the API correlation [kg/m³].
    pub api_water_density: f64,
    /// Reference temperature for density and API gravity [K].
    pub ref_temp_k: f64,
    /// API gravity above which an oil counts as light when selecting
    /// the thermal-expansion default.
    pub light_api_cutoff: f64,
    /// Kinematic viscosity floor for clamped evaluations [m²/s].
    pub viscosity_floor_m2_s: f64,
    /// Pour point correlation constant [K].
    pub pour_point_coeff_k: f64,
    /// Flash point from the first cut temperature: `offset + slope * T`.
    pub flash_point_cut_offset_k: f64,
    pub flash_point_cut_slope: f64,
    /// Flash point from API gravity: `offset + slope * API`.
    pub flash_point_api_offset_k: f64,
    pub flash_point_api_slope: f64,
    /// Class-default fallback constants.
    pub crude: ClassDefaults,
    pub refined: ClassDefaults,
    /// Molecular weight correlation.
    pub riazi_daubert: RiaziDaubert,
}

impl Default for EstimationParams {
    fn default() -> Self {
        Self {
            api_scale: 141.5,
            api_offset: 131.5,
            api_water_density: 1000.0,
            ref_temp_k: REF_TEMP_K,
            light_api_cutoff: 30.0,
            viscosity_floor_m2_s: 1e-10,
            pour_point_coeff_k: 5000.0,
            flash_point_cut_offset_k: 117.0,
            flash_point_cut_slope: 0.69,
            flash_point_api_offset_k: 457.0,
            flash_point_api_slope: -3.34,
            crude: ClassDefaults::default(),
            refined: ClassDefaults::default(),
            riazi_daubert: RiaziDaubert::default(),
        }
    }
}

impl EstimationParams {
    pub fn class_defaults(&self, class: OilClass) -> &ClassDefaults {
        match class {
            OilClass::Crude => &self.crude,
            OilClass::Refined => &self.refined,
        }
    }

    /// Thermal expansion coefficient for an oil of the given class,
    /// using the API gravity to pick the light or heavy default when it
    /// is known.
    pub fn thermal_expansion(&self, class: OilClass, api: Option<f64>) -> f64 {
        let defaults = self.class_defaults(class);
        match api {
            Some(api) if api > self.light_api_cutoff => defaults.thermal_expansion_light,
            _ => defaults.thermal_expansion_heavy,
        }
    }

    /// Reference density [kg/m³] at `ref_temp_k` from API gravity.
    pub fn density_from_api(&self, api: f64) -> f64 {
        self.api_water_density * self.api_scale / (self.api_offset + api)
    }

    /// API gravity from the density [kg/m³] at `ref_temp_k`.
    pub fn api_from_density(&self, kg_m3: f64) -> f64 {
        self.api_scale * self.api_water_density / kg_m3 - self.api_offset
    }

    /// Pour point [K] estimated from a kinematic viscosity measurement.
    ///
    /// Returns None when the correlation degenerates (denominator not
    /// positive) rather than producing a non-physical temperature.
    pub fn pour_point_from_viscosity(&self, m2_s: f64, ref_temp_k: f64) -> Option<f64> {
        let c = self.pour_point_coeff_k;
        let denom = c - ref_temp_k * m2_s.ln();
        if denom <= 0.0 {
            return None;
        }
        let pp = c * ref_temp_k / denom;
        (pp.is_finite() && pp > 0.0).then_some(pp)
    }

    /// Flash point [K] from the lowest distillation cut temperature [K].
    pub fn flash_point_from_cut(&self, first_cut_temp_k: f64) -> f64 {
        self.flash_point_cut_offset_k + self.flash_point_cut_slope * first_cut_temp_k
    }

    /// Flash point [K] from API gravity.
    pub fn flash_point_from_api(&self, api: f64) -> f64 {
        self.flash_point_api_offset_k + self.flash_point_api_slope * api
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_density_round_trip() {
        let params = EstimationParams::default();
        for api in [10.0, 26.8, 35.0, 50.0] {
            let rho = params.density_from_api(api);
            let back = params.api_from_density(rho);
            assert!((back - api).abs() < 1e-9);
        }
    }

    #[test]
    fn api_ten_is_water_density() {
        // API 10 is defined as the density of water.
        let params = EstimationParams::default();
        let rho = params.density_from_api(10.0);
        assert!((rho - params.api_water_density).abs() < 1e-9);
    }

    #[test]
    fn thermal_expansion_selects_by_api() {
        let params = EstimationParams::default();
        let light = params.thermal_expansion(OilClass::Crude, Some(40.0));
        let heavy = params.thermal_expansion(OilClass::Crude, Some(20.0));
        let unknown = params.thermal_expansion(OilClass::Crude, None);
        assert!(light > heavy);
        assert_eq!(unknown, heavy);
    }

    #[test]
    fn pour_point_is_below_reference() {
        let params = EstimationParams::default();
        let pp = params
            .pour_point_from_viscosity(1.0e-5, 288.15)
            .expect("correlation should hold for a typical viscosity");
        assert!(pp > 0.0 && pp < 288.15);
    }

    #[test]
    fn molecular_weight_plausible_for_mid_distillate() {
        let rd = RiaziDaubert::default();
        let mw = rd.molecular_weight(400.0, 0.85);
        assert!((70.0..300.0).contains(&mw), "mw = {mw}");
    }
}
