//! Unit conversion for assay ingestion.
//!
//! Laboratory measurements arrive in whatever units the source datasheet
//! used. Every value is converted to a canonical SI unit at ingestion so
//! the rest of the library never sees a unit tag again.
//!
//! Each quantity kind owns a read-only table of `(aliases, factor, offset)`
//! rows where `canonical = value * factor + offset`. The affine form makes
//! temperature scales (Celsius, Fahrenheit, Rankine) exact rather than
//! special-cased. The tables are `static` and never mutated, so concurrent
//! lookups need no locking.

use std::fmt;
use thiserror::Error;

/// Dimension/quantity family for a measured value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Quantity {
    /// Temperature (canonical: K)
    Temperature,
    /// Density (canonical: kg/m³)
    Density,
    /// Kinematic viscosity (canonical: m²/s)
    KinematicViscosity,
    /// Dynamic viscosity (canonical: Pa·s)
    DynamicViscosity,
    /// Mass (canonical: kg)
    Mass,
    /// Volume (canonical: m³)
    Volume,
    /// Absolute pressure (canonical: Pa)
    Pressure,
    /// Interfacial tension (canonical: N/m)
    InterfacialTension,
}

impl Quantity {
    pub const ALL: [Quantity; 8] = [
        Quantity::Temperature,
        Quantity::Density,
        Quantity::KinematicViscosity,
        Quantity::DynamicViscosity,
        Quantity::Mass,
        Quantity::Volume,
        Quantity::Pressure,
        Quantity::InterfacialTension,
    ];

    /// Canonical unit tag for this quantity kind.
    pub fn canonical_unit(self) -> &'static str {
        match self {
            Self::Temperature => "K",
            Self::Density => "kg/m^3",
            Self::KinematicViscosity => "m^2/s",
            Self::DynamicViscosity => "Pa.s",
            Self::Mass => "kg",
            Self::Volume => "m^3",
            Self::Pressure => "Pa",
            Self::InterfacialTension => "N/m",
        }
    }

    fn table(self) -> &'static [UnitDef] {
        match self {
            Self::Temperature => &TEMPERATURE_UNITS,
            Self::Density => &DENSITY_UNITS,
            Self::KinematicViscosity => &KINEMATIC_VISCOSITY_UNITS,
            Self::DynamicViscosity => &DYNAMIC_VISCOSITY_UNITS,
            Self::Mass => &MASS_UNITS,
            Self::Volume => &VOLUME_UNITS,
            Self::Pressure => &PRESSURE_UNITS,
            Self::InterfacialTension => &TENSION_UNITS,
        }
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Temperature => write!(f, "temperature"),
            Self::Density => write!(f, "density"),
            Self::KinematicViscosity => write!(f, "kinematic viscosity"),
            Self::DynamicViscosity => write!(f, "dynamic viscosity"),
            Self::Mass => write!(f, "mass"),
            Self::Volume => write!(f, "volume"),
            Self::Pressure => write!(f, "pressure"),
            Self::InterfacialTension => write!(f, "interfacial tension"),
        }
    }
}

/// Errors from the unit conversion registry.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum UnitError {
    /// The unit tag is registered nowhere.
    #[error("Unsupported unit '{unit}' for {quantity}")]
    UnsupportedUnit { unit: String, quantity: Quantity },

    /// The unit tag exists, but under a different quantity kind.
    #[error("Unit '{unit}' measures {actual}, not {requested}")]
    IncompatibleKind {
        unit: String,
        requested: Quantity,
        actual: Quantity,
    },
}

/// One registered unit: `canonical = value * factor + offset`.
struct UnitDef {
    aliases: &'static [&'static str],
    factor: f64,
    offset: f64,
}

const fn scaled(aliases: &'static [&'static str], factor: f64) -> UnitDef {
    UnitDef {
        aliases,
        factor,
        offset: 0.0,
    }
}

static TEMPERATURE_UNITS: [UnitDef; 4] = [
    scaled(&["k", "kelvin"], 1.0),
    UnitDef {
        aliases: &["c", "°c", "celsius"],
        factor: 1.0,
        offset: 273.15,
    },
    UnitDef {
        aliases: &["f", "°f", "fahrenheit"],
        factor: 5.0 / 9.0,
        offset: 459.67 * 5.0 / 9.0,
    },
    scaled(&["r", "°r", "rankine"], 5.0 / 9.0),
];

static DENSITY_UNITS: [UnitDef; 5] = [
    scaled(&["kg/m^3", "kg/m3", "kg/m³"], 1.0),
    scaled(&["g/cm^3", "g/cm3", "g/cm³", "g/ml", "g/cc"], 1000.0),
    scaled(&["g/l"], 1.0),
    scaled(&["kg/l"], 1000.0),
    scaled(&["lb/ft^3", "lb/ft3"], 16.018_463),
];

static KINEMATIC_VISCOSITY_UNITS: [UnitDef; 3] = [
    scaled(&["m^2/s", "m2/s", "m²/s"], 1.0),
    scaled(&["cst", "mm^2/s", "mm2/s"], 1e-6),
    scaled(&["st", "stokes", "cm^2/s"], 1e-4),
];

static DYNAMIC_VISCOSITY_UNITS: [UnitDef; 3] = [
    scaled(&["pa.s", "pa*s", "pa s", "kg/ms", "kg/(m.s)"], 1.0),
    scaled(&["mpa.s", "mpa*s", "mpa s", "cp"], 1e-3),
    scaled(&["p", "poise"], 0.1),
];

static MASS_UNITS: [UnitDef; 4] = [
    scaled(&["kg"], 1.0),
    scaled(&["g"], 1e-3),
    scaled(&["t", "tonne", "mt"], 1000.0),
    scaled(&["lb", "lbs"], 0.453_592_37),
];

static VOLUME_UNITS: [UnitDef; 5] = [
    scaled(&["m^3", "m3", "m³"], 1.0),
    scaled(&["l", "liter", "litre"], 1e-3),
    scaled(&["ml"], 1e-6),
    scaled(&["bbl", "barrel"], 0.158_987_294_928),
    scaled(&["gal", "gallon"], 3.785_411_784e-3),
];

static TENSION_UNITS: [UnitDef; 2] = [
    scaled(&["n/m"], 1.0),
    scaled(&["mn/m", "dyne/cm", "dyn/cm"], 1e-3),
];

static PRESSURE_UNITS: [UnitDef; 6] = [
    scaled(&["pa"], 1.0),
    scaled(&["kpa"], 1e3),
    scaled(&["bar"], 1e5),
    scaled(&["atm"], 101_325.0),
    scaled(&["psi"], 6_894.757),
    scaled(&["mmhg", "torr"], 133.322),
];

fn find(quantity: Quantity, unit: &str) -> Option<&'static UnitDef> {
    let needle = unit.trim().to_lowercase();
    quantity
        .table()
        .iter()
        .find(|def| def.aliases.contains(&needle.as_str()))
}

fn resolve(quantity: Quantity, unit: &str) -> Result<&'static UnitDef, UnitError> {
    if let Some(def) = find(quantity, unit) {
        return Ok(def);
    }

    // Distinguish "no such unit" from "right unit, wrong dimension".
    for other in Quantity::ALL {
        if other != quantity && find(other, unit).is_some() {
            return Err(UnitError::IncompatibleKind {
                unit: unit.trim().to_string(),
                requested: quantity,
                actual: other,
            });
        }
    }

    Err(UnitError::UnsupportedUnit {
        unit: unit.trim().to_string(),
        quantity,
    })
}

/// Convert `value` between two registered units of the same quantity kind.
pub fn convert(
    value: f64,
    from_unit: &str,
    to_unit: &str,
    quantity: Quantity,
) -> Result<f64, UnitError> {
    let from = resolve(quantity, from_unit)?;
    let to = resolve(quantity, to_unit)?;

    let canonical = value * from.factor + from.offset;
    Ok((canonical - to.offset) / to.factor)
}

/// Convert `value` from the given unit into the quantity's canonical unit.
pub fn to_canonical(value: f64, from_unit: &str, quantity: Quantity) -> Result<f64, UnitError> {
    let from = resolve(quantity, from_unit)?;
    Ok(value * from.factor + from.offset)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn temperature_affine_correctness() {
        let f = convert(0.0, "C", "F", Quantity::Temperature).unwrap();
        assert!((f - 32.0).abs() < 1e-9);

        let kelvin = convert(100.0, "Celsius", "K", Quantity::Temperature).unwrap();
        assert!((kelvin - 373.15).abs() < 1e-9);

        let rankine = convert(0.0, "C", "R", Quantity::Temperature).unwrap();
        assert!((rankine - 491.67).abs() < 1e-9);
    }

    #[test]
    fn density_scaling() {
        let kg_m3 = to_canonical(0.85, "g/ml", Quantity::Density).unwrap();
        assert!((kg_m3 - 850.0).abs() < 1e-9);
    }

    #[test]
    fn viscosity_scaling() {
        let m2_s = to_canonical(12.0, "cSt", Quantity::KinematicViscosity).unwrap();
        assert!((m2_s - 1.2e-5).abs() < 1e-15);

        let pa_s = to_canonical(40.0, "cP", Quantity::DynamicViscosity).unwrap();
        assert!((pa_s - 0.04).abs() < 1e-12);
    }

    #[test]
    fn tension_scaling() {
        let n_m = to_canonical(25.0, "dyne/cm", Quantity::InterfacialTension).unwrap();
        assert!((n_m - 0.025).abs() < 1e-12);
    }

    #[test]
    fn unsupported_unit() {
        let err = convert(1.0, "furlong", "K", Quantity::Temperature).unwrap_err();
        assert!(matches!(err, UnitError::UnsupportedUnit { unit, .. } if unit == "furlong"));
    }

    #[test]
    fn incompatible_kind() {
        let err = convert(900.0, "kg/m^3", "K", Quantity::Temperature).unwrap_err();
        assert!(matches!(
            err,
            UnitError::IncompatibleKind {
                requested: Quantity::Temperature,
                actual: Quantity::Density,
                ..
            }
        ));
    }

    #[test]
    fn aliases_are_unique_across_kinds() {
        let mut seen = std::collections::HashSet::new();
        for quantity in Quantity::ALL {
            for def in quantity.table() {
                for alias in def.aliases {
                    assert!(seen.insert(*alias), "duplicate unit alias: {alias}");
                }
            }
        }
    }

    #[test]
    fn canonical_unit_is_identity() {
        for quantity in Quantity::ALL {
            let v = to_canonical(3.5, quantity.canonical_unit(), quantity).unwrap();
            assert!((v - 3.5).abs() < 1e-12, "{quantity} canonical not identity");
        }
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn round_trip_all_same_kind_pairs(x in -500.0_f64..5000.0) {
                for quantity in Quantity::ALL {
                    let table = quantity.table();
                    for from in table {
                        for to in table {
                            let a = from.aliases[0];
                            let b = to.aliases[0];
                            let there = convert(x, a, b, quantity).unwrap();
                            let back = convert(there, b, a, quantity).unwrap();
                            prop_assert!(
                                (back - x).abs() <= 1e-9 * x.abs().max(1.0),
                                "round trip {a}->{b} for {quantity}: {x} -> {back}"
                            );
                        }
                    }
                }
            }
        }
    }
}
