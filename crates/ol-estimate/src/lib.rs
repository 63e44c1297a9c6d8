//! ol-estimate: oil property estimation for oillib.
//!
//! Turns a sparse, heterogeneous [`ol_assay::RawAssayRecord`] into
//! continuous, queryable physical functions:
//! - density(T): interpolation over measured points, thermal-expansion
//!   extrapolation from a single point, API-gravity fallback
//! - viscosity(T): Arrhenius-type `ln ν = A + B/T` fit, clamped positive
//! - boiling-point curve: monotone fraction → temperature reconstruction
//!   of the distillation cuts
//! - derived scalars: best-effort API gravity, pour point, flash point,
//!   average molecular weight
//!
//! Estimation is deterministic and pure: it reads only the record and the
//! read-only [`EstimationParams`], so one record always resolves to the
//! same [`ResolvedOilProperties`] and results can be cached freely.

pub mod density;
pub mod distillation;
pub mod error;
pub mod estimator;
mod interp;
pub mod params;
pub mod resolved;
mod scalars;
pub mod viscosity;

// Re-exports for ergonomics
pub use density::DensityCurve;
pub use distillation::BoilingPointCurve;
pub use error::{EstimateError, EstimateResult};
pub use estimator::Estimator;
pub use params::{ClassDefaults, EstimationParams, RiaziDaubert};
pub use resolved::{ResolutionFlag, ResolvedOilProperties};
pub use viscosity::{ViscosityCurve, ViscositySample};
