//! ol-assay: raw laboratory assay records for oillib.
//!
//! Provides:
//! - `AssayFields`: the loosely-typed, unit-tagged shape an assay store
//!   hands over for one oil
//! - `RawAssayRecord`: the normalized, immutable value the estimator
//!   consumes (canonical units, deduplicated points, validated cuts)
//! - `AssayStore`: the lookup seam to the canonical dataset, plus an
//!   in-memory implementation
//!
//! # Architecture
//!
//! The record is constructed once from a single explicit load call and is
//! never mutated afterwards. Anything that smells like estimation (filling
//! a missing scalar, reconstructing a curve) belongs in `ol-estimate`, not
//! here: this crate only converts, sorts, merges and validates what the
//! laboratory actually measured.

pub mod error;
pub mod fields;
pub mod record;
pub mod store;

// Re-exports for ergonomics
pub use error::{AssayError, AssayResult};
pub use fields::{AssayFields, CutField, MeasuredPoint, MeasuredScalar};
pub use record::{
    DensityPoint, DistillationCut, DynamicViscosityPoint, KinematicViscosityPoint, OilClass,
    QualityFlag, RawAssayRecord, ScalarKind,
};
pub use store::{AssayStore, MemoryStore, normalize_identifier};
