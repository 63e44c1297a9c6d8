//! ol-core: stable foundation for oillib.
//!
//! Contains:
//! - units (uom SI types + constructors)
//! - convert (unit conversion registry for assay ingestion)

pub mod convert;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use convert::{Quantity, UnitError, convert, to_canonical};
pub use units::*;
