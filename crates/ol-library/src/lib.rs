//! ol-library: the oillib facade.
//!
//! Ties the other crates together behind one entry point:
//! [`OilLibrary`] looks an oil up by name in an [`ol_assay::AssayStore`],
//! normalizes the record, runs the `ol-estimate` pipeline once and
//! caches the immutable result for sharing across threads.
//!
//! ```
//! use ol_assay::{AssayFields, MeasuredPoint, MeasuredScalar, MemoryStore};
//! use ol_core::units::celsius;
//! use ol_library::OilLibrary;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut fields = AssayFields::named("Alaska North Slope");
//! fields.densities.push(MeasuredPoint {
//!     value: 876.0,
//!     unit: "kg/m^3".into(),
//!     ref_temp: 15.0,
//!     temp_unit: "C".into(),
//! });
//! fields.kinematic_viscosities.push(MeasuredPoint {
//!     value: 14.0,
//!     unit: "cSt".into(),
//!     ref_temp: 15.0,
//!     temp_unit: "C".into(),
//! });
//! fields.boiling_point = Some(MeasuredScalar {
//!     value: 618.0,
//!     unit: "K".into(),
//! });
//!
//! let mut store = MemoryStore::new();
//! store.insert(fields);
//!
//! let library = OilLibrary::new(store);
//! let oil = library.resolve("alaska north slope")?;
//! let rho = oil.density_at(celsius(15.0));
//! assert!((rho.value - 876.0).abs() < 1e-9);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod library;

// Re-exports for ergonomics
pub use error::{LibraryError, LibraryResult};
pub use library::OilLibrary;
