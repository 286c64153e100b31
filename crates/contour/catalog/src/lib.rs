#![deny(unsafe_code)]
//! # contour-catalog
//!
//! Curated probe catalogs for each capability and the standard registry of
//! container factories they are meant to characterize.
//!
//! ```ignore
//! use contour_catalog::{standard_catalogs, standard_registry};
//! use contour_engine::Analyzer;
//!
//! let report = Analyzer::new()
//!     .analyze_registry(&standard_registry()?, &standard_catalogs()?)?;
//! for behavior in &report.behaviors {
//!     println!("{}: {:?}", behavior.container, behavior.mutability());
//! }
//! ```

pub mod map;
pub mod registry;
pub mod sequence;
pub mod set;

pub use map::map_catalog;
pub use registry::{standard_catalogs, standard_registry};
pub use sequence::{cursor_catalog, sequence_catalog};
pub use set::set_catalog;
