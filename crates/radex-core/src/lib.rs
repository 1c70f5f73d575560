//! Core types and parameters for the radio-excess background subsystem.
//!
//! This is the leaf crate of the workspace. It defines the pieces every
//! other crate agrees on: field identifiers and sets, the per-cell field
//! access traits, the astrophysical and cosmological parameter structs,
//! the cosmology constants shared by the emission laws, and the error
//! taxonomy for fatal conditions.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod cosmology;
pub mod error;
pub mod field;
pub mod id;
pub mod params;
pub mod traits;

pub use error::{ConfigError, PropagatorError, RadioError, StepError};
pub use field::FieldSet;
pub use id::{FieldId, StepId};
pub use params::{AstroParams, CosmoParams, FlagOptions, Population};
pub use traits::{FieldReader, FieldWriter};
