//! Radex: the radio-excess background of a reionization simulation.
//!
//! This is the top-level facade crate that re-exports the public API from
//! all radex sub-crates. For most users, adding `radex` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use radex::prelude::*;
//!
//! // The surrounding simulation appends one record per step.
//! let mut history = ArchiveWriter::new();
//! for z in [30.0, 25.0, 20.0, 15.0] {
//!     history
//!         .push(ArchiveRecord {
//!             temperature_redshift: z,
//!             atomic_rate: 1.0e-3,
//!             gas_temperature: 30.0,
//!             minihalo_rate: 0.0,
//!             rate_redshift: z,
//!         })
//!         .unwrap();
//! }
//! let archive = history.archive().unwrap();
//!
//! let t_rad = FieldId(0);
//! let refine = RadioFieldRefine::builder().field(t_rad).build().unwrap();
//! let config = StepperConfig::new([t_rad].into_iter().collect(), vec![Box::new(refine)]);
//! let mut stepper = RadioStepper::new(config).unwrap();
//!
//! let mut previous = radex::memory::VecFields::new();
//! previous.insert(t_rad, vec![1.0; 8]);
//! let mut current = previous.clone();
//!
//! let result = stepper
//!     .step(
//!         &archive,
//!         &previous,
//!         &mut current,
//!         StepRequest { prev_redshift: 15.0, redshift: 14.5, zpp_max: 16.0 },
//!     )
//!     .unwrap();
//! assert!(result.background_temperature > 0.0);
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `radex-core` | IDs, parameters, cosmology, errors, field traits |
//! | [`interp`] | `radex-interp` | Bracket search, table interpolation, turnover table |
//! | [`archive`] | `radex-archive` | History archive layout, lookup and writer |
//! | [`propagator`] | `radex-propagator` | Propagator trait and pipeline validation |
//! | [`propagators`] | `radex-propagators` | Background integrator, field refinement, SFRD, dumps |
//! | [`engine`] | `radex-engine` | Per-step driver |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types, parameters and errors (`radex-core`).
pub use radex_core as types;

/// Bracket search and table interpolation (`radex-interp`).
pub use radex_interp as interp;

/// The packed star-formation history archive (`radex-archive`).
pub use radex_archive as archive;

/// Propagator trait and pipeline validation (`radex-propagator`).
pub use radex_propagator as propagator;

/// Radio background integrator, field refinement and conversions
/// (`radex-propagators`).
pub use radex_propagators as propagators;

/// Per-step driver (`radex-engine`).
pub use radex_engine as engine;

pub mod memory;

/// Common imports for typical radex usage.
///
/// ```rust
/// use radex::prelude::*;
/// ```
pub mod prelude {
    // Core types and traits
    pub use radex_core::{
        AstroParams, CosmoParams, FieldId, FieldReader, FieldSet, FieldWriter, FlagOptions,
        Population, StepId,
    };

    // Errors
    pub use radex_core::{PropagatorError, RadioError, StepError};

    // Interpolation
    pub use radex_interp::{interp_1d, turnover_mass, InterpOptions, Overflow};

    // Archive
    pub use radex_archive::{ArchiveRecord, ArchiveWriter, HistoryArchive, Quantity};

    // Propagator
    pub use radex_propagator::{Propagator, StepContext};

    // Physics
    pub use radex_propagators::{
        emissivity_to_sfrd, BackgroundOptions, RadioBackground, RadioFieldRefine,
    };

    // Engine
    pub use radex_engine::{RadioStepper, StepMetrics, StepRequest, StepResult, StepperConfig};
}
