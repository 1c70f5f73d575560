//! Radio-excess physics for a reionization simulation step.
//!
//! - [`RadioBackground`] integrates the homogeneous radio background left by
//!   sources older than the active window, reading the history archive.
//! - [`RadioFieldRefine`] rescales the per-cell radio temperature field
//!   between redshift steps once sources have switched off.
//! - [`emissivity_to_sfrd`] converts archived production rates to star
//!   formation rate densities for the surrounding simulation.
//! - [`diagnostics`] writes tabular dumps for offline inspection.
//!
//! # Step order
//!
//! 1. [`RadioBackground::homogeneous_temperature`]: one scalar per step.
//! 2. [`RadioFieldRefine`]: reads_previous(T_rad) -> writes(T_rad), with the
//!    cutoff and population switches taken from the [`StepContext`].
//!
//! [`StepContext`]: radex_propagator::StepContext

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod background;
pub mod diagnostics;
pub mod refine;
pub mod sfrd;

pub use background::{BackgroundOptions, RadioBackground, RadioBackgroundBuilder};
pub use diagnostics::{EmissivityDump, HaloMassFunction, HmfKind, MinihaloEmissivity};
pub use refine::{refine_factor, refine_radio_field, RadioFieldRefine, RadioFieldRefineBuilder};
pub use sfrd::emissivity_to_sfrd;
