//! Per-step driver for the radio-excess subsystem.
//!
//! [`RadioStepper`] is built once from a [`StepperConfig`] and called once
//! per redshift step by the surrounding simulation's step loop.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod metrics;
pub mod stepper;

pub use config::{BuildError, StepperConfig};
pub use metrics::StepMetrics;
pub use stepper::{RadioStepper, StepRequest, StepResult};
