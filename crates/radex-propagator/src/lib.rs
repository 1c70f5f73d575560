//! Propagator trait and step context for the radio-excess subsystem.
//!
//! A [`Propagator`] is run once per redshift step with a [`StepContext`]
//! exposing the previous step's fields, the fields being written, the
//! redshift pair and the run's physical parameters. [`validate_pipeline`]
//! checks a list of propagators before the first step.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod context;
pub mod pipeline;
pub mod propagator;

pub use context::StepContext;
pub use pipeline::{validate_pipeline, PipelineError, PipelinePlan, WriteConflict};
pub use propagator::Propagator;
