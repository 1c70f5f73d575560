//! Pipeline validation.
//!
//! [`validate_pipeline`] runs once when the step driver is built. It checks
//! the propagator list for wiring errors and records each propagator's
//! written fields in a [`PipelinePlan`].

use indexmap::IndexMap;
use radex_core::{FieldId, FieldSet};

use crate::propagator::Propagator;

use std::error::Error;
use std::fmt;

/// Per-propagator write sets, in pipeline order.
///
/// The step driver scans exactly these fields for non-finite values after
/// each propagator runs.
#[derive(Debug)]
#[must_use]
pub struct PipelinePlan {
    writes: Vec<FieldSet>,
}

impl PipelinePlan {
    /// Number of propagators in the plan.
    pub fn len(&self) -> usize {
        self.writes.len()
    }

    /// Whether the plan covers zero propagators.
    pub fn is_empty(&self) -> bool {
        self.writes.is_empty()
    }

    /// Fields written by the propagator at `propagator_index`.
    pub fn writes_for(&self, propagator_index: usize) -> Option<&FieldSet> {
        self.writes.get(propagator_index)
    }
}

/// A detected write-write conflict between two propagators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteConflict {
    /// The contested field.
    pub field_id: FieldId,
    /// Name of the first writer (earlier in pipeline order).
    pub first_writer: String,
    /// Name of the second writer (later in pipeline order).
    pub second_writer: String,
}

/// Errors from pipeline validation.
#[derive(Debug, Clone, PartialEq)]
pub enum PipelineError {
    /// No propagators registered.
    EmptyPipeline,

    /// Two or more propagators write the same field.
    WriteConflict(Vec<WriteConflict>),

    /// A propagator references a field the simulation does not provide.
    UndefinedField {
        /// Which propagator.
        propagator: String,
        /// The missing field.
        field_id: FieldId,
    },
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyPipeline => write!(f, "pipeline has no propagators"),
            Self::WriteConflict(conflicts) => {
                write!(f, "write-write conflicts: ")?;
                for (i, c) in conflicts.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(
                        f,
                        "field {} written by '{}' and '{}'",
                        c.field_id, c.first_writer, c.second_writer,
                    )?;
                }
                Ok(())
            }
            Self::UndefinedField {
                propagator,
                field_id,
            } => write!(
                f,
                "propagator '{propagator}' references undefined field {field_id}"
            ),
        }
    }
}

impl Error for PipelineError {}

/// Validate a propagator pipeline and build its [`PipelinePlan`].
///
/// Checks, in order: the pipeline is non-empty, no field has two writers,
/// and every field read or written is in `defined_fields`.
pub fn validate_pipeline(
    propagators: &[Box<dyn Propagator>],
    defined_fields: &FieldSet,
) -> Result<PipelinePlan, PipelineError> {
    if propagators.is_empty() {
        return Err(PipelineError::EmptyPipeline);
    }

    let writes: Vec<FieldSet> = propagators.iter().map(|prop| prop.writes()).collect();

    let mut writers: IndexMap<FieldId, usize> = IndexMap::new();
    let mut conflicts: Vec<WriteConflict> = Vec::new();
    for (i, (prop, written)) in propagators.iter().zip(&writes).enumerate() {
        for field_id in written.iter() {
            if let Some(&j) = writers.get(&field_id) {
                conflicts.push(WriteConflict {
                    field_id,
                    first_writer: propagators[j].name().to_string(),
                    second_writer: prop.name().to_string(),
                });
            }
            writers.insert(field_id, i);
        }
    }
    if !conflicts.is_empty() {
        return Err(PipelineError::WriteConflict(conflicts));
    }

    for (prop, written) in propagators.iter().zip(&writes) {
        for field_id in prop.reads_previous().iter().chain(written.iter()) {
            if !defined_fields.contains(field_id) {
                return Err(PipelineError::UndefinedField {
                    propagator: prop.name().to_string(),
                    field_id,
                });
            }
        }
    }

    Ok(PipelinePlan { writes })
}
