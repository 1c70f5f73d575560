//! Closure-driven propagator for pipeline and step-driver tests.

use radex_core::{FieldId, FieldSet, PropagatorError};
use radex_propagator::{Propagator, StepContext};

type StepFn =
    dyn Fn(&mut StepContext<'_>, FieldId) -> Result<(), PropagatorError> + Send + Sync;

/// A propagator that writes one field through a closure.
///
/// Reads nothing from the previous step.
pub struct FnPropagator {
    name: String,
    field: FieldId,
    step: Box<StepFn>,
}

impl FnPropagator {
    pub fn new(
        name: impl Into<String>,
        field: FieldId,
        step: impl Fn(&mut StepContext<'_>, FieldId) -> Result<(), PropagatorError>
            + Send
            + Sync
            + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            field,
            step: Box::new(step),
        }
    }

    /// Fills every cell of `field` with `value`.
    pub fn fill(name: impl Into<String>, field: FieldId, value: f32) -> Self {
        Self::new(name, field, move |ctx, field| {
            writable(ctx, field)?.fill(value);
            Ok(())
        })
    }

    /// Fills `field` with the step redshift, and fails once the step
    /// redshift drops below `redshift`.
    pub fn fail_below(name: impl Into<String>, field: FieldId, redshift: f32) -> Self {
        Self::new(name, field, move |ctx, field| {
            let z = ctx.redshift();
            if z < redshift {
                return Err(PropagatorError::ExecutionFailed {
                    reason: format!("refusing to step below z = {redshift}, got {z}"),
                });
            }
            writable(ctx, field)?.fill(z);
            Ok(())
        })
    }
}

fn writable<'c>(
    ctx: &'c mut StepContext<'_>,
    field: FieldId,
) -> Result<&'c mut [f32], PropagatorError> {
    ctx.writes()
        .write(field)
        .ok_or_else(|| PropagatorError::ExecutionFailed {
            reason: format!("field {field} not writable"),
        })
}

impl Propagator for FnPropagator {
    fn name(&self) -> &str {
        &self.name
    }

    fn writes(&self) -> FieldSet {
        [self.field].into_iter().collect()
    }

    fn step(&self, ctx: &mut StepContext<'_>) -> Result<(), PropagatorError> {
        (self.step)(ctx, self.field)
    }
}
