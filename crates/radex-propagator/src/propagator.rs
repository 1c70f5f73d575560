//! The [`Propagator`] trait.
//!
//! Propagators are stateless per-cell operators run once per redshift step,
//! after the homogeneous background has been integrated. They declare
//! their field dependencies up front so the pipeline can be validated
//! before the first step.

use crate::context::StepContext;
use radex_core::{FieldSet, PropagatorError};

/// A stateless operator in the per-step radio pipeline.
///
/// # Contract
///
/// - `step()` MUST be deterministic: same inputs produce identical outputs.
/// - `&self`: propagators carry their field wiring only. Per-cell state
///   lives in fields and the run's physical parameters arrive through the
///   [`StepContext`], so every propagator sees the same parameter set as
///   the background integrator.
/// - `reads_previous()` and `writes()` are called once at pipeline
///   construction, not per step.
///
/// # Examples
///
/// A propagator that carries a field over unchanged:
///
/// ```
/// use radex_core::{FieldId, FieldSet, PropagatorError};
/// use radex_propagator::{Propagator, StepContext};
///
/// struct CarryOver {
///     field: FieldId,
/// }
///
/// impl Propagator for CarryOver {
///     fn name(&self) -> &str { "carry_over" }
///
///     fn reads_previous(&self) -> FieldSet {
///         [self.field].into_iter().collect()
///     }
///
///     fn writes(&self) -> FieldSet {
///         [self.field].into_iter().collect()
///     }
///
///     fn step(&self, ctx: &mut StepContext<'_>) -> Result<(), PropagatorError> {
///         let prev = ctx.reads_previous().read(self.field).unwrap();
///         ctx.writes().write(self.field).unwrap().copy_from_slice(prev);
///         Ok(())
///     }
/// }
///
/// assert_eq!(CarryOver { field: FieldId(0) }.name(), "carry_over");
/// ```
pub trait Propagator: Send + Sync + 'static {
    /// Human-readable name for error reporting and metrics.
    fn name(&self) -> &str;

    /// Fields this propagator reads from the previous redshift step.
    ///
    /// Default: empty set.
    fn reads_previous(&self) -> FieldSet {
        FieldSet::empty()
    }

    /// Fields this propagator writes for the current step.
    ///
    /// A propagator may leave cells of a written field untouched; those keep
    /// whatever the surrounding simulation already stored for the step.
    fn writes(&self) -> FieldSet;

    /// Execute the propagator for one redshift step.
    fn step(&self, ctx: &mut StepContext<'_>) -> Result<(), PropagatorError>;
}
