//! Analytic rescaling of the per-cell radio temperature field.
//!
//! Below the radio cutoff redshift no new sources are added to the field,
//! so each cell only redshifts: the brightness temperature of a background
//! with spectral exponent `a` scales as `(1 + z)^(3 + a)`.
//!
//! The field and redshifts are single precision. The redshift ratio is
//! formed in `f32`, raised to the power in `f64`, and the factor narrowed
//! back to `f32` before it touches any cell.

use radex_core::{
    AstroParams, ConfigError, FieldId, FieldSet, FlagOptions, PropagatorError, RadioError,
};
use radex_propagator::{Propagator, StepContext};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Multiplicative factor taking a field from `prev_redshift` to `redshift`.
pub fn refine_factor(prev_redshift: f32, redshift: f32, a_r: f64) -> f32 {
    let ratio = (1.0 + redshift) / (1.0 + prev_redshift);
    f64::from(ratio).powf(3.0 + a_r) as f32
}

/// Rescale `prev` into `out` once `redshift` is below the radio cutoff.
///
/// Returns `true` if `out` was written. Above the cutoff `out` is left as
/// the other collaborators filled it.
///
/// # Errors
///
/// - [`RadioError::UnsupportedConfiguration`] if minihalo radio emission is
///   enabled and `redshift` is below the cutoff: the rescaling assumes a
///   single spectral shape.
/// - [`RadioError::LengthMismatch`] if the two fields differ in length.
pub fn refine_radio_field(
    prev: &[f32],
    out: &mut [f32],
    prev_redshift: f32,
    redshift: f32,
    astro: &AstroParams,
    flags: &FlagOptions,
) -> Result<bool, RadioError> {
    let below_cutoff = f64::from(redshift) < astro.radio_zmin;
    if flags.use_radio_mcg && below_cutoff {
        return Err(RadioError::UnsupportedConfiguration {
            reason: format!(
                "radio field rescaling below radio_zmin = {} only supports atomic-cooling \
                 sources, but minihalo radio emission is enabled at z = {redshift}",
                astro.radio_zmin
            ),
        });
    }
    if prev.len() != out.len() {
        return Err(RadioError::LengthMismatch {
            expected: prev.len(),
            actual: out.len(),
        });
    }
    if !below_cutoff {
        return Ok(false);
    }

    let factor = refine_factor(prev_redshift, redshift, astro.a_r);

    #[cfg(feature = "parallel")]
    out.par_iter_mut()
        .zip(prev.par_iter())
        .for_each(|(o, &p)| *o = factor * p);

    #[cfg(not(feature = "parallel"))]
    for (o, &p) in out.iter_mut().zip(prev) {
        *o = factor * p;
    }

    Ok(true)
}

/// Propagator that applies [`refine_radio_field`] to one field each step.
///
/// Reads the field from the previous step and writes it for the current
/// one; above the cutoff the current values are left alone. The cutoff,
/// spectral exponent and population switches come from the
/// [`StepContext`], so they always match the background integrator's.
///
/// ```
/// use radex_core::FieldId;
/// use radex_propagators::RadioFieldRefine;
///
/// let prop = RadioFieldRefine::builder()
///     .field(FieldId(0))
///     .build()
///     .unwrap();
/// ```
#[derive(Debug)]
pub struct RadioFieldRefine {
    field: FieldId,
}

/// Builder for [`RadioFieldRefine`]. `field` is required.
pub struct RadioFieldRefineBuilder {
    field: Option<FieldId>,
}

impl RadioFieldRefine {
    /// Create a new builder.
    pub fn builder() -> RadioFieldRefineBuilder {
        RadioFieldRefineBuilder { field: None }
    }

    /// The radio temperature field this propagator rescales.
    pub fn field(&self) -> FieldId {
        self.field
    }
}

impl RadioFieldRefineBuilder {
    /// Set the radio temperature field.
    pub fn field(mut self, field: FieldId) -> Self {
        self.field = Some(field);
        self
    }

    /// Build the propagator.
    pub fn build(self) -> Result<RadioFieldRefine, ConfigError> {
        let field = self.field.ok_or(ConfigError::Missing { name: "field" })?;
        Ok(RadioFieldRefine { field })
    }
}

impl Propagator for RadioFieldRefine {
    fn name(&self) -> &str {
        "RadioFieldRefine"
    }

    fn reads_previous(&self) -> FieldSet {
        [self.field].into_iter().collect()
    }

    fn writes(&self) -> FieldSet {
        [self.field].into_iter().collect()
    }

    fn step(&self, ctx: &mut StepContext<'_>) -> Result<(), PropagatorError> {
        let (prev_redshift, redshift) = (ctx.prev_redshift(), ctx.redshift());
        let (astro, flags) = (ctx.astro(), ctx.flags());
        let prev = ctx.reads_previous().read(self.field).ok_or_else(|| {
            PropagatorError::ExecutionFailed {
                reason: format!("field {} not readable", self.field),
            }
        })?;
        let out = ctx.writes().write(self.field).ok_or_else(|| {
            PropagatorError::ExecutionFailed {
                reason: format!("field {} not writable", self.field),
            }
        })?;
        refine_radio_field(prev, out, prev_redshift, redshift, astro, flags)?;
        Ok(())
    }
}
