//! Step driver configuration, validation, and error types.
//!
//! [`StepperConfig`] is the builder input for a
//! [`RadioStepper`](crate::RadioStepper).
//! [`validate()`](StepperConfig::validate) checks the parameter structs and
//! the propagator pipeline once, before the first step.

use std::error::Error;
use std::fmt;

use radex_core::{AstroParams, CosmoParams, FieldSet, FlagOptions};
use radex_propagator::{validate_pipeline, PipelineError, PipelinePlan, Propagator};
use radex_propagators::{BackgroundOptions, EmissivityDump};

/// Errors detected while building a [`RadioStepper`](crate::RadioStepper).
#[derive(Debug, PartialEq)]
pub enum BuildError {
    /// A parameter struct failed validation.
    Parameters(radex_core::ConfigError),
    /// Propagator pipeline validation failed.
    Pipeline(PipelineError),
    /// No fields registered.
    NoFields,
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parameters(e) => write!(f, "parameters: {e}"),
            Self::Pipeline(e) => write!(f, "pipeline: {e}"),
            Self::NoFields => write!(f, "no fields registered"),
        }
    }
}

impl Error for BuildError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Parameters(e) => Some(e),
            Self::Pipeline(e) => Some(e),
            Self::NoFields => None,
        }
    }
}

impl From<radex_core::ConfigError> for BuildError {
    fn from(e: radex_core::ConfigError) -> Self {
        Self::Parameters(e)
    }
}

impl From<PipelineError> for BuildError {
    fn from(e: PipelineError) -> Self {
        Self::Pipeline(e)
    }
}

/// Everything a [`RadioStepper`](crate::RadioStepper) needs.
pub struct StepperConfig {
    /// Astrophysical parameters.
    pub astro: AstroParams,
    /// Cosmological parameters.
    pub cosmo: CosmoParams,
    /// Population switches.
    pub flags: FlagOptions,
    /// Background override switches.
    pub background: BackgroundOptions,
    /// Per-cell fields the surrounding simulation provides.
    pub fields: FieldSet,
    /// Propagators, run in order after the background each step.
    pub propagators: Vec<Box<dyn Propagator>>,
    /// Reject any non-finite value a propagator writes. Default: true.
    pub check_finite: bool,
    /// Optional per-step minihalo emissivity dump.
    pub emissivity_dump: Option<EmissivityDump>,
}

impl StepperConfig {
    /// A configuration with reference parameters, the given fields and
    /// propagators, and no dump.
    pub fn new(fields: FieldSet, propagators: Vec<Box<dyn Propagator>>) -> Self {
        Self {
            astro: AstroParams::default(),
            cosmo: CosmoParams::default(),
            flags: FlagOptions::default(),
            background: BackgroundOptions::default(),
            fields,
            propagators,
            check_finite: true,
            emissivity_dump: None,
        }
    }

    /// Check the parameters and the pipeline, returning the pipeline plan.
    pub fn validate(&self) -> Result<PipelinePlan, BuildError> {
        self.astro.validate()?;
        self.cosmo.validate()?;
        if self.fields.is_empty() {
            return Err(BuildError::NoFields);
        }
        Ok(validate_pipeline(&self.propagators, &self.fields)?)
    }
}

impl fmt::Debug for StepperConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.propagators.iter().map(|p| p.name()).collect();
        f.debug_struct("StepperConfig")
            .field("astro", &self.astro)
            .field("cosmo", &self.cosmo)
            .field("flags", &self.flags)
            .field("background", &self.background)
            .field("fields", &self.fields)
            .field("propagators", &names)
            .field("check_finite", &self.check_finite)
            .field("emissivity_dump", &self.emissivity_dump.is_some())
            .finish()
    }
}
