//! The per-step driver.
//!
//! [`RadioStepper`] is called once per redshift step by the surrounding
//! simulation. It integrates the homogeneous background from the history
//! archive, then runs the propagator pipeline over the per-cell fields.
//! Any failure aborts the current step only; the step counter does not
//! advance and the caller decides what to do next.

use std::time::Instant;

use radex_archive::HistoryArchive;
use radex_core::{FieldReader, FieldWriter, PropagatorError, StepError, StepId};
use radex_propagator::{PipelinePlan, Propagator, StepContext};
use radex_propagators::{EmissivityDump, RadioBackground};

use crate::config::{BuildError, StepperConfig};
use crate::metrics::StepMetrics;

/// Redshifts and window bound of one step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StepRequest {
    /// Redshift of the previous step.
    pub prev_redshift: f32,
    /// Redshift of the step being computed.
    pub redshift: f32,
    /// Upper redshift of the window integrated elsewhere; the archive
    /// supplies everything above it.
    pub zpp_max: f64,
}

/// Output of a successful step.
#[derive(Clone, Debug, PartialEq)]
pub struct StepResult {
    /// Step that was just completed.
    pub step_id: StepId,
    /// Homogeneous radio background temperature in kelvin.
    pub background_temperature: f64,
    /// Timing for this step.
    pub metrics: StepMetrics,
}

/// Runs the radio-excess computation for one redshift step at a time.
pub struct RadioStepper {
    background: RadioBackground,
    propagators: Vec<Box<dyn Propagator>>,
    plan: PipelinePlan,
    check_finite: bool,
    emissivity_dump: Option<EmissivityDump>,
    next_step: StepId,
    last_metrics: StepMetrics,
}

impl RadioStepper {
    /// Validate `config` and build the driver.
    pub fn new(config: StepperConfig) -> Result<Self, BuildError> {
        let plan = config.validate()?;
        let background = RadioBackground::builder()
            .astro(config.astro)
            .cosmo(config.cosmo)
            .flags(config.flags)
            .options(config.background)
            .build()?;
        Ok(Self {
            background,
            propagators: config.propagators,
            plan,
            check_finite: config.check_finite,
            emissivity_dump: config.emissivity_dump,
            next_step: StepId(1),
            last_metrics: StepMetrics::default(),
        })
    }

    /// The background integrator in use.
    pub fn background(&self) -> &RadioBackground {
        &self.background
    }

    /// ID the next successful step will carry.
    pub fn next_step_id(&self) -> StepId {
        self.next_step
    }

    /// Metrics of the most recent successful step.
    pub fn last_metrics(&self) -> &StepMetrics {
        &self.last_metrics
    }

    /// Compute one redshift step.
    ///
    /// `previous` holds the fields at the end of the previous step;
    /// `current` the fields being computed, already filled by the
    /// surrounding simulation where this subsystem does not write.
    ///
    /// # Errors
    ///
    /// - [`StepError::NonDecreasingRedshift`] if `redshift` is above
    ///   `prev_redshift` or either is NaN.
    /// - [`StepError::Background`] if background integration fails.
    /// - [`StepError::PropagatorFailed`] if a propagator fails, or writes a
    ///   non-finite value while `check_finite` is on.
    /// - [`StepError::Diagnostics`] if the attached dump cannot be written.
    pub fn step(
        &mut self,
        archive: &HistoryArchive<'_>,
        previous: &dyn FieldReader,
        current: &mut dyn FieldWriter,
        request: StepRequest,
    ) -> Result<StepResult, StepError> {
        let step_start = Instant::now();
        let StepRequest {
            prev_redshift,
            redshift,
            zpp_max,
        } = request;
        if !(redshift <= prev_redshift) {
            return Err(StepError::NonDecreasingRedshift {
                prev_redshift,
                redshift,
            });
        }
        let step_id = self.next_step;

        // 1. Homogeneous background.
        let background_start = Instant::now();
        let background_temperature = self
            .background
            .homogeneous_temperature(archive, zpp_max, f64::from(redshift))
            .map_err(StepError::Background)?;
        let background_us = background_start.elapsed().as_micros() as u64;

        // 2. Optional dump.
        let mut dump_us = 0;
        if let Some(dump) = self.emissivity_dump.as_mut() {
            let dump_start = Instant::now();
            dump.record(f64::from(redshift), self.background.astro())
                .map_err(|e| StepError::Diagnostics {
                    reason: e.to_string(),
                })?;
            dump_us = dump_start.elapsed().as_micros() as u64;
        }

        // 3. Propagator pipeline.
        let mut propagator_us = Vec::with_capacity(self.propagators.len());
        for (i, prop) in self.propagators.iter().enumerate() {
            let prop_start = Instant::now();
            {
                let mut ctx = StepContext::new(
                    previous,
                    &mut *current,
                    prev_redshift,
                    redshift,
                    self.background.astro(),
                    self.background.flags(),
                );
                prop.step(&mut ctx)
                    .map_err(|reason| StepError::PropagatorFailed {
                        name: prop.name().to_string(),
                        reason,
                    })?;
            }
            if self.check_finite {
                self.check_written(i, prop.as_ref(), current)?;
            }
            propagator_us.push((
                prop.name().to_string(),
                prop_start.elapsed().as_micros() as u64,
            ));
        }

        self.next_step = step_id.next();
        let metrics = StepMetrics {
            total_us: step_start.elapsed().as_micros() as u64,
            background_us,
            propagator_us,
            dump_us,
        };
        self.last_metrics = metrics.clone();
        Ok(StepResult {
            step_id,
            background_temperature,
            metrics,
        })
    }

    fn check_written(
        &self,
        index: usize,
        prop: &dyn Propagator,
        current: &mut dyn FieldWriter,
    ) -> Result<(), StepError> {
        let Some(fields) = self.plan.writes_for(index) else {
            return Ok(());
        };
        for field_id in fields.iter() {
            let Some(data) = current.write(field_id) else {
                continue;
            };
            if let Some(cell) = data.iter().position(|v| !v.is_finite()) {
                return Err(StepError::PropagatorFailed {
                    name: prop.name().to_string(),
                    reason: PropagatorError::NanDetected {
                        field_id,
                        cell_index: Some(cell),
                    },
                });
            }
        }
        Ok(())
    }
}

impl std::fmt::Debug for RadioStepper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self.propagators.iter().map(|p| p.name()).collect();
        f.debug_struct("RadioStepper")
            .field("background", &self.background)
            .field("propagators", &names)
            .field("check_finite", &self.check_finite)
            .field("next_step", &self.next_step)
            .finish_non_exhaustive()
    }
}
