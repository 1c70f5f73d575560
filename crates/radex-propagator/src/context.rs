//! Execution context passed to propagators during a redshift step.

use radex_core::{AstroParams, FieldReader, FieldWriter, FlagOptions};

/// Execution context passed to each propagator's `step()` method.
///
/// Uses dynamic dispatch (`&dyn FieldReader`, `&mut dyn FieldWriter`) so the
/// surrounding simulation can expose its own per-step state and tests can
/// substitute mocks. The parameters are the step driver's, shared with the
/// background integrator.
pub struct StepContext<'a> {
    reads_previous: &'a dyn FieldReader,
    writes: &'a mut dyn FieldWriter,
    prev_redshift: f32,
    redshift: f32,
    astro: &'a AstroParams,
    flags: &'a FlagOptions,
}

impl<'a> StepContext<'a> {
    /// Construct a new step context.
    ///
    /// Typically called by the step driver, not by propagators directly.
    pub fn new(
        reads_previous: &'a dyn FieldReader,
        writes: &'a mut dyn FieldWriter,
        prev_redshift: f32,
        redshift: f32,
        astro: &'a AstroParams,
        flags: &'a FlagOptions,
    ) -> Self {
        Self {
            reads_previous,
            writes,
            prev_redshift,
            redshift,
            astro,
            flags,
        }
    }

    /// Fields as they stood at the end of the previous step.
    ///
    /// The reader outlives the borrow of `self`, so slices read from it can
    /// be held across a call to [`writes`](Self::writes).
    pub fn reads_previous(&self) -> &'a dyn FieldReader {
        self.reads_previous
    }

    /// Fields of the step being computed.
    pub fn writes(&mut self) -> &mut dyn FieldWriter {
        self.writes
    }

    /// Redshift of the previous step.
    pub fn prev_redshift(&self) -> f32 {
        self.prev_redshift
    }

    /// Redshift of the step being computed.
    pub fn redshift(&self) -> f32 {
        self.redshift
    }

    /// Astrophysical parameters of the run.
    pub fn astro(&self) -> &'a AstroParams {
        self.astro
    }

    /// Population switches of the run.
    pub fn flags(&self) -> &'a FlagOptions {
        self.flags
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use radex_core::FieldId;
    use radex_test_utils::{MockFieldReader, MockFieldWriter};

    #[test]
    fn context_provides_reads_and_writes() {
        let field = FieldId(0);
        let mut reader = MockFieldReader::new();
        reader.set_field(field, vec![1.0, 2.0, 3.0]);
        let mut writer = MockFieldWriter::new();
        writer.add_field(field, 3);
        let astro = AstroParams {
            radio_zmin: 9.0,
            ..AstroParams::default()
        };
        let flags = FlagOptions::default();

        let mut ctx = StepContext::new(&reader, &mut writer, 12.0, 11.5, &astro, &flags);

        assert_eq!(ctx.reads_previous().read(field).unwrap(), &[1.0, 2.0, 3.0]);
        ctx.writes()
            .write(field)
            .unwrap()
            .copy_from_slice(&[10.0, 20.0, 30.0]);

        assert_eq!(ctx.prev_redshift(), 12.0);
        assert_eq!(ctx.redshift(), 11.5);
        assert_eq!(ctx.astro().radio_zmin, 9.0);
        assert!(!ctx.flags().use_radio_mcg);
        assert_eq!(writer.get_field(field).unwrap(), &[10.0, 20.0, 30.0]);
    }

    #[test]
    fn undeclared_field_is_none() {
        let reader = MockFieldReader::new();
        let mut writer = MockFieldWriter::new();
        let (astro, flags) = (AstroParams::default(), FlagOptions::default());
        let mut ctx = StepContext::new(&reader, &mut writer, 1.0, 1.0, &astro, &flags);
        assert!(ctx.reads_previous().read(FieldId(7)).is_none());
        assert!(ctx.writes().write(FieldId(7)).is_none());
    }
}
