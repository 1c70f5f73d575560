//! Benchmark profiles for the radio-excess subsystem.
//!
//! - [`reference_archive`]: a history archive as a full run leaves it
//! - [`reference_stepper`]: background plus field refinement on one field
//! - [`grid_fields`]: previous/current field stores for an `n^3` grid

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use radex::memory::VecFields;
use radex_archive::{ArchiveRecord, ArchiveWriter};
use radex_core::{AstroParams, FieldId, FlagOptions};
use radex_engine::{BuildError, RadioStepper, StepperConfig};
use radex_propagators::RadioFieldRefine;

/// Radio temperature field used by the profiles.
pub const T_RAD: FieldId = FieldId(0);

/// A history archive of `records` steps from z = 35 down to z = 5, with a
/// smooth rise in both production rates.
pub fn reference_archive(records: usize) -> Vec<f64> {
    let records = records.max(2);
    let dz = 30.0 / (records - 1) as f64;
    let mut writer = ArchiveWriter::with_capacity(records);
    for i in 0..records {
        let z = 35.0 - dz * i as f64;
        let grown = (-(z - 5.0) / 6.0).exp();
        let record = ArchiveRecord {
            temperature_redshift: z + 0.5 * dz,
            atomic_rate: 1e-3 * grown,
            gas_temperature: 2.7 * (1.0 + z),
            minihalo_rate: 1e-4 * grown,
            rate_redshift: z,
        };
        if writer.push(record).is_err() {
            break;
        }
    }
    writer.into_inner()
}

/// Background plus field refinement for atomic-cooling sources with a
/// radio cutoff at z = 9.
pub fn reference_stepper() -> Result<RadioStepper, BuildError> {
    let astro = AstroParams {
        radio_zmin: 9.0,
        ..AstroParams::default()
    };
    let flags = FlagOptions {
        use_radio_acg: true,
        use_radio_mcg: false,
    };
    let refine = RadioFieldRefine::builder().field(T_RAD).build()?;
    let mut config = StepperConfig::new([T_RAD].into_iter().collect(), vec![Box::new(refine)]);
    config.astro = astro;
    config.flags = flags;
    RadioStepper::new(config)
}

/// Previous and current stores holding [`T_RAD`] on an `n^3` grid.
pub fn grid_fields(n: usize) -> (VecFields, VecFields) {
    let cells = n * n * n;
    let mut previous = VecFields::new();
    previous.insert(T_RAD, (0..cells).map(|i| 1.0 + (i % 97) as f32).collect());
    let current = previous.clone();
    (previous, current)
}
