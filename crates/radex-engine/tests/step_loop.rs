//! Integration test: a simulation-style redshift loop driving the stepper.
//!
//! Each iteration appends the step's record to the archive, hands the
//! previous field to the stepper, and swaps buffers afterwards, the way the
//! surrounding simulation does.

use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use radex_archive::{ArchiveRecord, ArchiveWriter};
use radex_core::{AstroParams, FieldId, FieldSet, FlagOptions, StepError, StepId};
use radex_engine::{RadioStepper, StepRequest, StepperConfig};
use radex_propagators::diagnostics::MinihaloEmissivity;
use radex_propagators::{refine_factor, EmissivityDump, RadioFieldRefine};
use radex_test_utils::{MockFieldReader, MockFieldWriter};

const TRAD: FieldId = FieldId(0);
const CELLS: usize = 16;

struct ConstantNion;

impl MinihaloEmissivity for ConstantNion {
    fn atomic_cooling_threshold(&self, _z: f64) -> f64 {
        1e8
    }
    fn nion_minihalo(&self, _z: f64, _mturn: f64, _matom: f64, _f: f64) -> f64 {
        42.0
    }
}

#[derive(Clone, Default)]
struct SharedSink(Arc<Mutex<Vec<u8>>>);

impl Write for SharedSink {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(data);
        Ok(data.len())
    }
    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn stepper(astro: AstroParams, sink: Option<SharedSink>) -> RadioStepper {
    let fields: FieldSet = [TRAD].into_iter().collect();
    let refine = RadioFieldRefine::builder().field(TRAD).build().unwrap();
    let mut config = StepperConfig::new(fields, vec![Box::new(refine)]);
    config.astro = astro;
    config.emissivity_dump =
        sink.map(|s| EmissivityDump::new(Box::new(ConstantNion), Box::new(s)));
    RadioStepper::new(config).unwrap()
}

#[test]
fn redshift_loop_tracks_background_and_field() {
    let astro = AstroParams {
        radio_zmin: 12.0,
        ..AstroParams::default()
    };
    let sink = SharedSink::default();
    let mut stepper = stepper(astro.clone(), Some(sink.clone()));

    let mut archive = ArchiveWriter::new();
    let mut field = vec![1.0f32; CELLS];
    let redshifts: Vec<f32> = (0..20).map(|i| 30.0 - i as f32).collect();

    for (n, pair) in redshifts.windows(2).enumerate() {
        let (prev_z, z) = (pair[0], pair[1]);
        archive
            .push(ArchiveRecord {
                temperature_redshift: f64::from(prev_z),
                atomic_rate: 1e-3,
                gas_temperature: 2.7 * (1.0 + f64::from(prev_z)),
                minihalo_rate: 0.0,
                rate_redshift: f64::from(prev_z),
            })
            .unwrap();
        let view = archive.archive().unwrap();

        let mut previous = MockFieldReader::new();
        previous.set_field(TRAD, field.clone());
        let mut current = MockFieldWriter::new();
        current.set_field(TRAD, field.clone());

        let result = stepper
            .step(
                &view,
                &previous,
                &mut current,
                StepRequest {
                    prev_redshift: prev_z,
                    redshift: z,
                    zpp_max: f64::from(prev_z),
                },
            )
            .unwrap();
        assert_eq!(result.step_id, StepId(n as u64 + 1));
        assert!(result.background_temperature >= 0.0);

        let next = current.get_field(TRAD).unwrap().to_vec();
        if f64::from(z) < astro.radio_zmin {
            let f = refine_factor(prev_z, z, astro.a_r);
            assert!(next.iter().zip(&field).all(|(n, p)| *n == f * p));
        } else {
            assert_eq!(next, field);
        }
        field = next;
    }

    let rows = sink.0.lock().unwrap().clone();
    let text = String::from_utf8(rows).unwrap();
    assert_eq!(text.lines().count(), redshifts.len() - 1);
    assert!(text.lines().all(|l| l.ends_with("4.200000E+01")));
}

#[test]
fn minihalo_below_cutoff_fails_only_that_step() {
    let astro = AstroParams {
        radio_zmin: 10.0,
        ..AstroParams::default()
    };
    let fields: FieldSet = [TRAD].into_iter().collect();
    let flags = FlagOptions {
        use_radio_acg: true,
        use_radio_mcg: true,
    };
    let refine = RadioFieldRefine::builder().field(TRAD).build().unwrap();
    let mut config = StepperConfig::new(fields, vec![Box::new(refine)]);
    config.astro = astro;
    config.flags = flags;
    let mut stepper = RadioStepper::new(config).unwrap();

    let mut writer = ArchiveWriter::new();
    for z in [20.0, 15.0, 11.0] {
        writer
            .push(ArchiveRecord {
                temperature_redshift: z,
                atomic_rate: 1e-3,
                gas_temperature: 30.0,
                minihalo_rate: 1e-4,
                rate_redshift: z,
            })
            .unwrap();
    }
    let archive = writer.archive().unwrap();
    let mut previous = MockFieldReader::new();
    previous.set_field(TRAD, vec![1.0; CELLS]);
    let mut current = MockFieldWriter::new();
    current.add_field(TRAD, CELLS);

    let above = StepRequest {
        prev_redshift: 12.0,
        redshift: 11.5,
        zpp_max: 12.0,
    };
    assert!(stepper.step(&archive, &previous, &mut current, above).is_ok());

    let below = StepRequest {
        prev_redshift: 11.5,
        redshift: 9.5,
        zpp_max: 12.0,
    };
    match stepper.step(&archive, &previous, &mut current, below) {
        Err(StepError::PropagatorFailed { name, .. }) => assert_eq!(name, "RadioFieldRefine"),
        other => panic!("expected PropagatorFailed, got {other:?}"),
    }
    assert_eq!(stepper.next_step_id(), StepId(2));
}
