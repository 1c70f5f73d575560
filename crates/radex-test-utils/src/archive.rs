//! Synthetic history archives.

use radex_archive::{ArchiveRecord, ArchiveWriter};

/// Build an archive of `records` evenly spaced records from `z_max` down to
/// `z_min`, with both redshift columns equal.
///
/// `sample(z)` returns `(atomic_rate, minihalo_rate, gas_temperature)`.
///
/// # Panics
///
/// If `records < 2` or `z_max <= z_min`.
pub fn archive_from_fn(
    z_max: f64,
    z_min: f64,
    records: usize,
    sample: impl Fn(f64) -> (f64, f64, f64),
) -> Vec<f64> {
    assert!(records >= 2, "need at least two records, got {records}");
    assert!(z_max > z_min, "z_max {z_max} must exceed z_min {z_min}");
    let dz = (z_max - z_min) / (records - 1) as f64;
    let mut writer = ArchiveWriter::with_capacity(records);
    for i in 0..records {
        let z = if i == records - 1 {
            z_min
        } else {
            z_max - dz * i as f64
        };
        let (atomic_rate, minihalo_rate, gas_temperature) = sample(z);
        writer
            .push(ArchiveRecord {
                temperature_redshift: z,
                atomic_rate,
                gas_temperature,
                minihalo_rate,
                rate_redshift: z,
            })
            .expect("evenly spaced redshifts are strictly decreasing");
    }
    writer.into_inner()
}

/// An archive whose two rates are the same at every record.
pub fn constant_rate_archive(
    z_max: f64,
    z_min: f64,
    records: usize,
    atomic_rate: f64,
    minihalo_rate: f64,
) -> Vec<f64> {
    archive_from_fn(z_max, z_min, records, |z| {
        (atomic_rate, minihalo_rate, 10.0 * (1.0 + z))
    })
}
