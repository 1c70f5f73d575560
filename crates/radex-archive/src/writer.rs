//! Producer side of the history archive.

use radex_core::RadioError;

use crate::archive::HistoryArchive;
use crate::layout::{buffer_len, ArchiveRecord, COUNT_SLOT};

/// Appends records to an owned archive buffer, keeping the count slot in
/// step with the records actually written.
///
/// Records must arrive in simulation order: both redshift columns strictly
/// decreasing.
///
/// ```
/// use radex_archive::{ArchiveRecord, ArchiveWriter, Quantity};
///
/// let mut writer = ArchiveWriter::new();
/// for (z, rate) in [(20.0, 1.0), (18.0, 3.0)] {
///     writer
///         .push(ArchiveRecord {
///             temperature_redshift: z,
///             atomic_rate: rate,
///             gas_temperature: 50.0,
///             minihalo_rate: 0.0,
///             rate_redshift: z,
///         })
///         .unwrap();
/// }
/// let archive = writer.archive().unwrap();
/// assert_eq!(archive.interpolate(19.0, Quantity::AtomicRate).unwrap(), 2.0);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct ArchiveWriter {
    buf: Vec<f64>,
    last: Option<ArchiveRecord>,
}

impl ArchiveWriter {
    /// Create an empty archive.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Create an empty archive with room for `records` records.
    pub fn with_capacity(records: usize) -> Self {
        let mut buf = Vec::with_capacity(buffer_len(records));
        buf.push(0.0);
        Self { buf, last: None }
    }

    /// Append one record.
    ///
    /// # Errors
    ///
    /// [`RadioError::MalformedArchive`] if either redshift is not finite or
    /// does not strictly decrease relative to the previous record.
    pub fn push(&mut self, record: ArchiveRecord) -> Result<(), RadioError> {
        if !record.rate_redshift.is_finite() || !record.temperature_redshift.is_finite() {
            return Err(RadioError::MalformedArchive {
                reason: format!(
                    "record redshifts must be finite, got rate {} / temperature {}",
                    record.rate_redshift, record.temperature_redshift
                ),
            });
        }
        if let Some(prev) = self.last {
            if record.rate_redshift >= prev.rate_redshift
                || record.temperature_redshift >= prev.temperature_redshift
            {
                return Err(RadioError::MalformedArchive {
                    reason: format!(
                        "record {} does not decrease in redshift: rate {} -> {}, temperature {} -> {}",
                        self.len(),
                        prev.rate_redshift,
                        record.rate_redshift,
                        prev.temperature_redshift,
                        record.temperature_redshift
                    ),
                });
            }
        }
        self.buf.extend_from_slice(&record.to_slots());
        self.buf[COUNT_SLOT] += 1.0;
        self.last = Some(record);
        Ok(())
    }

    /// Number of records written.
    pub fn len(&self) -> usize {
        self.buf[COUNT_SLOT] as usize
    }

    /// Whether no record has been written yet.
    pub fn is_empty(&self) -> bool {
        self.last.is_none()
    }

    /// The packed buffer, including the count slot.
    pub fn as_slice(&self) -> &[f64] {
        &self.buf
    }

    /// A read-only view of the records written so far.
    ///
    /// # Errors
    ///
    /// [`RadioError::MalformedArchive`] while the archive is still empty.
    pub fn archive(&self) -> Result<HistoryArchive<'_>, RadioError> {
        HistoryArchive::new(&self.buf)
    }

    /// Consume the writer, returning the packed buffer.
    pub fn into_inner(self) -> Vec<f64> {
        self.buf
    }
}

impl Default for ArchiveWriter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::Quantity;
    use proptest::prelude::*;

    fn record(z: f64, rate: f64) -> ArchiveRecord {
        ArchiveRecord {
            temperature_redshift: z + 0.25,
            atomic_rate: rate,
            gas_temperature: 10.0 * z,
            minihalo_rate: 0.1 * rate,
            rate_redshift: z,
        }
    }

    #[test]
    fn count_tracks_pushes() {
        let mut w = ArchiveWriter::new();
        assert!(w.is_empty());
        assert!(w.archive().is_err());
        w.push(record(20.0, 1.0)).unwrap();
        w.push(record(19.0, 2.0)).unwrap();
        assert_eq!(w.len(), 2);
        assert_eq!(w.as_slice()[0], 2.0);
        assert_eq!(w.as_slice().len(), 11);
        assert_eq!(w.archive().unwrap().len(), 2);
    }

    #[test]
    fn rejects_non_decreasing_redshift() {
        let mut w = ArchiveWriter::new();
        w.push(record(20.0, 1.0)).unwrap();
        assert!(matches!(
            w.push(record(20.0, 2.0)),
            Err(RadioError::MalformedArchive { .. })
        ));
        assert!(matches!(
            w.push(record(21.0, 2.0)),
            Err(RadioError::MalformedArchive { .. })
        ));
        assert_eq!(w.len(), 1);
    }

    #[test]
    fn rejects_non_finite_redshift() {
        let mut w = ArchiveWriter::new();
        assert!(w.push(record(f64::NAN, 1.0)).is_err());
        assert!(w.is_empty());
    }

    proptest! {
        #[test]
        fn rate_interpolation_is_bounded_by_neighbours(
            steps in prop::collection::vec(0.05f64..2.0, 2..40),
            rates in prop::collection::vec(0.0f64..1e3, 41),
            t in 0.0f64..1.0,
        ) {
            let mut w = ArchiveWriter::new();
            let mut z = 40.0;
            for (i, dz) in steps.iter().enumerate() {
                w.push(record(z, rates[i])).unwrap();
                z -= dz;
            }
            let archive = w.archive().unwrap();
            let (lo, hi) = (archive.min_redshift(), archive.max_redshift());
            let q = lo + t * (hi - lo);
            prop_assume!(q < hi);
            let v = archive.interpolate(q, Quantity::AtomicRate).unwrap();
            let max_rate = rates.iter().copied().fold(0.0, f64::max);
            prop_assert!(v >= -1e-9 && v <= max_rate + 1e-9);
        }
    }
}
