//! Read-only view over a packed history archive.

use radex_core::RadioError;

use crate::layout::{
    slot_index, ArchiveRecord, Quantity, COUNT_SLOT, HEADER_LEN, RATE_REDSHIFT, RECORD_STRIDE,
};
use crate::policy::{BracketPolicy, RateBracket, TemperatureBracket};

/// A validated, borrowed view of the history archive buffer.
///
/// The archive is produced by the surrounding simulation (or by
/// [`ArchiveWriter`](crate::ArchiveWriter)) one record per redshift step,
/// at decreasing redshift. This type never mutates it.
#[derive(Clone, Copy, Debug)]
pub struct HistoryArchive<'a> {
    buf: &'a [f64],
    len: usize,
}

impl<'a> HistoryArchive<'a> {
    /// Validate `buf` against its own header.
    ///
    /// # Errors
    ///
    /// [`RadioError::MalformedArchive`] if the buffer is empty, the record
    /// count is not a finite number >= 1, or the buffer is too short for the
    /// records it claims to hold.
    pub fn new(buf: &'a [f64]) -> Result<Self, RadioError> {
        let raw = *buf.get(COUNT_SLOT).ok_or_else(|| RadioError::MalformedArchive {
            reason: "buffer has no record count".to_string(),
        })?;
        let count = raw.round();
        if !count.is_finite() || count < 1.0 {
            return Err(RadioError::MalformedArchive {
                reason: format!("record count {raw} must be at least 1"),
            });
        }
        // Compared in f64 so a huge count cannot overflow the slot arithmetic.
        let capacity = (buf.len() - HEADER_LEN) / RECORD_STRIDE;
        if count > capacity as f64 {
            return Err(RadioError::MalformedArchive {
                reason: format!(
                    "{count} records need {} slots, buffer has {}",
                    count * RECORD_STRIDE as f64 + HEADER_LEN as f64,
                    buf.len()
                ),
            });
        }
        let len = count as usize;
        Ok(Self { buf, len })
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the archive holds no records. [`HistoryArchive::new`]
    /// rejects empty buffers.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    fn slot(&self, record: usize, offset: usize) -> f64 {
        self.buf[slot_index(record, offset)]
    }

    /// Unpack record `index`, or `None` past the end.
    pub fn record(&self, index: usize) -> Option<ArchiveRecord> {
        if index >= self.len {
            return None;
        }
        let start = slot_index(index, 0);
        let slots: &[f64; RECORD_STRIDE] = self.buf[start..start + RECORD_STRIDE]
            .try_into()
            .ok()?;
        Some(ArchiveRecord::from_slots(slots))
    }

    /// All records, oldest (highest redshift) first.
    pub fn records(&self) -> impl Iterator<Item = ArchiveRecord> + '_ {
        (0..self.len).filter_map(move |i| self.record(i))
    }

    /// Highest rate redshift, from the first record.
    pub fn max_redshift(&self) -> f64 {
        self.slot(0, RATE_REDSHIFT)
    }

    /// Lowest rate redshift, from the last record.
    pub fn min_redshift(&self) -> f64 {
        self.slot(self.len - 1, RATE_REDSHIFT)
    }

    /// Index `r` of the later record of the pair `(r - 1, r)` whose
    /// redshifts under policy `P` satisfy `z[r - 1] > z >= z[r]`.
    ///
    /// Every pair is tested and the last match wins.
    pub fn locate<P: BracketPolicy>(&self, z: f64) -> Option<usize> {
        let mut hit = None;
        for idx in 1..self.len {
            let z1 = self.slot(idx - 1, P::REDSHIFT_OFFSET);
            let z2 = self.slot(idx, P::REDSHIFT_OFFSET);
            if z2 <= z && z < z1 {
                hit = Some(idx);
            }
        }
        hit
    }

    /// Interpolate the value at `value_offset` linearly in the redshift
    /// column chosen by `P`.
    pub fn interpolate_with<P: BracketPolicy>(
        &self,
        z: f64,
        value_offset: usize,
    ) -> Result<f64, RadioError> {
        let Some(idx) = self.locate::<P>(z) else {
            return P::on_miss(self, z);
        };
        let z1 = self.slot(idx - 1, P::REDSHIFT_OFFSET);
        let z2 = self.slot(idx, P::REDSHIFT_OFFSET);
        let f1 = self.slot(idx - 1, value_offset);
        let f2 = self.slot(idx, value_offset);
        Ok((f2 - f1) * (z - z1) / (z2 - z1) + f1)
    }

    /// Interpolate `quantity` at redshift `z`.
    ///
    /// # Errors
    ///
    /// [`RadioError::ArchiveOutOfRange`] for a rate query the archive does not
    /// cover. Temperature queries never fail; outside the coverage they
    /// return [`TEMPERATURE_OUT_OF_RANGE`](crate::TEMPERATURE_OUT_OF_RANGE).
    pub fn interpolate(&self, z: f64, quantity: Quantity) -> Result<f64, RadioError> {
        match quantity {
            Quantity::AtomicRate | Quantity::MinihaloRate => {
                self.interpolate_with::<RateBracket>(z, quantity.value_offset())
            }
            Quantity::GasTemperature => {
                self.interpolate_with::<TemperatureBracket>(z, quantity.value_offset())
            }
        }
    }

    /// Interpolate the quantity with numeric selector `code` (1, 2 or 3).
    pub fn interpolate_code(&self, z: f64, code: i32) -> Result<f64, RadioError> {
        self.interpolate(z, Quantity::from_code(code)?)
    }
}
