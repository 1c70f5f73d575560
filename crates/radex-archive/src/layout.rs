//! Slot layout of the packed history archive.
//!
//! ```text
//! buf[0]                     record count N (stored as f64)
//! buf[1 + 5r .. 1 + 5r + 5]  record r, r in 0..N:
//!     +0  temperature redshift
//!     +1  atomic-cooling photon production rate
//!     +2  gas kinetic temperature
//!     +3  minihalo photon production rate
//!     +4  rate redshift
//! ```
//!
//! Rates are paired with the redshift in slot +4, the temperature with the
//! one in slot +0. The two redshift columns are not interchangeable.

use radex_core::{Population, RadioError};

/// Index of the record count.
pub const COUNT_SLOT: usize = 0;
/// Index of the first slot of record 0.
pub const HEADER_LEN: usize = 1;
/// Slots per record.
pub const RECORD_STRIDE: usize = 5;

/// Offset of the temperature redshift within a record.
pub const TEMPERATURE_REDSHIFT: usize = 0;
/// Offset of the atomic-cooling rate within a record.
pub const ATOMIC_RATE: usize = 1;
/// Offset of the gas temperature within a record.
pub const GAS_TEMPERATURE: usize = 2;
/// Offset of the minihalo rate within a record.
pub const MINIHALO_RATE: usize = 3;
/// Offset of the rate redshift within a record.
pub const RATE_REDSHIFT: usize = 4;

/// Buffer index of `offset` within record `record`.
pub const fn slot_index(record: usize, offset: usize) -> usize {
    HEADER_LEN + RECORD_STRIDE * record + offset
}

/// Buffer length required to hold `records` records.
pub const fn buffer_len(records: usize) -> usize {
    HEADER_LEN + RECORD_STRIDE * records
}

/// One archived snapshot, unpacked.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ArchiveRecord {
    /// Redshift the gas temperature was sampled at.
    pub temperature_redshift: f64,
    /// Cumulative atomic-cooling ionizing photon production rate.
    pub atomic_rate: f64,
    /// Gas kinetic temperature in kelvin.
    pub gas_temperature: f64,
    /// Cumulative minihalo ionizing photon production rate.
    pub minihalo_rate: f64,
    /// Redshift the two rates were sampled at.
    pub rate_redshift: f64,
}

impl ArchiveRecord {
    /// Unpack a record from its five slots.
    pub fn from_slots(slots: &[f64; RECORD_STRIDE]) -> Self {
        Self {
            temperature_redshift: slots[TEMPERATURE_REDSHIFT],
            atomic_rate: slots[ATOMIC_RATE],
            gas_temperature: slots[GAS_TEMPERATURE],
            minihalo_rate: slots[MINIHALO_RATE],
            rate_redshift: slots[RATE_REDSHIFT],
        }
    }

    /// Pack the record into its five slots.
    pub fn to_slots(&self) -> [f64; RECORD_STRIDE] {
        let mut slots = [0.0; RECORD_STRIDE];
        slots[TEMPERATURE_REDSHIFT] = self.temperature_redshift;
        slots[ATOMIC_RATE] = self.atomic_rate;
        slots[GAS_TEMPERATURE] = self.gas_temperature;
        slots[MINIHALO_RATE] = self.minihalo_rate;
        slots[RATE_REDSHIFT] = self.rate_redshift;
        slots
    }
}

/// An archived quantity that can be interpolated in redshift.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Quantity {
    /// Atomic-cooling photon production rate (selector 1).
    AtomicRate,
    /// Minihalo photon production rate (selector 2).
    MinihaloRate,
    /// Gas kinetic temperature (selector 3).
    GasTemperature,
}

impl Quantity {
    /// Decode the numeric selector used by the surrounding simulation.
    ///
    /// # Errors
    ///
    /// [`RadioError::InvalidSelector`] for anything but 1, 2 or 3.
    pub fn from_code(code: i32) -> Result<Self, RadioError> {
        match code {
            1 => Ok(Self::AtomicRate),
            2 => Ok(Self::MinihaloRate),
            3 => Ok(Self::GasTemperature),
            _ => Err(RadioError::InvalidSelector {
                selector: "archive quantity",
                value: code,
                allowed: "[1, 2, 3]",
            }),
        }
    }

    /// The numeric selector of this quantity.
    pub fn code(self) -> i32 {
        match self {
            Self::AtomicRate => 1,
            Self::MinihaloRate => 2,
            Self::GasTemperature => 3,
        }
    }

    /// Offset of this quantity's value within a record.
    pub fn value_offset(self) -> usize {
        match self {
            Self::AtomicRate => ATOMIC_RATE,
            Self::MinihaloRate => MINIHALO_RATE,
            Self::GasTemperature => GAS_TEMPERATURE,
        }
    }
}

impl From<Population> for Quantity {
    fn from(p: Population) -> Self {
        match p {
            Population::Atomic => Self::AtomicRate,
            Population::Minihalo => Self::MinihaloRate,
        }
    }
}
