//! Bracket policies: which redshift column a lookup brackets on, and what
//! a lookup returns when no record pair covers the query.
//!
//! Rate quantities and the gas temperature are archived against different
//! redshift columns of the same record. Keeping one policy per column
//! makes the choice explicit at every call site instead of hiding it behind
//! an index offset.

use radex_core::RadioError;

use crate::archive::HistoryArchive;
use crate::layout::{RATE_REDSHIFT, TEMPERATURE_REDSHIFT};

/// Value returned by temperature lookups outside the archive coverage.
pub const TEMPERATURE_OUT_OF_RANGE: f64 = -100.0;

/// Selects the redshift column and the miss behaviour of a lookup.
pub trait BracketPolicy {
    /// Offset within a record of the redshift this policy brackets on.
    const REDSHIFT_OFFSET: usize;

    /// Result of a lookup at `z` that found no bracketing record pair.
    fn on_miss(archive: &HistoryArchive<'_>, z: f64) -> Result<f64, RadioError>;
}

/// Brackets photon production rates on the rate redshift column.
///
/// Misses are fatal: the integrator must never query outside the archive.
#[derive(Clone, Copy, Debug)]
pub struct RateBracket;

impl BracketPolicy for RateBracket {
    const REDSHIFT_OFFSET: usize = RATE_REDSHIFT;

    fn on_miss(archive: &HistoryArchive<'_>, z: f64) -> Result<f64, RadioError> {
        Err(RadioError::ArchiveOutOfRange {
            redshift: z,
            z_min: archive.min_redshift(),
            z_max: archive.max_redshift(),
        })
    }
}

/// Brackets the gas temperature on the temperature redshift column.
///
/// Misses return [`TEMPERATURE_OUT_OF_RANGE`] and leave the decision to the
/// caller.
#[derive(Clone, Copy, Debug)]
pub struct TemperatureBracket;

impl BracketPolicy for TemperatureBracket {
    const REDSHIFT_OFFSET: usize = TEMPERATURE_REDSHIFT;

    fn on_miss(_archive: &HistoryArchive<'_>, _z: f64) -> Result<f64, RadioError> {
        Ok(TEMPERATURE_OUT_OF_RANGE)
    }
}
