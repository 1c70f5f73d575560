//! Error types for the radio-excess subsystem.
//!
//! Every fatal condition is a value, never a process exit. Each error
//! names the offending value(s) so the step loop can report it and decide
//! whether to abort the run or only the current redshift step.

use std::error::Error;
use std::fmt;

use crate::id::FieldId;

/// Broad classification of a [`RadioError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorClass {
    /// Invalid selector or unsupported parameter combination.
    Usage,
    /// A query fell outside the data that covers it.
    Range,
    /// A computed physical quantity is impossible.
    PhysicalConsistency,
    /// Bracket search did not converge; the axis is corrupt.
    DegenerateSearch,
    /// An input table or buffer has the wrong shape.
    MalformedInput,
}

/// Fatal conditions raised by interpolation, archive lookup, background
/// integration and field correction.
#[derive(Clone, Debug, PartialEq)]
pub enum RadioError {
    /// A numeric selector is outside its allowed set.
    InvalidSelector {
        /// Which selector (e.g. `"archive quantity"`).
        selector: &'static str,
        /// The rejected value.
        value: i32,
        /// Human-readable description of the allowed values.
        allowed: &'static str,
    },
    /// The requested parameter combination cannot be handled.
    UnsupportedConfiguration {
        /// Description of the combination.
        reason: String,
    },
    /// A table query fell outside the axis under the fail overflow policy.
    OutOfRange {
        /// The query value.
        value: f64,
        /// First axis entry.
        first: f64,
        /// Last axis entry.
        last: f64,
    },
    /// A rate query fell outside the redshift range covered by the archive.
    ArchiveOutOfRange {
        /// The query redshift.
        redshift: f64,
        /// Smallest rate redshift stored in the archive.
        z_min: f64,
        /// Largest rate redshift stored in the archive.
        z_max: f64,
    },
    /// The integrated background temperature is negative beyond tolerance.
    NegativeTemperature {
        /// The integrated value in kelvin.
        value: f64,
    },
    /// Bracket search exceeded its iteration cap.
    SearchDiverged {
        /// The query value.
        query: f64,
        /// Iterations performed before giving up.
        iterations: usize,
    },
    /// An axis has fewer than two entries or identical endpoints.
    DegenerateAxis {
        /// Number of axis entries.
        len: usize,
    },
    /// Two buffers that must be positionally aligned have different lengths.
    LengthMismatch {
        /// Length of the reference buffer (axis, or previous field).
        expected: usize,
        /// Length of the other buffer.
        actual: usize,
    },
    /// The packed history archive is inconsistent with its own header.
    MalformedArchive {
        /// Description of the inconsistency.
        reason: String,
    },
}

impl RadioError {
    /// The class of this error.
    pub fn class(&self) -> ErrorClass {
        match self {
            Self::InvalidSelector { .. } | Self::UnsupportedConfiguration { .. } => {
                ErrorClass::Usage
            }
            Self::OutOfRange { .. } | Self::ArchiveOutOfRange { .. } => ErrorClass::Range,
            Self::NegativeTemperature { .. } => ErrorClass::PhysicalConsistency,
            Self::SearchDiverged { .. } => ErrorClass::DegenerateSearch,
            Self::DegenerateAxis { .. }
            | Self::LengthMismatch { .. }
            | Self::MalformedArchive { .. } => ErrorClass::MalformedInput,
        }
    }
}

impl fmt::Display for RadioError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSelector {
                selector,
                value,
                allowed,
            } => write!(f, "invalid {selector} {value}, must be one of {allowed}"),
            Self::UnsupportedConfiguration { reason } => {
                write!(f, "unsupported configuration: {reason}")
            }
            Self::OutOfRange { value, first, last } => {
                write!(f, "value {value:E} is not in table range [{first:E}, {last:E}]")
            }
            Self::ArchiveOutOfRange {
                redshift,
                z_min,
                z_max,
            } => write!(
                f,
                "redshift {redshift:E} is not in the archive redshift range [{z_min:E}, {z_max:E}]"
            ),
            Self::NegativeTemperature { value } => {
                write!(f, "negative radio background temperature {value:E} K")
            }
            Self::SearchDiverged { query, iterations } => write!(
                f,
                "bracket search for {query:E} did not converge after {iterations} iterations"
            ),
            Self::DegenerateAxis { len } => {
                write!(f, "axis with {len} entries cannot bracket a query")
            }
            Self::LengthMismatch { expected, actual } => {
                write!(f, "length mismatch: expected {expected} entries, got {actual}")
            }
            Self::MalformedArchive { reason } => write!(f, "malformed archive: {reason}"),
        }
    }
}

impl Error for RadioError {}

/// Errors from individual propagator execution.
#[derive(Clone, Debug, PartialEq)]
pub enum PropagatorError {
    /// The propagator could not run (missing field, bad buffer).
    ExecutionFailed {
        /// Human-readable description of the failure.
        reason: String,
    },
    /// The propagator's numerics raised a fatal condition.
    Radio(RadioError),
    /// A non-finite value was produced.
    NanDetected {
        /// The field containing the value.
        field_id: FieldId,
        /// Index of the first offending cell, if known.
        cell_index: Option<usize>,
    },
}

impl fmt::Display for PropagatorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ExecutionFailed { reason } => write!(f, "execution failed: {reason}"),
            Self::Radio(e) => write!(f, "{e}"),
            Self::NanDetected {
                field_id,
                cell_index,
            } => {
                write!(f, "non-finite value in field {field_id}")?;
                if let Some(idx) = cell_index {
                    write!(f, " at cell {idx}")?;
                }
                Ok(())
            }
        }
    }
}

impl Error for PropagatorError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Radio(e) => Some(e),
            _ => None,
        }
    }
}

impl From<RadioError> for PropagatorError {
    fn from(e: RadioError) -> Self {
        Self::Radio(e)
    }
}

/// Errors that abort one redshift step.
#[derive(Clone, Debug, PartialEq)]
pub enum StepError {
    /// The homogeneous background integration failed.
    Background(RadioError),
    /// A propagator returned an error.
    PropagatorFailed {
        /// Name of the failing propagator.
        name: String,
        /// The underlying propagator error.
        reason: PropagatorError,
    },
    /// The current redshift is above the previous one, or not a number.
    NonDecreasingRedshift {
        /// Redshift of the previous step.
        prev_redshift: f32,
        /// Redshift of the requested step.
        redshift: f32,
    },
    /// A diagnostic dump attached to the step could not be written.
    Diagnostics {
        /// Description of the failure.
        reason: String,
    },
}

impl fmt::Display for StepError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Background(e) => write!(f, "radio background: {e}"),
            Self::PropagatorFailed { name, reason } => {
                write!(f, "propagator '{name}' failed: {reason}")
            }
            Self::NonDecreasingRedshift {
                prev_redshift,
                redshift,
            } => write!(
                f,
                "redshift must not increase between steps: {prev_redshift} -> {redshift}"
            ),
            Self::Diagnostics { reason } => write!(f, "diagnostic dump failed: {reason}"),
        }
    }
}

impl Error for StepError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Background(e) => Some(e),
            Self::PropagatorFailed { reason, .. } => Some(reason),
            Self::NonDecreasingRedshift { .. } | Self::Diagnostics { .. } => None,
        }
    }
}

/// Errors detected while validating parameter structs and builders.
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// A parameter is outside its physical domain.
    InvalidParameter {
        /// Parameter name as it appears in the parameter struct.
        name: &'static str,
        /// The rejected value.
        value: f64,
        /// The constraint it violated.
        constraint: &'static str,
    },
    /// A required builder input was never set.
    Missing {
        /// Name of the missing input.
        name: &'static str,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidParameter {
                name,
                value,
                constraint,
            } => write!(f, "{name} must be {constraint}, got {value}"),
            Self::Missing { name } => write!(f, "{name} is required"),
        }
    }
}

impl Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn archive_range_message_names_bounds() {
        let e = RadioError::ArchiveOutOfRange {
            redshift: 40.0,
            z_min: 10.0,
            z_max: 35.0,
        };
        let msg = e.to_string();
        assert!(msg.contains("4E1"), "{msg}");
        assert!(msg.contains("1E1"), "{msg}");
        assert!(msg.contains("3.5E1"), "{msg}");
        assert_eq!(e.class(), ErrorClass::Range);
    }

    #[test]
    fn classes_follow_taxonomy() {
        let usage = RadioError::InvalidSelector {
            selector: "archive quantity",
            value: 4,
            allowed: "[1, 2, 3]",
        };
        assert_eq!(usage.class(), ErrorClass::Usage);
        assert_eq!(
            RadioError::NegativeTemperature { value: -1.0 }.class(),
            ErrorClass::PhysicalConsistency
        );
        assert_eq!(
            RadioError::SearchDiverged {
                query: 1.0,
                iterations: 101
            }
            .class(),
            ErrorClass::DegenerateSearch
        );
        assert_eq!(
            RadioError::DegenerateAxis { len: 1 }.class(),
            ErrorClass::MalformedInput
        );
    }

    #[test]
    fn step_error_chains_sources() {
        let inner = RadioError::UnsupportedConfiguration {
            reason: "minor sources".into(),
        };
        let step = StepError::PropagatorFailed {
            name: "RadioFieldRefine".into(),
            reason: PropagatorError::from(inner.clone()),
        };
        let prop = step.source().unwrap();
        assert_eq!(prop.to_string(), inner.to_string());
        assert!(prop.source().is_some());
        assert!(step.to_string().starts_with("propagator 'RadioFieldRefine' failed"));
    }

    #[test]
    fn nan_detected_mentions_cell() {
        let e = PropagatorError::NanDetected {
            field_id: FieldId(2),
            cell_index: Some(17),
        };
        assert_eq!(e.to_string(), "non-finite value in field 2 at cell 17");
    }

    #[test]
    fn config_error_display() {
        let e = ConfigError::InvalidParameter {
            name: "hlittle",
            value: -0.7,
            constraint: "finite and > 0",
        };
        assert_eq!(e.to_string(), "hlittle must be finite and > 0, got -0.7");
        assert_eq!(
            ConfigError::Missing { name: "field" }.to_string(),
            "field is required"
        );
    }
}
