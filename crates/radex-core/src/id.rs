//! Strongly-typed identifiers.

use std::fmt;

/// Identifies a per-cell field owned by the surrounding simulation.
///
/// The radio temperature box is one such field; the driver never
/// allocates fields itself, it only reads and writes them by ID.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FieldId(pub u32);

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for FieldId {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

/// Sequence number of a redshift step, counted from the first step the
/// driver executed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StepId(pub u64);

impl StepId {
    /// The step after this one.
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for StepId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_id_display_and_from() {
        let id: FieldId = 7u32.into();
        assert_eq!(id, FieldId(7));
        assert_eq!(id.to_string(), "7");
    }

    #[test]
    fn step_id_advances() {
        assert_eq!(StepId::default().next(), StepId(1));
        assert_eq!(StepId(41).next().to_string(), "42");
    }
}
