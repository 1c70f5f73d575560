//! Field access traits shared by propagators and the step driver.

use crate::id::FieldId;

/// Read-only access to per-cell field data.
///
/// The surrounding simulation implements this over its own per-step state;
/// propagators see the previous step's fields through it. Returns `None`
/// if the field is not readable in the current context.
pub trait FieldReader {
    /// Read the data for a field as a flat f32 slice, one entry per cell.
    fn read(&self, field: FieldId) -> Option<&[f32]>;
}

/// Mutable access to per-cell field data of the step being computed.
///
/// Returns `None` if the field is not writable in the current context.
pub trait FieldWriter {
    /// Get a mutable slice for writing field data in place.
    fn write(&mut self, field: FieldId) -> Option<&mut [f32]>;
}
