//! A minimal owned field store.
//!
//! The surrounding simulation normally implements [`FieldReader`] and
//! [`FieldWriter`] over its own per-step boxes; [`VecFields`] stands in
//! when there is none.

use std::collections::HashMap;

use radex_core::{FieldId, FieldReader, FieldWriter};

/// Fields stored as one `Vec<f32>` each.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct VecFields {
    fields: HashMap<FieldId, Vec<f32>>,
}

impl VecFields {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a field.
    pub fn insert(&mut self, field: FieldId, data: Vec<f32>) {
        self.fields.insert(field, data);
    }

    /// Remove a field, returning its data.
    pub fn remove(&mut self, field: FieldId) -> Option<Vec<f32>> {
        self.fields.remove(&field)
    }
}

impl FieldReader for VecFields {
    fn read(&self, field: FieldId) -> Option<&[f32]> {
        self.fields.get(&field).map(Vec::as_slice)
    }
}

impl FieldWriter for VecFields {
    fn write(&mut self, field: FieldId) -> Option<&mut [f32]> {
        self.fields.get_mut(&field).map(Vec::as_mut_slice)
    }
}
