//! Test utilities and mock types for radex development.
//!
//! Provides mock implementations of the field access traits
//! ([`FieldReader`], [`FieldWriter`]), synthetic history archives, and a
//! closure-driven fixture propagator for pipeline and step-driver tests.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod archive;
pub mod fixtures;

use std::collections::HashMap;

use radex_core::{FieldId, FieldReader, FieldWriter};

pub use archive::{archive_from_fn, constant_rate_archive};
pub use fixtures::FnPropagator;

/// Mock implementation of [`FieldReader`].
///
/// Pre-populate fields with [`set_field`](MockFieldReader::set_field)
/// before passing to code under test.
#[derive(Default)]
pub struct MockFieldReader {
    fields: HashMap<FieldId, Vec<f32>>,
}

impl MockFieldReader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate a field with data for testing.
    pub fn set_field(&mut self, field: FieldId, data: Vec<f32>) {
        self.fields.insert(field, data);
    }
}

impl FieldReader for MockFieldReader {
    fn read(&self, field: FieldId) -> Option<&[f32]> {
        self.fields.get(&field).map(|v| v.as_slice())
    }
}

/// Mock implementation of [`FieldWriter`].
///
/// Pre-allocate buffers with [`add_field`](MockFieldWriter::add_field) or
/// [`set_field`](MockFieldWriter::set_field), then inspect results with
/// [`get_field`](MockFieldWriter::get_field).
#[derive(Default)]
pub struct MockFieldWriter {
    fields: HashMap<FieldId, Vec<f32>>,
}

impl MockFieldWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-allocate a field buffer with the given size, initialized to zero.
    pub fn add_field(&mut self, field: FieldId, size: usize) {
        self.fields.insert(field, vec![0.0; size]);
    }

    /// Seed a field with values already computed by other collaborators.
    pub fn set_field(&mut self, field: FieldId, data: Vec<f32>) {
        self.fields.insert(field, data);
    }

    /// Read back the current field data for test assertions.
    pub fn get_field(&self, field: FieldId) -> Option<&[f32]> {
        self.fields.get(&field).map(|v| v.as_slice())
    }
}

impl FieldWriter for MockFieldWriter {
    fn write(&mut self, field: FieldId) -> Option<&mut [f32]> {
        self.fields.get_mut(&field).map(|v| v.as_mut_slice())
    }
}
