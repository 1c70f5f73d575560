//! The [`FieldSet`] used by propagators to declare their field access.

use indexmap::IndexSet;

use crate::id::FieldId;

/// An insertion-ordered set of field IDs.
///
/// Propagators declare which fields they read and write with this type so
/// the pipeline can be validated once, before the first redshift step.
/// Iteration follows declaration order, which keeps error messages and
/// metrics stable from run to run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FieldSet {
    ids: IndexSet<FieldId>,
}

impl FieldSet {
    /// Create an empty field set.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Insert a field ID. Returns `false` if it was already present.
    pub fn insert(&mut self, field: FieldId) -> bool {
        self.ids.insert(field)
    }

    /// Check whether the set contains a field ID.
    pub fn contains(&self, field: FieldId) -> bool {
        self.ids.contains(&field)
    }

    /// Returns `true` if the set contains no fields.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Returns the number of fields in the set.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Iterate over the field IDs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = FieldId> + '_ {
        self.ids.iter().copied()
    }
}

impl FromIterator<FieldId> for FieldSet {
    fn from_iter<I: IntoIterator<Item = FieldId>>(iter: I) -> Self {
        Self {
            ids: iter.into_iter().collect(),
        }
    }
}
