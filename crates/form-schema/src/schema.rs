//! Ordered, uniquely keyed collection of form fields
//!
//! Every mutating operation takes `&self` and returns a new schema, so a
//! builder can keep the previous snapshot for undo or diffing.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::field::{FieldType, FieldUpdate, FormField};
use crate::validation::{self, ValidationError};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormSchema {
    fields: Vec<FormField>,
}

impl FormSchema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a schema from existing fields, order preserved.
    ///
    /// Ids are not checked here; `validate` reports duplicates.
    pub fn from_fields(fields: Vec<FormField>) -> Self {
        Self { fields }
    }

    pub fn fields(&self) -> &[FormField] {
        &self.fields
    }

    pub fn into_fields(self) -> Vec<FormField> {
        self.fields
    }

    pub fn field(&self, id: &str) -> Option<&FormField> {
        self.fields.iter().find(|f| f.id == id)
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.position(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FormField> {
        self.fields.iter()
    }

    /// Number of fields marked required
    pub fn required_count(&self) -> usize {
        self.fields.iter().filter(|f| f.required).count()
    }

    /// Append a new field of `field_type` with builder defaults
    pub fn add_field(&self, field_type: FieldType) -> FormSchema {
        let id = self.fresh_id();
        tracing::debug!(field_id = %id, field_type = %field_type, "field added");

        let mut fields = self.fields.clone();
        fields.push(FormField::new(id, field_type));
        FormSchema { fields }
    }

    /// Apply a partial update to the field with `id`.
    ///
    /// Unknown ids leave the schema unchanged.
    pub fn update_field(&self, id: &str, update: &FieldUpdate) -> FormSchema {
        let mut next = self.clone();
        match next.fields.iter_mut().find(|f| f.id == id) {
            Some(field) => field.apply(update),
            None => tracing::debug!(field_id = id, "update ignored, no such field"),
        }
        next
    }

    /// Remove the field with `id`, keeping the others in order
    pub fn remove_field(&self, id: &str) -> FormSchema {
        let fields: Vec<FormField> = self.fields.iter().filter(|f| f.id != id).cloned().collect();
        if fields.len() < self.fields.len() {
            tracing::debug!(field_id = id, "field removed");
        }
        FormSchema { fields }
    }

    /// Move the field with `id` to `index` (clamped to the last position)
    pub fn move_field(&self, id: &str, index: usize) -> FormSchema {
        let mut next = self.clone();
        if let Some(from) = next.position(id) {
            let field = next.fields.remove(from);
            let to = index.min(next.fields.len());
            next.fields.insert(to, field);
        }
        next
    }

    pub fn validate(&self) -> Vec<ValidationError> {
        validation::validate(self)
    }

    fn fresh_id(&self) -> String {
        loop {
            let id = Uuid::new_v4().to_string();
            if !self.contains(&id) {
                return id;
            }
        }
    }
}

impl<'a> IntoIterator for &'a FormSchema {
    type Item = &'a FormField;
    type IntoIter = std::slice::Iter<'a, FormField>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}
