//! Form builder schema model
//!
//! An ordered collection of typed field descriptors with value-semantics
//! CRUD (`add_field`, `update_field`, `remove_field`, `move_field`) and
//! advisory validation, plus the KYC form records that wrap a schema.

pub mod catalog;
pub mod errors;
pub mod field;
pub mod form;
pub mod schema;
pub mod validation;

pub use catalog::{default_onboarding_schema, starter_schema, FormTemplateInfo, FORM_TEMPLATES};
pub use errors::SchemaError;
pub use field::{FieldType, FieldUpdate, FormField};
pub use form::{FormOptions, FormStatus, KycForm};
pub use schema::FormSchema;
pub use validation::{validate, ValidationError};
