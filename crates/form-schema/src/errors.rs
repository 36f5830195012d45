//! Error types for form schema operations

use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SchemaError {
    #[error("Unknown field type: {0}")]
    UnknownFieldType(String),

    #[error("Unknown form template: {0}")]
    UnknownTemplate(String),
}
