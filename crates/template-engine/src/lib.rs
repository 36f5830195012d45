//! `{{variable}}` template engine for contracts and notifications
//!
//! This crate provides:
//! - Placeholder extraction (`extract_variables`, `unique_variables`)
//! - Single-pass substitution that leaves unbound placeholders intact
//! - `TemplateDocument`, template text with its derived variable list
//! - The built-in contract and notification template registry

pub mod document;
pub mod errors;
pub mod render;
pub mod templates;
pub mod variables;

pub use document::TemplateDocument;
pub use errors::{Result, TemplateError};
pub use render::{
    bindings_from_json, bindings_from_pairs, is_fully_bound, render, unbound_variables, Bindings,
};
pub use templates::{get_template, list_templates, Template, TemplateInfo, TemplateKind};
pub use variables::{extract_variables, has_placeholders, humanize, input_prompt, unique_variables};
