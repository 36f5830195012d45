//! Built-in contract and notification templates

pub mod embedded;
pub mod registry;

pub use registry::{
    get_template, list_templates, RenderedTemplate, Template, TemplateInfo, TemplateKind,
    TemplateStatus,
};
