//! Editable template text with its derived variable list

use serde::{Deserialize, Deserializer, Serialize};
use std::path::Path;

use crate::errors::Result;
use crate::render::{self, Bindings};
use crate::variables::unique_variables;

/// Template content together with the variables it declares.
///
/// Only `content` is serialized; the variable list is recomputed whenever the
/// content changes or the document is deserialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemplateDocument {
    content: String,
    #[serde(skip)]
    variable_names: Vec<String>,
}

impl TemplateDocument {
    pub fn new(content: impl Into<String>) -> Self {
        let content = content.into();
        let variable_names = unique_variables(&content);
        Self {
            content,
            variable_names,
        }
    }

    /// Load template text from a file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Ok(Self::new(content))
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// Distinct variable names in order of first appearance
    pub fn variable_names(&self) -> &[String] {
        &self.variable_names
    }

    /// Replace the content and recompute the variable list
    pub fn set_content(&mut self, content: impl Into<String>) {
        self.content = content.into();
        self.variable_names = unique_variables(&self.content);
        tracing::debug!(
            variables = self.variable_names.len(),
            "template content updated"
        );
    }

    pub fn render(&self, bindings: &Bindings) -> String {
        render::render(&self.content, bindings)
    }

    /// Variables still waiting for a value
    pub fn unbound(&self, bindings: &Bindings) -> Vec<String> {
        self.variable_names
            .iter()
            .filter(|name| !bindings.contains_key(name.as_str()))
            .cloned()
            .collect()
    }

    pub fn is_fully_bound(&self, bindings: &Bindings) -> bool {
        self.unbound(bindings).is_empty()
    }
}

impl Default for TemplateDocument {
    fn default() -> Self {
        Self::new(String::new())
    }
}

impl<'de> Deserialize<'de> for TemplateDocument {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct Raw {
            content: String,
        }

        let raw = Raw::deserialize(deserializer)?;
        Ok(TemplateDocument::new(raw.content))
    }
}
