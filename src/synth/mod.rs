//! Synthesis collaborator: the infrastructure-definition layer.
//!
//! Stacks describe their resources through [`StackBuilder`] and the result
//! is collected into an [`Assembly`]. The orchestration core treats this
//! module as opaque; it supplies names and wired values but never inspects
//! the resource graph.

pub mod handles;
mod template;

pub use template::{Resource, StackBuilder, StackTemplate};

use crate::config::Environment;
use crate::error::SynthError;
use serde::Serialize;
use serde_json::Value;
use std::fs;
use std::path::Path;

/// All stack templates for one assembly run.
#[derive(Debug, Serialize)]
pub struct Assembly {
    pub app_name: String,
    pub environment: Environment,
    pub synthesized_at: chrono::DateTime<chrono::Utc>,
    stacks: Vec<StackTemplate>,
}

impl Assembly {
    pub fn new(app_name: impl Into<String>, environment: Environment) -> Self {
        Self {
            app_name: app_name.into(),
            environment,
            synthesized_at: chrono::Utc::now(),
            stacks: Vec::new(),
        }
    }

    pub fn add_stack(&mut self, template: StackTemplate) {
        self.stacks.push(template);
    }

    pub fn stacks(&self) -> &[StackTemplate] {
        &self.stacks
    }

    pub fn stack(&self, id: &str) -> Option<&StackTemplate> {
        self.stacks.iter().find(|s| s.id == id)
    }

    /// Render the whole assembly as a single JSON document.
    pub fn render(&self) -> Result<Value, SynthError> {
        Ok(serde_json::to_value(self)?)
    }

    /// Write one `<stack-id>.template.json` per stack into `dir`.
    pub fn write_to_dir(&self, dir: &Path) -> Result<(), SynthError> {
        fs::create_dir_all(dir).map_err(|source| SynthError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
        for stack in &self.stacks {
            let path = dir.join(format!("{}.template.json", stack.id));
            let body = serde_json::to_string_pretty(stack)?;
            fs::write(&path, body).map_err(|source| SynthError::Io { path: path.clone(), source })?;
        }
        Ok(())
    }
}
