//! Stack templates and the resource builder.

use crate::error::SynthError;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// One synthesized resource: a kind plus free-form properties. The core
/// never interprets the properties.
#[derive(Debug, Clone, Serialize)]
pub struct Resource {
    pub kind: String,
    pub properties: Value,
}

/// A fully built stack: construct-id-keyed resources plus metadata.
#[derive(Debug, Clone, Serialize)]
pub struct StackTemplate {
    pub id: String,
    pub description: String,
    pub tags: BTreeMap<String, String>,
    pub resources: BTreeMap<String, Resource>,
}

impl StackTemplate {
    pub fn resource(&self, construct_id: &str) -> Option<&Resource> {
        self.resources.get(construct_id)
    }
}

/// Accumulates resources for one stack. Construct ids must be unique within
/// the stack.
#[derive(Debug)]
pub struct StackBuilder {
    id: String,
    description: String,
    tags: BTreeMap<String, String>,
    resources: BTreeMap<String, Resource>,
}

impl StackBuilder {
    pub fn new(id: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
            tags: BTreeMap::new(),
            resources: BTreeMap::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn tag(&mut self, key: &str, value: &str) -> &mut Self {
        self.tags.insert(key.to_string(), value.to_string());
        self
    }

    /// Add a resource under `construct_id`.
    pub fn resource(
        &mut self,
        construct_id: &str,
        kind: &str,
        properties: Value,
    ) -> Result<(), SynthError> {
        if self.resources.contains_key(construct_id) {
            return Err(SynthError::DuplicateConstructId(
                construct_id.to_string(),
                self.id.clone(),
            ));
        }
        self.resources.insert(
            construct_id.to_string(),
            Resource {
                kind: kind.to_string(),
                properties,
            },
        );
        Ok(())
    }

    pub fn build(self) -> StackTemplate {
        StackTemplate {
            id: self.id,
            description: self.description,
            tags: self.tags,
            resources: self.resources,
        }
    }
}
