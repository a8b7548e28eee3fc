//! Image registry stack: the container repository for service images.

use crate::config::{ImageConfig, MANAGED_REGISTRY_KIND};
use crate::context::{Context, ImageRegistryCapability};
use crate::error::AssemblyError;
use crate::synth::handles::RepositoryHandle;
use crate::synth::{Assembly, StackBuilder};
use serde_json::json;

#[derive(Debug)]
pub struct ImageRegistryStack {
    repository: RepositoryHandle,
}

impl ImageRegistryStack {
    pub fn build(
        ctx: &mut Context,
        assembly: &mut Assembly,
        image: &ImageConfig,
    ) -> Result<Self, AssemblyError> {
        if image.registry.kind != MANAGED_REGISTRY_KIND {
            return Err(AssemblyError::UnsupportedRegistryKind(
                image.registry.kind.clone(),
            ));
        }

        // Shared across environments, like the identity stack.
        let mut builder = StackBuilder::new(
            format!("{}ImageRegistry", ctx.app_name()),
            "Image registry resources: container repository.",
        );
        builder.tag("Project", ctx.app_name());

        let keep = image.registry.keep_untagged_images;
        builder.resource(
            "api",
            "registry/repository",
            json!({
                "name": image.registry.name,
                "lifecycle_rules": [{
                    "tag_status": "untagged",
                    "max_image_count": keep,
                    "description": format!("Keep only last {keep} untagged images"),
                }],
            }),
        )?;

        assembly.add_stack(builder.build());

        Ok(Self {
            repository: RepositoryHandle {
                construct_id: "api".to_string(),
                name: image.registry.name.clone(),
            },
        })
    }
}

impl ImageRegistryCapability for ImageRegistryStack {
    fn repository(&self) -> &RepositoryHandle {
        &self.repository
    }
}
