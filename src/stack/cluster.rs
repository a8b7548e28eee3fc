//! Compute cluster stack. Depends on the network capability.

use crate::context::{ClusterCapability, Context};
use crate::error::{AssemblyError, ConfigError};
use crate::stack::set_default_tags;
use crate::synth::handles::ClusterHandle;
use crate::synth::{Assembly, StackBuilder};
use serde_json::json;

#[derive(Debug)]
pub struct ClusterStack {
    cluster: ClusterHandle,
}

impl ClusterStack {
    pub fn build(ctx: &mut Context, assembly: &mut Assembly) -> Result<Self, AssemblyError> {
        // Read the dependency first so an out-of-order assembly fails before
        // any resource is described.
        let vpc = ctx.network()?.vpc().clone();
        if vpc.name.is_empty() {
            return Err(ConfigError::Invalid("network vpc name is empty".into()).into());
        }

        let stack_id = ctx.resource_id("cluster")?;
        let mut builder = StackBuilder::new(stack_id, "Cluster resources: compute cluster.");
        set_default_tags(&mut builder, ctx);

        let construct_id = ctx.resource_id("compute-cluster")?;
        let name = ctx.resource_name("cluster")?;
        builder.resource(
            &construct_id,
            "compute/cluster",
            json!({
                "name": name,
                "vpc": vpc.name,
                "container_insights": true,
            }),
        )?;

        assembly.add_stack(builder.build());

        Ok(Self {
            cluster: ClusterHandle { construct_id, name },
        })
    }
}

impl ClusterCapability for ClusterStack {
    fn cluster(&self) -> &ClusterHandle {
        &self.cluster
    }
}
