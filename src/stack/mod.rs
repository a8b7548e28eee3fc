//! Infrastructure stacks, one per capability domain.
//!
//! Every stack follows the same shape: read dependencies from the context
//! registry, describe resources through the synthesis builder, push the
//! finished template into the assembly, and return the value that gets
//! published as this domain's capability.

pub mod cluster;
pub mod database;
pub mod identity;
pub mod image_registry;
pub mod messaging;
pub mod network;
pub mod service;

pub use cluster::ClusterStack;
pub use database::DatabaseStack;
pub use identity::IdentityStack;
pub use image_registry::ImageRegistryStack;
pub use messaging::MessagingStack;
pub use network::NetworkStack;
pub use service::ServiceStack;

use crate::context::Context;
use crate::synth::StackBuilder;

/// Default tags applied to every environment-scoped stack.
pub(crate) fn set_default_tags(builder: &mut StackBuilder, ctx: &Context) {
    builder.tag("Project", ctx.app_name());
    builder.tag("Environment", ctx.environment().name.as_str());
}
