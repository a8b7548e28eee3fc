//! The assembly procedure: builds every stack in dependency order.
//!
//! Strictly sequential and synchronous. Each stack reads its dependencies
//! from the context registry and publishes its own capability before the
//! next stack is built; any registry or naming violation aborts the whole
//! run with the failing domain attached. No partial topology is ever
//! returned.

use crate::config::{Environment, StrataConfig};
use crate::context::{CapabilityRegistry, Context, Domain};
use crate::error::AssemblyError;
use crate::stack::{
    ClusterStack, DatabaseStack, IdentityStack, ImageRegistryStack, MessagingStack, NetworkStack,
    ServiceStack,
};
use crate::synth::Assembly;
use tracing::{debug, info};

/// The fully assembled, internally consistent topology. The registry is
/// sealed: later consumers may read capabilities but never rebind them.
pub struct Topology {
    context: Context,
    assembly: Assembly,
}

impl Topology {
    pub fn app_name(&self) -> &str {
        self.context.app_name()
    }

    pub fn environment(&self) -> &Environment {
        self.context.environment()
    }

    pub fn assembly(&self) -> &Assembly {
        &self.assembly
    }

    pub fn registry(&self) -> &CapabilityRegistry {
        self.context.registry()
    }
}

/// Assemble the whole topology for one environment.
///
/// Build order is fixed: identity, network, cluster, image-registry,
/// database, messaging, service.
pub fn assemble(config: &StrataConfig, environment: Environment) -> Result<Topology, AssemblyError> {
    info!(
        app = %config.app_name,
        environment = %environment.name,
        region = %environment.region,
        "assembling topology"
    );

    let mut ctx = Context::new(config.app_name.clone(), environment.clone());
    let mut assembly = Assembly::new(config.app_name.clone(), environment);

    // The identity stack is shared across environments.
    let identity = IdentityStack::build(&mut ctx, &mut assembly)
        .map_err(|e| e.in_domain(Domain::Identity))?;
    ctx.registry_mut()
        .bind_identity(Box::new(identity))
        .map_err(|e| AssemblyError::from(e).in_domain(Domain::Identity))?;
    debug!(domain = %Domain::Identity, "capability bound");

    /* Network and cluster */

    let network = NetworkStack::build(&mut ctx, &mut assembly, config.vpn.as_ref())
        .map_err(|e| e.in_domain(Domain::Network))?;
    ctx.registry_mut()
        .bind_network(Box::new(network))
        .map_err(|e| AssemblyError::from(e).in_domain(Domain::Network))?;
    debug!(domain = %Domain::Network, "capability bound");

    let cluster =
        ClusterStack::build(&mut ctx, &mut assembly).map_err(|e| e.in_domain(Domain::Cluster))?;
    ctx.registry_mut()
        .bind_cluster(Box::new(cluster))
        .map_err(|e| AssemblyError::from(e).in_domain(Domain::Cluster))?;
    debug!(domain = %Domain::Cluster, "capability bound");

    /* Storage and database */

    let image_registry =
        ImageRegistryStack::build(&mut ctx, &mut assembly, &config.service.api.image)
            .map_err(|e| e.in_domain(Domain::ImageRegistry))?;
    ctx.registry_mut()
        .bind_image_registry(Box::new(image_registry))
        .map_err(|e| AssemblyError::from(e).in_domain(Domain::ImageRegistry))?;
    debug!(domain = %Domain::ImageRegistry, "capability bound");

    let database =
        DatabaseStack::build(&mut ctx, &mut assembly).map_err(|e| e.in_domain(Domain::Database))?;
    ctx.registry_mut()
        .bind_database(Box::new(database))
        .map_err(|e| AssemblyError::from(e).in_domain(Domain::Database))?;
    debug!(domain = %Domain::Database, "capability bound");

    /* Services */

    let messaging = MessagingStack::build(&mut ctx, &mut assembly)
        .map_err(|e| e.in_domain(Domain::Messaging))?;
    ctx.registry_mut()
        .bind_messaging(Box::new(messaging))
        .map_err(|e| AssemblyError::from(e).in_domain(Domain::Messaging))?;
    debug!(domain = %Domain::Messaging, "capability bound");

    let service = ServiceStack::build(&mut ctx, &mut assembly, &config.service.api)
        .map_err(|e| e.in_domain(Domain::Service))?;
    ctx.registry_mut()
        .bind_service(Box::new(service))
        .map_err(|e| AssemblyError::from(e).in_domain(Domain::Service))?;
    debug!(domain = %Domain::Service, "capability bound");

    // Assembly is complete; the registry becomes read-only.
    ctx.seal();

    info!(stacks = assembly.stacks().len(), "topology assembled");
    Ok(Topology { context: ctx, assembly })
}
