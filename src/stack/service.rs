//! Application service stack.
//!
//! Composes the container environment and secret bindings through the
//! namespaced stores, then describes the load-balanced service. Depends on
//! cluster, image-registry, database, and messaging.

use crate::config::ServiceConfig;
use crate::context::{Context, ServiceCapability};
use crate::error::AssemblyError;
use crate::namespace::{env_keys, ServiceEnvironment, ServiceSecrets};
use crate::stack::messaging::{QUEUE_NOTIFICATIONS, TOPIC_APPLICATION};
use crate::stack::set_default_tags;
use crate::synth::handles::{SecretBinding, ServiceHandle};
use crate::synth::{Assembly, StackBuilder};
use serde_json::json;
use std::collections::BTreeMap;

const SERVICE_KEY: &str = "api";

#[derive(Debug)]
pub struct ServiceStack {
    service: ServiceHandle,
}

impl ServiceStack {
    pub fn build(
        ctx: &mut Context,
        assembly: &mut Assembly,
        config: &ServiceConfig,
    ) -> Result<Self, AssemblyError> {
        // Dependencies first: an out-of-order assembly fails here, naming
        // the missing domain, before any resource is described.
        let cluster = ctx.cluster()?.cluster().clone();
        let repository = ctx.image_registry()?.repository().clone();
        let database = ctx.database()?.database().clone();
        let topic = ctx
            .messaging()?
            .topic(TOPIC_APPLICATION)
            .ok_or_else(|| AssemblyError::UnknownTopic(TOPIC_APPLICATION.to_string()))?
            .clone();
        let queue = ctx
            .messaging()?
            .queue(QUEUE_NOTIFICATIONS)
            .ok_or_else(|| AssemblyError::UnknownQueue(QUEUE_NOTIFICATIONS.to_string()))?
            .clone();

        let stack_id = ctx.resource_id("service")?;
        let mut builder = StackBuilder::new(
            stack_id,
            "Service resources: load-balanced container service.",
        );
        set_default_tags(&mut builder, ctx);

        /* Environment variables: computed values merged with config overrides. */

        let mut env_store = ServiceEnvironment::for_app("");
        env_store.set(env_keys::APPLICATION_TOPIC, topic.locator());

        let overrides: BTreeMap<String, String> = config
            .env
            .iter()
            .map(|(key, value)| (key.clone(), value.to_string()))
            .collect();
        let environment = env_store.apply_checked(&overrides)?;

        /* Secret bindings: database credential fields merged with resolved refs. */

        let mut secret_store = ServiceSecrets::new();
        for (key, field) in [
            (env_keys::DATABASE_USERNAME, "username"),
            (env_keys::DATABASE_PASSWORD, "password"),
            (env_keys::DATABASE_HOST, "host"),
            (env_keys::DATABASE_PORT, "port"),
            (env_keys::DATABASE_DB_NAME, "dbname"),
        ] {
            secret_store.set(
                key,
                SecretBinding::DatabaseField {
                    secret_path: database.secret_path.clone(),
                    field: field.to_string(),
                },
            );
        }
        let resolved = resolve_service_secrets(ctx, &mut builder, &config.secrets)?;
        let secrets = secret_store.apply_checked(&resolved)?;

        /* Service */

        let service_name = ctx.resource_name(SERVICE_KEY)?;

        let hosted_zone_id = ctx.resource_id(&format!("hosted-zone-{SERVICE_KEY}"))?;
        builder.resource(
            &hosted_zone_id,
            "dns/hosted-zone",
            json!({
                "zone_name": config.hosted_zone.name,
                "zone_id": config.hosted_zone.id,
            }),
        )?;

        let certificate_id = ctx.resource_id(&format!("certificate-{SERVICE_KEY}"))?;
        builder.resource(
            &certificate_id,
            "dns/certificate",
            json!({
                "domain": config.domain,
                "validation": "dns",
                "hosted_zone": config.hosted_zone.name,
            }),
        )?;

        let service_construct_id = ctx.resource_id(&format!("service-{SERVICE_KEY}"))?;
        builder.resource(
            &service_construct_id,
            "compute/load-balanced-service",
            json!({
                "name": service_name,
                "cluster": cluster.name,
                "image": { "repository": repository.name, "tag": config.image.tag },
                "container_name": "main",
                "environment": environment,
                "secrets": secrets,
                "task_subnets": "private-with-egress",
                "domain": config.domain,
                "certificate": certificate_id,
                "public_load_balancer": config.public_load_balancer,
                "circuit_breaker": { "rollback": true },
                "health_check": { "path": "/healthz", "healthy_codes": "200-204" },
                "log_stream_prefix": service_name,
            }),
        )?;

        /* Parameter export */

        builder.resource(
            &ctx.resource_id(&format!("parameter-{SERVICE_KEY}"))?,
            "parameters/string",
            json!({
                "name": format!("/TaskDef/{service_name}"),
                "description": "The task definition reference of the service.",
            }),
        )?;

        /* Grants */

        builder.resource(
            &ctx.resource_id(&format!("grant-topic-{SERVICE_KEY}"))?,
            "messaging/grant",
            json!({ "target": topic.locator(), "action": "publish", "grantee": service_name }),
        )?;
        builder.resource(
            &ctx.resource_id(&format!("grant-queue-{SERVICE_KEY}"))?,
            "messaging/grant",
            json!({ "target": queue.locator(), "action": "send", "grantee": service_name }),
        )?;

        assembly.add_stack(builder.build());

        Ok(Self {
            service: ServiceHandle {
                construct_id: service_construct_id,
                name: service_name,
                domain: config.domain.clone(),
            },
        })
    }
}

impl ServiceCapability for ServiceStack {
    fn service(&self) -> &ServiceHandle {
        &self.service
    }
}

/// Resolve configured secret references into parameter bindings, one
/// imported parameter construct per logical key.
fn resolve_service_secrets(
    ctx: &mut Context,
    builder: &mut StackBuilder,
    refs: &BTreeMap<String, String>,
) -> Result<BTreeMap<String, SecretBinding>, AssemblyError> {
    let mut out = BTreeMap::new();
    for (key, path) in refs {
        let construct_id = ctx.resource_id(&format!("secret-{key}"))?;
        builder.resource(
            &construct_id,
            "secret/parameter",
            json!({ "parameter_name": path }),
        )?;
        out.insert(key.clone(), SecretBinding::Parameter { path: path.clone() });
    }
    Ok(out)
}
