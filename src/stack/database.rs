//! Database stack: credentials secret and relational cluster on the
//! network's isolated subnets. Depends on the network capability.

use crate::context::{Context, DatabaseCapability};
use crate::error::AssemblyError;
use crate::stack::set_default_tags;
use crate::synth::handles::DatabaseHandle;
use crate::synth::{Assembly, StackBuilder};
use serde_json::json;

const DEFAULT_DATABASE_NAME: &str = "api";
const DATABASE_PORT: u16 = 5432;

#[derive(Debug)]
pub struct DatabaseStack {
    database: DatabaseHandle,
}

impl DatabaseStack {
    pub fn build(ctx: &mut Context, assembly: &mut Assembly) -> Result<Self, AssemblyError> {
        let vpc = ctx.network()?.vpc().clone();

        let stack_id = ctx.resource_id("database")?;
        let mut builder = StackBuilder::new(
            stack_id,
            "Database resources: credentials secret and relational cluster.",
        );
        set_default_tags(&mut builder, ctx);

        let secret_construct_id = ctx.resource_id("rds-secret-api")?;
        let secret_path = ctx.secret_path("rds-credentials-api")?;
        builder.resource(
            &secret_construct_id,
            "database/credentials-secret",
            json!({
                "username": "admin",
                "secret_name": secret_path,
            }),
        )?;

        let cluster_construct_id = ctx.resource_id("rds-api")?;
        builder.resource(
            &cluster_construct_id,
            "database/cluster",
            json!({
                "identifier": cluster_construct_id,
                "engine": "postgres",
                "default_database": DEFAULT_DATABASE_NAME,
                "port": DATABASE_PORT,
                "instances": 1,
                "vpc": vpc.name,
                "subnet_kind": "private-isolated",
                "credentials_secret": secret_path,
                "removal_policy": "snapshot",
                "deletion_protection": false,
            }),
        )?;

        assembly.add_stack(builder.build());

        Ok(Self {
            database: DatabaseHandle {
                construct_id: cluster_construct_id.clone(),
                identifier: cluster_construct_id,
                default_database: DEFAULT_DATABASE_NAME.to_string(),
                secret_path,
                port: DATABASE_PORT,
            },
        })
    }
}

impl DatabaseCapability for DatabaseStack {
    fn database(&self) -> &DatabaseHandle {
        &self.database
    }
}
