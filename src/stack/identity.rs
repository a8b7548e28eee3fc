//! Identity and access stack: groups, users, roles, and policies.

use crate::context::{Context, IdentityCapability};
use crate::error::AssemblyError;
use crate::synth::handles::RoleHandle;
use crate::synth::{Assembly, StackBuilder};
use serde_json::json;
use std::collections::BTreeMap;

/// Role assumed by CI/CD pipelines.
pub const ROLE_CICD: &str = "cicd";

#[derive(Debug)]
pub struct IdentityStack {
    roles: BTreeMap<String, RoleHandle>,
}

impl IdentityStack {
    pub fn build(ctx: &mut Context, assembly: &mut Assembly) -> Result<Self, AssemblyError> {
        // The identity stack is shared across environments, so its id is
        // derived from the application name alone.
        let mut builder = StackBuilder::new(
            format!("{}Identity", ctx.app_name()),
            "Identity resources: groups, users, roles, and policies.",
        );
        builder.tag("Project", ctx.app_name());

        /* Groups */

        builder.resource(
            "Group::Developer",
            "identity/group",
            json!({ "name": "Developer" }),
        )?;
        builder.resource(
            "Group::LogReader",
            "identity/group",
            json!({ "name": "LogReader" }),
        )?;

        /* Users */

        builder.resource(
            "User::CICD",
            "identity/user",
            json!({ "name": "ci@example.io" }),
        )?;

        /* Roles */

        builder.resource(
            "Role::CICD",
            "identity/role",
            json!({
                "name": "CICD",
                "description": "A role assumed by CI/CD pipelines.",
                "assumed_by": ["federated:ci", "user:ci@example.io"],
            }),
        )?;

        /* Policies */

        builder.resource(
            "Policy::CI",
            "identity/policy",
            json!({
                "name": "CI",
                "statements": [
                    { "effect": "allow", "actions": ["secrets:*"], "resources": ["*"] },
                    { "effect": "deny", "actions": ["secrets:delete*", "secrets:update*"], "resources": ["*"] },
                ],
                "users": ["ci@example.io"],
                "roles": ["CICD"],
            }),
        )?;
        builder.resource(
            "Policy::CD",
            "identity/policy",
            json!({
                "name": "CD",
                "statements": [
                    {
                        "effect": "allow",
                        "actions": [
                            "identity:*", "deploy:*", "monitoring:*", "secrets:*",
                            "parameters:*", "registry:*", "compute:*", "database:*",
                            "storage:*", "messaging:*", "tags:*",
                        ],
                        "resources": ["*"],
                    },
                    // Stack deletion requires human intervention.
                    { "effect": "deny", "actions": ["deploy:delete-stack"], "resources": ["*"] },
                ],
                "users": ["ci@example.io"],
                "roles": ["CICD"],
            }),
        )?;
        builder.resource(
            "Policy::Developer",
            "identity/policy",
            json!({
                "name": "Developer",
                "statements": [
                    {
                        "effect": "allow",
                        "actions": [
                            "identity:get-role", "identity:pass-role", "identity:list-roles",
                            "deploy:*", "monitoring:*", "secrets:*", "parameters:*",
                            "registry:*", "compute:*", "database:*", "messaging:*", "logs:*",
                        ],
                        "resources": ["*"],
                    },
                    {
                        "effect": "deny",
                        "actions": ["deploy:delete-stack", "deploy:update-stack"],
                        "resources": ["stack/Identity/*"],
                    },
                ],
                "groups": ["Developer"],
            }),
        )?;
        builder.resource(
            "Policy::LogReader",
            "identity/policy",
            json!({
                "name": "LogReader",
                "statements": [
                    {
                        "effect": "allow",
                        "actions": [
                            "logs:describe-log-groups", "logs:describe-log-streams",
                            "logs:filter-log-events", "logs:get-log-events",
                        ],
                        "resources": ["*"],
                    },
                ],
                "groups": ["LogReader"],
            }),
        )?;

        assembly.add_stack(builder.build());

        let mut roles = BTreeMap::new();
        roles.insert(
            ROLE_CICD.to_string(),
            RoleHandle {
                construct_id: "Role::CICD".to_string(),
                name: "CICD".to_string(),
            },
        );
        Ok(Self { roles })
    }
}

impl IdentityCapability for IdentityStack {
    fn role(&self, name: &str) -> Option<&RoleHandle> {
        self.roles.get(name)
    }
}
