//! Network stack: the virtual network and the optional developer VPN.

use crate::config::VpnConfig;
use crate::context::{Context, NetworkCapability};
use crate::error::AssemblyError;
use crate::stack::set_default_tags;
use crate::synth::handles::{SubnetGroup, SubnetKind, VpcHandle};
use crate::synth::{Assembly, StackBuilder};
use serde_json::json;

/// CIDR range of the environment's virtual network.
const VPC_CIDR: &str = "10.0.0.0/22";

#[derive(Debug)]
pub struct NetworkStack {
    vpc: VpcHandle,
}

impl NetworkStack {
    pub fn build(
        ctx: &mut Context,
        assembly: &mut Assembly,
        vpn: Option<&VpnConfig>,
    ) -> Result<Self, AssemblyError> {
        let stack_id = ctx.resource_id("network")?;
        let mut builder = StackBuilder::new(
            stack_id,
            "Network resources: virtual network and developer VPN.",
        );
        set_default_tags(&mut builder, ctx);

        let subnet_groups = vec![
            SubnetGroup {
                name: "Public".to_string(),
                kind: SubnetKind::Public,
                cidr_mask: 26,
            },
            SubnetGroup {
                name: "PrivateWithEgress".to_string(),
                kind: SubnetKind::PrivateWithEgress,
                cidr_mask: 26,
            },
            // At least two isolated subnets are required by the database cluster.
            SubnetGroup {
                name: "PrivateIsolated".to_string(),
                kind: SubnetKind::PrivateIsolated,
                cidr_mask: 26,
            },
        ];

        let vpc_construct_id = ctx.resource_id("default-vpc")?;
        let vpc_name = ctx.resource_name("vpc")?;
        let groups_value = serde_json::to_value(&subnet_groups).map_err(crate::error::SynthError::Render)?;
        builder.resource(
            &vpc_construct_id,
            "network/vpc",
            json!({
                "name": vpc_name,
                "cidr": VPC_CIDR,
                "max_azs": 2,
                "subnet_groups": groups_value,
            }),
        )?;

        if let Some(vpn) = vpn {
            Self::add_vpn(ctx, &mut builder, vpn, &vpc_name)?;
        }

        assembly.add_stack(builder.build());

        Ok(Self {
            vpc: VpcHandle {
                construct_id: vpc_construct_id,
                name: vpc_name,
                cidr: VPC_CIDR.to_string(),
                subnet_groups,
            },
        })
    }

    fn add_vpn(
        ctx: &mut Context,
        builder: &mut StackBuilder,
        vpn: &VpnConfig,
        vpc_name: &str,
    ) -> Result<(), AssemblyError> {
        builder.resource(
            &ctx.resource_id("security-group-vpn")?,
            "network/security-group",
            json!({
                "vpc": vpc_name,
                "description": "Developer VPN security group",
                "ingress": [{ "protocol": "udp", "port": 443, "peer": "any" }],
            }),
        )?;
        builder.resource(
            &ctx.resource_id("log-group-vpn")?,
            "logs/group",
            json!({ "retention_days": 30 }),
        )?;
        builder.resource(
            &ctx.resource_id("endpoint-vpn")?,
            "network/vpn-endpoint",
            json!({
                "vpc": vpc_name,
                "description": "VPN endpoint for developers to access private services.",
                "cidr": "192.168.128.0/22",
                "split_tunnel": true,
                "server_certificate": vpn.certificate.server_ref,
                "client_certificate": vpn.certificate.client_ref,
            }),
        )?;
        Ok(())
    }
}

impl NetworkCapability for NetworkStack {
    fn vpc(&self) -> &VpcHandle {
        &self.vpc
    }
}
