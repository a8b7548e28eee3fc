//! End-to-end assembly tests: build order, capability wiring, and output.

use std::collections::BTreeMap;
use strata::assembly::assemble;
use strata::config::{Environment, EnvironmentName, StrataConfig, VpnCertificates, VpnConfig};
use strata::context::Domain;

fn environment() -> Environment {
    let mut vars = BTreeMap::new();
    vars.insert("STRATA_REGION".to_string(), "eu-west-1".to_string());
    Environment::resolve(EnvironmentName::Dev, &vars).unwrap()
}

#[test]
fn test_stacks_assemble_in_fixed_order() {
    let config = StrataConfig::for_environment(EnvironmentName::Dev);
    let topology = assemble(&config, environment()).unwrap();

    let ids: Vec<&str> = topology
        .assembly()
        .stacks()
        .iter()
        .map(|s| s.id.as_str())
        .collect();
    assert_eq!(
        ids,
        vec![
            "BackendIdentity",
            "Dev-Backend-Network",
            "Dev-Backend-Cluster",
            "BackendImageRegistry",
            "Dev-Backend-Database",
            "Dev-Backend-Message",
            "Dev-Backend-Service",
        ]
    );
}

#[test]
fn test_every_domain_is_bound_and_registry_sealed() {
    let config = StrataConfig::for_environment(EnvironmentName::Dev);
    let topology = assemble(&config, environment()).unwrap();

    for domain in Domain::ORDERED {
        assert!(topology.registry().is_bound(domain), "{domain} not bound");
    }
    assert!(topology.registry().is_sealed());
}

#[test]
fn test_capabilities_readable_after_assembly() {
    let config = StrataConfig::for_environment(EnvironmentName::Dev);
    let topology = assemble(&config, environment()).unwrap();
    let registry = topology.registry();

    assert_eq!(registry.network().unwrap().vpc().name, "dev-backend-vpc");
    assert_eq!(
        registry.cluster().unwrap().cluster().name,
        "dev-backend-cluster"
    );
    assert_eq!(
        registry.database().unwrap().database().secret_path,
        "dev/backend/rds-credentials-api"
    );
    assert_eq!(
        registry.service().unwrap().service().domain,
        "api.dev.svc.example.io"
    );
}

#[test]
fn test_vpn_adds_endpoint_resources() {
    let mut config = StrataConfig::for_environment(EnvironmentName::Dev);
    config.vpn = Some(VpnConfig {
        certificate: VpnCertificates {
            server_ref: "server-cert".to_string(),
            client_ref: "client-cert".to_string(),
        },
    });
    let topology = assemble(&config, environment()).unwrap();

    let network = topology.assembly().stack("Dev-Backend-Network").unwrap();
    assert!(network.resource("Dev-Backend-EndpointVpn").is_some());

    // Without VPN config the endpoint is absent.
    let bare = StrataConfig::for_environment(EnvironmentName::Dev);
    let topology = assemble(&bare, environment()).unwrap();
    let network = topology.assembly().stack("Dev-Backend-Network").unwrap();
    assert!(network.resource("Dev-Backend-EndpointVpn").is_none());
}

#[test]
fn test_environment_changes_only_the_scope_segments() {
    let config = StrataConfig::for_environment(EnvironmentName::Staging);
    let mut vars = BTreeMap::new();
    vars.insert("STRATA_REGION".to_string(), "eu-west-1".to_string());
    let env = Environment::resolve(EnvironmentName::Staging, &vars).unwrap();

    let topology = assemble(&config, env).unwrap();
    assert!(topology.assembly().stack("Staging-Backend-Service").is_some());
    // Identity and image-registry are environment-agnostic.
    assert!(topology.assembly().stack("BackendIdentity").is_some());
    assert!(topology.assembly().stack("BackendImageRegistry").is_some());
}

#[test]
fn test_render_and_write_outputs() {
    let config = StrataConfig::for_environment(EnvironmentName::Dev);
    let topology = assemble(&config, environment()).unwrap();

    let rendered = topology.assembly().render().unwrap();
    assert_eq!(rendered["app_name"], "Backend");
    assert_eq!(rendered["stacks"].as_array().unwrap().len(), 7);

    let dir = tempfile::tempdir().unwrap();
    topology.assembly().write_to_dir(dir.path()).unwrap();
    assert!(dir.path().join("Dev-Backend-Service.template.json").exists());
    assert!(dir.path().join("BackendIdentity.template.json").exists());
}

#[test]
fn test_assembly_is_deterministic_across_runs() {
    let config = StrataConfig::for_environment(EnvironmentName::Dev);
    let a = assemble(&config, environment()).unwrap();
    let b = assemble(&config, environment()).unwrap();

    for (left, right) in a.assembly().stacks().iter().zip(b.assembly().stacks()) {
        assert_eq!(left.id, right.id);
        assert_eq!(
            serde_json::to_value(left).unwrap(),
            serde_json::to_value(right).unwrap()
        );
    }
}
