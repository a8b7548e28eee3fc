//! Integration tests for layered configuration loading.

use std::io::Write;
use strata::config::{ConfigLoader, EnvironmentName, EnvValue, StrataConfig};

#[test]
fn test_built_in_defaults_are_complete() {
    let config = ConfigLoader::load(EnvironmentName::Dev, None).unwrap();

    assert_eq!(config.app_name, "Backend");
    assert_eq!(config.service.api.domain, "api.dev.svc.example.io");
    assert_eq!(config.service.api.image.registry.kind, "managed");
    assert_eq!(config.service.api.image.registry.keep_untagged_images, 5);
    assert!(config.vpn.is_none());
    // The shared vocabulary is seeded per environment.
    assert_eq!(config.service.api.env["PORT"], EnvValue::Integer(80));
    assert!(config.service.api.secrets["AUTH_SECRET"].contains("/dev/"));
}

#[test]
fn test_workspace_file_layers_over_defaults() {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    writeln!(
        file,
        r#"
app_name = "Storefront"

[service.api]
domain = "shop.staging.example.io"
public_load_balancer = true

[service.api.env]
PORT = 3000

[vpn.certificate]
server_ref = "cert/server"
client_ref = "cert/client"
"#
    )
    .unwrap();

    let config = ConfigLoader::load(EnvironmentName::Staging, Some(file.path())).unwrap();

    assert_eq!(config.app_name, "Storefront");
    assert_eq!(config.service.api.domain, "shop.staging.example.io");
    assert!(config.service.api.public_load_balancer);
    assert_eq!(config.service.api.env["PORT"], EnvValue::Integer(3000));
    assert!(config.vpn.is_some());
    // Settings the file does not mention keep their defaults.
    assert_eq!(config.service.api.image.tag, "latest");
    assert_eq!(config.service.api.hosted_zone.name, "staging.svc.example.io");
}

#[test]
fn test_environment_selects_default_set() {
    let dev = StrataConfig::for_environment(EnvironmentName::Dev);
    let production = StrataConfig::for_environment(EnvironmentName::Production);

    assert_eq!(dev.service.api.domain, "api.dev.svc.example.io");
    assert_eq!(production.service.api.domain, "api.production.svc.example.io");
    assert!(production.service.api.secrets["HASH_PEPPER"].contains("/production/"));
}

#[test]
fn test_loader_preserves_vocabulary_key_case() {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    writeln!(
        file,
        r#"
[service.api.env]
PORT = 3000

[service.api.secrets]
MAIL_API_KEY = "/example.io/dev/svc/api/MAIL_API_KEY@v1"
"#
    )
    .unwrap();

    let config = ConfigLoader::load(EnvironmentName::Dev, Some(file.path())).unwrap();

    // Default and file-provided keys stay uppercase end to end.
    assert_eq!(config.service.api.env["PORT"], EnvValue::Integer(3000));
    assert_eq!(
        config.service.api.env["CORS_ALLOWED_ORIGINS"],
        EnvValue::String("*".into())
    );
    assert!(config.service.api.secrets.contains_key("AUTH_SECRET"));
    assert!(config.service.api.secrets.contains_key("MAIL_API_KEY"));
    assert!(!config.service.api.env.contains_key("port"));
    assert!(!config.service.api.secrets.contains_key("auth_secret"));
}

#[test]
fn test_environment_variables_layer_over_files() {
    // Double underscore separates path segments, so single underscores
    // inside field names pass through intact.
    std::env::set_var("STRATA__SERVICE__API__HOSTED_ZONE__ID", "Z0HOSTEDZONE");
    let config = ConfigLoader::load(EnvironmentName::Dev, None);
    std::env::remove_var("STRATA__SERVICE__API__HOSTED_ZONE__ID");

    let config = config.unwrap();
    assert_eq!(config.service.api.hosted_zone.id, "Z0HOSTEDZONE");
    // The rest of the configuration keeps its defaults.
    assert_eq!(config.service.api.hosted_zone.name, "dev.svc.example.io");
}

#[test]
fn test_invalid_configurations_rejected() {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    writeln!(file, "app_name = \"\"").unwrap();
    assert!(ConfigLoader::load(EnvironmentName::Dev, Some(file.path())).is_err());

    assert!(ConfigLoader::load(
        EnvironmentName::Dev,
        Some(std::path::Path::new("/nonexistent/strata.toml"))
    )
    .is_err());
}
