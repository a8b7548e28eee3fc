//! Integration tests for deterministic name derivation.

use strata::naming::{NameAudit, NameGenerator, NameKind};

#[test]
fn test_same_inputs_same_outputs() {
    let a = NameGenerator::new("Backend", "dev");
    let b = NameGenerator::new("Backend", "dev");

    for key in ["database", "default-vpc", "queue-ns", "rds-credentials-api"] {
        assert_eq!(a.generate_id(key), b.generate_id(key));
        assert_eq!(a.generate_name(key), b.generate_name(key));
        assert_eq!(a.generate_path(key), b.generate_path(key));
    }
}

#[test]
fn test_derivation_shapes() {
    let names = NameGenerator::new("Backend", "dev");

    assert_eq!(names.generate_id("database"), "Dev-Backend-Database");
    assert_eq!(names.generate_name("database"), "dev-backend-database");
    assert_eq!(names.generate_path("database"), "dev/backend/database");

    // Multi-word keys transform per segment.
    assert_eq!(names.generate_id("default-vpc"), "Dev-Backend-DefaultVpc");
    assert_eq!(names.generate_name("defaultVpc"), "dev-backend-default-vpc");
}

#[test]
fn test_environments_never_collide() {
    let dev = NameGenerator::new("Backend", "dev");
    let staging = NameGenerator::new("Backend", "staging");

    for key in ["database", "vpc", "api"] {
        assert_ne!(dev.generate_id(key), staging.generate_id(key));
        assert_ne!(dev.generate_name(key), staging.generate_name(key));
        assert_ne!(dev.generate_path(key), staging.generate_path(key));
    }
}

#[test]
fn test_paths_ignore_the_configured_delimiter() {
    let mut names = NameGenerator::new("Backend", "dev");
    names.set_delimiter("_");

    assert_eq!(names.generate_name("database"), "dev_backend_database");
    assert_eq!(names.generate_path("database"), "dev/backend/database");
}

#[test]
fn test_audit_catches_collapsed_keys_across_calls() {
    let names = NameGenerator::new("Backend", "dev");
    let mut audit = NameAudit::new();

    let first = names.generate_name("task-def");
    audit.record(NameKind::Name, "task-def", &first).unwrap();

    // "taskDef" kebab-cases to the same output as "task-def".
    let second = names.generate_name("taskDef");
    assert_eq!(first, second);
    assert!(audit.record(NameKind::Name, "taskDef", &second).is_err());
}
