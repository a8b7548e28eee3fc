//! Property-based tests for name derivation guarantees

use proptest::prelude::*;
use strata::naming::NameGenerator;

/// Keys as they appear in practice: non-empty kebab/camel-ish segments.
fn key_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z][a-zA-Z0-9-]{0,30}"
}

/// Test that every derivation is a pure function of its inputs
#[test]
fn test_derivation_determinism_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&key_strategy(), |key| {
            let names = NameGenerator::new("Backend", "dev");

            assert_eq!(names.generate_id(&key), names.generate_id(&key));
            assert_eq!(names.generate_name(&key), names.generate_name(&key));
            assert_eq!(names.generate_path(&key), names.generate_path(&key));

            // A fresh generator with the same scope agrees.
            let other = NameGenerator::new("Backend", "dev");
            assert_eq!(names.generate_name(&key), other.generate_name(&key));

            Ok(())
        })
        .unwrap();
}

/// Test that paths always use '/' regardless of the configured delimiter
#[test]
fn test_path_delimiter_invariance_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(
            &(key_strategy(), "[-_.]"),
            |(key, delimiter)| {
                let mut names = NameGenerator::new("Backend", "dev");
                let before = names.generate_path(&key);

                names.set_delimiter(delimiter);
                assert_eq!(names.generate_path(&key), before);
                assert!(before.contains('/'));

                Ok(())
            },
        )
        .unwrap();
}

/// Test that distinct environments never produce colliding outputs
#[test]
fn test_environment_isolation_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&key_strategy(), |key| {
            let dev = NameGenerator::new("Backend", "dev");
            let staging = NameGenerator::new("Backend", "staging");

            assert_ne!(dev.generate_id(&key), staging.generate_id(&key));
            assert_ne!(dev.generate_name(&key), staging.generate_name(&key));
            assert_ne!(dev.generate_path(&key), staging.generate_path(&key));

            Ok(())
        })
        .unwrap();
}

/// Test that generated names are lowercase kebab and ids carry no spaces
#[test]
fn test_output_shape_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&key_strategy(), |key| {
            let names = NameGenerator::new("Backend", "dev");

            let name = names.generate_name(&key);
            assert_eq!(name, name.to_lowercase());
            assert!(!name.contains(' '));

            let id = names.generate_id(&key);
            assert!(!id.contains(' '));

            Ok(())
        })
        .unwrap();
}
