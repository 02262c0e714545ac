//! Integration tests for build configuration

use sealtable_foundation::{BuildConfig, Validation};

#[test]
fn default_is_strict_and_eager() {
    let config = BuildConfig::default();
    assert_eq!(config.validation, Validation::Strict);
    assert!(config.eager_indexes);
    assert!(config.validation.enabled());
}

#[test]
fn trusted_defers_indices() {
    let config = BuildConfig::trusted();
    assert_eq!(config.validation, Validation::Trusted);
    assert!(!config.eager_indexes);
    assert!(!config.validation.is_strict());
    assert_eq!(config.validation.enabled(), cfg!(debug_assertions));
}

#[test]
fn builders_compose() {
    let config = BuildConfig::new()
        .with_validation(Validation::Trusted)
        .with_eager_indexes(true);
    assert_eq!(config.validation, Validation::Trusted);
    assert!(config.eager_indexes);
}
