#![allow(clippy::unwrap_used, clippy::expect_used)]

use common::{config_file, path_of, SECRET_KEY};
use hyperswitch_masking::PeekInterface;
use notify_verifier::{configs::Config, error::ConfigurationError};

mod common;

const TWO_MERCHANTS: &str = r#"
[common]
environment = "production"

[log.console]
enabled = true
level = "WARN"
log_format = "json"

[merchants.first]
secret_key = "Zmlyc3Qtc2VjcmV0LWtleS0yNGJ5dGVz"

[merchants.second]
merchant_code = "999008882"
secret_key = "c2Vjb25kLXNlY3JldC1rZXktMjRieXRl"
"#;

#[test]
fn test_config_loading_and_env_override() {
    let file = config_file(TWO_MERCHANTS);
    let config = Config::new_with_config_path(path_of(&file)).unwrap();

    assert_eq!(config.common.environment, "production");
    assert!(config.log.console.enabled);
    assert_eq!(
        config.log.console.level.into_level(),
        tracing::level_filters::LevelFilter::WARN
    );
    assert_eq!(config.merchants.len(), 2);

    assert!(matches!(
        config.merchant(None),
        Err(ConfigurationError::AmbiguousMerchant(ref names)) if names == "first, second"
    ));
    let (name, merchant) = config.merchant(Some("second")).unwrap();
    assert_eq!(name, "second");
    assert_eq!(merchant.merchant_code.as_deref(), Some("999008882"));

    // Environment variables win over the file
    std::env::set_var("NV__MERCHANTS__FIRST__SECRET_KEY", SECRET_KEY);
    let config = Config::new_with_config_path(path_of(&file));
    std::env::remove_var("NV__MERCHANTS__FIRST__SECRET_KEY");

    let config = config.unwrap();
    let (_, merchant) = config.merchant(Some("first")).unwrap();
    assert_eq!(merchant.secret_key.peek(), SECRET_KEY);
    assert_eq!(
        merchant.notification_secrets().secret_key.peek(),
        SECRET_KEY
    );
}

#[test]
fn test_invalid_environment_is_rejected() {
    let file = config_file(
        r#"
[common]
environment = "staging"
"#,
    );
    assert!(Config::new_with_config_path(path_of(&file)).is_err());
}

#[test]
fn test_secret_key_is_not_printed() {
    let file = config_file(TWO_MERCHANTS);
    let config = Config::new_with_config_path(path_of(&file)).unwrap();

    let debug = format!("{config:?}");
    assert!(!debug.contains("Zmlyc3Qtc2VjcmV0LWtleS0yNGJ5dGVz"));
    assert!(!debug.contains("c2Vjb25kLXNlY3JldC1rZXktMjRieXRl"));
}
