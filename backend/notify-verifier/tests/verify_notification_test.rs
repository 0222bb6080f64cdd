#![allow(clippy::unwrap_used, clippy::expect_used)]

use common::{
    config_file, merchant_parameters, path_of, signed_body, single_merchant_config,
    OTHER_SECRET_KEY, SECRET_KEY,
};
use connector_integration::types::ConnectorEnum;
use domain_types::{connector_types::VerificationOutcome, errors::InvalidFormatReason};
use notify_verifier::{app, configs::Config, error::ConfigurationError};

mod common;

fn config() -> Config {
    let file = config_file(&single_merchant_config());
    Config::new_with_config_path(path_of(&file)).expect("test configuration")
}

#[test]
fn test_signed_authorized_body_is_validated() {
    let config = config();
    let body = signed_body(&merchant_parameters("0000"), SECRET_KEY);

    let outcome =
        app::verify_notification_body(&config, ConnectorEnum::Redsys, None, &body).unwrap();

    assert!(outcome.is_authorized());
    let parameters = outcome.parameters().unwrap();
    assert_eq!(parameters.order_id, "2026abc00042");
    assert_eq!(parameters.amount, Some(2500));
    assert_eq!(parameters.merchant_data.as_deref(), Some("basket=7&coupon=none"));
}

#[test]
fn test_each_outcome_through_the_form_body() {
    let config = config();

    let denied = signed_body(&merchant_parameters("0190"), SECRET_KEY);
    let outcome =
        app::verify_notification_body(&config, ConnectorEnum::Redsys, Some("shop"), &denied)
            .unwrap();
    assert!(matches!(outcome, VerificationOutcome::DeniedPayment(ref t) if t.response_code == 190));

    let cancelled = signed_body(&merchant_parameters("0400"), SECRET_KEY);
    let outcome =
        app::verify_notification_body(&config, ConnectorEnum::Redsys, Some("shop"), &cancelled)
            .unwrap();
    assert!(outcome.is_authorized());

    let forged = signed_body(&merchant_parameters("0000"), OTHER_SECRET_KEY);
    let outcome =
        app::verify_notification_body(&config, ConnectorEnum::Redsys, Some("shop"), &forged)
            .unwrap();
    assert_eq!(outcome, VerificationOutcome::SignatureMismatch);

    let outcome = app::verify_notification_body(
        &config,
        ConnectorEnum::Redsys,
        Some("shop"),
        "errorCode=SIS0051",
    )
    .unwrap();
    assert!(matches!(outcome, VerificationOutcome::ErrorResponse { ref code, .. } if code == "SIS0051"));

    let outcome = app::verify_notification_body(
        &config,
        ConnectorEnum::Redsys,
        Some("shop"),
        "Ds_SignatureVersion=HMAC_SHA256_V1&Ds_Signature=abc",
    )
    .unwrap();
    assert_eq!(
        outcome,
        VerificationOutcome::InvalidFormat {
            reason: InvalidFormatReason::MissingField("Ds_MerchantParameters")
        }
    );
}

#[test]
fn test_outcome_json_shape() {
    let config = config();
    let body = signed_body(&merchant_parameters("0000"), SECRET_KEY);
    let outcome =
        app::verify_notification_body(&config, ConnectorEnum::Redsys, None, &body).unwrap();

    let json = serde_json::to_value(&outcome).unwrap();
    assert_eq!(json["outcome"], "validated");
    assert_eq!(json["authorized"], true);
    assert_eq!(json["response_code"], 0);
    assert_eq!(json["classification"], "authorized_payment");
    assert_eq!(json["parameters"]["order_id"], "2026abc00042");
    assert_eq!(json["parameters"]["raw"]["Ds_Currency"], "978");
}

#[test]
fn test_unknown_merchant_is_reported() {
    let config = config();
    let body = signed_body(&merchant_parameters("0000"), SECRET_KEY);

    let error =
        app::verify_notification_body(&config, ConnectorEnum::Redsys, Some("other"), &body)
            .unwrap_err();
    assert!(matches!(error, ConfigurationError::UnknownMerchant(ref name) if name == "other"));
}

#[test]
fn test_body_is_read_from_file() {
    let config = config();
    let body = signed_body(&merchant_parameters("0000"), SECRET_KEY);
    let file = config_file(&body);

    let request = app::VerifyRequest {
        connector: ConnectorEnum::Redsys,
        merchant: None,
        input: path_of(&file),
    };
    assert!(app::run_verify(&config, &request).unwrap().is_authorized());
}

#[test]
fn test_form_body_parsing() {
    let notification =
        app::parse_notification_body("Ds_Signature=ab-cd_ef%3D&Ds_MerchantData=a+b%2Bc\n")
            .unwrap();
    assert_eq!(notification.get("Ds_Signature"), Some("ab-cd_ef="));
    assert_eq!(notification.get("Ds_MerchantData"), Some("a b+c"));
}

#[test]
fn test_no_merchant_configured() {
    let file = config_file(
        r#"
[common]
environment = "development"
"#,
    );
    let config = Config::new_with_config_path(path_of(&file)).unwrap();
    assert!(config.log.console.enabled);
    assert!(matches!(
        config.merchant(None),
        Err(ConfigurationError::NoMerchantConfigured)
    ));
}
