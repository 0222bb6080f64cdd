#![allow(dead_code, clippy::unwrap_used, clippy::expect_used)]

use std::{io::Write, path::PathBuf};

use base64::Engine;
use connector_integration::connectors::redsys::transformers::{
    calculate_signature, SIGNATURE_VERSION,
};
use hyperswitch_masking::Secret;
use tempfile::NamedTempFile;

/// Gateway sandbox key
pub const SECRET_KEY: &str = "sq7HjrUOBfKmC576ILgskD5srU870gJ7";
/// base64 of "ABCDEFGHIJKLMNOPQRSTUVWX"
pub const OTHER_SECRET_KEY: &str = "QUJDREVGR0hJSktMTU5PUFFSU1RVVldY";

pub fn merchant_parameters(response_code: &str) -> serde_json::Value {
    serde_json::json!({
        "Ds_Date": "19/10/2026",
        "Ds_Hour": "09:15",
        "Ds_Amount": "2500",
        "Ds_Currency": "978",
        "Ds_Order": "2026abc00042",
        "Ds_MerchantCode": "999008881",
        "Ds_Terminal": "1",
        "Ds_Response": response_code,
        "Ds_TransactionType": "0",
        "Ds_SecurePayment": "1",
        "Ds_MerchantData": "basket=7&coupon=none"
    })
}

/// Builds the form body the gateway posts: percent-encoded JSON, base64 encoded, then signed
/// with `key` and form-urlencoded
pub fn signed_body(parameters: &serde_json::Value, key: &str) -> String {
    let json = parameters.to_string();
    let encoded = base64::engine::general_purpose::STANDARD.encode(urlencoding::encode(&json).as_bytes());
    let order = parameters
        .get("Ds_Order")
        .and_then(serde_json::Value::as_str)
        .expect("Ds_Order in test parameters");
    let signature = calculate_signature(order, &encoded, &Secret::new(key.to_string()))
        .expect("signature for test parameters")
        .replace('+', "-")
        .replace('/', "_");

    serde_urlencoded::to_string([
        ("Ds_SignatureVersion", SIGNATURE_VERSION),
        ("Ds_MerchantParameters", encoded.as_str()),
        ("Ds_Signature", signature.as_str()),
    ])
    .expect("form encoding of test body")
}

pub fn config_file(contents: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".toml")
        .tempfile()
        .expect("temporary config file");
    file.write_all(contents.as_bytes()).expect("write config");
    file
}

pub fn single_merchant_config() -> String {
    format!(
        r#"
[common]
environment = "development"

[log.console]
enabled = false

[merchants.shop]
merchant_code = "999008881"
terminal = "001"
secret_key = "{SECRET_KEY}"
"#
    )
}

pub fn path_of(file: &NamedTempFile) -> Option<PathBuf> {
    Some(file.path().to_path_buf())
}
