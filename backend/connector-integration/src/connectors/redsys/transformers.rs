use base64::Engine;
use common_utils::{
    consts::BASE64_ENGINE,
    crypto::{self, EncodeMessage, SignMessage},
    encoding::{decode_transport_base64, percent_decode_form},
    errors::CryptoError,
    ext_traits::StringExt,
    CustomResult,
};
use domain_types::{
    connector_types::{EncodedParametersBlob, ReceivedSignature, TransactionParameters},
    errors::{InvalidFormatReason, NotificationError},
};
use error_stack::ResultExt;
use hyperswitch_masking::{PeekInterface, Secret};

use super::responses::{RedsysNotificationParameters, RedsysNotificationRouterData};

pub const SIGNATURE_VERSION: &str = "HMAC_SHA256_V1";

/// Top-level fields of a notification
pub mod notification_fields {
    pub const ERROR_CODE: &str = "errorCode";
    pub const SIGNATURE_VERSION: &str = "Ds_SignatureVersion";
    pub const MERCHANT_PARAMETERS: &str = "Ds_MerchantParameters";
    pub const SIGNATURE: &str = "Ds_Signature";
}

/// Derives the per-order signing key: the order identifier encrypted with 3DES-CBC under the
/// merchant secret key, zero IV and zero padding.
pub fn derive_order_key(
    order_id: &str,
    secret_key: &Secret<String>,
) -> CustomResult<Secret<Vec<u8>>, NotificationError> {
    let key_bytes = BASE64_ENGINE
        .decode(secret_key.peek())
        .change_context(NotificationError::InvalidFormat(
            InvalidFormatReason::InvalidSecretKey,
        ))
        .attach_printable("Merchant secret key is not valid base64")?;

    let encrypted = crypto::TripleDesEde3Cbc::with_zero_iv()
        .encode_message(&key_bytes, order_id.as_bytes())
        .map_err(|report| {
            let reason = match report.current_context() {
                CryptoError::InvalidKeyLength => InvalidFormatReason::InvalidSecretKey,
                CryptoError::EncodingFailed => InvalidFormatReason::SignatureDerivationFailed,
            };
            report.change_context(NotificationError::InvalidFormat(reason))
        })
        .attach_printable("Triple DES encryption failed")?;

    Ok(Secret::new(encrypted))
}

/// Expected signature of `encoded_parameters`: base64 of HMAC-SHA256 keyed with the per-order key.
pub fn calculate_signature(
    order_id: &str,
    encoded_parameters: &str,
    secret_key: &Secret<String>,
) -> CustomResult<String, NotificationError> {
    let order_key = derive_order_key(order_id, secret_key)?;
    let mac = crypto::HmacSha256
        .sign_message(order_key.peek(), encoded_parameters.as_bytes())
        .change_context(NotificationError::InvalidFormat(
            InvalidFormatReason::SignatureDerivationFailed,
        ))?;
    Ok(BASE64_ENGINE.encode(mac))
}

/// MAC bytes of a received signature.
///
/// Only canonical base64 is accepted, so two distinct signature strings never decode to the
/// same bytes. Anything else can not match an expected signature.
pub fn decode_received_signature(
    signature: &ReceivedSignature,
) -> CustomResult<Vec<u8>, NotificationError> {
    BASE64_ENGINE
        .decode(signature.normalized())
        .change_context(NotificationError::SignatureMismatch)
        .attach_printable("Received signature is not canonical base64")
}

/// Base64, then percent-decoding, then JSON. The blob itself is left untouched.
pub fn decode_merchant_parameters(
    blob: &EncodedParametersBlob,
) -> CustomResult<TransactionParameters, NotificationError> {
    let decoded = decode_transport_base64(blob.as_str()).change_context(
        NotificationError::InvalidFormat(InvalidFormatReason::Base64DecodingFailed),
    )?;
    let json = percent_decode_form(&decoded).change_context(NotificationError::InvalidFormat(
        InvalidFormatReason::PercentDecodingFailed,
    ))?;

    let raw: serde_json::Map<String, serde_json::Value> = json
        .parse_struct("RedsysMerchantParameters")
        .change_context(NotificationError::InvalidFormat(
            InvalidFormatReason::JsonParsingFailed,
        ))?;
    let parameters: RedsysNotificationParameters =
        serde_json::from_value(serde_json::Value::Object(raw.clone()))
            .change_context(NotificationError::InvalidFormat(
                InvalidFormatReason::JsonParsingFailed,
            ))
            .attach_printable("Unexpected value type in merchant parameters")?;

    TransactionParameters::try_from(RedsysNotificationRouterData { parameters, raw })
        .map_err(NotificationError::InvalidFormat)
        .map_err(error_stack::Report::from)
}
