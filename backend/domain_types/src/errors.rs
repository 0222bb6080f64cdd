use common_enums::ErrorCode;

use crate::connector_types::ClassifiedTransaction;

/// Terminal failures of a notification verification.
///
/// Every variant is final: nothing here is retried by the verifier.
#[derive(Debug, Clone, thiserror::Error)]
pub enum NotificationError {
    /// The gateway reported an error before (or instead of) attempting the transaction
    #[error("Gateway reported error code {code} ({classification})")]
    ErrorResponse {
        code: String,
        classification: ErrorCode,
    },
    /// The notification is not a well-formed protocol message
    #[error("Invalid notification format: {0}")]
    InvalidFormat(InvalidFormatReason),
    /// The notification is well formed but its signature does not match
    #[error("Notification signature does not match the expected signature")]
    SignatureMismatch,
    /// Correctly signed notification whose response code fails the authorization rule
    #[error("Payment denied with response code {}", .0.response_code)]
    DeniedPayment(Box<ClassifiedTransaction>),
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, thiserror::Error)]
#[serde(tag = "reason", content = "field", rename_all = "snake_case")]
pub enum InvalidFormatReason {
    #[error("required field `{0}` is missing or empty")]
    MissingField(&'static str),
    #[error("merchant parameters are not valid base64")]
    Base64DecodingFailed,
    #[error("merchant parameters could not be percent-decoded")]
    PercentDecodingFailed,
    #[error("merchant parameters are not a valid JSON object")]
    JsonParsingFailed,
    #[error("merchant parameters carry no order identifier")]
    MissingOrderIdentifier,
    #[error("merchant parameters carry no response code")]
    MissingResponseCode,
    #[error("response code is not numeric")]
    InvalidResponseCode,
    #[error("merchant secret key is not usable")]
    InvalidSecretKey,
    #[error("expected signature could not be derived")]
    SignatureDerivationFailed,
}

impl From<InvalidFormatReason> for NotificationError {
    fn from(reason: InvalidFormatReason) -> Self {
        Self::InvalidFormat(reason)
    }
}
