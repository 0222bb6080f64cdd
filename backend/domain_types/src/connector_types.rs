use std::collections::HashMap;

use common_enums::{ErrorCode, ResponseCode, TransactionType};
use common_utils::{encoding::url_safe_to_standard, CustomResult};
use hyperswitch_masking::Secret;
use serde::Serialize;

use crate::errors::{InvalidFormatReason, NotificationError};

/// Key/value pairs exactly as submitted by the gateway.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawNotification(HashMap<String, String>);

impl RawNotification {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Value of `key` if present and not empty.
    pub fn non_empty(&self, key: &str) -> Option<&str> {
        self.get(key).filter(|value| !value.is_empty())
    }
}

impl From<HashMap<String, String>> for RawNotification {
    fn from(fields: HashMap<String, String>) -> Self {
        Self(fields)
    }
}

impl<K, V> FromIterator<(K, V)> for RawNotification
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }
}

/// The merchant-parameters string as received. The signature is computed over these exact
/// bytes, so the value is never re-encoded or modified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedParametersBlob(String);

impl EncodedParametersBlob {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

/// Signature as received, in the URL-safe transport alphabet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceivedSignature(String);

impl ReceivedSignature {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The signature rewritten into the standard base64 alphabet.
    pub fn normalized(&self) -> String {
        url_safe_to_standard(&self.0)
    }
}

/// Secrets needed to verify a notification for one merchant.
#[derive(Debug, Clone)]
pub struct ConnectorNotificationSecrets {
    /// Base64 encoded merchant secret key
    pub secret_key: Secret<String>,
}

impl ConnectorNotificationSecrets {
    pub fn new(secret_key: impl Into<String>) -> Self {
        Self {
            secret_key: Secret::new(secret_key.into()),
        }
    }
}

/// A decoded notification: the structured parameters, the untouched blob they were decoded
/// from and the signature that came with them.
#[derive(Debug, Clone)]
pub struct DecodedNotification {
    pub signature_version: String,
    pub parameters: TransactionParameters,
    pub encoded_parameters: EncodedParametersBlob,
    pub received_signature: ReceivedSignature,
}

/// Decoded merchant parameters.
///
/// The named fields are the ones the verifier and most callers depend on; `raw` keeps every
/// field exactly as the gateway sent it, including fields added after this type was written.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransactionParameters {
    pub order_id: String,
    pub response_code: Option<String>,
    pub error_code: Option<String>,
    /// Amount in minor units
    pub amount: Option<i64>,
    /// ISO 4217 numeric currency code
    pub currency: Option<String>,
    pub merchant_code: Option<String>,
    pub terminal: Option<String>,
    pub transaction_type: Option<TransactionType>,
    pub authorisation_code: Option<String>,
    pub date: Option<String>,
    pub hour: Option<String>,
    pub secure_payment: Option<bool>,
    pub card_country: Option<String>,
    pub card_brand: Option<String>,
    pub consumer_language: Option<String>,
    pub merchant_data: Option<String>,
    pub raw: serde_json::Map<String, serde_json::Value>,
}

impl TransactionParameters {
    /// Any received field, by its gateway name
    pub fn field(&self, name: &str) -> Option<&serde_json::Value> {
        self.raw.get(name)
    }
}

/// A signed transaction whose response code has been classified.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassifiedTransaction {
    pub parameters: TransactionParameters,
    pub response_code: u32,
    pub classification: ResponseCode,
    pub authorized: bool,
}

/// Result of verifying one notification.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum VerificationOutcome {
    Validated(ClassifiedTransaction),
    ErrorResponse {
        code: String,
        classification: ErrorCode,
    },
    InvalidFormat {
        #[serde(flatten)]
        reason: InvalidFormatReason,
    },
    SignatureMismatch,
    DeniedPayment(ClassifiedTransaction),
}

impl VerificationOutcome {
    pub fn is_authorized(&self) -> bool {
        match self {
            Self::Validated(transaction) => transaction.authorized,
            Self::ErrorResponse { .. }
            | Self::InvalidFormat { .. }
            | Self::SignatureMismatch
            | Self::DeniedPayment(_) => false,
        }
    }

    /// Decoded parameters, only available once the signature has been verified
    pub fn parameters(&self) -> Option<&TransactionParameters> {
        match self {
            Self::Validated(transaction) | Self::DeniedPayment(transaction) => {
                Some(&transaction.parameters)
            }
            Self::ErrorResponse { .. } | Self::InvalidFormat { .. } | Self::SignatureMismatch => {
                None
            }
        }
    }
}

impl From<CustomResult<ClassifiedTransaction, NotificationError>> for VerificationOutcome {
    fn from(result: CustomResult<ClassifiedTransaction, NotificationError>) -> Self {
        match result {
            Ok(transaction) => Self::Validated(transaction),
            Err(report) => match report.current_context().clone() {
                NotificationError::ErrorResponse {
                    code,
                    classification,
                } => Self::ErrorResponse {
                    code,
                    classification,
                },
                NotificationError::InvalidFormat(reason) => Self::InvalidFormat { reason },
                NotificationError::SignatureMismatch => Self::SignatureMismatch,
                NotificationError::DeniedPayment(transaction) => Self::DeniedPayment(*transaction),
            },
        }
    }
}
