//! Closed code tables published by the payment gateway.
//!
//! Two independent tables are kept: [`ErrorCode`] for processing errors reported before a
//! transaction was attempted (`SISxxxx` codes) and [`ResponseCode`] for the outcome of an
//! attempted transaction (`Ds_Response`). Unknown codes never fail, they map to an explicit
//! `Unknown` variant.

use serde::{Deserialize, Serialize};

/// Highest response code that is still inside the regular "authorized" range.
pub const MAX_AUTHORIZED_RESPONSE_CODE: u32 = 99;
/// Response code reported for an authorized cancellation.
pub const AUTHORIZED_CANCELLATION_CODE: u32 = 400;
/// Response code reported for an authorized refund or confirmation.
pub const AUTHORIZED_REFUND_CODE: u32 = 900;

/// Authorization gate for transaction response codes.
///
/// `0..=99` are authorized; above that only `400` and `900` are.
pub const fn is_authorized_response_code(code: u32) -> bool {
    !(code > MAX_AUTHORIZED_RESPONSE_CODE
        && code != AUTHORIZED_CANCELLATION_CODE
        && code != AUTHORIZED_REFUND_CODE)
}

#[derive(
    Clone,
    Copy,
    Debug,
    Eq,
    Hash,
    PartialEq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ResponseCode {
    AuthorizedPayment,
    AuthorizedCancellation,
    AuthorizedRefundOrConfirmation,
    ExpiredCard,
    CardSuspectedFraud,
    OperationNotAllowedForCard,
    PinAttemptsExceeded,
    InsufficientFunds,
    CardNotRegistered,
    IneffectiveCard,
    InvalidSecurityCode,
    DeniedDoNotRepeat,
    DeniedDoNotRepeatWithoutUpdate,
    DeniedDoNotRepeatWithin72Hours,
    CardNotSupported,
    CardholderAuthenticationFailed,
    DeniedWithoutReason,
    WrongExpiryDate,
    StrongCustomerAuthenticationRequired,
    CardRetainedSuspectedFraud,
    MerchantNotRegistered,
    SystemError,
    IssuerUnavailable,
    DuplicateOrder,
    InvalidSession,
    RefundNotAllowed,
    InvalidCardNumberLength,
    OperationTypeNotAllowedForCard,
    CardDoesNotExist,
    RejectedByInternationalServers,
    SecurePaymentWithoutCardholderKey,
    SecureOperationsNotAllowed,
    InvalidCheckDigit,
    PreauthorizationNotAllowedForMerchant,
    PreauthorizationNotAllowedForCard,
    RestrictionControlExceeded,
    CancelledByUser,
    DeferredAuthorizationCancelledByGateway,
    DeferredAuthorizationCancelledByMerchant,
    ConcurrentTransactionOnCard,
    CardDataRequestInProgress,
    RedirectedToIssuerForAuthentication,
    Unknown,
}

impl ResponseCode {
    pub fn from_code(code: u32) -> Self {
        match code {
            0..=MAX_AUTHORIZED_RESPONSE_CODE => Self::AuthorizedPayment,
            AUTHORIZED_CANCELLATION_CODE => Self::AuthorizedCancellation,
            AUTHORIZED_REFUND_CODE => Self::AuthorizedRefundOrConfirmation,
            101 => Self::ExpiredCard,
            102 => Self::CardSuspectedFraud,
            104 => Self::OperationNotAllowedForCard,
            106 => Self::PinAttemptsExceeded,
            116 => Self::InsufficientFunds,
            118 => Self::CardNotRegistered,
            125 => Self::IneffectiveCard,
            129 => Self::InvalidSecurityCode,
            172 => Self::DeniedDoNotRepeat,
            173 => Self::DeniedDoNotRepeatWithoutUpdate,
            174 => Self::DeniedDoNotRepeatWithin72Hours,
            180 => Self::CardNotSupported,
            184 => Self::CardholderAuthenticationFailed,
            190 => Self::DeniedWithoutReason,
            191 => Self::WrongExpiryDate,
            195 => Self::StrongCustomerAuthenticationRequired,
            202 => Self::CardRetainedSuspectedFraud,
            904 => Self::MerchantNotRegistered,
            909 => Self::SystemError,
            912 | 9912 => Self::IssuerUnavailable,
            913 => Self::DuplicateOrder,
            944 => Self::InvalidSession,
            950 => Self::RefundNotAllowed,
            9064 => Self::InvalidCardNumberLength,
            9078 => Self::OperationTypeNotAllowedForCard,
            9093 => Self::CardDoesNotExist,
            9094 => Self::RejectedByInternationalServers,
            9104 => Self::SecurePaymentWithoutCardholderKey,
            9218 => Self::SecureOperationsNotAllowed,
            9253 => Self::InvalidCheckDigit,
            9256 => Self::PreauthorizationNotAllowedForMerchant,
            9257 => Self::PreauthorizationNotAllowedForCard,
            9261 => Self::RestrictionControlExceeded,
            9915 => Self::CancelledByUser,
            9928 => Self::DeferredAuthorizationCancelledByGateway,
            9929 => Self::DeferredAuthorizationCancelledByMerchant,
            9997 => Self::ConcurrentTransactionOnCard,
            9998 => Self::CardDataRequestInProgress,
            9999 => Self::RedirectedToIssuerForAuthentication,
            _ => Self::Unknown,
        }
    }

    pub const fn description(&self) -> &'static str {
        match self {
            Self::AuthorizedPayment => "Transaction authorized for payments and preauthorizations",
            Self::AuthorizedCancellation => "Transaction authorized for cancellations",
            Self::AuthorizedRefundOrConfirmation => {
                "Transaction authorized for refunds and confirmations"
            }
            Self::ExpiredCard => "Expired card",
            Self::CardSuspectedFraud => "Card under transitory exception or suspected of fraud",
            Self::OperationNotAllowedForCard => "Operation not allowed for this card or terminal",
            Self::PinAttemptsExceeded => "PIN attempts exceeded",
            Self::InsufficientFunds => "Insufficient funds",
            Self::CardNotRegistered => "Card not registered",
            Self::IneffectiveCard => "Ineffective card",
            Self::InvalidSecurityCode => "Incorrect security code (CVV2/CVC2)",
            Self::DeniedDoNotRepeat => "Denied, do not repeat",
            Self::DeniedDoNotRepeatWithoutUpdate => {
                "Denied, do not repeat without updating card details"
            }
            Self::DeniedDoNotRepeatWithin72Hours => "Denied, do not repeat within 72 hours",
            Self::CardNotSupported => "Card not supported by the service",
            Self::CardholderAuthenticationFailed => "Cardholder authentication failed",
            Self::DeniedWithoutReason => "Denied by the issuer without a reason",
            Self::WrongExpiryDate => "Wrong expiry date",
            Self::StrongCustomerAuthenticationRequired => "Strong customer authentication required",
            Self::CardRetainedSuspectedFraud => {
                "Card under transitory exception or suspected of fraud, card retained"
            }
            Self::MerchantNotRegistered => "Merchant not registered",
            Self::SystemError => "System error",
            Self::IssuerUnavailable => "Issuer unavailable",
            Self::DuplicateOrder => "Duplicate order",
            Self::InvalidSession => "Invalid session",
            Self::RefundNotAllowed => "Refund not allowed",
            Self::InvalidCardNumberLength => "Incorrect number of card digits",
            Self::OperationTypeNotAllowedForCard => "Operation type not allowed for this card",
            Self::CardDoesNotExist => "Card does not exist",
            Self::RejectedByInternationalServers => "Rejected by international servers",
            Self::SecurePaymentWithoutCardholderKey => {
                "Secure merchant and cardholder without secure purchase key"
            }
            Self::SecureOperationsNotAllowed => "Merchant does not allow secure operations",
            Self::InvalidCheckDigit => "Card does not satisfy the check digit",
            Self::PreauthorizationNotAllowedForMerchant => {
                "Merchant cannot perform preauthorizations"
            }
            Self::PreauthorizationNotAllowedForCard => "Card does not allow preauthorizations",
            Self::RestrictionControlExceeded => "Operation stopped by restriction controls",
            Self::CancelledByUser => "Payment cancelled by the user",
            Self::DeferredAuthorizationCancelledByGateway => {
                "Deferred authorization cancelled by the gateway"
            }
            Self::DeferredAuthorizationCancelledByMerchant => {
                "Deferred authorization cancelled by the merchant"
            }
            Self::ConcurrentTransactionOnCard => {
                "Another transaction with the same card is being processed"
            }
            Self::CardDataRequestInProgress => "Card data request in progress",
            Self::RedirectedToIssuerForAuthentication => {
                "Operation redirected to the issuer for authentication"
            }
            Self::Unknown => "Unknown response code",
        }
    }
}

#[derive(
    Clone,
    Copy,
    Debug,
    Eq,
    Hash,
    PartialEq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ErrorCode {
    XmlParsingFailed,
    MissingMerchantCode,
    InvalidMerchantCode,
    MissingTerminal,
    InvalidTerminal,
    InvalidOrder,
    MissingCurrency,
    InvalidCurrency,
    MissingTransactionType,
    InvalidTransactionType,
    MissingAmount,
    InvalidAmount,
    MerchantTerminalNotFound,
    CurrencyMismatch,
    MerchantTerminalDisabled,
    HashCalculationFailed,
    InvalidSignature,
    OnlineNotificationFailed,
    CardBinNotRegistered,
    DuplicateOrder,
    RefundOriginalNotFound,
    MultiplePaymentsForOrder,
    RefundOriginalNotAuthorized,
    RefundAmountExceeded,
    ConfirmationDataMismatch,
    ConfirmationOriginalNotFound,
    ConfirmationAlreadyExists,
    PreauthorizationNotAuthorized,
    ConfirmationAmountExceeded,
    CardNumberUnavailable,
    InvalidCardNumberLength,
    NonNumericCardNumber,
    ExpiredCard,
    MissingOrder,
    InvalidOrderLength,
    NonNumericOrderPrefix,
    PaymentMethodUnavailable,
    CardNotInRangeTable,
    CardNotAuthenticated,
    TransactionTypeNotAllowed,
    GetInsteadOfPost,
    SecureOperationsNotAllowed,
    CardDataNotAllowed,
    InvalidCheckDigit,
    PreauthorizationNotAllowedForMerchant,
    PreauthorizationNotAllowedForCard,
    RestrictionControlExceeded,
    DeferredAuthorizationNotAllowed,
    UnknownOperationType,
    InvalidSignatureVersion,
    MerchantParametersDecodingFailed,
    InvalidMerchantParametersJson,
    InvalidMerchantCodeParameter,
    InvalidTerminalParameter,
    MissingOrderParameter,
    SignatureCalculationFailed,
    Unknown,
}

impl ErrorCode {
    pub fn from_code(code: u32) -> Self {
        match code {
            7 => Self::XmlParsingFailed,
            8 => Self::MissingMerchantCode,
            9 => Self::InvalidMerchantCode,
            10 => Self::MissingTerminal,
            11 => Self::InvalidTerminal,
            14 => Self::InvalidOrder,
            15 => Self::MissingCurrency,
            16 => Self::InvalidCurrency,
            18 => Self::MissingTransactionType,
            19 => Self::InvalidTransactionType,
            20 => Self::MissingAmount,
            21 => Self::InvalidAmount,
            26 => Self::MerchantTerminalNotFound,
            27 => Self::CurrencyMismatch,
            28 => Self::MerchantTerminalDisabled,
            41 => Self::HashCalculationFailed,
            42 => Self::InvalidSignature,
            43 => Self::OnlineNotificationFailed,
            46 => Self::CardBinNotRegistered,
            51 => Self::DuplicateOrder,
            54 => Self::RefundOriginalNotFound,
            55 => Self::MultiplePaymentsForOrder,
            56 => Self::RefundOriginalNotAuthorized,
            57 => Self::RefundAmountExceeded,
            58 => Self::ConfirmationDataMismatch,
            59 => Self::ConfirmationOriginalNotFound,
            60 => Self::ConfirmationAlreadyExists,
            61 => Self::PreauthorizationNotAuthorized,
            62 => Self::ConfirmationAmountExceeded,
            63 => Self::CardNumberUnavailable,
            64 => Self::InvalidCardNumberLength,
            65 => Self::NonNumericCardNumber,
            71 => Self::ExpiredCard,
            74 => Self::MissingOrder,
            75 => Self::InvalidOrderLength,
            76 => Self::NonNumericOrderPrefix,
            78 => Self::PaymentMethodUnavailable,
            93 => Self::CardNotInRangeTable,
            94 => Self::CardNotAuthenticated,
            112 => Self::TransactionTypeNotAllowed,
            114 => Self::GetInsteadOfPost,
            218 => Self::SecureOperationsNotAllowed,
            252 => Self::CardDataNotAllowed,
            253 => Self::InvalidCheckDigit,
            256 => Self::PreauthorizationNotAllowedForMerchant,
            257 => Self::PreauthorizationNotAllowedForCard,
            261 => Self::RestrictionControlExceeded,
            270 => Self::DeferredAuthorizationNotAllowed,
            274 => Self::UnknownOperationType,
            429 => Self::InvalidSignatureVersion,
            430 => Self::MerchantParametersDecodingFailed,
            431 => Self::InvalidMerchantParametersJson,
            432 => Self::InvalidMerchantCodeParameter,
            433 => Self::InvalidTerminalParameter,
            434 => Self::MissingOrderParameter,
            435 => Self::SignatureCalculationFailed,
            _ => Self::Unknown,
        }
    }

    /// Classifies a raw error code as sent by the gateway (`SIS0051`, `0051` or `51`).
    pub fn from_raw(raw: &str) -> Self {
        parse_error_code(raw).map_or(Self::Unknown, Self::from_code)
    }
}

/// Numeric part of an error code, accepting an optional `SIS` prefix.
pub fn parse_error_code(raw: &str) -> Option<u32> {
    let trimmed = raw.trim();
    let digits = trimmed
        .get(..3)
        .filter(|prefix| prefix.eq_ignore_ascii_case("SIS"))
        .and_then(|_| trimmed.get(3..))
        .unwrap_or(trimmed);
    parse_code(digits)
}

/// Parses an all-digit code such as `0000` or `101`. Codes too large for `u32` saturate to
/// `u32::MAX`, which is never authorized.
pub fn parse_code(raw: &str) -> Option<u32> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || !trimmed.bytes().all(|byte| byte.is_ascii_digit()) {
        return None;
    }
    Some(trimmed.parse().unwrap_or(u32::MAX))
}

/// `Ds_TransactionType` values that can appear in a notification.
#[derive(
    Clone,
    Copy,
    Debug,
    Eq,
    Hash,
    PartialEq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
pub enum TransactionType {
    #[strum(serialize = "0")]
    #[serde(rename = "0")]
    Payment,
    #[strum(serialize = "1")]
    #[serde(rename = "1")]
    Preauthorization,
    #[strum(serialize = "2")]
    #[serde(rename = "2")]
    Confirmation,
    #[strum(serialize = "3")]
    #[serde(rename = "3")]
    Refund,
    #[strum(serialize = "5")]
    #[serde(rename = "5")]
    RecurringPayment,
    #[strum(serialize = "6")]
    #[serde(rename = "6")]
    SuccessiveTransaction,
    #[strum(serialize = "7")]
    #[serde(rename = "7")]
    Authentication,
    #[strum(serialize = "8")]
    #[serde(rename = "8")]
    AuthenticationConfirmation,
    #[strum(serialize = "9")]
    #[serde(rename = "9")]
    Cancellation,
    #[strum(serialize = "O")]
    #[serde(rename = "O")]
    DeferredAuthorization,
    #[strum(serialize = "P")]
    #[serde(rename = "P")]
    DeferredAuthorizationConfirmation,
    #[strum(serialize = "Q")]
    #[serde(rename = "Q")]
    DeferredAuthorizationCancellation,
    #[strum(serialize = "R")]
    #[serde(rename = "R")]
    InitialDeferredRecurring,
    #[strum(serialize = "S")]
    #[serde(rename = "S")]
    SuccessiveDeferredRecurring,
}

/// Value of `Ds_SignatureVersion`.
#[derive(Clone, Copy, Debug, Eq, PartialEq, strum::Display, strum::EnumString)]
pub enum SignatureVersion {
    #[strum(serialize = "HMAC_SHA256_V1")]
    HmacSha256V1,
}
