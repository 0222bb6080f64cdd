use std::str::FromStr;

use common_enums::TransactionType;
use domain_types::{connector_types::TransactionParameters, errors::InvalidFormatReason};
use serde::{Deserialize, Deserializer};

/// Merchant parameters carried by a notification.
///
/// The gateway is inconsistent about JSON types: codes and amounts arrive either as strings or
/// as numbers, so every field is read as an optional string.
#[derive(Debug, Default, Deserialize)]
pub struct RedsysNotificationParameters {
    #[serde(rename = "Ds_Order", default, deserialize_with = "lenient_string")]
    pub ds_order: Option<String>,
    #[serde(rename = "Ds_Response", default, deserialize_with = "lenient_string")]
    pub ds_response: Option<String>,
    // `""` is absent here, unlike the top-level `errorCode` where presence alone counts
    #[serde(rename = "Ds_ErrorCode", default, deserialize_with = "lenient_string")]
    pub ds_error_code: Option<String>,
    #[serde(rename = "Ds_Amount", default, deserialize_with = "lenient_string")]
    pub ds_amount: Option<String>,
    #[serde(rename = "Ds_Currency", default, deserialize_with = "lenient_string")]
    pub ds_currency: Option<String>,
    #[serde(rename = "Ds_MerchantCode", default, deserialize_with = "lenient_string")]
    pub ds_merchant_code: Option<String>,
    #[serde(rename = "Ds_Terminal", default, deserialize_with = "lenient_string")]
    pub ds_terminal: Option<String>,
    #[serde(rename = "Ds_TransactionType", default, deserialize_with = "lenient_string")]
    pub ds_transaction_type: Option<String>,
    #[serde(rename = "Ds_AuthorisationCode", default, deserialize_with = "lenient_string")]
    pub ds_authorisation_code: Option<String>,
    #[serde(rename = "Ds_Date", default, deserialize_with = "lenient_string")]
    pub ds_date: Option<String>,
    #[serde(rename = "Ds_Hour", default, deserialize_with = "lenient_string")]
    pub ds_hour: Option<String>,
    #[serde(rename = "Ds_SecurePayment", default, deserialize_with = "lenient_string")]
    pub ds_secure_payment: Option<String>,
    #[serde(rename = "Ds_Card_Country", default, deserialize_with = "lenient_string")]
    pub ds_card_country: Option<String>,
    #[serde(rename = "Ds_Card_Brand", default, deserialize_with = "lenient_string")]
    pub ds_card_brand: Option<String>,
    #[serde(rename = "Ds_ConsumerLanguage", default, deserialize_with = "lenient_string")]
    pub ds_consumer_language: Option<String>,
    #[serde(rename = "Ds_MerchantData", default, deserialize_with = "lenient_string")]
    pub ds_merchant_data: Option<String>,
}

/// Accepts a string, number or boolean. `null` and the empty string read as absent.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    match value {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(serde_json::Value::String(text)) if text.is_empty() => Ok(None),
        Some(serde_json::Value::String(text)) => Ok(Some(text)),
        Some(serde_json::Value::Number(number)) => Ok(Some(number.to_string())),
        Some(serde_json::Value::Bool(flag)) => Ok(Some(flag.to_string())),
        Some(other) => Err(serde::de::Error::custom(format!(
            "expected a string or number, found {other}"
        ))),
    }
}

pub struct RedsysNotificationRouterData {
    pub parameters: RedsysNotificationParameters,
    pub raw: serde_json::Map<String, serde_json::Value>,
}

impl TryFrom<RedsysNotificationRouterData> for TransactionParameters {
    type Error = InvalidFormatReason;

    fn try_from(item: RedsysNotificationRouterData) -> Result<Self, Self::Error> {
        let RedsysNotificationRouterData { parameters, raw } = item;
        let order_id = parameters
            .ds_order
            .ok_or(InvalidFormatReason::MissingOrderIdentifier)?;

        Ok(Self {
            order_id,
            response_code: parameters.ds_response,
            error_code: parameters.ds_error_code,
            amount: parameters
                .ds_amount
                .and_then(|amount| amount.trim().parse().ok()),
            currency: parameters.ds_currency,
            merchant_code: parameters.ds_merchant_code,
            terminal: parameters.ds_terminal,
            transaction_type: parameters
                .ds_transaction_type
                .and_then(|transaction_type| TransactionType::from_str(transaction_type.trim()).ok()),
            authorisation_code: parameters.ds_authorisation_code,
            date: parameters.ds_date,
            hour: parameters.ds_hour,
            secure_payment: parameters
                .ds_secure_payment
                .and_then(|flag| match flag.trim() {
                    "1" | "true" => Some(true),
                    "0" | "false" => Some(false),
                    _ => None,
                }),
            card_country: parameters.ds_card_country,
            card_brand: parameters.ds_card_brand,
            consumer_language: parameters.ds_consumer_language,
            merchant_data: parameters.ds_merchant_data,
            raw,
        })
    }
}
