pub mod responses;
pub mod transformers;

use std::str::FromStr;

use common_enums::{
    is_authorized_response_code, parse_code, ErrorCode, ResponseCode, SignatureVersion,
};
use common_utils::{crypto, CustomResult};
use domain_types::{
    connector_types::{
        ClassifiedTransaction, ConnectorNotificationSecrets, DecodedNotification,
        EncodedParametersBlob, RawNotification, ReceivedSignature, TransactionParameters,
    },
    errors::{InvalidFormatReason, NotificationError},
};
use hyperswitch_masking::Secret;
use interfaces::{
    api::ConnectorCommon, connector_types::IncomingNotification, decode::BodyDecoding,
    verification::SourceVerification,
};

use self::transformers::{notification_fields, SIGNATURE_VERSION};

#[derive(Clone, Copy, Debug)]
pub struct Redsys;

impl Redsys {
    pub fn new() -> &'static Self {
        &Self
    }
}

impl ConnectorCommon for Redsys {
    fn id(&self) -> &'static str {
        "redsys"
    }

    fn signature_version(&self) -> &'static str {
        SIGNATURE_VERSION
    }
}

fn required_field<'a>(
    notification: &'a RawNotification,
    field: &'static str,
) -> CustomResult<&'a str, NotificationError> {
    notification.non_empty(field).ok_or_else(|| {
        error_stack::report!(NotificationError::InvalidFormat(
            InvalidFormatReason::MissingField(field)
        ))
    })
}

impl BodyDecoding for Redsys {
    fn decode_parameters(
        &self,
        blob: &EncodedParametersBlob,
    ) -> CustomResult<TransactionParameters, NotificationError> {
        transformers::decode_merchant_parameters(blob)
    }

    fn decode_notification(
        &self,
        notification: &RawNotification,
    ) -> CustomResult<DecodedNotification, NotificationError> {
        if let Some(code) = notification.get(notification_fields::ERROR_CODE) {
            return Err(NotificationError::ErrorResponse {
                code: code.to_string(),
                classification: ErrorCode::from_raw(code),
            }
            .into());
        }

        let signature_version =
            required_field(notification, notification_fields::SIGNATURE_VERSION)?;
        let encoded_parameters = EncodedParametersBlob::new(required_field(
            notification,
            notification_fields::MERCHANT_PARAMETERS,
        )?);
        let received_signature =
            ReceivedSignature::new(required_field(notification, notification_fields::SIGNATURE)?);

        if SignatureVersion::from_str(signature_version).is_err() {
            tracing::warn!(
                signature_version,
                expected = SIGNATURE_VERSION,
                "Unrecognised signature version, verifying with {SIGNATURE_VERSION}"
            );
        }

        let parameters = self.decode_parameters(&encoded_parameters)?;
        tracing::debug!(order_id = %parameters.order_id, "Decoded merchant parameters");

        Ok(DecodedNotification {
            signature_version: signature_version.to_string(),
            parameters,
            encoded_parameters,
            received_signature,
        })
    }
}

impl SourceVerification for Redsys {
    fn get_secrets(
        &self,
        secrets: &ConnectorNotificationSecrets,
        notification: &DecodedNotification,
    ) -> CustomResult<Secret<Vec<u8>>, NotificationError> {
        transformers::derive_order_key(&notification.parameters.order_id, &secrets.secret_key)
    }

    fn get_algorithm(
        &self,
    ) -> CustomResult<Box<dyn crypto::VerifySignature + Send>, NotificationError> {
        Ok(Box::new(crypto::HmacSha256))
    }

    fn get_signature(
        &self,
        notification: &DecodedNotification,
    ) -> CustomResult<Vec<u8>, NotificationError> {
        transformers::decode_received_signature(&notification.received_signature)
    }
}

impl IncomingNotification for Redsys {
    fn classify_transaction(
        &self,
        parameters: TransactionParameters,
    ) -> CustomResult<ClassifiedTransaction, NotificationError> {
        if let Some(code) = parameters.error_code.as_deref() {
            return Err(NotificationError::ErrorResponse {
                code: code.to_string(),
                classification: ErrorCode::from_raw(code),
            }
            .into());
        }

        let raw_code = parameters.response_code.as_deref().ok_or_else(|| {
            error_stack::report!(NotificationError::InvalidFormat(
                InvalidFormatReason::MissingResponseCode
            ))
        })?;
        let response_code = parse_code(raw_code).ok_or_else(|| {
            error_stack::report!(NotificationError::InvalidFormat(
                InvalidFormatReason::InvalidResponseCode
            ))
            .attach_printable(format!("Response code {raw_code:?} is not numeric"))
        })?;

        let authorized = is_authorized_response_code(response_code);
        let transaction = ClassifiedTransaction {
            parameters,
            response_code,
            classification: ResponseCode::from_code(response_code),
            authorized,
        };

        if authorized {
            Ok(transaction)
        } else {
            Err(NotificationError::DeniedPayment(Box::new(transaction)).into())
        }
    }
}
