use common_utils::{fp_utils::when, CustomResult};
use domain_types::{
    connector_types::{
        ClassifiedTransaction, ConnectorNotificationSecrets, RawNotification, TransactionParameters,
        VerificationOutcome,
    },
    errors::NotificationError,
};

use crate::{api::ConnectorCommon, decode::BodyDecoding, verification::SourceVerification};

pub type BoxedConnector = Box<&'static (dyn IncomingNotification + Sync)>;

/// Decode, verify and classify an incoming notification.
pub trait IncomingNotification: ConnectorCommon + BodyDecoding + SourceVerification {
    /// Classify the response code of a notification whose signature has been verified
    fn classify_transaction(
        &self,
        parameters: TransactionParameters,
    ) -> CustomResult<ClassifiedTransaction, NotificationError>;

    /// Run the full pipeline. Every stage is a one-way gate: the first failure is returned.
    fn process_notification(
        &self,
        notification: &RawNotification,
        secrets: &ConnectorNotificationSecrets,
    ) -> CustomResult<ClassifiedTransaction, NotificationError> {
        let decoded = self.decode_notification(notification)?;
        let verified = self.verify(&decoded, secrets)?;
        tracing::debug!(verified, signature_version = %decoded.signature_version, "Signature checked");
        when(!verified, || Err(NotificationError::SignatureMismatch))?;
        self.classify_transaction(decoded.parameters)
    }

    #[tracing::instrument(skip_all, fields(connector = self.id()))]
    fn verify_notification(
        &self,
        notification: &RawNotification,
        secrets: &ConnectorNotificationSecrets,
    ) -> VerificationOutcome {
        let outcome = VerificationOutcome::from(self.process_notification(notification, secrets));
        match &outcome {
            VerificationOutcome::Validated(transaction) => tracing::info!(
                order_id = %transaction.parameters.order_id,
                response_code = transaction.response_code,
                classification = %transaction.classification,
                "Notification validated"
            ),
            VerificationOutcome::DeniedPayment(transaction) => tracing::warn!(
                order_id = %transaction.parameters.order_id,
                response_code = transaction.response_code,
                classification = %transaction.classification,
                "Payment denied"
            ),
            VerificationOutcome::ErrorResponse {
                code,
                classification,
            } => tracing::warn!(code = %code, %classification, "Gateway reported an error"),
            VerificationOutcome::InvalidFormat { reason } => {
                tracing::warn!(%reason, "Malformed notification")
            }
            VerificationOutcome::SignatureMismatch => {
                tracing::warn!("Notification signature mismatch")
            }
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use common_enums::ResponseCode;
    use common_utils::crypto;
    use domain_types::{
        connector_types::{DecodedNotification, EncodedParametersBlob, ReceivedSignature},
        errors::InvalidFormatReason,
    };
    use hyperswitch_masking::Secret;

    use super::*;

    /// Accepts a signature equal to the secret key bytes; response code comes from the blob.
    struct Echo;

    fn parameters(blob: &str) -> TransactionParameters {
        TransactionParameters {
            order_id: "order".to_string(),
            response_code: Some(blob.to_string()),
            error_code: None,
            amount: None,
            currency: None,
            merchant_code: None,
            terminal: None,
            transaction_type: None,
            authorisation_code: None,
            date: None,
            hour: None,
            secure_payment: None,
            card_country: None,
            card_brand: None,
            consumer_language: None,
            merchant_data: None,
            raw: serde_json::Map::new(),
        }
    }

    impl ConnectorCommon for Echo {
        fn id(&self) -> &'static str {
            "echo"
        }

        fn signature_version(&self) -> &'static str {
            "ECHO"
        }
    }

    impl BodyDecoding for Echo {
        fn decode_parameters(
            &self,
            blob: &EncodedParametersBlob,
        ) -> CustomResult<TransactionParameters, NotificationError> {
            Ok(parameters(blob.as_str()))
        }

        fn decode_notification(
            &self,
            notification: &RawNotification,
        ) -> CustomResult<DecodedNotification, NotificationError> {
            let blob = notification.non_empty("blob").ok_or_else(|| {
                NotificationError::from(InvalidFormatReason::MissingField("blob"))
            })?;
            let encoded_parameters = EncodedParametersBlob::new(blob);
            Ok(DecodedNotification {
                signature_version: "ECHO".to_string(),
                parameters: self.decode_parameters(&encoded_parameters)?,
                encoded_parameters,
                received_signature: ReceivedSignature::new(
                    notification.get("signature").unwrap_or_default(),
                ),
            })
        }
    }

    struct SecretEquals;

    impl crypto::VerifySignature for SecretEquals {
        fn verify_signature(
            &self,
            secret: &[u8],
            signature: &[u8],
            _msg: &[u8],
        ) -> CustomResult<bool, common_utils::CryptoError> {
            Ok(secret == signature)
        }
    }

    impl SourceVerification for Echo {
        fn get_secrets(
            &self,
            secrets: &ConnectorNotificationSecrets,
            _notification: &DecodedNotification,
        ) -> CustomResult<Secret<Vec<u8>>, NotificationError> {
            use hyperswitch_masking::PeekInterface;
            Ok(Secret::new(secrets.secret_key.peek().as_bytes().to_vec()))
        }

        fn get_algorithm(
            &self,
        ) -> CustomResult<Box<dyn crypto::VerifySignature + Send>, NotificationError> {
            Ok(Box::new(SecretEquals))
        }

        fn get_signature(
            &self,
            notification: &DecodedNotification,
        ) -> CustomResult<Vec<u8>, NotificationError> {
            Ok(notification.received_signature.as_str().as_bytes().to_vec())
        }
    }

    impl IncomingNotification for Echo {
        fn classify_transaction(
            &self,
            parameters: TransactionParameters,
        ) -> CustomResult<ClassifiedTransaction, NotificationError> {
            let code: u32 = parameters.response_code.as_deref().unwrap().parse().unwrap();
            Ok(ClassifiedTransaction {
                parameters,
                response_code: code,
                classification: ResponseCode::from_code(code),
                authorized: true,
            })
        }
    }

    fn notification(blob: &str, signature: &str) -> RawNotification {
        [("blob", blob), ("signature", signature)]
            .into_iter()
            .collect()
    }

    #[test]
    fn pipeline_stops_at_the_first_failing_stage() {
        let secrets = ConnectorNotificationSecrets::new("key");

        let outcome = Echo.verify_notification(&notification("0", "key"), &secrets);
        assert!(outcome.is_authorized());

        // A bad signature never reaches classification, which would panic on this blob
        let outcome = Echo.verify_notification(&notification("not a number", "other"), &secrets);
        assert_eq!(outcome, VerificationOutcome::SignatureMismatch);

        let outcome = Echo.verify_notification(&notification("", "key"), &secrets);
        assert_eq!(
            outcome,
            VerificationOutcome::InvalidFormat {
                reason: InvalidFormatReason::MissingField("blob")
            }
        );
    }

    #[test]
    fn boxed_connectors_dispatch_dynamically() {
        let connector: BoxedConnector = Box::new(&Echo);
        assert_eq!(connector.id(), "echo");
        assert!(connector
            .verify_notification(
                &notification("99", "key"),
                &ConnectorNotificationSecrets::new("key")
            )
            .is_authorized());
    }
}
