use common_utils::{crypto, CustomResult};
use domain_types::{
    connector_types::{ConnectorNotificationSecrets, DecodedNotification},
    errors::{InvalidFormatReason, NotificationError},
};
use error_stack::ResultExt;
use hyperswitch_masking::{PeekInterface, Secret};

/// Core trait for source verification
pub trait SourceVerification {
    /// Derive the key the notification was signed with
    fn get_secrets(
        &self,
        secrets: &ConnectorNotificationSecrets,
        notification: &DecodedNotification,
    ) -> CustomResult<Secret<Vec<u8>>, NotificationError>;

    /// Get the verification algorithm being used
    fn get_algorithm(
        &self,
    ) -> CustomResult<Box<dyn crypto::VerifySignature + Send>, NotificationError>;

    /// Get the received signature bytes from the notification
    fn get_signature(
        &self,
        notification: &DecodedNotification,
    ) -> CustomResult<Vec<u8>, NotificationError>;

    /// Get the message that was signed
    fn get_message(
        &self,
        notification: &DecodedNotification,
    ) -> CustomResult<Vec<u8>, NotificationError> {
        Ok(notification.encoded_parameters.as_bytes().to_vec())
    }

    /// Perform the verification
    fn verify(
        &self,
        notification: &DecodedNotification,
        secrets: &ConnectorNotificationSecrets,
    ) -> CustomResult<bool, NotificationError> {
        let algorithm = self.get_algorithm()?;
        let extracted_secrets = self.get_secrets(secrets, notification)?;
        let signature = self.get_signature(notification)?;
        let message = self.get_message(notification)?;

        // Verify the signature against the message
        algorithm
            .verify_signature(extracted_secrets.peek(), &signature, &message)
            .change_context(NotificationError::InvalidFormat(
                InvalidFormatReason::SignatureDerivationFailed,
            ))
    }
}
