use common_utils::CustomResult;
use domain_types::{
    connector_types::{DecodedNotification, EncodedParametersBlob, RawNotification, TransactionParameters},
    errors::NotificationError,
};

/// Turns a raw notification into structured parameters without trusting any of them.
pub trait BodyDecoding {
    /// Decode the merchant-parameters blob into a structured record
    fn decode_parameters(
        &self,
        blob: &EncodedParametersBlob,
    ) -> CustomResult<TransactionParameters, NotificationError>;

    /// Validate the notification shape and decode it.
    ///
    /// A notification reporting a top-level error yields `NotificationError::ErrorResponse`
    /// without any decoding being attempted.
    fn decode_notification(
        &self,
        notification: &RawNotification,
    ) -> CustomResult<DecodedNotification, NotificationError>;
}
