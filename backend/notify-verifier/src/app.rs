use std::{
    io::Read,
    path::{Path, PathBuf},
};

use connector_integration::types::{ConnectorData, ConnectorEnum};
use domain_types::connector_types::{RawNotification, VerificationOutcome};

use crate::{configs, error::ConfigurationError, logger};

/// A single notification to verify
#[derive(Debug, Clone)]
pub struct VerifyRequest {
    pub connector: ConnectorEnum,
    /// Configured merchant name, optional when only one merchant is configured
    pub merchant: Option<String>,
    /// File holding the notification body; stdin when absent
    pub input: Option<PathBuf>,
}

/// Reads a notification body from a file, or from stdin when no path is given
pub fn read_body(input: Option<&Path>) -> Result<String, ConfigurationError> {
    match input {
        Some(path) => Ok(std::fs::read_to_string(path)?),
        None => {
            let mut body = String::new();
            std::io::stdin().read_to_string(&mut body)?;
            Ok(body)
        }
    }
}

/// Parses an `application/x-www-form-urlencoded` body into the submitted fields
pub fn parse_notification_body(body: &str) -> Result<RawNotification, ConfigurationError> {
    let fields: Vec<(String, String)> = serde_urlencoded::from_str(body.trim())?;
    Ok(fields.into_iter().collect())
}

#[logger::instrument(skip_all, fields(connector = %connector, merchant = tracing::field::Empty))]
pub fn verify_notification_body(
    config: &configs::Config,
    connector: ConnectorEnum,
    merchant: Option<&str>,
    body: &str,
) -> Result<VerificationOutcome, ConfigurationError> {
    let (merchant_name, merchant) = config.merchant(merchant)?;
    tracing::Span::current().record("merchant", merchant_name);

    let notification = parse_notification_body(body)?;
    let connector_data = ConnectorData::get_connector_by_name(&connector);
    let outcome = connector_data
        .connector
        .verify_notification(&notification, &merchant.notification_secrets());

    if let Some(parameters) = outcome.parameters() {
        for (field, configured, received) in [
            (
                "merchant_code",
                merchant.merchant_code.as_deref(),
                parameters.merchant_code.as_deref(),
            ),
            (
                "terminal",
                merchant.terminal.as_deref(),
                parameters.terminal.as_deref(),
            ),
        ] {
            if let (Some(configured), Some(received)) = (configured, received) {
                if configured.trim_start_matches('0') != received.trim_start_matches('0') {
                    logger::warn!(
                        field,
                        configured,
                        received,
                        "Signed notification belongs to a different merchant terminal"
                    );
                }
            }
        }
    }

    Ok(outcome)
}

/// Reads and verifies one notification
pub fn run_verify(
    config: &configs::Config,
    request: &VerifyRequest,
) -> Result<VerificationOutcome, ConfigurationError> {
    let body = read_body(request.input.as_deref())?;
    verify_notification_body(
        config,
        request.connector,
        request.merchant.as_deref(),
        &body,
    )
}
