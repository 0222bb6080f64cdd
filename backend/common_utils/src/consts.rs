//! Consolidated constants for the notification verifier

// =============================================================================
// Base64 engines
// =============================================================================

/// Standard alphabet, canonical padding required
pub const BASE64_ENGINE: base64::engine::GeneralPurpose = base64::engine::general_purpose::STANDARD;

/// Standard alphabet, padding optional on decode
pub const BASE64_ENGINE_STD_PAD_INDIFFERENT: base64::engine::GeneralPurpose =
    base64::engine::GeneralPurpose::new(
        &base64::alphabet::STANDARD,
        base64::engine::GeneralPurposeConfig::new()
            .with_decode_padding_mode(base64::engine::DecodePaddingMode::Indifferent),
    );
