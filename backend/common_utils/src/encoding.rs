//! Transport encodings used by the gateway: URL-safe base64 and form-style percent encoding.

use base64::Engine;
use error_stack::ResultExt;

use crate::{
    consts::BASE64_ENGINE_STD_PAD_INDIFFERENT,
    errors::{CustomResult, ParsingError},
};

/// Rewrites the URL-safe base64 alphabet (`-`, `_`) into the standard one (`+`, `/`).
///
/// Every other character is left untouched, so the output has the same length as the input.
pub fn url_safe_to_standard(input: &str) -> String {
    input
        .chars()
        .map(|character| match character {
            '-' => '+',
            '_' => '/',
            other => other,
        })
        .collect()
}

/// Decodes base64 written in either alphabet, with or without trailing padding.
pub fn decode_transport_base64(input: &str) -> CustomResult<Vec<u8>, ParsingError> {
    BASE64_ENGINE_STD_PAD_INDIFFERENT
        .decode(url_safe_to_standard(input))
        .change_context(ParsingError::Base64DecodingFailed)
}

/// Percent-decodes form-encoded bytes into a UTF-8 string. `+` decodes to a space.
pub fn percent_decode_form(input: &[u8]) -> CustomResult<String, ParsingError> {
    let spaced: Vec<u8> = input
        .iter()
        .map(|byte| if *byte == b'+' { b' ' } else { *byte })
        .collect();
    let decoded = urlencoding::decode_binary(&spaced).into_owned();
    String::from_utf8(decoded)
        .change_context(ParsingError::Utf8DecodingFailed)
        .attach_printable("Percent-decoded bytes are not valid UTF-8")
}
