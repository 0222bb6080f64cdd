//! Errors and error specific types for universal use

/// Custom Result
/// A custom datatype that wraps the error variant <E> into a report, allowing
/// error_stack::Report<E> specific extendability
///
/// Effectively, equivalent to `Result<T, error_stack::Report<E>>`
pub type CustomResult<T, E> = error_stack::Result<T, E>;

/// Parsing Errors
#[derive(Debug, thiserror::Error)]
pub enum ParsingError {
    /// Failed to parse struct
    #[error("Failed to parse struct: {0}")]
    StructParseFailure(&'static str),
    /// Failed to decode base64
    #[error("Failed to decode base64 input")]
    Base64DecodingFailed,
    /// Decoded bytes were not valid UTF-8
    #[error("Failed to interpret bytes as UTF-8")]
    Utf8DecodingFailed,
}

/// Cryptographic algorithm errors
#[derive(Debug, thiserror::Error)]
pub enum CryptoError {
    /// The cryptographic algorithm was unable to encode the message
    #[error("Failed to encode given message")]
    EncodingFailed,
    /// The key has a length the algorithm does not accept
    #[error("Invalid key length")]
    InvalidKeyLength,
}
