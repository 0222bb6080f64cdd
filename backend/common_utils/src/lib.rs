//! Common utilities for the notification verifier

pub mod consts;
pub mod crypto;
pub mod encoding;
pub mod errors;
pub mod ext_traits;
pub mod fp_utils;

pub use errors::{CryptoError, CustomResult, ParsingError};
