//! Utilities for cryptographic algorithms

use cbc::cipher::{block_padding::NoPadding, BlockEncryptMut, KeyIvInit};
use error_stack::ResultExt;
use ring::hmac;

use crate::{
    errors::{CryptoError, CustomResult},
    fp_utils::when,
};

/// Trait for cryptographically signing messages
pub trait SignMessage {
    /// Takes in a secret and a message and returns the calculated signature as bytes
    fn sign_message(&self, secret: &[u8], msg: &[u8]) -> CustomResult<Vec<u8>, CryptoError>;
}

/// Trait for cryptographically verifying a message against a signature
pub trait VerifySignature {
    /// Takes in a secret, the signature and the message and verifies the message
    /// against the signature
    fn verify_signature(
        &self,
        secret: &[u8],
        signature: &[u8],
        msg: &[u8],
    ) -> CustomResult<bool, CryptoError>;
}

/// Trait for cryptographically encoding a message
pub trait EncodeMessage {
    /// Takes in a secret and the message and encodes it, returning bytes
    fn encode_message(&self, secret: &[u8], msg: &[u8]) -> CustomResult<Vec<u8>, CryptoError>;
}

/// Represents the HMAC-SHA-256 algorithm
#[derive(Debug)]
pub struct HmacSha256;

impl SignMessage for HmacSha256 {
    fn sign_message(&self, secret: &[u8], msg: &[u8]) -> CustomResult<Vec<u8>, CryptoError> {
        let key = hmac::Key::new(hmac::HMAC_SHA256, secret);
        Ok(hmac::sign(&key, msg).as_ref().to_vec())
    }
}

impl VerifySignature for HmacSha256 {
    fn verify_signature(
        &self,
        secret: &[u8],
        signature: &[u8],
        msg: &[u8],
    ) -> CustomResult<bool, CryptoError> {
        let key = hmac::Key::new(hmac::HMAC_SHA256, secret);

        // Constant-time comparison, any length mismatch is a plain `false`
        Ok(hmac::verify(&key, msg, signature).is_ok())
    }
}

type TdesEde3CbcEncryptor = cbc::Encryptor<des::TdesEde3>;

/// Triple DES (EDE3) in CBC mode with zero padding.
///
/// The message is right-padded with `0x00` up to the next multiple of the block size; an
/// already aligned message gets no extra block.
#[derive(Debug)]
pub struct TripleDesEde3Cbc {
    iv: [u8; Self::TRIPLE_DES_IV_LENGTH],
}

impl TripleDesEde3Cbc {
    pub const TRIPLE_DES_KEY_LENGTH: usize = 24;
    pub const TRIPLE_DES_IV_LENGTH: usize = 8;
    pub const TRIPLE_DES_BLOCK_LENGTH: usize = 8;

    /// Instance with the all-zero IV
    pub fn with_zero_iv() -> Self {
        Self {
            iv: [0u8; Self::TRIPLE_DES_IV_LENGTH],
        }
    }

    fn zero_pad(msg: &[u8]) -> Vec<u8> {
        let block = Self::TRIPLE_DES_BLOCK_LENGTH;
        let padded_len = msg.len().div_ceil(block) * block;
        let mut padded = msg.to_vec();
        padded.resize(padded_len, 0);
        padded
    }
}

impl EncodeMessage for TripleDesEde3Cbc {
    fn encode_message(&self, secret: &[u8], msg: &[u8]) -> CustomResult<Vec<u8>, CryptoError> {
        when(msg.is_empty(), || {
            Err(CryptoError::EncodingFailed).attach_printable("Cannot encrypt an empty message")
        })?;
        when(secret.len() != Self::TRIPLE_DES_KEY_LENGTH, || {
            Err(CryptoError::InvalidKeyLength).attach_printable(format!(
                "Triple DES expects a {} byte key, got {} bytes",
                Self::TRIPLE_DES_KEY_LENGTH,
                secret.len()
            ))
        })?;

        let encryptor = TdesEde3CbcEncryptor::new_from_slices(secret, &self.iv)
            .map_err(|_| CryptoError::InvalidKeyLength)?;

        let padded = Self::zero_pad(msg);
        Ok(encryptor.encrypt_padded_vec_mut::<NoPadding>(&padded))
    }
}

#[cfg(test)]
mod crypto_tests {
    #![allow(clippy::expect_used, clippy::unwrap_used)]
    use super::*;

    // RFC 4231, test case 2
    const HMAC_KEY: &[u8] = b"Jefe";
    const HMAC_MESSAGE: &[u8] = b"what do ya want for nothing?";
    const HMAC_SHA256_TC2: &str =
        "5bdcc146bf60754e6a042426089575c75a003f089d2739839dec58b964ec3843";

    fn hex(bytes: &[u8]) -> String {
        bytes.iter().map(|byte| format!("{byte:02x}")).collect()
    }

    #[test]
    fn test_hmac_sha256_sign_message() {
        let signature = HmacSha256
            .sign_message(HMAC_KEY, HMAC_MESSAGE)
            .expect("Signing HMAC-SHA256 message");
        assert_eq!(hex(&signature), HMAC_SHA256_TC2);
    }

    #[test]
    fn test_hmac_sha256_verify_signature() {
        let signature = HmacSha256.sign_message(HMAC_KEY, HMAC_MESSAGE).unwrap();
        assert!(HmacSha256
            .verify_signature(HMAC_KEY, &signature, HMAC_MESSAGE)
            .unwrap());

        let mut tampered = signature.clone();
        if let Some(first) = tampered.first_mut() {
            *first ^= 0x01;
        }
        assert!(!HmacSha256
            .verify_signature(HMAC_KEY, &tampered, HMAC_MESSAGE)
            .unwrap());
        assert!(!HmacSha256
            .verify_signature(HMAC_KEY, &signature[..16], HMAC_MESSAGE)
            .unwrap());
        assert!(!HmacSha256
            .verify_signature(b"wrong key", &signature, HMAC_MESSAGE)
            .unwrap());
    }

    #[test]
    fn test_triple_des_is_deterministic_and_block_aligned() {
        let key = *b"0123456789abcdefghijklmn";
        let cipher = TripleDesEde3Cbc::with_zero_iv();

        let short = cipher.encode_message(&key, b"1234").unwrap();
        assert_eq!(short.len(), 8);
        assert_eq!(short, cipher.encode_message(&key, b"1234").unwrap());

        let aligned = cipher.encode_message(&key, b"12345678").unwrap();
        assert_eq!(aligned.len(), 8);

        let twelve = cipher.encode_message(&key, b"123456789012").unwrap();
        assert_eq!(twelve.len(), 16);
    }

    #[test]
    fn test_triple_des_zero_padding_is_explicit() {
        let key = *b"abcdefghijklmnopqrstuvwx";
        let cipher = TripleDesEde3Cbc::with_zero_iv();

        let implicit = cipher.encode_message(&key, b"1234").unwrap();
        let explicit = cipher.encode_message(&key, b"1234\0\0\0\0").unwrap();
        assert_eq!(implicit, explicit);
    }

    #[test]
    fn test_triple_des_rejects_bad_key_and_empty_message() {
        let cipher = TripleDesEde3Cbc::with_zero_iv();
        let error = cipher.encode_message(&[0u8; 16], b"1234").unwrap_err();
        assert!(matches!(error.current_context(), CryptoError::InvalidKeyLength));

        let error = cipher
            .encode_message(&[0u8; TripleDesEde3Cbc::TRIPLE_DES_KEY_LENGTH], b"")
            .unwrap_err();
        assert!(matches!(error.current_context(), CryptoError::EncodingFailed));
    }

    #[test]
    fn test_triple_des_known_answers() {
        // Decoded sandbox merchant key "sq7HjrUOBfKmC576ILgskD5srU870gJ7"
        const KEY: [u8; 24] = [
            0xb2, 0xae, 0xc7, 0x8e, 0xb5, 0x0e, 0x05, 0xf2, 0xa6, 0x0b, 0x9e, 0xfa, 0x20, 0xb8,
            0x2c, 0x90, 0x3e, 0x6c, 0xad, 0x4f, 0x3b, 0xd2, 0x02, 0x7b,
        ];
        let cipher = TripleDesEde3Cbc::with_zero_iv();
        for (msg, expected) in [
            (&b"1234"[..], "ed52eed08e6553e0"),
            (&b"12345678"[..], "9ed56b24fc69db19"),
            (&b"0001abcd1234"[..], "057b17936e427984a64e21946b81487d"),
        ] {
            let encrypted = cipher.encode_message(&KEY, msg).unwrap();
            assert_eq!(hex(&encrypted), expected);
        }
    }
}
