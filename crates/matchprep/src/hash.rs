//! SHA-256 digests and the two transport encodings.
//!
//! Digests are computed with a fresh, stateless [`Sha256::digest`] call, so
//! there is no per-instance accumulator and everything here is safe to call
//! from any thread.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use sha2::{Digest, Sha256};

use crate::error::InvalidInput;

/// Byte length of a SHA-256 digest.
pub const DIGEST_LEN: usize = 32;

/// The two encodings the matching service accepts for hashed values.
///
/// A closed set: hex is uppercase, Base64 is the standard alphabet with
/// `=` padding. No URL-safe variant, no line wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    Hex,
    Base64,
}

/// Compute the SHA-256 digest of a non-blank string's UTF-8 bytes.
///
/// # Errors
///
/// Returns [`InvalidInput::Blank`] for empty or whitespace-only input.
/// A blank string hashes fine mechanically, but is never a valid
/// canonicalized identifier, so it is rejected here as a safety net.
pub fn sha256(value: &str) -> Result<[u8; DIGEST_LEN], InvalidInput> {
    if value.trim().is_empty() {
        return Err(InvalidInput::Blank);
    }
    Ok(Sha256::digest(value.as_bytes()).into())
}

/// Encode bytes as uppercase hexadecimal.
///
/// # Errors
///
/// Returns [`InvalidInput::EmptyBytes`] for an empty slice.
pub fn hex_encode(bytes: &[u8]) -> Result<String, InvalidInput> {
    if bytes.is_empty() {
        return Err(InvalidInput::EmptyBytes);
    }
    Ok(hex::encode_upper(bytes))
}

/// Encode bytes as standard padded Base64.
///
/// # Errors
///
/// Returns [`InvalidInput::EmptyBytes`] for an empty slice.
pub fn base64_encode(bytes: &[u8]) -> Result<String, InvalidInput> {
    if bytes.is_empty() {
        return Err(InvalidInput::EmptyBytes);
    }
    Ok(STANDARD.encode(bytes))
}

/// Encode bytes using the requested [`Encoding`].
///
/// # Errors
///
/// Returns [`InvalidInput::EmptyBytes`] for an empty slice.
pub fn encode(bytes: &[u8], encoding: Encoding) -> Result<String, InvalidInput> {
    match encoding {
        Encoding::Hex => hex_encode(bytes),
        Encoding::Base64 => base64_encode(bytes),
    }
}

/// Digest a canonical string and encode the result in one step.
///
/// # Errors
///
/// Returns [`InvalidInput::Blank`] for blank input.
pub fn hash_and_encode(canonical: &str, encoding: Encoding) -> Result<String, InvalidInput> {
    let digest = sha256(canonical)?;
    encode(&digest, encoding)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sha256_known_answers() {
        assert_eq!(
            hex_encode(&sha256("alexz@example.com").unwrap()).unwrap(),
            "509E933019BB285A134A9334B8BB679DFF79D0CE023D529AF4BD744D47B4FD8A"
        );
        assert_eq!(
            hex_encode(&sha256("+18005550100").unwrap()).unwrap(),
            "FB4F73A6EC5FDB7077D564CDD22C3554B43CE49168550C3B12C547B78C517B30"
        );
    }

    #[test]
    fn sha256_rejects_blank() {
        assert_eq!(sha256(""), Err(InvalidInput::Blank));
        assert_eq!(sha256(" "), Err(InvalidInput::Blank));
        assert_eq!(sha256("  "), Err(InvalidInput::Blank));
    }

    #[test]
    fn hex_is_uppercase() {
        assert_eq!(hex_encode(b"acK123").unwrap(), "61634B313233");
        assert_eq!(hex_encode(b"999_XYZ").unwrap(), "3939395F58595A");
    }

    #[test]
    fn base64_is_standard_padded() {
        assert_eq!(base64_encode(b"acK123").unwrap(), "YWNLMTIz");
        assert_eq!(base64_encode(b"999_XYZ").unwrap(), "OTk5X1hZWg==");
    }

    #[test]
    fn encoders_reject_empty_slices() {
        assert_eq!(hex_encode(&[]), Err(InvalidInput::EmptyBytes));
        assert_eq!(base64_encode(&[]), Err(InvalidInput::EmptyBytes));
        assert_eq!(encode(&[], Encoding::Hex), Err(InvalidInput::EmptyBytes));
    }

    #[test]
    fn encodings_round_trip() {
        let bytes: Vec<u8> = (0u8..=255).collect();
        let hex = encode(&bytes, Encoding::Hex).unwrap();
        assert_eq!(hex::decode(&hex).unwrap(), bytes);
        let b64 = encode(&bytes, Encoding::Base64).unwrap();
        use base64::{engine::general_purpose::STANDARD, Engine as _};
        assert_eq!(STANDARD.decode(&b64).unwrap(), bytes);
    }

    #[test]
    fn hash_and_encode_chains() {
        assert_eq!(
            hash_and_encode("alexz@example.com", Encoding::Base64).unwrap(),
            "UJ6TMBm7KFoTSpM0uLtnnf950M4CPVKa9L10TUe0/Yo="
        );
        assert_eq!(
            hash_and_encode("+18005550100", Encoding::Base64).unwrap(),
            "+09zpuxf23B31WTN0iw1VLQ85JFoVQw7EsVHt4xRezA="
        );
    }
}
