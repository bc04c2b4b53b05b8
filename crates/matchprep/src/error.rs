//! Error taxonomy for the preparation pipeline.
//!
//! Three families of failure, surfaced synchronously and never retried here:
//! - [`InvalidInput`] — a raw identifier failed a structural rule.
//! - [`KeyManagementError`] — establishing the wrapped data key failed.
//! - [`Error::Encryption`] — the AEAD primitive itself failed.
//!
//! Inputs are user PII, so [`InvalidInput`] variants never carry the
//! offending value; messages describe the rule that failed and nothing else.

use thiserror::Error;

/// Rejection of a structurally invalid identifier or byte input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InvalidInput {
    /// The value is empty, or only whitespace, after trimming.
    #[error("value is empty or blank")]
    Blank,

    /// The email address still contains whitespace after trimming.
    #[error("email contains whitespace")]
    EmailContainsWhitespace,

    /// The email address does not split into a non-empty user and domain.
    #[error("email is not of the form user@domain")]
    EmailMalformed,

    /// The user part of the email became empty during normalization.
    #[error("email user part is empty after normalization")]
    EmailUserEmpty,

    /// The phone number contains no decimal digits.
    #[error("phone number contains no digits")]
    PhoneWithoutDigits,

    /// The given name consists solely of an honorific prefix.
    #[error("given name consists solely of a prefix")]
    GivenNamePrefixOnly,

    /// The family name consists solely of generational/professional suffixes.
    #[error("family name consists solely of suffixes")]
    FamilyNameSuffixOnly,

    /// The region code is not exactly 2 characters.
    #[error("region code length is {0}, but length must be 2")]
    RegionCodeLength(usize),

    /// The region code contains characters outside `A`–`Z`.
    #[error("region code contains characters other than A-Z")]
    RegionCodeNonAlpha,

    /// A byte slice passed to an encoder was empty.
    #[error("byte input is empty")]
    EmptyBytes,
}

/// Failure establishing the wrapped data-encryption key.
///
/// Construction is all-or-nothing: any variant here means no usable
/// [`Encrypter`](crate::crypto::Encrypter) was produced. Messages include
/// the KEK identifier but never key material.
#[derive(Debug, Error)]
pub enum KeyManagementError {
    /// Serializing the data-key keyset for wrapping failed.
    #[error("failed to serialize the data key keyset for KEK {kek_uri}")]
    Keyset {
        /// Identifier of the remote key-encryption key.
        kek_uri: String,
        #[source]
        source: serde_json::Error,
    },

    /// The remote wrap call failed.
    #[error("failed to wrap the data key under KEK {kek_uri}")]
    Wrap {
        /// Identifier of the remote key-encryption key.
        kek_uri: String,
        #[source]
        source: anyhow::Error,
    },
}

/// Top-level error returned by the pipeline façade.
#[derive(Debug, Error)]
pub enum Error {
    /// A raw identifier failed a structural rule.
    #[error(transparent)]
    InvalidInput(#[from] InvalidInput),

    /// Establishing the wrapped data key failed.
    #[error(transparent)]
    KeyManagement(#[from] KeyManagementError),

    /// The AEAD primitive failed during encryption. Fatal for that value;
    /// there is no fallback to unencrypted output.
    #[error("aead encryption failed")]
    Encryption,
}
