//! Pipeline façade: one call per identifier type, from raw value to the
//! string the upload payload carries.
//!
//! Two shapes, collapsed into a single code path parameterized by an
//! optional [`Encrypter`]:
//!
//! - plain: canonicalize → SHA-256 → encode
//! - encrypted: canonicalize → SHA-256 → Base64 → encrypt → encode
//!
//! The intermediate hash is always Base64-encoded before encryption,
//! regardless of the requested final encoding; that fixes the exact
//! plaintext the AEAD primitive sees. Region and postal codes are never
//! hashed or encrypted — their processed form is their canonical form.

use crate::crypto::Encrypter;
use crate::error::Error;
use crate::format::{self, Identifier};
use crate::hash::{self, Encoding};

/// Process one identifier into its upload-ready form.
///
/// For region and postal codes, `encoding` and `encrypter` are ignored.
///
/// # Errors
///
/// Returns [`Error::InvalidInput`] for a structurally invalid raw value
/// and [`Error::Encryption`] if the AEAD primitive fails.
pub fn process(
    identifier: &Identifier,
    encoding: Encoding,
    encrypter: Option<&Encrypter>,
) -> Result<String, Error> {
    let canonical = identifier.canonicalize()?;
    match identifier {
        Identifier::RegionCode(_) | Identifier::PostalCode(_) => Ok(canonical),
        _ => match encrypter {
            None => Ok(hash::hash_and_encode(&canonical, encoding)?),
            Some(encrypter) => {
                let hash_base64 = hash::hash_and_encode(&canonical, Encoding::Base64)?;
                let ciphertext = encrypter.encrypt(&hash_base64)?;
                Ok(hash::encode(&ciphertext, encoding)?)
            }
        },
    }
}

/// Format, hash, and encode an email address.
pub fn process_email_address(
    email: &str,
    encoding: Encoding,
    encrypter: Option<&Encrypter>,
) -> Result<String, Error> {
    process(&Identifier::EmailAddress(email.to_owned()), encoding, encrypter)
}

/// Format, hash, and encode a phone number.
pub fn process_phone_number(
    phone: &str,
    encoding: Encoding,
    encrypter: Option<&Encrypter>,
) -> Result<String, Error> {
    process(&Identifier::PhoneNumber(phone.to_owned()), encoding, encrypter)
}

/// Format, hash, and encode a given name.
pub fn process_given_name(
    name: &str,
    encoding: Encoding,
    encrypter: Option<&Encrypter>,
) -> Result<String, Error> {
    process(&Identifier::GivenName(name.to_owned()), encoding, encrypter)
}

/// Format, hash, and encode a family name.
pub fn process_family_name(
    name: &str,
    encoding: Encoding,
    encrypter: Option<&Encrypter>,
) -> Result<String, Error> {
    process(&Identifier::FamilyName(name.to_owned()), encoding, encrypter)
}

/// Process a region code. Exists so every identifier type has a
/// `process_*` entry point; region codes are neither hashed nor encrypted.
pub fn process_region_code(code: &str) -> Result<String, Error> {
    Ok(format::format_region_code(code)?)
}

/// Process a postal code. Exists so every identifier type has a
/// `process_*` entry point; postal codes are neither hashed nor encrypted.
pub fn process_postal_code(code: &str) -> Result<String, Error> {
    Ok(format::format_postal_code(code)?)
}
