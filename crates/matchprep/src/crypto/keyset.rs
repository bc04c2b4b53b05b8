//! Transportable keyset format for the data-encryption key.
//!
//! The wrapped blob that travels with a batch is the AEAD encryption of
//! this keyset, not of the bare key bytes. Keeping a small self-describing
//! envelope around the key lets the downstream holder of KEK access verify
//! the algorithm before use and leaves room for format migration.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use super::KEY_LEN;

/// Current keyset format version.
pub const KEYSET_VERSION: u32 = 1;

/// Algorithm identifier recorded in every keyset.
pub const ALGORITHM: &str = "XCHACHA20_POLY1305";

/// Serialized form of the data key. Key material is Base64 inside a small
/// JSON document; the whole struct is wiped on drop.
#[derive(Serialize, Deserialize, Zeroize, ZeroizeOnDrop)]
struct DekKeyset {
    version: u32,
    algorithm: String,
    key: String,
}

/// Serialize raw key bytes into the transportable keyset form.
///
/// The returned buffer contains plaintext key material and is zeroized on
/// drop; callers must hand it to the wrap capability and let it go out of
/// scope immediately after.
pub fn serialize(key: &[u8; KEY_LEN]) -> Result<Zeroizing<Vec<u8>>, serde_json::Error> {
    let keyset = DekKeyset {
        version: KEYSET_VERSION,
        algorithm: ALGORITHM.to_owned(),
        key: STANDARD.encode(key),
    };
    serde_json::to_vec(&keyset).map(Zeroizing::new)
}

/// Recover key bytes from a plaintext keyset. Only tests need this on our
/// side; in production the unwrap-and-parse step happens downstream.
#[cfg(test)]
pub(crate) fn parse(bytes: &[u8]) -> Zeroizing<[u8; KEY_LEN]> {
    let keyset: DekKeyset = serde_json::from_slice(bytes).expect("keyset JSON");
    assert_eq!(keyset.version, KEYSET_VERSION);
    assert_eq!(keyset.algorithm, ALGORITHM);
    let raw = STANDARD.decode(&keyset.key).expect("keyset key base64");
    let mut key = Zeroizing::new([0u8; KEY_LEN]);
    key.copy_from_slice(&raw);
    key
}
