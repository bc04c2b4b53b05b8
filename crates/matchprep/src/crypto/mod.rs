//! Envelope encryption: a locally generated XChaCha20-Poly1305 data key,
//! wrapped by a remote key-encryption key.
//!
//! This module is intentionally free of AWS and network dependencies. The
//! remote side is abstracted as the [`KekWrapper`] capability; production
//! code plugs in a KMS-backed implementation, tests plug in fakes.
//!
//! # Ciphertext format
//!
//! ```text
//! [24 bytes: random nonce][N bytes: ciphertext][16 bytes: Poly1305 tag]
//! ```
//!
//! XChaCha20-Poly1305's 192-bit nonce space makes drawing a fresh random
//! nonce per call safe for any realistic number of encryptions under one
//! key, which is exactly the usage pattern here.

pub mod encrypter;
pub mod keyset;

pub use encrypter::{Encrypter, KekWrapper};

/// Byte length of the data-encryption key (32 bytes = 256 bits).
pub const KEY_LEN: usize = 32;

/// Byte length of an XChaCha20-Poly1305 nonce (24 bytes = 192 bits).
pub const NONCE_LEN: usize = 24;
