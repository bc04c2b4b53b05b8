//! `matchprep` — prepare match identifiers for upload to a remote
//! matching service that only ever sees irreversible, optionally
//! encrypted digests.
//!
//! The crate does three things, composed by the [`pipeline`] façade:
//!
//! 1. [`format`] — canonicalize each identifier type (email, phone,
//!    given/family name, region, postal code) into the one representation
//!    the remote service hashes on its side.
//! 2. [`hash`] — SHA-256 the canonical form and encode as uppercase hex
//!    or standard Base64.
//! 3. [`crypto`] — optionally encrypt the Base64 hash under a per-session
//!    data key whose wrapped form travels with the batch (envelope
//!    encryption; the KEK lives in a remote KMS).
//!
//! ```
//! use matchprep::{process_email_address, Encoding};
//!
//! let hashed = process_email_address("Alex.Z@Example.com", Encoding::Hex, None)?;
//! assert_eq!(hashed.len(), 64);
//! # Ok::<(), matchprep::Error>(())
//! ```
//!
//! No function here performs I/O except [`Encrypter::new`], which makes
//! the one-time remote wrap call through a caller-supplied [`KekWrapper`].

pub mod crypto;
pub mod error;
pub mod format;
pub mod hash;
pub mod pipeline;

pub use crypto::{Encrypter, KekWrapper};
pub use error::{Error, InvalidInput, KeyManagementError};
pub use format::Identifier;
pub use hash::Encoding;
pub use pipeline::{
    process, process_email_address, process_family_name, process_given_name,
    process_phone_number, process_postal_code, process_region_code,
};
