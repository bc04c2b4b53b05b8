//! [`Encrypter`]: per-session data key plus its remotely wrapped form.

use chacha20poly1305::{
    aead::{Aead, KeyInit, OsRng},
    Key, XChaCha20Poly1305, XNonce,
};
use tracing::debug;
use zeroize::Zeroizing;

use super::{keyset, KEY_LEN, NONCE_LEN};
use crate::error::{Error, KeyManagementError};

/// Remote key-wrapping capability, backed by a key-management service.
///
/// `wrap` encrypts `plaintext` under the KEK named by `kek_uri` and returns
/// the resulting ciphertext. Only wrapping is needed on this side; the
/// matching unwrap happens downstream, outside this crate.
pub trait KekWrapper {
    fn wrap(
        &self,
        kek_uri: &str,
        plaintext: &[u8],
    ) -> impl std::future::Future<Output = anyhow::Result<Vec<u8>>> + Send;
}

/// Envelope encrypter for hashed identifier values.
///
/// Construction generates a fresh 256-bit data-encryption key (DEK), has
/// the remote capability wrap its serialized keyset under the KEK, and
/// retains only the AEAD handle and the wrapped bytes. The plaintext key
/// never leaves the process and is never persisted.
///
/// One instance may be shared freely across threads: encryption draws
/// fresh local randomness per call and mutates nothing.
pub struct Encrypter {
    /// AEAD handle bound to the data-encryption key.
    dek: XChaCha20Poly1305,
    /// The DEK's keyset, encrypted under the remote KEK.
    wrapped_dek: Vec<u8>,
}

impl Encrypter {
    /// Generate a DEK and wrap it under the KEK named by `kek_uri`.
    ///
    /// All-or-nothing: on any failure no partially usable instance exists.
    ///
    /// The wrap call is the only I/O this crate ever performs and carries
    /// no internal timeout or retry; callers apply their own policy.
    ///
    /// # Errors
    ///
    /// Returns [`KeyManagementError`] if keyset serialization or the
    /// remote wrap call fails. The error names the KEK, never the key.
    pub async fn new<W: KekWrapper>(wrapper: &W, kek_uri: &str) -> Result<Self, KeyManagementError> {
        use chacha20poly1305::aead::rand_core::RngCore;
        let mut key_bytes = Zeroizing::new([0u8; KEY_LEN]);
        OsRng.fill_bytes(&mut *key_bytes);

        let keyset_bytes =
            keyset::serialize(&key_bytes).map_err(|source| KeyManagementError::Keyset {
                kek_uri: kek_uri.to_owned(),
                source,
            })?;

        let wrapped_dek = wrapper
            .wrap(kek_uri, &keyset_bytes)
            .await
            .map_err(|source| KeyManagementError::Wrap {
                kek_uri: kek_uri.to_owned(),
                source,
            })?;

        let dek = XChaCha20Poly1305::new(Key::from_slice(&*key_bytes));
        debug!(kek_uri, wrapped_len = wrapped_dek.len(), "data key generated and wrapped");

        Ok(Self { dek, wrapped_dek })
    }

    /// The DEK's keyset, encrypted under the remote KEK.
    ///
    /// Raw bytes; callers Base64-encode this themselves before embedding
    /// it in an outbound payload.
    pub fn wrapped_dek(&self) -> &[u8] {
        &self.wrapped_dek
    }

    /// Encrypt a value under the DEK with empty associated data.
    ///
    /// A fresh random 192-bit nonce is drawn per call, so encrypting the
    /// same plaintext twice yields different output. The result is
    /// `nonce || ciphertext+tag` as one byte sequence.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Encryption`] on an internal AEAD failure. There is
    /// no fallback to unencrypted output.
    pub fn encrypt(&self, plaintext: &str) -> Result<Vec<u8>, Error> {
        use chacha20poly1305::aead::rand_core::RngCore;
        let mut nonce_bytes = [0u8; NONCE_LEN];
        OsRng.fill_bytes(&mut nonce_bytes);
        let nonce = XNonce::from_slice(&nonce_bytes);

        let ciphertext = self
            .dek
            .encrypt(nonce, plaintext.as_bytes())
            .map_err(|_| Error::Encryption)?;

        let mut out = Vec::with_capacity(NONCE_LEN + ciphertext.len());
        out.extend_from_slice(&nonce_bytes);
        out.extend_from_slice(&ciphertext);
        Ok(out)
    }
}

impl std::fmt::Debug for Encrypter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never print key material — not even in debug builds.
        f.debug_struct("Encrypter")
            .field("dek", &"[REDACTED]")
            .field("wrapped_dek_len", &self.wrapped_dek.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Mutex;

    const TEST_KEK_URI: &str = "arn:aws:kms:us-east-1:111122223333:key/mock-kek";

    /// Fake KMS that records the plaintext keyset and returns a fixed blob.
    #[derive(Default)]
    struct CapturingKms {
        seen_plaintext: Mutex<Option<Vec<u8>>>,
    }

    impl KekWrapper for CapturingKms {
        async fn wrap(&self, _kek_uri: &str, plaintext: &[u8]) -> anyhow::Result<Vec<u8>> {
            *self.seen_plaintext.lock().unwrap() = Some(plaintext.to_vec());
            Ok(b"WRAPPED-DEK".to_vec())
        }
    }

    struct FailingKms;

    impl KekWrapper for FailingKms {
        async fn wrap(&self, _kek_uri: &str, _plaintext: &[u8]) -> anyhow::Result<Vec<u8>> {
            anyhow::bail!("kms unavailable")
        }
    }

    fn decrypt(encrypter_output: &[u8], key: &[u8; KEY_LEN]) -> Result<Vec<u8>, ()> {
        let (nonce, ciphertext) = encrypter_output.split_at(NONCE_LEN);
        XChaCha20Poly1305::new(Key::from_slice(key))
            .decrypt(XNonce::from_slice(nonce), ciphertext)
            .map_err(|_| ())
    }

    #[tokio::test]
    async fn wrapped_dek_is_the_wrapper_output() {
        let kms = CapturingKms::default();
        let encrypter = Encrypter::new(&kms, TEST_KEK_URI).await.unwrap();
        assert_eq!(encrypter.wrapped_dek(), b"WRAPPED-DEK");
    }

    #[tokio::test]
    async fn failing_wrap_surfaces_key_management_error() {
        let err = Encrypter::new(&FailingKms, TEST_KEK_URI).await.unwrap_err();
        assert!(matches!(&err, KeyManagementError::Wrap { .. }));
        assert!(err.to_string().contains(TEST_KEK_URI));
    }

    #[tokio::test]
    async fn repeated_encryption_is_pairwise_distinct() {
        let encrypter = Encrypter::new(&CapturingKms::default(), TEST_KEK_URI)
            .await
            .unwrap();
        let mut seen = HashSet::new();
        for _ in 0..10 {
            let ciphertext = encrypter.encrypt("alexf@example.com").unwrap();
            assert!(
                seen.insert(hex::encode_upper(&ciphertext)),
                "identical output in distinct invocations"
            );
        }
    }

    #[tokio::test]
    async fn ciphertext_layout_is_nonce_body_tag() {
        let encrypter = Encrypter::new(&CapturingKms::default(), TEST_KEK_URI)
            .await
            .unwrap();
        let plaintext = "UJ6TMBm7KFoTSpM0uLtnnf950M4CPVKa9L10TUe0/Yo=";
        let ciphertext = encrypter.encrypt(plaintext).unwrap();
        // 24-byte nonce + body + 16-byte Poly1305 tag.
        assert_eq!(ciphertext.len(), NONCE_LEN + plaintext.len() + 16);
    }

    #[tokio::test]
    async fn round_trip_via_keyset_and_tamper_rejection() {
        let kms = CapturingKms::default();
        let encrypter = Encrypter::new(&kms, TEST_KEK_URI).await.unwrap();

        // Recover the DEK the way a downstream holder of KEK access would:
        // unwrap (trivial for the fake), then parse the keyset.
        let keyset_bytes = kms.seen_plaintext.lock().unwrap().clone().unwrap();
        let key = keyset::parse(&keyset_bytes);

        let mut ciphertext = encrypter.encrypt("secret-hash").unwrap();
        assert_eq!(decrypt(&ciphertext, &key).unwrap(), b"secret-hash");

        // Any flipped bit fails authentication.
        let last = ciphertext.len() - 1;
        ciphertext[last] ^= 0xFF;
        assert!(decrypt(&ciphertext, &key).is_err());
    }

    #[tokio::test]
    async fn debug_output_redacts_key_material() {
        let encrypter = Encrypter::new(&CapturingKms::default(), TEST_KEK_URI)
            .await
            .unwrap();
        let debugged = format!("{encrypter:?}");
        assert!(debugged.contains("[REDACTED]"));
        assert!(!debugged.contains("WRAPPED-DEK"));
    }
}
