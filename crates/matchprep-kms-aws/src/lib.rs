//! AWS KMS implementation of the `matchprep` key-wrap capability.
//!
//! Wraps the serialized data-key keyset by calling the KMS `Encrypt` API
//! under the configured KEK. This is the only crate in the workspace that
//! performs network I/O, and only during [`Encrypter`] construction; no
//! retry or timeout policy is applied here (callers wrap the construction
//! call with their own).
//!
//! [`Encrypter`]: matchprep::Encrypter

pub mod config;

pub use config::Config;

use anyhow::{Context, Result};
use aws_config::BehaviorVersion;
use aws_sdk_kms::primitives::Blob;
use matchprep::KekWrapper;
use tracing::debug;

/// [`KekWrapper`] backed by an AWS KMS client.
#[derive(Clone)]
pub struct KmsKeyWrapper {
    client: aws_sdk_kms::Client,
}

impl KmsKeyWrapper {
    /// Initialise the KMS client from the shared AWS SDK config.
    ///
    /// Credentials are resolved via the standard AWS credential chain. An
    /// `endpoint_url` override in `cfg` redirects the client, e.g. at a
    /// local KMS stand-in.
    ///
    /// # Errors
    ///
    /// Returns an error if the SDK config cannot be loaded.
    pub async fn init(cfg: &Config) -> Result<Self> {
        let sdk_config = aws_config::defaults(BehaviorVersion::latest()).load().await;

        let mut builder = aws_sdk_kms::config::Builder::from(&sdk_config);
        if let Some(url) = &cfg.endpoint_url {
            builder = builder.endpoint_url(url);
        }

        Ok(Self {
            client: aws_sdk_kms::Client::from_conf(builder.build()),
        })
    }

    /// Build a wrapper around an already-configured KMS client.
    pub fn from_client(client: aws_sdk_kms::Client) -> Self {
        Self { client }
    }
}

impl KekWrapper for KmsKeyWrapper {
    /// Encrypt `plaintext` under the KEK via the KMS `Encrypt` API.
    ///
    /// Error context names the KEK only; neither the plaintext keyset nor
    /// the returned ciphertext is ever logged.
    async fn wrap(&self, kek_uri: &str, plaintext: &[u8]) -> Result<Vec<u8>> {
        let resp = self
            .client
            .encrypt()
            .key_id(kek_uri)
            .plaintext(Blob::new(plaintext))
            .send()
            .await
            .with_context(|| format!("KMS Encrypt call failed for KEK {kek_uri}"))?;

        let ciphertext = resp
            .ciphertext_blob()
            .with_context(|| format!("KMS Encrypt response for KEK {kek_uri} contained no ciphertext"))?;

        debug!(kek_uri, wrapped_len = ciphertext.as_ref().len(), "data key wrapped via KMS");
        Ok(ciphertext.as_ref().to_vec())
    }
}
