use std::fmt::{Debug, Formatter};

use log::warn;

use super::constants::*;
use crate::{Credential, SignatureVersion};
use duosign_core::{utils::Redact, Context};

/// Config carries all the configuration for the Duo signer.
#[derive(Clone, Default)]
pub struct Config {
    /// `integration_key` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`DUO_INTEGRATION_KEY`]
    pub integration_key: Option<String>,
    /// `secret_key` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`DUO_SECRET_KEY`]
    pub secret_key: Option<String>,
    /// `api_host` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`DUO_API_HOST`]
    pub api_host: Option<String>,
    /// `signature_version` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`DUO_SIGNATURE_VERSION`]
    pub signature_version: Option<SignatureVersion>,
}

impl Config {
    /// Create a new Config
    pub fn new() -> Self {
        Self::default()
    }

    /// Set integration_key
    pub fn with_integration_key(mut self, integration_key: impl Into<String>) -> Self {
        self.integration_key = Some(integration_key.into());
        self
    }

    /// Set secret_key
    pub fn with_secret_key(mut self, secret_key: impl Into<String>) -> Self {
        self.secret_key = Some(secret_key.into());
        self
    }

    /// Set api_host
    pub fn with_api_host(mut self, api_host: impl Into<String>) -> Self {
        self.api_host = Some(api_host.into());
        self
    }

    /// Set signature_version
    pub fn with_signature_version(mut self, version: SignatureVersion) -> Self {
        self.signature_version = Some(version);
        self
    }

    /// Load config from env.
    pub fn from_env(mut self, ctx: &Context) -> Self {
        if let Some(v) = ctx.env_var(DUO_INTEGRATION_KEY) {
            self.integration_key.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(DUO_SECRET_KEY) {
            self.secret_key.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(DUO_API_HOST) {
            self.api_host.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(DUO_SIGNATURE_VERSION) {
            match v.parse() {
                Ok(version) => {
                    self.signature_version.get_or_insert(version);
                }
                Err(err) => warn!("ignoring {DUO_SIGNATURE_VERSION}: {err}"),
            }
        }

        self
    }

    /// Build a credential if all of its fields are set.
    pub fn credential(&self) -> Option<Credential> {
        match (&self.integration_key, &self.secret_key, &self.api_host) {
            (Some(ikey), Some(skey), Some(host)) => Some(Credential::new(ikey, skey, host)),
            _ => None,
        }
    }
}

impl Debug for Config {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("integration_key", &self.integration_key.as_ref().map(Redact::from))
            .field("secret_key", &self.secret_key.as_ref().map(Redact::from))
            .field("api_host", &self.api_host)
            .field("signature_version", &self.signature_version)
            .finish()
    }
}
