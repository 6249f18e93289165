use crate::{constants::*, Credential};
use async_trait::async_trait;
use duosign_core::{Context, ProvideCredential, Result};
use log::debug;

/// EnvCredentialProvider loads Duo credentials from environment variables.
///
/// This provider looks for the following environment variables:
/// - `IKEY`: The Duo integration key
/// - `SKEY`: The Duo secret key
/// - `HOST`: The Duo API hostname, with or without `https://`
#[derive(Debug, Default)]
pub struct EnvCredentialProvider;

impl EnvCredentialProvider {
    /// Create a new EnvCredentialProvider.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ProvideCredential for EnvCredentialProvider {
    type Credential = Credential;

    async fn provide_credential(&self, ctx: &Context) -> Result<Option<Self::Credential>> {
        let envs = ctx.env_vars();

        let integration_key = envs.get(DUO_INTEGRATION_KEY);
        let secret_key = envs.get(DUO_SECRET_KEY);
        let api_host = envs.get(DUO_API_HOST);

        match (integration_key, secret_key, api_host) {
            (Some(ikey), Some(skey), Some(host)) => {
                Ok(Some(Credential::new(ikey.clone(), skey.clone(), host)))
            }
            _ => {
                let missing: Vec<&str> = [DUO_INTEGRATION_KEY, DUO_SECRET_KEY, DUO_API_HOST]
                    .into_iter()
                    .filter(|k| !envs.contains_key(*k))
                    .collect();
                debug!("missing required environment variables: {}", missing.join(", "));
                Ok(None)
            }
        }
    }
}
