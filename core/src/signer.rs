use crate::{Context, Error, ProvideCredential, Result, SignRequest, SigningCredential};
use log::info;
use std::fmt::{Debug, Formatter};
use std::sync::Arc;

/// Signer is the main struct used to sign the request.
///
/// The credential is resolved once and never mutated afterwards, so a signer
/// can be cloned and shared across threads freely.
pub struct Signer<B: SignRequest> {
    credential: Arc<B::Credential>,
    builder: Arc<B>,
}

impl<B> Signer<B>
where
    B: SignRequest,
    B::Credential: SigningCredential,
{
    /// Create a new signer with an already resolved credential.
    ///
    /// Returns a config invalid error if the credential is not usable.
    pub fn new(credential: B::Credential, builder: B) -> Result<Self> {
        if !credential.is_valid() {
            return Err(Error::config_invalid(format!(
                "credential is incomplete: {credential:?}"
            )));
        }

        Ok(Self {
            credential: Arc::new(credential),
            builder: Arc::new(builder),
        })
    }

    /// Resolve the credential from the provider and create a new signer.
    ///
    /// This is expected to run once at startup: a missing credential is fatal.
    pub async fn load(
        ctx: &Context,
        provider: impl ProvideCredential<Credential = B::Credential>,
        builder: B,
    ) -> Result<Self> {
        let Some(credential) = provider.provide_credential(ctx).await? else {
            return Err(Error::config_invalid(format!(
                "no credential provided by {provider:?}"
            )));
        };

        let signer = Self::new(credential, builder)?;
        info!("signer loaded credential: {:?}", signer.credential);
        Ok(signer)
    }

    /// Get the credential used by this signer.
    pub fn credential(&self) -> &B::Credential {
        &self.credential
    }

    /// Signing request.
    pub fn sign(&self, req: &B::Request) -> Result<B::Signed> {
        self.builder.sign_request(&self.credential, req)
    }
}

impl<B: SignRequest> Clone for Signer<B> {
    fn clone(&self) -> Self {
        Self {
            credential: self.credential.clone(),
            builder: self.builder.clone(),
        }
    }
}

impl<B> Debug for Signer<B>
where
    B: SignRequest,
    B::Credential: Debug,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Signer")
            .field("credential", &self.credential)
            .field("builder", &self.builder)
            .finish()
    }
}
