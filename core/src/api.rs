use crate::{Context, Result};
use std::fmt::Debug;

/// SigningCredential is the trait used by signer as the signing key.
pub trait SigningCredential: Clone + Debug + Send + Sync + Unpin + 'static {
    /// Check if the credential is valid.
    fn is_valid(&self) -> bool;
}

impl<T: SigningCredential> SigningCredential for Option<T> {
    fn is_valid(&self) -> bool {
        let Some(ctx) = self else {
            return false;
        };

        ctx.is_valid()
    }
}

/// ProvideCredential is the trait used by signer to load the credential from the environment.
///
/// Credentials are resolved once when the signer is built. Rotating them means
/// building a new signer.
#[async_trait::async_trait]
pub trait ProvideCredential: Debug + Send + Sync + Unpin + 'static {
    /// Credential returned by this loader.
    type Credential: Send + Sync + Unpin + 'static;

    /// Load signing credential from current env.
    async fn provide_credential(&self, ctx: &Context) -> Result<Option<Self::Credential>>;
}

/// SignRequest is the trait used by signer to sign a request.
///
/// Signing is a bounded, synchronous computation: implementations must not
/// block or perform I/O besides reading the clock.
pub trait SignRequest: Debug + Send + Sync + Unpin + 'static {
    /// Credential used by this builder.
    type Credential: Send + Sync + Unpin + 'static;

    /// The request accepted by this builder.
    type Request;

    /// The signed output returned by this builder.
    type Signed;

    /// Sign the request with given credential.
    ///
    /// Either the whole result is produced or an error is returned; partial
    /// results are never exposed.
    fn sign_request(&self, credential: &Self::Credential, req: &Self::Request)
        -> Result<Self::Signed>;
}
