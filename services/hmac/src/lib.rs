//! Signers for the Duo Admin and Auth APIs.
//!
//! ## Example
//!
//! ```
//! use duosign_core::Signer;
//! use duosign_hmac::{Credential, DuoRequest, RequestSigner};
//!
//! # fn main() -> duosign_core::Result<()> {
//! let credential = Credential::new(
//!     "DIABCDEFGHIJKLMNOPQR",
//!     "1234567890abcdefghijklmnopqrstuvwxyz1234",
//!     "api-XXXXXXXX.duosecurity.com",
//! );
//! let signer = Signer::new(credential, RequestSigner::new())?;
//!
//! let req = DuoRequest::new("GET", "/auth/v2/check")?;
//! let signed = signer.sign(&req)?;
//!
//! assert_eq!(signed.uri, "api-XXXXXXXX.duosecurity.com/auth/v2/check");
//! assert!(signed.headers["Authorization"].starts_with("Basic "));
//! # Ok(())
//! # }
//! ```

pub mod canonical;

mod config;
pub use config::Config;

mod credential;
pub use credential::Credential;

mod request;
pub use request::DuoRequest;

mod sign_request;
pub use sign_request::{RequestSigner, SignatureVersion, SignedRequest};

mod provide_credential;
pub use provide_credential::*;

mod constants;
