use std::collections::HashMap;
use std::sync::Arc;

use anyhow::Result;
use duosign_core::{Context, ProvideCredential, Signer, StaticEnv};
use duosign_hmac::{
    Config, ConfigCredentialProvider, DuoRequest, EnvCredentialProvider, RequestSigner,
    SignatureVersion, StaticCredentialProvider,
};

fn env_context(envs: &[(&str, &str)]) -> Context {
    Context::new().with_env(StaticEnv {
        envs: envs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect::<HashMap<_, _>>(),
    })
}

#[tokio::test]
async fn test_env_and_static_providers_agree() -> Result<()> {
    let ctx = env_context(&[
        ("IKEY", "DIABCDEFGHIJKLMNOPQR"),
        ("SKEY", "1234567890abcdefghijklmnopqrstuvwxyz1234"),
        ("HOST", "https://api-XXXXXXXX.duosecurity.com/"),
    ]);

    let from_env = EnvCredentialProvider::new()
        .provide_credential(&ctx)
        .await?
        .expect("credential must be loaded from env");
    let from_static = StaticCredentialProvider::new(
        "DIABCDEFGHIJKLMNOPQR",
        "1234567890abcdefghijklmnopqrstuvwxyz1234",
        "api-XXXXXXXX.duosecurity.com",
    )
    .provide_credential(&ctx)
    .await?
    .expect("static credential must be present");

    assert_eq!(from_env, from_static);
    Ok(())
}

#[tokio::test]
async fn test_config_drives_signature_version() -> Result<()> {
    let ctx = env_context(&[
        ("IKEY", "DIABCDEFGHIJKLMNOPQR"),
        ("SKEY", "1234567890abcdefghijklmnopqrstuvwxyz1234"),
        ("HOST", "api-XXXXXXXX.duosecurity.com"),
        ("DUO_SIGNATURE_VERSION", "v5"),
    ]);

    let config = Config::new().from_env(&ctx);
    let builder = RequestSigner::from_config(&config);
    assert_eq!(builder.signature_version(), SignatureVersion::V5);

    let signer = Signer::load(
        &ctx,
        ConfigCredentialProvider::new(Arc::new(config)),
        builder,
    )
    .await?;

    let signed = signer.sign(&DuoRequest::new("GET", "/auth/v2/check")?)?;
    assert_eq!(signed.uri, "api-XXXXXXXX.duosecurity.com/auth/v2/check");
    assert!(signed.headers["Authorization"].starts_with("Basic "));
    Ok(())
}

#[tokio::test]
async fn test_empty_credential_is_rejected_at_load() {
    let ctx = env_context(&[
        ("IKEY", ""),
        ("SKEY", "1234567890abcdefghijklmnopqrstuvwxyz1234"),
        ("HOST", "api-XXXXXXXX.duosecurity.com"),
    ]);

    let err = Signer::load(&ctx, EnvCredentialProvider::new(), RequestSigner::new())
        .await
        .unwrap_err();
    assert_eq!(err.kind(), duosign_core::ErrorKind::ConfigInvalid);
    assert!(!err.to_string().contains("1234567890abcdefghijklmnopqrstuvwxyz1234"));
}
