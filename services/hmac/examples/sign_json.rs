//! Sign a JSON request read from stdin and print the signed result.
//!
//! ```shell
//! echo '{"method":"GET","path":"/auth/v2/check","parameters":{}}' \
//!     | IKEY=DI... SKEY=... HOST=api-xxxxxxxx.duosecurity.com cargo run --example sign_json
//! ```

use std::io::Read;

use duosign_core::{Context, OsEnv, Signer};
use duosign_hmac::{Config, ConfigCredentialProvider, DuoRequest, RequestSigner};
use log::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = env_logger::builder().try_init();

    let ctx = Context::new().with_env(OsEnv);
    let config = Config::new().from_env(&ctx);
    let builder = RequestSigner::from_config(&config);
    info!("signing with signature {}", builder.signature_version());

    let signer = Signer::load(&ctx, ConfigCredentialProvider::new(config.into()), builder).await?;

    let mut input = Vec::new();
    std::io::stdin().read_to_end(&mut input)?;

    let signed = match DuoRequest::from_slice(&input).and_then(|req| signer.sign(&req)) {
        Ok(signed) => signed,
        Err(err) => {
            error!("rejected request: {err}");
            println!("{}", serde_json::json!({ "message": err.to_string() }));
            return Ok(());
        }
    };

    println!("{}", signed.to_json()?);
    Ok(())
}
