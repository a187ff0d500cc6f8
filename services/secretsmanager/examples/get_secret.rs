//! Fetch a secret with credentials and region from the environment.
//!
//! ```shell
//! AWS_REGION=us-east-1 AWS_ACCESS_KEY_ID=... AWS_SECRET_ACCESS_KEY=... \
//!     cargo run --example get_secret -- my-secret
//! ```

use secretsign_aws_v4::Config;
use secretsign_core::{Context, OsEnv};
use secretsign_http_send_reqwest::ReqwestHttpSend;
use secretsign_secretsmanager::SecretsManagerClient;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let secret_id = std::env::args()
        .nth(1)
        .ok_or_else(|| anyhow::anyhow!("usage: get_secret <secret-id>"))?;

    let ctx = Context::new()
        .with_http_send(ReqwestHttpSend::default())
        .with_env(OsEnv);
    let client = SecretsManagerClient::from_config(ctx, Config::default())?;

    match client.get_secret(&secret_id).await {
        Ok(secret) => {
            println!("ARN:            {}", secret.arn);
            println!("Name:           {}", secret.name);
            println!("Version:        {}", secret.version_id);
            println!("Stages:         {:?}", secret.version_stages);
            println!("Created:        {:?}", secret.created_date);
            println!("Has string:     {}", secret.secret_string.is_some());
        }
        Err(err) if err.is_credential_error() => {
            eprintln!("credentials are missing or invalid: {err}");
        }
        Err(err) => {
            eprintln!("failed to get secret (status {:?}): {err}", err.status());
            return Err(err.into());
        }
    }

    Ok(())
}
