//! Example of using custom credential provider chain

use secretsign_aws_v4::{
    Config, ConfigCredentialProvider, Credential, EnvCredentialProvider, ProvideCredentialChain,
};
use secretsign_core::{Context, OsEnv, ProvideCredential};

/// A custom credential provider that always returns a fixed credential
#[derive(Debug)]
struct CustomCredentialProvider {
    access_key: String,
    secret_key: String,
}

#[async_trait::async_trait]
impl ProvideCredential for CustomCredentialProvider {
    type Credential = Credential;

    async fn provide_credential(
        &self,
        _ctx: &Context,
    ) -> secretsign_core::Result<Option<Self::Credential>> {
        println!("Loading credential from custom provider");
        Ok(Some(Credential::new(&self.access_key, &self.secret_key)))
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let ctx = Context::new().with_env(OsEnv);
    let config = Config::default().from_env(&ctx);

    // Config first, then env, then a fixed fallback.
    let chain = ProvideCredentialChain::new()
        .push(ConfigCredentialProvider::new(config))
        .push(EnvCredentialProvider::new())
        .push(CustomCredentialProvider {
            access_key: "custom_key".to_string(),
            secret_key: "custom_secret".to_string(),
        });

    match chain.provide_credential(&ctx).await? {
        Some(cred) => println!("Found credential: {cred:?}"),
        None => println!("No credential found"),
    }

    Ok(())
}
