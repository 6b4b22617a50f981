//! Secret resolution for source credentials.
//!
//! Credentials never live in configuration files; the config carries a
//! reference and a resolver turns it into the secret value at run time.

use async_trait::async_trait;

use super::SourceError;

/// Resolves a secret reference to its value.
#[async_trait]
pub trait SecretResolver: Send + Sync {
    async fn resolve(&self, reference: &str) -> Result<String, SourceError>;
}

/// Resolver that reads secrets from environment variables.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvSecretResolver;

#[async_trait]
impl SecretResolver for EnvSecretResolver {
    async fn resolve(&self, reference: &str) -> Result<String, SourceError> {
        std::env::var(reference)
            .map_err(|_| SourceError::Secret(format!("environment variable '{reference}' not set")))
    }
}
