//! Address resolution
//!
//! Decides which address this invocation should publish. With a configured
//! shared secret the updater runs in push mode and the address arrives as a
//! request parameter; otherwise it runs in pull mode and asks the IP-echo
//! service. Push-mode requests are rejected before anything talks to the
//! provider.

use tracing::info;

use crate::config::Config;
use crate::traits::IpSource;
use crate::{Error, Result};

/// Request parameters accompanying a push-mode invocation
///
/// In the original deployment these arrive as query parameters; the CLI
/// maps them from flags.
#[derive(Debug, Clone, Default)]
pub struct PushParams {
    /// Caller-supplied shared secret
    pub auth_token: Option<String>,
    /// Address the caller wants published
    pub ip: Option<String>,
}

impl PushParams {
    fn token(&self) -> Option<&str> {
        self.auth_token.as_deref().filter(|t| !t.trim().is_empty())
    }

    fn address(&self) -> Option<&str> {
        self.ip.as_deref().filter(|ip| !ip.trim().is_empty())
    }
}

/// Resolve the address to publish for this invocation
///
/// The result is trimmed but not otherwise validated; a bad address fails
/// later at the provider or succeeds idempotently.
pub async fn resolve_address(
    config: &Config,
    push: &PushParams,
    source: &dyn IpSource,
) -> Result<String> {
    if let Some(secret) = config.push_secret() {
        // Push mode. Use the address from the request parameters.
        match push.token() {
            Some(token) if token == secret => {}
            Some(_) => return Err(Error::auth("'auth_token' does not match")),
            None => return Err(Error::auth("'auth_token' parameter is required")),
        }

        let address = push
            .address()
            .ok_or_else(|| Error::missing_parameter("ip"))?;

        Ok(address.trim().to_string())
    } else {
        // Local mode. Ask the echo service.
        info!("local mode, querying the IP echo service");
        let address = source.lookup().await?;
        info!("service reports address {}", address);
        Ok(address)
    }
}
