//! Configuration types for the dyndns system
//!
//! Configuration is read once per invocation from a TOML file and never
//! mutated afterwards.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Which flavor of public address the IP-echo service should report.
///
/// `Auto` leaves the choice to the service itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Protocol {
    /// IPv4 only
    Ipv4,
    /// IPv6 only
    Ipv6,
    /// Let the echo service decide
    Auto,
}

/// Invocation configuration
///
/// Required keys: `email`, `api_key`, `domain`, `record_name`, `ttl`,
/// `protocol`. A non-empty `auth_token` switches the updater into push mode,
/// where the address comes from the request parameters instead of the echo
/// service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Provider account email
    pub email: String,

    /// Provider API key
    pub api_key: String,

    /// Domain whose zone holds the managed record
    pub domain: String,

    /// Fully qualified name of the managed record
    pub record_name: String,

    /// Desired TTL for the managed record, in seconds
    pub ttl: u32,

    /// Address flavor requested from the IP-echo service
    pub protocol: Protocol,

    /// Shared secret enabling push mode when non-empty
    #[serde(default)]
    pub auth_token: Option<String>,

    /// Where the last published address is cached
    #[serde(default = "default_cache_file")]
    pub cache_file: PathBuf,
}

fn default_cache_file() -> PathBuf {
    PathBuf::from("ip4.cache")
}

impl Config {
    /// Load and validate configuration from a TOML file
    pub fn load(path: &Path) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            crate::Error::config(format!(
                "failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| {
            crate::Error::config(format!(
                "failed to parse config file {}: {}",
                path.display(),
                e
            ))
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    ///
    /// Missing keys are caught by deserialization; this rejects values that
    /// are present but empty.
    pub fn validate(&self) -> crate::Result<()> {
        for (key, value) in [
            ("email", &self.email),
            ("api_key", &self.api_key),
            ("domain", &self.domain),
            ("record_name", &self.record_name),
        ] {
            if value.trim().is_empty() {
                return Err(crate::Error::config(format!(
                    "the '{key}' config value must not be empty"
                )));
            }
        }

        if self.ttl == 0 {
            return Err(crate::Error::config("'ttl' must be greater than zero"));
        }

        Ok(())
    }

    /// The shared secret, if push mode is enabled
    ///
    /// An empty `auth_token` counts as absent.
    pub fn push_secret(&self) -> Option<&str> {
        self.auth_token.as_deref().filter(|t| !t.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(toml_str: &str) -> Result<Config, toml::de::Error> {
        toml::from_str(toml_str)
    }

    #[test]
    fn parses_full_config() {
        let config = parse(
            r#"
email = "admin@example.com"
api_key = "k-123"
domain = "example.com"
record_name = "home.example.com"
ttl = 120
protocol = "ipv4"
auth_token = "s3cret"
cache_file = "/var/lib/dyndns/ip4.cache"
"#,
        )
        .unwrap();

        assert_eq!(config.email, "admin@example.com");
        assert_eq!(config.protocol, Protocol::Ipv4);
        assert_eq!(config.push_secret(), Some("s3cret"));
        assert_eq!(config.cache_file, PathBuf::from("/var/lib/dyndns/ip4.cache"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn missing_key_is_rejected() {
        let err = parse(
            r#"
email = "admin@example.com"
domain = "example.com"
record_name = "home.example.com"
ttl = 120
protocol = "auto"
"#,
        )
        .unwrap_err();

        assert!(err.to_string().contains("api_key"), "got: {err}");
    }

    #[test]
    fn unknown_protocol_is_rejected() {
        let err = parse(
            r#"
email = "admin@example.com"
api_key = "k-123"
domain = "example.com"
record_name = "home.example.com"
ttl = 120
protocol = "carrier-pigeon"
"#,
        )
        .unwrap_err();

        assert!(err.to_string().contains("protocol"), "got: {err}");
    }

    #[test]
    fn empty_required_value_fails_validation() {
        let config = parse(
            r#"
email = ""
api_key = "k-123"
domain = "example.com"
record_name = "home.example.com"
ttl = 120
protocol = "ipv4"
"#,
        )
        .unwrap();

        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("email"), "got: {err}");
    }

    #[test]
    fn empty_auth_token_disables_push_mode() {
        let config = parse(
            r#"
email = "admin@example.com"
api_key = "k-123"
domain = "example.com"
record_name = "home.example.com"
ttl = 120
protocol = "ipv4"
auth_token = ""
"#,
        )
        .unwrap();

        assert_eq!(config.push_secret(), None);
    }

    #[test]
    fn cache_file_defaults() {
        let config = parse(
            r#"
email = "admin@example.com"
api_key = "k-123"
domain = "example.com"
record_name = "home.example.com"
ttl = 120
protocol = "auto"
"#,
        )
        .unwrap();

        assert_eq!(config.cache_file, PathBuf::from("ip4.cache"));
    }
}
