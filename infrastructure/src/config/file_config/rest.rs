//! REST transport configuration from TOML (`[rest]` section)

use serde::{Deserialize, Serialize};

/// Raw REST configuration from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileRestConfig {
    /// Base URL of the protocol's REST API.
    pub base_url: String,
    /// Environment variable holding the bot token (default: "DISCORD_TOKEN").
    pub token_env: String,
    /// Default request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for FileRestConfig {
    fn default() -> Self {
        Self {
            base_url: "https://discord.com/api/v10".to_string(),
            token_env: "DISCORD_TOKEN".to_string(),
            timeout_secs: 10,
        }
    }
}

impl FileRestConfig {
    /// Read the bot token from the configured environment variable.
    pub fn token(&self) -> Option<String> {
        std::env::var(&self.token_env)
            .ok()
            .filter(|token| !token.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rest_section_deserialize() {
        let toml_str = r#"
[rest]
base_url = "http://localhost:8080/api"
timeout_secs = 3
"#;
        let config: super::super::FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.rest.base_url, "http://localhost:8080/api");
        assert_eq!(config.rest.timeout_secs, 3);
        assert_eq!(config.rest.token_env, "DISCORD_TOKEN");
    }

    #[test]
    fn test_token_missing_env_var() {
        let config = FileRestConfig {
            token_env: "RELAY_TEST_TOKEN_THAT_IS_NEVER_SET".to_string(),
            ..FileRestConfig::default()
        };
        assert!(config.token().is_none());
    }
}
