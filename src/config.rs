use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{ReleaseError, Result};

const CONFIG_FILE: &str = "ghrelease.toml";
const USER_CONFIG_FILE: &str = ".ghrelease.toml";

/// Represents the complete configuration for gh-release.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub github: GitHubConfig,

    #[serde(default)]
    pub prerelease: PrereleaseConfig,

    #[serde(default)]
    pub remote: RemoteConfig,
}

/// Returns the default environment variables consulted for a token.
fn default_token_env() -> Vec<String> {
    vec!["GITHUB_TOKEN".to_string(), "GH_TOKEN".to_string()]
}

/// Where the API token comes from when none is passed explicitly.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct GitHubConfig {
    #[serde(default = "default_token_env")]
    pub token_env: Vec<String>,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        GitHubConfig {
            token_env: default_token_env(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct PrereleaseConfig {
    /// Delete and recreate a pre-release whose tag already exists
    #[serde(default)]
    pub force: bool,
}

/// Overrides for the coordinate detected from `.git/config`.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct RemoteConfig {
    #[serde(default)]
    pub owner: Option<String>,

    #[serde(default)]
    pub repo: Option<String>,
}

impl Config {
    /// Picks the API token.
    ///
    /// An explicit non-empty value wins, then the first non-empty variable in
    /// `github.token_env`. Returns an empty string when nothing is set, which
    /// the version lookup treats as "disabled".
    pub fn resolve_token(&self, explicit: Option<&str>) -> String {
        if let Some(token) = explicit.filter(|t| !t.is_empty()) {
            return token.to_string();
        }
        self.github
            .token_env
            .iter()
            .filter_map(|name| std::env::var(name).ok())
            .find(|value| !value.is_empty())
            .unwrap_or_default()
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `ghrelease.toml` in current directory
/// 3. `.ghrelease.toml` in the user config directory
/// 4. Default configuration if no file found
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    let config_str = if let Some(path) = config_path {
        fs::read_to_string(path)?
    } else if Path::new(CONFIG_FILE).exists() {
        fs::read_to_string(CONFIG_FILE)?
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join(USER_CONFIG_FILE);
        if config_path.exists() {
            fs::read_to_string(config_path)?
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    parse_config(&config_str)
}

/// Parses configuration text in TOML form.
pub fn parse_config(text: &str) -> Result<Config> {
    toml::from_str(text).map_err(|e| ReleaseError::config(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.github.token_env, vec!["GITHUB_TOKEN", "GH_TOKEN"]);
        assert!(!config.prerelease.force);
        assert_eq!(config.remote, RemoteConfig::default());
    }

    #[test]
    fn test_parse_empty_uses_defaults() {
        assert_eq!(parse_config("").unwrap(), Config::default());
    }

    #[test]
    fn test_parse_partial() {
        let config = parse_config(
            r#"
[prerelease]
force = true

[remote]
owner = "alice"
"#,
        )
        .unwrap();
        assert!(config.prerelease.force);
        assert_eq!(config.remote.owner.as_deref(), Some("alice"));
        assert_eq!(config.remote.repo, None);
        assert_eq!(config.github, GitHubConfig::default());
    }

    #[test]
    fn test_parse_invalid() {
        let err = parse_config("[prerelease]\nforce = \"yes\"\n").unwrap_err();
        assert!(matches!(err, ReleaseError::Config(_)));
    }

    #[test]
    fn test_resolve_token_explicit_wins() {
        let config = Config {
            github: GitHubConfig {
                token_env: vec!["GH_RELEASE_TEST_UNSET_VARIABLE".to_string()],
            },
            ..Config::default()
        };
        assert_eq!(config.resolve_token(Some("abc")), "abc");
        assert_eq!(config.resolve_token(Some("")), "");
        assert_eq!(config.resolve_token(None), "");
    }
}
