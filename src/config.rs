use std::path::PathBuf;

use figment::providers::{Env, Format, Toml};
use figment::Figment;
use serde::Deserialize;

/// Connection settings for the board API
#[derive(Deserialize, Debug, Clone)]
pub struct Config {
    /// Root of the REST API, e.g. `https://board.example/v1/cohort-42`
    pub api_base_url: String,
    /// Sent verbatim in the `authorization` header
    pub token: String,
    /// HTTP client timeout; unset means the client never gives up
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

impl Config {
    /// Load layered configuration: user config dir, then `./config.toml`,
    /// then `BOARD_*` environment variables (last one wins).
    pub fn load() -> Result<Self, figment::Error> {
        let mut figment = Figment::new();
        if let Some(path) = Self::user_config_path() {
            figment = figment.merge(Toml::file(path));
        }

        figment
            .merge(Toml::file("config.toml"))
            .merge(Env::prefixed("BOARD_"))
            .extract()
    }

    /// `~/.config/photo-board/config.toml` on Linux
    fn user_config_path() -> Option<PathBuf> {
        let mut path = dirs::config_dir()?;
        path.push("photo-board");
        path.push("config.toml");
        Some(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toml_and_env_layering() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                "config.toml",
                r#"
                    api_base_url = "https://board.example/v1"
                    token = "from-file"
                "#,
            )?;
            jail.set_env("BOARD_TOKEN", "from-env");

            let config: Config = Figment::new()
                .merge(Toml::file("config.toml"))
                .merge(Env::prefixed("BOARD_"))
                .extract()?;

            assert_eq!(config.api_base_url, "https://board.example/v1");
            assert_eq!(config.token, "from-env");
            assert_eq!(config.request_timeout_secs, None);
            Ok(())
        });
    }

    #[test]
    fn test_missing_token_is_an_error() {
        figment::Jail::expect_with(|jail| {
            jail.create_file("config.toml", r#"api_base_url = "https://x""#)?;

            let result: Result<Config, _> = Figment::new()
                .merge(Toml::file("config.toml"))
                .extract();

            assert!(result.is_err());
            Ok(())
        });
    }
}
