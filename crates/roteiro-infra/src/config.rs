//! Client configuration loader for roteiro.
//!
//! Reads `config.toml` from the data directory (`~/.roteiro/` in production)
//! and deserializes it into [`ClientConfig`]. Falls back to defaults when the
//! file is missing or malformed, then applies environment overrides.

use std::path::Path;

use roteiro_types::config::ClientConfig;

/// Environment variable overriding `base_url`.
pub const BASE_URL_ENV: &str = "ROTEIRO_BASE_URL";

/// Name of the configuration file inside the data directory.
pub const CONFIG_FILE: &str = "config.toml";

/// Load client configuration from `{data_dir}/config.toml`.
///
/// - If the file does not exist, returns [`ClientConfig::default()`].
/// - If the file exists but fails to parse, logs a warning and returns the default.
/// - `ROTEIRO_BASE_URL`, when set and non-empty, replaces `base_url`.
pub async fn load_client_config(data_dir: &Path) -> ClientConfig {
    let config = read_config_file(data_dir).await;
    apply_env_overrides(config, std::env::var(BASE_URL_ENV).ok())
}

async fn read_config_file(data_dir: &Path) -> ClientConfig {
    let config_path = data_dir.join(CONFIG_FILE);

    let content = match tokio::fs::read_to_string(&config_path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config.toml found at {}, using defaults", config_path.display());
            return ClientConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", config_path.display());
            return ClientConfig::default();
        }
    };

    match toml::from_str::<ClientConfig>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(
                "Failed to parse {}: {err}, using defaults",
                config_path.display()
            );
            ClientConfig::default()
        }
    }
}

fn apply_env_overrides(mut config: ClientConfig, base_url: Option<String>) -> ClientConfig {
    if let Some(url) = base_url.filter(|u| !u.trim().is_empty()) {
        tracing::debug!(base_url = %url, "Using base URL from {BASE_URL_ENV}");
        config.base_url = url;
    }
    config
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn read_config_missing_file_returns_default() {
        let tmp = TempDir::new().unwrap();
        let config = read_config_file(tmp.path()).await;
        assert_eq!(config, ClientConfig::default());
    }

    #[tokio::test]
    async fn read_config_valid_toml_returns_parsed() {
        let tmp = TempDir::new().unwrap();
        tokio::fs::write(
            tmp.path().join(CONFIG_FILE),
            r#"
base_url = "https://roteiro.example.org"
quick_prompts = ["Como tomar a PQT-U?"]
"#,
        )
        .await
        .unwrap();

        let config = read_config_file(tmp.path()).await;
        assert_eq!(config.base_url, "https://roteiro.example.org");
        assert_eq!(config.quick_prompts, vec!["Como tomar a PQT-U?".to_string()]);
        assert_eq!(config.banner_dismiss_ms, 5_000);
    }

    #[tokio::test]
    async fn read_config_invalid_toml_returns_default() {
        let tmp = TempDir::new().unwrap();
        tokio::fs::write(tmp.path().join(CONFIG_FILE), "this is not { valid toml !!!")
            .await
            .unwrap();

        let config = read_config_file(tmp.path()).await;
        assert_eq!(config, ClientConfig::default());
    }

    #[test]
    fn env_override_replaces_base_url() {
        let config = apply_env_overrides(
            ClientConfig::default(),
            Some("http://10.0.0.5:8080".to_string()),
        );
        assert_eq!(config.base_url, "http://10.0.0.5:8080");
    }

    #[test]
    fn blank_env_override_is_ignored() {
        let config = apply_env_overrides(ClientConfig::default(), Some("  ".to_string()));
        assert_eq!(config.base_url, "http://127.0.0.1:5000");
        let config = apply_env_overrides(ClientConfig::default(), None);
        assert_eq!(config.base_url, "http://127.0.0.1:5000");
    }
}
