use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs as async_fs;
use tracing::{debug, info};

use crate::common::error::AreteError;
use crate::common::result::{AreteResult, ResultExt};
use crate::domain::entities::settings::{Settings, CONFIG_FILE_NAME, SOLUTIONS_FILE_NAME};

/// Reads and bootstraps `<config_dir>/config.yaml`
#[derive(Debug, Clone)]
pub struct ConfigStore {
    config_dir: PathBuf,
}

impl ConfigStore {
    pub fn new(config_dir: impl Into<PathBuf>) -> Self {
        Self {
            config_dir: config_dir.into(),
        }
    }

    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join(CONFIG_FILE_NAME)
    }

    /// Make sure the config directory, `config.yaml` and `solutions.yaml` exist,
    /// then load the settings.
    pub async fn bootstrap(&self) -> AreteResult<Settings> {
        async_fs::create_dir_all(&self.config_dir)
            .await
            .with_config_error("Failed to create config directory", Some(self.config_dir.clone()))?;

        let config_file = self.config_file();
        if !path_exists(&config_file).await? {
            info!(path = %config_file.display(), "writing default configuration");
            let defaults = Settings::with_cache_dir(&self.config_dir);
            self.save(&defaults).await?;
        }

        let solutions_file = self.config_dir.join(SOLUTIONS_FILE_NAME);
        if !path_exists(&solutions_file).await? {
            debug!(path = %solutions_file.display(), "creating empty solutions cache");
            async_fs::write(&solutions_file, "")
                .await
                .with_cache_error("Failed to create solutions cache", &solutions_file)?;
        }

        self.load().await
    }

    /// Load `config.yaml`. Missing keys take their default values.
    pub async fn load(&self) -> AreteResult<Settings> {
        let config_file = self.config_file();
        let content = async_fs::read_to_string(&config_file)
            .await
            .with_config_error("Failed to read configuration", Some(config_file.clone()))?;

        let mut settings: Settings = if content.trim().is_empty() {
            Settings::with_cache_dir(&self.config_dir)
        } else {
            serde_yaml::from_str(&content)
                .with_config_error("Invalid configuration", Some(config_file.clone()))?
        };

        if settings.cache.as_os_str().is_empty() {
            settings.cache = self.config_dir.clone();
        }
        validate_timeouts(&settings)?;

        debug!(path = %config_file.display(), cache = %settings.cache.display(), "configuration loaded");
        Ok(settings)
    }

    /// Write `settings` to `config.yaml`
    pub async fn save(&self, settings: &Settings) -> AreteResult<()> {
        let config_file = self.config_file();
        let yaml = serde_yaml::to_string(settings)
            .with_config_error("Failed to serialize configuration", Some(config_file.clone()))?;

        async_fs::write(&config_file, yaml)
            .await
            .with_config_error("Failed to write configuration", Some(config_file))
    }
}

fn validate_timeouts(settings: &Settings) -> AreteResult<()> {
    for (field, secs) in [
        ("fetchTimeoutSecs", settings.fetch_timeout_secs),
        ("pullTimeoutSecs", settings.pull_timeout_secs),
    ] {
        if secs == 0 {
            return Err(AreteError::validation_error(
                field,
                "timeout must be greater than zero",
                Some(secs.to_string()),
            ));
        }
    }
    Ok(())
}

async fn path_exists(path: &Path) -> AreteResult<bool> {
    match async_fs::metadata(path).await {
        Ok(_) => Ok(true),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
        Err(e) => Err(AreteError::config_error_with_source(
            "Failed to inspect configuration path",
            Some(path.to_path_buf()),
            e,
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::settings::DEFAULT_REPO_URL;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_bootstrap_creates_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config_dir = temp_dir.path().join(".arete");
        let store = ConfigStore::new(&config_dir);

        let settings = store.bootstrap().await.unwrap();

        assert_eq!(settings.cache, config_dir);
        assert_eq!(settings.repo_url, DEFAULT_REPO_URL);
        assert!(config_dir.join("config.yaml").exists());
        assert_eq!(
            std::fs::read_to_string(config_dir.join("solutions.yaml")).unwrap(),
            ""
        );
    }

    #[tokio::test]
    async fn test_bootstrap_keeps_existing_files() {
        let temp_dir = TempDir::new().unwrap();
        let store = ConfigStore::new(temp_dir.path());
        std::fs::write(
            store.config_file(),
            "repoUrl: https://github.com/acme/widgets\nrepoSubFolder: /\n",
        )
        .unwrap();
        std::fs::write(temp_dir.path().join("solutions.yaml"), "solutions: []\n").unwrap();

        let settings = store.bootstrap().await.unwrap();

        assert_eq!(settings.repo_url, "https://github.com/acme/widgets");
        assert_eq!(settings.repo_sub_folder, "/");
        assert_eq!(settings.cache, temp_dir.path());
        assert_eq!(
            std::fs::read_to_string(temp_dir.path().join("solutions.yaml")).unwrap(),
            "solutions: []\n"
        );
    }

    #[tokio::test]
    async fn test_missing_cache_key_uses_config_dir() {
        let temp_dir = TempDir::new().unwrap();
        let store = ConfigStore::new(temp_dir.path());
        std::fs::write(store.config_file(), "repoBranch: dev\n").unwrap();

        let settings = store.bootstrap().await.unwrap();

        assert_eq!(settings.cache, temp_dir.path());
        assert_eq!(settings.solutions_file(), temp_dir.path().join("solutions.yaml"));
        assert_eq!(settings.repo_branch, "dev");
    }

    #[tokio::test]
    async fn test_zero_timeouts_are_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let store = ConfigStore::new(temp_dir.path());

        for (yaml, expected) in [
            ("fetchTimeoutSecs: 0\n", "fetchTimeoutSecs"),
            ("pullTimeoutSecs: 0\n", "pullTimeoutSecs"),
        ] {
            std::fs::write(store.config_file(), yaml).unwrap();

            match store.load().await {
                Err(AreteError::ValidationError { field, value, .. }) => {
                    assert_eq!(field, expected);
                    assert_eq!(value.as_deref(), Some("0"));
                }
                other => panic!("Expected ValidationError, got {:?}", other),
            }
        }
    }

    #[tokio::test]
    async fn test_malformed_config_is_config_error() {
        let temp_dir = TempDir::new().unwrap();
        let store = ConfigStore::new(temp_dir.path());
        std::fs::write(store.config_file(), "repoUrl: [unterminated").unwrap();

        let result = store.bootstrap().await;

        match result {
            Err(AreteError::ConfigError { path: Some(p), .. }) => {
                assert_eq!(p, store.config_file())
            }
            other => panic!("Expected ConfigError, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_save_then_load() {
        let temp_dir = TempDir::new().unwrap();
        let store = ConfigStore::new(temp_dir.path());
        let settings = Settings::with_cache_dir(temp_dir.path())
            .with_repo("https://github.com/acme/widgets", "dev", "infra")
            .with_git_token("ghp_abc");

        store.save(&settings).await.unwrap();

        assert_eq!(store.load().await.unwrap(), settings);
    }
}
