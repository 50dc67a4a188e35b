use crate::error::{ConsoleError, Result};
use crate::merge::ImportMode;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Name of the project configuration file.
pub const CONFIG_FILE: &str = ".seller.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConsoleConfig {
    #[serde(default)]
    pub console: ConsoleSettings,

    #[serde(default)]
    pub source: SourceSettings,

    #[serde(default)]
    pub store: StoreSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsoleSettings {
    #[serde(default = "default_opportunity_prefix")]
    pub opportunity_prefix: String,

    #[serde(default = "default_id_length")]
    pub id_length: usize,

    #[serde(default)]
    pub import_mode: ImportMode,

    /// Simulated latency before a save or convert is applied.
    #[serde(default)]
    pub mutation_delay_ms: u64,
}

fn default_opportunity_prefix() -> String {
    "opp-".to_string()
}

fn default_id_length() -> usize {
    8
}

impl Default for ConsoleSettings {
    fn default() -> Self {
        Self {
            opportunity_prefix: default_opportunity_prefix(),
            id_length: default_id_length(),
            import_mode: ImportMode::default(),
            mutation_delay_ms: 0,
        }
    }
}

impl ConsoleSettings {
    pub fn mutation_delay(&self) -> Duration {
        Duration::from_millis(self.mutation_delay_ms)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceSettings {
    /// Lead fixture, relative to the project root. Ignored when `url` is set.
    #[serde(default = "default_fixture")]
    pub fixture: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(default = "default_delay_ms")]
    pub delay_ms: u64,
}

fn default_fixture() -> String {
    "leads.json".to_string()
}

fn default_delay_ms() -> u64 {
    500
}

impl Default for SourceSettings {
    fn default() -> Self {
        Self {
            fixture: default_fixture(),
            url: None,
            delay_ms: default_delay_ms(),
        }
    }
}

impl SourceSettings {
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }

    pub fn parsed_url(&self) -> Result<Option<url::Url>> {
        self.url
            .as_deref()
            .map(|raw| {
                url::Url::parse(raw)
                    .map_err(|e| ConsoleError::Config(format!("Invalid source url '{}': {}", raw, e)))
            })
            .transpose()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreSettings {
    /// Directory for persisted values, relative to the project root.
    /// Defaults to the per-user profile data directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl ConsoleConfig {
    pub fn load(start_path: &Path) -> Result<(Self, PathBuf)> {
        let config_path = Self::find_config_file(start_path)?;
        Self::load_file(&config_path)
    }

    /// Load an explicit config file; the project root is its parent directory.
    pub fn load_file(config_path: &Path) -> Result<(Self, PathBuf)> {
        if !config_path.exists() {
            return Err(ConsoleError::Config(format!(
                "Config file not found: {}",
                config_path.display()
            )));
        }
        let content = std::fs::read_to_string(config_path)?;
        let config: ConsoleConfig = toml::from_str(&content)?;
        config.source.parsed_url()?;
        let project_root = config_path
            .parent()
            .ok_or_else(|| ConsoleError::Config("Config file has no parent directory".to_string()))?
            .to_path_buf();
        Ok((config, project_root))
    }

    pub fn find_config_file(start_path: &Path) -> Result<PathBuf> {
        let mut current = start_path.to_path_buf();
        loop {
            let config_path = current.join(CONFIG_FILE);
            if config_path.exists() {
                return Ok(config_path);
            }
            if !current.pop() {
                return Err(ConsoleError::NotInitialized);
            }
        }
    }

    pub fn fixture_path(&self, project_root: &Path) -> PathBuf {
        project_root.join(&self.source.fixture)
    }

    pub fn store_path(&self, project_root: &Path) -> Result<PathBuf> {
        if let Some(ref path) = self.store.path {
            return Ok(project_root.join(path));
        }
        directories::ProjectDirs::from("", "", "seller-console")
            .map(|dirs| dirs.data_dir().join("store"))
            .ok_or_else(|| {
                ConsoleError::Config(
                    "No home directory found; set [store] path in .seller.toml".to_string(),
                )
            })
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_from_empty_file() {
        let config: ConsoleConfig = toml::from_str("").unwrap();
        assert_eq!(config.console.opportunity_prefix, "opp-");
        assert_eq!(config.console.import_mode, ImportMode::Merge);
        assert_eq!(config.source.fixture, "leads.json");
        assert_eq!(config.source.delay_ms, 500);
        assert!(config.store.path.is_none());
    }

    #[test]
    fn test_find_config_walks_up() {
        let temp_dir = TempDir::new().unwrap();
        ConsoleConfig::default()
            .save(&temp_dir.path().join(CONFIG_FILE))
            .unwrap();
        let nested = temp_dir.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();

        let (_, root) = ConsoleConfig::load(&nested).unwrap();
        assert_eq!(root, temp_dir.path());
    }

    #[test]
    fn test_missing_config_is_not_initialized() {
        let temp_dir = TempDir::new().unwrap();
        let err = ConsoleConfig::find_config_file(temp_dir.path()).unwrap_err();
        assert!(matches!(err, ConsoleError::NotInitialized));
    }

    #[test]
    fn test_invalid_url_rejected_at_load() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(CONFIG_FILE);
        std::fs::write(&path, "[source]\nurl = \"not a url\"\n").unwrap();

        let err = ConsoleConfig::load_file(&path).unwrap_err();
        assert!(matches!(err, ConsoleError::Config(_)));
    }

    #[test]
    fn test_store_path_relative_to_root() {
        let mut config = ConsoleConfig::default();
        config.store.path = Some(".seller/store".to_string());
        let root = Path::new("/tmp/project");
        assert_eq!(
            config.store_path(root).unwrap(),
            root.join(".seller/store")
        );
    }
}
