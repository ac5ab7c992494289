use crate::config::settings::{Settings, ShareMode};
use crate::utils::error::{ContractError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    pub source: Option<SourceConfig>,
    pub parties: Option<PartiesConfig>,
    pub output: Option<OutputConfig>,
    pub share: Option<ShareConfig>,
    pub monitoring: Option<MonitoringConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourceConfig {
    pub base_url: Option<String>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PartiesConfig {
    pub contracting_id: Option<String>,
    pub contracted_id: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    pub path: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShareConfig {
    pub mode: Option<ShareMode>,
    pub directory: Option<String>,
    pub command: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MonitoringConfig {
    #[serde(default)]
    pub enabled: bool,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(|e| ContractError::ConfigError {
            message: format!("Cannot read {}: {}", path.as_ref().display(), e),
        })?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| ContractError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${RECORD_API})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| ContractError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// Lays the file's values over `base`; absent keys keep the base value.
    pub fn apply_to(&self, mut base: Settings) -> Settings {
        if let Some(source) = &self.source {
            if let Some(url) = &source.base_url {
                base.base_url = url.clone();
            }
            if let Some(timeout) = source.timeout_seconds {
                base.timeout_seconds = timeout;
            }
        }
        if let Some(parties) = &self.parties {
            if let Some(id) = &parties.contracting_id {
                base.contracting_id = id.clone();
            }
            if let Some(id) = &parties.contracted_id {
                base.contracted_id = id.clone();
            }
        }
        if let Some(path) = self.output.as_ref().and_then(|o| o.path.clone()) {
            base.output_path = path;
        }
        if let Some(share) = &self.share {
            if let Some(mode) = share.mode {
                base.share_mode = mode;
            }
            if share.directory.is_some() {
                base.share_dir = share.directory.clone();
            }
            if share.command.is_some() {
                base.share_command = share.command.clone();
            }
        }
        if let Some(monitoring) = &self.monitoring {
            base.monitor = monitoring.enabled;
        }
        base
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_toml_config() {
        let toml_content = r#"
[source]
base_url = "https://records.example.com/api"
timeout_seconds = 5

[parties]
contracting_id = "A1"
contracted_id = "B1"

[output]
path = "./contracts"

[share]
mode = "directory"
directory = "./outbox"

[monitoring]
enabled = true
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        let settings = config.apply_to(Settings::default());

        assert_eq!(settings.base_url, "https://records.example.com/api");
        assert_eq!(settings.timeout_seconds, 5);
        assert_eq!(settings.contracting_id, "A1");
        assert_eq!(settings.contracted_id, "B1");
        assert_eq!(settings.output_path, "./contracts");
        assert_eq!(settings.share_mode, ShareMode::Directory);
        assert_eq!(settings.share_dir.as_deref(), Some("./outbox"));
        assert!(settings.monitor);
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config = TomlConfig::from_toml_str("[parties]\ncontracted_id = \"B9\"\n").unwrap();
        let settings = config.apply_to(Settings::default());

        assert_eq!(settings.contracted_id, "B9");
        assert_eq!(settings.contracting_id, Settings::default().contracting_id);
        assert_eq!(settings.base_url, Settings::default().base_url);
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("CONTRACT_TEST_BASE_URL", "https://test.api.com");

        let config =
            TomlConfig::from_toml_str("[source]\nbase_url = \"${CONTRACT_TEST_BASE_URL}\"\n")
                .unwrap();
        assert_eq!(
            config.source.unwrap().base_url.as_deref(),
            Some("https://test.api.com")
        );

        std::env::remove_var("CONTRACT_TEST_BASE_URL");
    }

    #[test]
    fn test_empty_monitoring_table() {
        let config = TomlConfig::from_toml_str("[monitoring]\n").unwrap();
        let settings = config.apply_to(Settings::default());
        assert!(!settings.monitor);
    }

    #[test]
    fn test_unknown_table_rejected() {
        assert!(TomlConfig::from_toml_str("[pipeline]\nname = \"x\"\n").is_err());
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[share]\nmode = \"command\"\ncommand = \"xdg-open\"\n")
            .unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        let settings = config.apply_to(Settings::default());
        assert_eq!(settings.share_mode, ShareMode::Command);
        assert_eq!(settings.share_command.as_deref(), Some("xdg-open"));
    }
}
