use crate::adapters::{CommandShare, DirectoryShare};
use crate::core::{ConfigProvider, ShareTarget};
use crate::domain::model::PartyKind;
use crate::utils::error::{ContractError, Result};
use crate::utils::validation::{
    validate_identifier, validate_path, validate_range, validate_required_field, validate_url,
    Validate,
};
use serde::{Deserialize, Serialize};

pub const DEFAULT_BASE_URL: &str = "http://192.168.15.119:8000/api";
pub const DEFAULT_CONTRACTING_ID: &str = "9d48f5c9-7cd9-4a81-9e69-b0081ad1082a";
pub const DEFAULT_CONTRACTED_ID: &str = "9d48fc9d-8675-4501-ac2a-0230cf94ad33";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 10;
pub const DEFAULT_OUTPUT_PATH: &str = "./output";

/// How the finished document is dispatched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum ShareMode {
    #[default]
    None,
    Directory,
    Command,
}

/// Fully resolved configuration: command line over TOML over defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub base_url: String,
    pub contracting_id: String,
    pub contracted_id: String,
    pub timeout_seconds: u64,
    pub output_path: String,
    pub share_mode: ShareMode,
    pub share_dir: Option<String>,
    pub share_command: Option<String>,
    pub monitor: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            contracting_id: DEFAULT_CONTRACTING_ID.to_string(),
            contracted_id: DEFAULT_CONTRACTED_ID.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            output_path: DEFAULT_OUTPUT_PATH.to_string(),
            share_mode: ShareMode::None,
            share_dir: None,
            share_command: None,
            monitor: false,
        }
    }
}

impl Settings {
    /// Builds the configured share target, `None` when sharing is off.
    pub fn share_target(&self) -> Result<Option<Box<dyn ShareTarget>>> {
        match self.share_mode {
            ShareMode::None => Ok(None),
            ShareMode::Directory => {
                let dir = validate_required_field("share.directory", &self.share_dir)?;
                Ok(Some(Box::new(DirectoryShare::new(dir))))
            }
            ShareMode::Command => {
                let command = validate_required_field("share.command", &self.share_command)?;
                Ok(Some(Box::new(CommandShare::from_command_line(command)?)))
            }
        }
    }
}

impl ConfigProvider for Settings {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    fn identifier(&self, kind: PartyKind) -> Option<&str> {
        let id = match kind {
            PartyKind::Contracting => &self.contracting_id,
            PartyKind::Contracted => &self.contracted_id,
        };
        Some(id.as_str()).filter(|s| !s.trim().is_empty())
    }

    fn timeout_seconds(&self) -> u64 {
        self.timeout_seconds
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        validate_url("source.base_url", &self.base_url)?;
        validate_range("source.timeout_seconds", self.timeout_seconds, 1, 300)?;
        validate_path("output.path", &self.output_path)?;
        validate_identifier(PartyKind::Contracting, &self.contracting_id)?;
        validate_identifier(PartyKind::Contracted, &self.contracted_id)?;

        match self.share_mode {
            ShareMode::None => {}
            ShareMode::Directory => {
                let dir = validate_required_field("share.directory", &self.share_dir)?;
                validate_path("share.directory", dir)?;
            }
            ShareMode::Command => {
                let command = validate_required_field("share.command", &self.share_command)?;
                if command.trim().is_empty() {
                    return Err(ContractError::InvalidConfigValueError {
                        field: "share.command".to_string(),
                        value: command.clone(),
                        reason: "Command cannot be empty".to_string(),
                    });
                }
            }
        }
        Ok(())
    }
}
