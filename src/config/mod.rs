pub mod cli;
pub mod settings;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use settings::{Settings, ShareMode};
#[cfg(feature = "cli")]
use toml_config::TomlConfig;

/// Command line flags. Anything left unset falls back to the TOML file, then
/// to the built-in defaults.
#[cfg(feature = "cli")]
#[derive(Debug, Clone, Default, Parser)]
#[command(name = "contract-assembler")]
#[command(about = "Fetch two party records and generate a shareable service contract PDF")]
pub struct CliConfig {
    #[arg(long, help = "TOML configuration file")]
    pub config: Option<String>,

    #[arg(long, help = "Record service base URL, e.g. http://host:8000/api")]
    pub base_url: Option<String>,

    #[arg(long, help = "Identifier of the contracting party (/cli/{id})")]
    pub contracting_id: Option<String>,

    #[arg(long, help = "Identifier of the contracted party (/pro/{id})")]
    pub contracted_id: Option<String>,

    #[arg(long, help = "Per-request timeout in seconds")]
    pub timeout_seconds: Option<u64>,

    #[arg(long, help = "Directory the PDF and HTML are written to")]
    pub output_path: Option<String>,

    #[arg(long, value_enum)]
    pub share: Option<ShareMode>,

    #[arg(long, help = "Outbox directory for --share directory")]
    pub share_dir: Option<String>,

    #[arg(long, help = "Program for --share command; the PDF path is appended")]
    pub share_command: Option<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub json_logs: bool,

    #[arg(long, help = "Log CPU and memory usage per phase")]
    pub monitor: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    pub fn resolve(&self) -> Result<Settings> {
        let base = match &self.config {
            Some(path) => {
                tracing::debug!("Loading configuration from {}", path);
                TomlConfig::from_file(path)?.apply_to(Settings::default())
            }
            None => Settings::default(),
        };
        Ok(self.apply_to(base))
    }

    fn apply_to(&self, mut settings: Settings) -> Settings {
        if let Some(url) = &self.base_url {
            settings.base_url = url.clone();
        }
        if let Some(id) = &self.contracting_id {
            settings.contracting_id = id.clone();
        }
        if let Some(id) = &self.contracted_id {
            settings.contracted_id = id.clone();
        }
        if let Some(timeout) = self.timeout_seconds {
            settings.timeout_seconds = timeout;
        }
        if let Some(path) = &self.output_path {
            settings.output_path = path.clone();
        }
        if let Some(mode) = self.share {
            settings.share_mode = mode;
        }
        if self.share_dir.is_some() {
            settings.share_dir = self.share_dir.clone();
        }
        if self.share_command.is_some() {
            settings.share_command = self.share_command.clone();
        }
        settings.monitor |= self.monitor;
        settings
    }
}
