use crate::domain::model::PartyKind;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ContractError {
    #[error("Validation error: {message}")]
    ValidationError { message: String },

    #[error("Failed to fetch {kind} record: {message}")]
    FetchError { kind: PartyKind, message: String },

    #[error("Timed out fetching {kind} record after {seconds}s")]
    TimeoutError { kind: PartyKind, seconds: u64 },

    #[error("Missing party data: {}", missing_labels(.missing))]
    MissingData { missing: Vec<PartyKind> },

    #[error("Document rendering failed: {message}")]
    RenderError { message: String },

    #[error("Share via {target} failed: {message}")]
    ShareError { target: String, message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },
}

fn missing_labels(missing: &[PartyKind]) -> String {
    missing
        .iter()
        .map(|k| k.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// 穩定的錯誤種類，不依賴錯誤訊息文字
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Validation,
    Fetch,
    MissingData,
    Render,
    Share,
    Config,
    Io,
}

impl ErrorKind {
    pub fn code(&self) -> &'static str {
        match self {
            ErrorKind::Validation => "E_VALIDATION",
            ErrorKind::Fetch => "E_FETCH",
            ErrorKind::MissingData => "E_MISSING_DATA",
            ErrorKind::Render => "E_RENDER",
            ErrorKind::Share => "E_SHARE",
            ErrorKind::Config => "E_CONFIG",
            ErrorKind::Io => "E_IO",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Network,
    Document,
    Platform,
    Configuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ContractError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ContractError::ValidationError { .. } => ErrorKind::Validation,
            ContractError::FetchError { .. } | ContractError::TimeoutError { .. } => {
                ErrorKind::Fetch
            }
            ContractError::MissingData { .. } => ErrorKind::MissingData,
            ContractError::RenderError { .. } => ErrorKind::Render,
            ContractError::ShareError { .. } => ErrorKind::Share,
            ContractError::IoError(_) => ErrorKind::Io,
            ContractError::ConfigError { .. }
            | ContractError::InvalidConfigValueError { .. }
            | ContractError::MissingConfigError { .. } => ErrorKind::Config,
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self.kind() {
            ErrorKind::Validation | ErrorKind::MissingData => ErrorCategory::Input,
            ErrorKind::Fetch => ErrorCategory::Network,
            ErrorKind::Render => ErrorCategory::Document,
            ErrorKind::Share | ErrorKind::Io => ErrorCategory::Platform,
            ErrorKind::Config => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.kind() {
            ErrorKind::Validation | ErrorKind::MissingData => ErrorSeverity::Medium,
            ErrorKind::Fetch | ErrorKind::Share => ErrorSeverity::Medium,
            ErrorKind::Render | ErrorKind::Config => ErrorSeverity::High,
            ErrorKind::Io => ErrorSeverity::Critical,
        }
    }

    /// 給使用者看的提示訊息
    pub fn user_friendly_message(&self) -> String {
        match self {
            ContractError::ValidationError { message } => {
                format!("Dados inválidos: {}", message)
            }
            ContractError::FetchError { kind, message } => {
                format!("Erro ao buscar dados do {}: {}", kind.label(), message)
            }
            ContractError::TimeoutError { kind, seconds } => format!(
                "Erro ao buscar dados do {}: sem resposta após {}s",
                kind.label(),
                seconds
            ),
            ContractError::MissingData { .. } => {
                "Nenhum dado disponível para gerar o PDF.".to_string()
            }
            ContractError::ShareError { message, .. } => {
                format!("Não foi possível compartilhar o PDF: {}", message)
            }
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.kind() {
            ErrorKind::Validation => "Provide a non-empty identifier for both parties",
            ErrorKind::Fetch => "Check that the record service is reachable and reload",
            ErrorKind::MissingData => "Fetch both parties before generating the document",
            ErrorKind::Render => "Check the output directory and available disk space",
            ErrorKind::Share => "Check the share target configuration",
            ErrorKind::Config => "Review the command line flags or the TOML config file",
            ErrorKind::Io => "Check file permissions on the output path",
        }
    }
}

impl From<reqwest::Error> for ContractError {
    fn from(err: reqwest::Error) -> Self {
        ContractError::ConfigError {
            message: format!("HTTP client error: {}", err),
        }
    }
}

pub type Result<T> = std::result::Result<T, ContractError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinds_are_stable() {
        let validation = ContractError::ValidationError {
            message: "empty".to_string(),
        };
        let fetch = ContractError::FetchError {
            kind: PartyKind::Contracting,
            message: "500".to_string(),
        };
        let timeout = ContractError::TimeoutError {
            kind: PartyKind::Contracted,
            seconds: 3,
        };
        let missing = ContractError::MissingData {
            missing: vec![PartyKind::Contracted],
        };

        assert_eq!(validation.kind(), ErrorKind::Validation);
        assert_eq!(fetch.kind(), ErrorKind::Fetch);
        assert_eq!(timeout.kind(), ErrorKind::Fetch);
        assert_eq!(missing.kind(), ErrorKind::MissingData);
        assert_eq!(missing.kind().code(), "E_MISSING_DATA");
    }

    #[test]
    fn test_user_friendly_messages() {
        let fetch = ContractError::FetchError {
            kind: PartyKind::Contracting,
            message: "connection refused".to_string(),
        };
        assert_eq!(
            fetch.user_friendly_message(),
            "Erro ao buscar dados do contratante: connection refused"
        );

        let missing = ContractError::MissingData {
            missing: vec![PartyKind::Contracting, PartyKind::Contracted],
        };
        assert_eq!(
            missing.to_string(),
            "Missing party data: contracting, contracted"
        );
    }
}
