use crate::core::ShareTarget;
use crate::domain::model::{Document, ShareReceipt};
use crate::utils::error::{ContractError, Result};
use async_trait::async_trait;
use std::path::PathBuf;
use tokio::process::Command;

/// Drops the document into an outbox directory.
#[derive(Debug, Clone)]
pub struct DirectoryShare {
    outbox: PathBuf,
}

impl DirectoryShare {
    pub fn new(outbox: impl Into<PathBuf>) -> Self {
        Self {
            outbox: outbox.into(),
        }
    }

    fn failure(&self, err: impl std::fmt::Display) -> ContractError {
        ContractError::ShareError {
            target: self.name().to_string(),
            message: err.to_string(),
        }
    }
}

#[async_trait]
impl ShareTarget for DirectoryShare {
    fn name(&self) -> &str {
        "directory"
    }

    async fn share(&self, document: &Document) -> Result<ShareReceipt> {
        let file_name = document
            .path
            .file_name()
            .ok_or_else(|| self.failure(format!("not a file: {}", document.path.display())))?;

        tokio::fs::create_dir_all(&self.outbox)
            .await
            .map_err(|e| self.failure(e))?;

        let destination = self.outbox.join(file_name);
        tokio::fs::copy(&document.path, &destination)
            .await
            .map_err(|e| self.failure(e))?;

        Ok(ShareReceipt {
            target: self.name().to_string(),
            location: destination.display().to_string(),
        })
    }
}

/// Hands the document to an external program, e.g. `xdg-open` or a mail helper.
/// The file path is appended as the last argument.
#[derive(Debug, Clone)]
pub struct CommandShare {
    program: String,
    args: Vec<String>,
}

impl CommandShare {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// Splits a command line on whitespace: first word is the program.
    pub fn from_command_line(command_line: &str) -> Result<Self> {
        let mut parts = command_line.split_whitespace().map(str::to_string);
        let program = parts.next().ok_or_else(|| ContractError::InvalidConfigValueError {
            field: "share.command".to_string(),
            value: command_line.to_string(),
            reason: "Command cannot be empty".to_string(),
        })?;
        Ok(Self::new(program, parts.collect()))
    }
}

#[async_trait]
impl ShareTarget for CommandShare {
    fn name(&self) -> &str {
        "command"
    }

    async fn share(&self, document: &Document) -> Result<ShareReceipt> {
        tracing::debug!("Running share command: {} {:?}", self.program, self.args);

        let status = Command::new(&self.program)
            .args(&self.args)
            .arg(&document.path)
            .status()
            .await
            .map_err(|e| ContractError::ShareError {
                target: self.name().to_string(),
                message: format!("could not start '{}': {}", self.program, e),
            })?;

        if !status.success() {
            return Err(ContractError::ShareError {
                target: self.name().to_string(),
                message: format!("'{}' exited with {}", self.program, status),
            });
        }

        Ok(ShareReceipt {
            target: self.name().to_string(),
            location: document.path.display().to_string(),
        })
    }
}
