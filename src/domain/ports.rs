use crate::core::template::ContractText;
use crate::domain::model::{Document, Party, PartyKind, ShareReceipt};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::path::PathBuf;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<PathBuf>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn base_url(&self) -> &str;
    fn identifier(&self, kind: PartyKind) -> Option<&str>;
    fn timeout_seconds(&self) -> u64;
    fn output_path(&self) -> &str;
}

/// Where party records come from. One implementation per [`PartyKind`].
#[async_trait]
pub trait RecordSource: Send + Sync {
    fn kind(&self) -> PartyKind;
    async fn fetch(&self, identifier: &str) -> Result<Party>;
}

#[async_trait]
pub trait DocumentPrinter: Send + Sync {
    /// Writes the fixed-layout file for `contract` and returns where it landed.
    async fn print(&self, contract: &ContractText, html: &str, file_stem: &str) -> Result<PathBuf>;
}

#[async_trait]
pub trait ShareTarget: Send + Sync {
    fn name(&self) -> &str;
    async fn share(&self, document: &Document) -> Result<ShareReceipt>;
}
