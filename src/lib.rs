pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{CommandShare, DirectoryShare, HttpRecordSource, PdfPrinter};
pub use config::cli::LocalStorage;
pub use config::settings::{Settings, ShareMode};
pub use core::assembler::{ContractAssembler, FetchOutcome, PartyIds, RunReport};
pub use core::template::{render_contract, ContractText};
pub use domain::model::{Document, Party, PartyKind, SessionState, SessionStatus, ShareReceipt};
pub use utils::error::{ContractError, ErrorKind, Result};
