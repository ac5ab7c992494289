pub mod assembler;
pub mod template;

pub use crate::domain::model::{Document, Party, PartyKind, SessionState, ShareReceipt};
pub use crate::domain::ports::{ConfigProvider, DocumentPrinter, RecordSource, ShareTarget, Storage};
pub use crate::utils::error::Result;
