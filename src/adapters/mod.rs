// Adapters layer: concrete implementations for external systems (http record
// sources, pdf output, share targets). Local storage lives in config::cli.

pub mod http;
pub mod pdf;
pub mod share;

pub use http::HttpRecordSource;
pub use pdf::PdfPrinter;
pub use share::{CommandShare, DirectoryShare};
