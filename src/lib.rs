//! edinet-figures - Financial figure extraction from EDINET XBRL filings
//!
//! Licensed under AGPL-3.0

pub mod config;
pub mod extractor;
pub mod locator;
pub mod manifest;
pub mod matcher;
pub mod model;
pub mod numeric;
pub mod processor;
pub mod ratio;
pub mod report;
pub mod sink;
pub mod strategy;
pub mod table;
pub mod vocabulary;

// Re-export main types
pub use config::Config;
pub use extractor::{BlockSource, XbrlFile};
pub use manifest::{Filing, FilingDescriptor, FilingFilter, FilingSource, ManifestSource};
pub use model::{ExtractionResult, Figures, FilingRecord, TextBlock};
pub use processor::{FilingProcessor, RunSummary};
pub use report::{LogReporter, MemoryReporter, Reporter};
pub use sink::{CsvSink, JsonSink, ReportSink};
pub use strategy::{BlockQuery, Layout, Strategy};

use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("XML syntax error in {}: {source}", path.display())]
    DocumentSyntax {
        path: PathBuf,
        #[source]
        source: quick_xml::Error,
    },

    #[error("Document is not valid UTF-8: {}", .0.display())]
    Encoding(PathBuf),

    #[error("Text block not found: {block}")]
    BlockNotFound { block: String },

    #[error("No tables found in text block: {block}")]
    NoTablesFound { block: String },

    #[error("Malformed manifest {}: {source}", path.display())]
    Manifest {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}
