//! Figure extraction from one XBRL document.
//!
//! [`XbrlFile::try_extract`] reports why a block yielded nothing;
//! [`BlockSource::extract`] logs that reason and degrades to an all-null
//! result, which is what the filing processor consumes.

use crate::locator;
use crate::matcher;
use crate::model::{ExtractionResult, TextBlock};
use crate::report::Reporter;
use crate::table;
use crate::{Error, Result};
use std::path::{Path, PathBuf};

const BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// Anything the filing processor can pull label values out of.
pub trait BlockSource {
    /// Values of `labels` in `block`. Never fails: a missing block, a block
    /// without tables or an unreadable document give an all-null result.
    fn extract(&self, block: &str, labels: &[&str], reporter: &dyn Reporter) -> ExtractionResult;
}

/// An XBRL instance document held in memory.
#[derive(Debug, Clone)]
pub struct XbrlFile {
    path: PathBuf,
    xml: String,
}

impl XbrlFile {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read(path)?;
        Self::from_bytes(path, content)
    }

    pub fn from_bytes<P: AsRef<Path>>(path: P, data: Vec<u8>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        // Skip BOM if present
        let data = if data.starts_with(BOM) {
            data[BOM.len()..].to_vec()
        } else {
            data
        };
        let xml = String::from_utf8(data).map_err(|_| Error::Encoding(path.clone()))?;
        Ok(Self { path, xml })
    }

    pub fn from_string<P: AsRef<Path>>(path: P, xml: impl Into<String>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            xml: xml.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Raw text of `block`.
    pub fn block_text(&self, block: &str) -> Result<String> {
        locator::locate(&self.xml, block)
            .map_err(|source| self.syntax_error(source))?
            .ok_or_else(|| Error::BlockNotFound {
                block: block.to_string(),
            })
    }

    /// Known text blocks present in the document with non-empty text.
    pub fn present_blocks(&self) -> Result<Vec<TextBlock>> {
        let names: Vec<&str> = TextBlock::ALL.iter().map(|b| b.element_name()).collect();
        let found = locator::locate_all(&self.xml, &names).map_err(|source| self.syntax_error(source))?;
        Ok(TextBlock::ALL
            .iter()
            .zip(found)
            .filter_map(|(block, text)| text.map(|_| *block))
            .collect())
    }

    pub fn try_extract(
        &self,
        block: &str,
        labels: &[&str],
        reporter: &dyn Reporter,
    ) -> Result<ExtractionResult> {
        let text = self.block_text(block)?;

        let tables = table::tokenize(&text);
        if tables.is_empty() {
            return Err(Error::NoTablesFound {
                block: block.to_string(),
            });
        }
        reporter.info(format_args!("{} tables found in {block}", tables.len()));

        let result = matcher::resolve(&tables, labels, reporter);
        reporter.info(format_args!("Extracted {block} -> {result}"));
        Ok(result)
    }

    fn syntax_error(&self, source: quick_xml::Error) -> Error {
        Error::DocumentSyntax {
            path: self.path.clone(),
            source,
        }
    }
}

impl BlockSource for XbrlFile {
    fn extract(&self, block: &str, labels: &[&str], reporter: &dyn Reporter) -> ExtractionResult {
        match self.try_extract(block, labels, reporter) {
            Ok(result) => result,
            Err(e) => {
                report_failure(&e, &self.path, block, labels, reporter);
                ExtractionResult::unresolved(labels)
            }
        }
    }
}

/// Opens `path` and extracts `labels` from `block` in one call.
pub fn extract_values<P: AsRef<Path>>(
    path: P,
    block: &str,
    labels: &[&str],
    reporter: &dyn Reporter,
) -> ExtractionResult {
    let path = path.as_ref();
    match XbrlFile::open(path) {
        Ok(file) => file.extract(block, labels, reporter),
        Err(e) => {
            report_failure(&e, path, block, labels, reporter);
            ExtractionResult::unresolved(labels)
        }
    }
}

fn report_failure(
    error: &Error,
    path: &Path,
    block: &str,
    labels: &[&str],
    reporter: &dyn Reporter,
) {
    match error {
        Error::BlockNotFound { .. } => {
            reporter.warn(format_args!("{block} not found: {}", path.display()))
        }
        Error::NoTablesFound { .. } => {
            reporter.warn(format_args!("No <table> in {block}: {}", path.display()))
        }
        _ => reporter.error(format_args!(
            "Extraction failed for {block} in {} (labels {labels:?}): {error}",
            path.display()
        )),
    }
}
