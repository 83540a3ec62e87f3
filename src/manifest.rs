//! Filing descriptors and the local manifest that lists them.
//!
//! Descriptors use the field names of the EDINET document list API so a
//! saved API response entry can be reused as a manifest entry with an added
//! `xbrlPath`.

use crate::config::Config;
use crate::{Error, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilingDescriptor {
    pub edinet_code: String,
    #[serde(default)]
    pub fund_code: Option<String>,
    pub filer_name: String,
    #[serde(default)]
    pub period_start: Option<NaiveDate>,
    #[serde(default)]
    pub period_end: Option<NaiveDate>,
    #[serde(default)]
    pub submit_date_time: Option<String>,
    #[serde(rename = "docID")]
    pub doc_id: String,
}

/// A filing with its downloaded, decompressed instance document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Filing {
    #[serde(flatten)]
    pub descriptor: FilingDescriptor,
    #[serde(rename = "xbrlPath")]
    pub path: PathBuf,
}

pub trait FilingSource {
    fn filings(&self) -> Result<Vec<Filing>>;
}

/// Filings listed in a JSON manifest file.
#[derive(Debug, Clone)]
pub struct ManifestSource {
    manifest: PathBuf,
    base_dir: Option<PathBuf>,
}

impl ManifestSource {
    pub fn new<P: AsRef<Path>>(manifest: P) -> Self {
        Self {
            manifest: manifest.as_ref().to_path_buf(),
            base_dir: None,
        }
    }

    /// Resolve relative document paths against `dir` instead of the
    /// manifest's own directory.
    pub fn with_base_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.base_dir = dir;
        self
    }

    pub fn from_config<P: AsRef<Path>>(manifest: P, config: &Config) -> Self {
        Self::new(manifest).with_base_dir(config.xbrl_dir.clone())
    }

    fn base_dir(&self) -> PathBuf {
        match &self.base_dir {
            Some(dir) => dir.clone(),
            None => self
                .manifest
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_default(),
        }
    }
}

impl FilingSource for ManifestSource {
    fn filings(&self) -> Result<Vec<Filing>> {
        let content = std::fs::read_to_string(&self.manifest)?;
        let mut filings: Vec<Filing> =
            serde_json::from_str(&content).map_err(|source| Error::Manifest {
                path: self.manifest.clone(),
                source,
            })?;

        let base = self.base_dir();
        for filing in &mut filings {
            if filing.path.is_relative() {
                filing.path = base.join(&filing.path);
            }
        }
        Ok(filings)
    }
}

/// Decides which filings are not worth processing.
#[derive(Debug, Clone, Default)]
pub struct FilingFilter {
    skip_words: Vec<String>,
    skip_fund_filings: bool,
}

impl FilingFilter {
    pub fn new(skip_words: Vec<String>, skip_fund_filings: bool) -> Self {
        Self {
            skip_words,
            skip_fund_filings,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.skip_words.clone(), config.skip_fund_filings)
    }

    /// Why `descriptor` is skipped, or `None` to process it.
    pub fn skip_reason(&self, descriptor: &FilingDescriptor) -> Option<String> {
        if let Some(word) = self
            .skip_words
            .iter()
            .find(|w| descriptor.filer_name.contains(w.as_str()))
        {
            return Some(format!("filer name contains \"{word}\""));
        }
        if self.skip_fund_filings {
            if let Some(code) = &descriptor.fund_code {
                return Some(format!("fund filing {code}"));
            }
        }
        None
    }
}
