//! Per-filing orchestration.
//!
//! For each filing the strategies run in order until one yields a non-null
//! figure, the supplementary queries (operating cash flow) always run, and
//! ratios are derived from the merged figures. A filing whose merged figures
//! are all null is skipped.

use crate::config::Config;
use crate::extractor::{BlockSource, XbrlFile};
use crate::manifest::{Filing, FilingDescriptor, FilingFilter, FilingSource};
use crate::model::{ExtractionResult, Figures, FilingRecord};
use crate::ratio;
use crate::report::Reporter;
use crate::sink::ReportSink;
use crate::strategy::{BlockQuery, Strategy};
use crate::Result;
use chrono::{DateTime, Local};
use serde::Serialize;
use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Counts for one run over a filing source.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunSummary {
    pub started_at: DateTime<Local>,
    /// Filings listed by the source
    pub documents: usize,
    /// Filings considered after the limit
    pub processed: usize,
    pub extracted: usize,
    pub skipped: usize,
}

impl RunSummary {
    fn new(documents: usize) -> Self {
        Self {
            started_at: Local::now(),
            documents,
            processed: 0,
            extracted: 0,
            skipped: 0,
        }
    }

    /// Writes the summary to `path` as pretty-printed JSON.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(&mut writer, self)?;
        writeln!(writer)?;
        writer.flush()?;
        Ok(())
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} documents, {} processed, {} extracted, {} skipped",
            self.documents, self.processed, self.extracted, self.skipped
        )
    }
}

pub struct FilingProcessor<'r> {
    strategies: Vec<Strategy>,
    supplementary: Vec<BlockQuery>,
    /// Keys of every record, in order
    labels: Vec<&'static str>,
    filter: FilingFilter,
    limit: usize,
    reporter: &'r dyn Reporter,
}

impl<'r> FilingProcessor<'r> {
    pub fn new(config: &Config, reporter: &'r dyn Reporter) -> Self {
        let strategies = Strategy::defaults();
        let supplementary = vec![BlockQuery::cash_flow()];
        Self {
            labels: figure_labels(&strategies, &supplementary),
            strategies,
            supplementary,
            filter: FilingFilter::from_config(config),
            limit: config.limit,
            reporter,
        }
    }

    pub fn with_strategies(mut self, strategies: Vec<Strategy>) -> Self {
        self.strategies = strategies;
        self.labels = figure_labels(&self.strategies, &self.supplementary);
        self
    }

    pub fn with_supplementary(mut self, queries: Vec<BlockQuery>) -> Self {
        self.supplementary = queries;
        self.labels = figure_labels(&self.strategies, &self.supplementary);
        self
    }

    /// Figure labels every record carries, whichever strategy succeeded.
    pub fn labels(&self) -> &[&'static str] {
        &self.labels
    }

    /// Runs the strategies, then the supplementary queries, against `source`.
    pub fn extract_figures(&self, source: &dyn BlockSource) -> Figures {
        let mut figures = Figures::with_labels(&self.labels);

        for strategy in &self.strategies {
            let mut found = false;
            for query in &strategy.queries {
                let result = self.run_query(source, query);
                found |= !result.is_all_null();
                figures.merge(&result);
            }
            if found {
                self.reporter
                    .info(format_args!("Extracted figures with the {} layout", strategy.layout));
                break;
            }
            self.reporter
                .info(format_args!("No figures with the {} layout", strategy.layout));
        }

        for query in &self.supplementary {
            let result = self.run_query(source, query);
            if result.is_all_null() {
                self.reporter
                    .info(format_args!("Continuing without {}", query.block));
            }
            figures.merge(&result);
        }

        figures
    }

    fn run_query(&self, source: &dyn BlockSource, query: &BlockQuery) -> ExtractionResult {
        source.extract(query.block.element_name(), query.labels, self.reporter)
    }

    /// Builds the record for one filing, or `None` if nothing was extracted.
    pub fn process_source(
        &self,
        descriptor: FilingDescriptor,
        source: &dyn BlockSource,
    ) -> Option<FilingRecord> {
        let figures = self.extract_figures(source);
        if figures.is_all_null() {
            self.reporter.warn(format_args!(
                "No figures extracted for {} ({}), skipping",
                descriptor.filer_name, descriptor.doc_id
            ));
            return None;
        }

        let mut record = FilingRecord::new(descriptor, figures);
        self.derive_ratios(&mut record);
        Some(record)
    }

    /// Operating margin from the fund layout, overwritten by the company
    /// layout when both sets of inputs are present, then the equity ratio.
    pub fn derive_ratios(&self, record: &mut FilingRecord) {
        let name = &record.descriptor.filer_name;

        if let Some(margin) = ratio::fund_operating_margin(&record.figures) {
            self.reporter
                .info(format_args!("{name}: fund operating margin {margin}%"));
            record.operating_margin = Some(margin);
        }
        if let Some(margin) = ratio::company_operating_margin(&record.figures) {
            self.reporter
                .info(format_args!("{name}: operating margin {margin}%"));
            record.operating_margin = Some(margin);
        }
        if let Some(equity) = ratio::equity_ratio(&record.figures) {
            self.reporter
                .info(format_args!("{name}: equity ratio {equity}%"));
            record.equity_ratio = Some(equity);
        }
    }

    /// Opens the filing's document and processes it.
    pub fn process(&self, filing: &Filing) -> Option<FilingRecord> {
        let descriptor = &filing.descriptor;
        self.reporter.info(format_args!(
            "Processing {} ({}): {}",
            descriptor.filer_name,
            descriptor.doc_id,
            filing.path.display()
        ));

        match XbrlFile::open(&filing.path) {
            Ok(file) => self.process_source(descriptor.clone(), &file),
            Err(e) => {
                self.reporter.error(format_args!(
                    "Cannot read {} for {}: {e}",
                    filing.path.display(),
                    descriptor.filer_name
                ));
                None
            }
        }
    }

    /// Processes up to the configured limit of `filings`, in order.
    pub fn process_all(&self, filings: &[Filing]) -> (Vec<FilingRecord>, RunSummary) {
        let mut summary = RunSummary::new(filings.len());
        let mut records = Vec::new();

        for filing in filings.iter().take(self.limit) {
            summary.processed += 1;
            if let Some(reason) = self.filter.skip_reason(&filing.descriptor) {
                self.reporter.info(format_args!(
                    "Skipping {}: {reason}",
                    filing.descriptor.filer_name
                ));
                summary.skipped += 1;
                continue;
            }
            match self.process(filing) {
                Some(record) => records.push(record),
                None => summary.skipped += 1,
            }
        }

        summary.extracted = records.len();
        (records, summary)
    }

    /// Processes every filing of `source` and writes the records to `sink`.
    pub fn run(&self, source: &dyn FilingSource, sink: &mut dyn ReportSink) -> Result<RunSummary> {
        let filings = source.filings()?;
        if filings.is_empty() {
            self.reporter.warn(format_args!("No filings to process"));
        }

        let (records, summary) = self.process_all(&filings);
        sink.write(&records)?;
        self.reporter.info(format_args!("Run complete: {summary}"));
        Ok(summary)
    }
}

/// Labels of every strategy query followed by the supplementary queries,
/// first occurrence wins.
fn figure_labels(strategies: &[Strategy], supplementary: &[BlockQuery]) -> Vec<&'static str> {
    let mut labels: Vec<&'static str> = Vec::new();
    let queries = strategies
        .iter()
        .flat_map(|s| s.queries.iter())
        .chain(supplementary);
    for label in queries.flat_map(|q| q.labels.iter().copied()) {
        if !labels.contains(&label) {
            labels.push(label);
        }
    }
    labels
}
