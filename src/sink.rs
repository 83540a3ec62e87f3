//! Report sinks for extracted filing records.
//!
//! Records from one processor share their figure keys. The CSV sink still
//! renders against a fixed column list so its header does not depend on the
//! processor's strategies.

use crate::model::FilingRecord;
use crate::vocabulary::*;
use crate::Result;
use std::io::Write;

/// Rendered for a figure column whose label the record does not carry.
pub const MISSING: &str = "NA";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    EdinetCode,
    FundCode,
    PeriodStart,
    PeriodEnd,
    SubmitDateTime,
    FilerName,
    DocId,
    Figure(&'static str),
    OperatingMargin,
    EquityRatio,
}

pub const COLUMNS: &[Column] = &[
    Column::EdinetCode,
    Column::FundCode,
    Column::PeriodStart,
    Column::PeriodEnd,
    Column::SubmitDateTime,
    Column::FilerName,
    Column::DocId,
    Column::Figure(OPERATING_CASH_FLOW),
    Column::Figure(SALES),
    Column::Figure(OPERATING_INCOME),
    Column::Figure(NET_INCOME),
    Column::OperatingMargin,
    Column::Figure(TOTAL_NET_ASSETS),
    Column::Figure(TOTAL_LIABILITIES_AND_NET_ASSETS),
    Column::EquityRatio,
    Column::Figure(TOTAL_OPERATING_REVENUE),
    Column::Figure(NET_INCOME_OR_LOSS),
    Column::Figure(OPERATING_PROFIT_OR_LOSS),
];

impl Column {
    pub fn header(self) -> &'static str {
        match self {
            Column::EdinetCode => "EDINETコード",
            Column::FundCode => "fundコード",
            Column::PeriodStart => "会計期間開始",
            Column::PeriodEnd => "会計期間終了",
            Column::SubmitDateTime => "書類提出日",
            Column::FilerName => "企業名",
            Column::DocId => "書類ID",
            Column::Figure(label) => label,
            Column::OperatingMargin => OPERATING_MARGIN,
            Column::EquityRatio => EQUITY_RATIO,
        }
    }

    pub fn render(self, record: &FilingRecord) -> String {
        let d = &record.descriptor;
        match self {
            Column::EdinetCode => d.edinet_code.clone(),
            Column::FundCode => d.fund_code.clone().unwrap_or_default(),
            Column::PeriodStart => d.period_start.map(|p| p.to_string()).unwrap_or_default(),
            Column::PeriodEnd => d.period_end.map(|p| p.to_string()).unwrap_or_default(),
            Column::SubmitDateTime => d.submit_date_time.clone().unwrap_or_default(),
            Column::FilerName => d.filer_name.clone(),
            Column::DocId => d.doc_id.clone(),
            Column::Figure(label) => match record.figures.lookup(label) {
                None => MISSING.to_string(),
                Some(None) => String::new(),
                Some(Some(value)) => value.to_string(),
            },
            Column::OperatingMargin => render_ratio(record.operating_margin),
            Column::EquityRatio => render_ratio(record.equity_ratio),
        }
    }
}

fn render_ratio(ratio: Option<f64>) -> String {
    ratio.map(|r| r.to_string()).unwrap_or_default()
}

pub trait ReportSink {
    fn write(&mut self, records: &[FilingRecord]) -> Result<()>;
}

/// Header row followed by one row per record.
pub struct CsvSink<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> CsvSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(writer),
        }
    }

    pub fn into_inner(self) -> Option<W> {
        self.writer.into_inner().ok()
    }
}

impl<W: Write> ReportSink for CsvSink<W> {
    fn write(&mut self, records: &[FilingRecord]) -> Result<()> {
        self.writer.write_record(COLUMNS.iter().map(|c| c.header()))?;
        for record in records {
            self.writer
                .write_record(COLUMNS.iter().map(|c| c.render(record)))?;
        }
        self.writer.flush()?;
        Ok(())
    }
}

/// Records as a pretty-printed JSON array.
pub struct JsonSink<W: Write> {
    writer: W,
}

impl<W: Write> JsonSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> ReportSink for JsonSink<W> {
    fn write(&mut self, records: &[FilingRecord]) -> Result<()> {
        serde_json::to_writer_pretty(&mut self.writer, records)?;
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}

/// Keeps records in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    pub records: Vec<FilingRecord>,
}

impl ReportSink for MemorySink {
    fn write(&mut self, records: &[FilingRecord]) -> Result<()> {
        self.records.extend_from_slice(records);
        Ok(())
    }
}
