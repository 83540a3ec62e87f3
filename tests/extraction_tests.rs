mod common;

use common::fixture_path;
use edinet_figures::extractor::extract_values;
use edinet_figures::sink::MemorySink;
use edinet_figures::vocabulary::*;
use edinet_figures::{
    BlockSource, Config, CsvSink, Error, FilingProcessor, JsonSink, ManifestSource, MemoryReporter,
    ReportSink, TextBlock, XbrlFile,
};
use log::Level;
use pretty_assertions::assert_eq;

#[test]
fn fund_balance_sheet() {
    let reporter = MemoryReporter::new();
    let result = extract_values(
        fixture_path("fund.xbrl"),
        "BalanceSheetTextBlock",
        BALANCE_SHEET_LABELS,
        &reporter,
    );

    assert_eq!(result.get(TOTAL_NET_ASSETS), Some(100000));
    assert_eq!(result.get(TOTAL_LIABILITIES_AND_NET_ASSETS), Some(500000));
}

#[test]
fn fund_income_statement_with_negative_marker() {
    let file = XbrlFile::open(fixture_path("fund.xbrl")).unwrap();
    let reporter = MemoryReporter::new();
    let result = file.extract(
        "StatementOfIncomeAndRetainedEarningsTextBlock",
        FUND_INCOME_LABELS,
        &reporter,
    );

    assert_eq!(result.get(TOTAL_OPERATING_REVENUE), Some(60000));
    assert_eq!(result.get(OPERATING_PROFIT_OR_LOSS), Some(-3000));
    assert_eq!(result.get(NET_INCOME_OR_LOSS), Some(-1500));
    assert!(reporter.contains(Level::Info, "Partial match"));
}

#[test]
fn company_blocks_in_cdata() {
    let file = XbrlFile::open(fixture_path("company.xbrl")).unwrap();
    let reporter = MemoryReporter::new();

    let income = file.extract(
        "ConsolidatedStatementOfIncomeTextBlock",
        COMPANY_INCOME_LABELS,
        &reporter,
    );
    assert_eq!(
        income.iter().collect::<Vec<_>>(),
        vec![
            (SALES, Some(1500000)),
            (OPERATING_INCOME, Some(300000)),
            (NET_INCOME, Some(200000)),
        ]
    );

    let cash = file.extract(
        "ConsolidatedStatementOfCashFlowsTextBlock",
        CASH_FLOW_LABELS,
        &reporter,
    );
    assert_eq!(cash.get(OPERATING_CASH_FLOW), Some(-12345));
}

#[test]
fn absent_block_degrades_to_null() {
    let reporter = MemoryReporter::new();
    let result = extract_values(
        fixture_path("company.xbrl"),
        "BalanceSheetTextBlock",
        BALANCE_SHEET_LABELS,
        &reporter,
    );

    assert_eq!(result.len(), 2);
    assert!(result.is_all_null());
    assert!(reporter.contains(Level::Warn, "BalanceSheetTextBlock not found"));
}

#[test]
fn malformed_document() {
    let file = XbrlFile::open(fixture_path("broken.xbrl")).unwrap();
    let reporter = MemoryReporter::new();
    assert!(matches!(
        file.try_extract("BalanceSheetTextBlock", BALANCE_SHEET_LABELS, &reporter),
        Err(Error::DocumentSyntax { .. })
    ));

    let result = file.extract("BalanceSheetTextBlock", BALANCE_SHEET_LABELS, &reporter);
    assert!(result.is_all_null());
    assert!(reporter.contains(Level::Error, "broken.xbrl"));
}

#[test]
fn missing_file() {
    let reporter = MemoryReporter::new();
    let result = extract_values(
        fixture_path("does-not-exist.xbrl"),
        "BalanceSheetTextBlock",
        BALANCE_SHEET_LABELS,
        &reporter,
    );
    assert!(result.is_all_null());
    assert_eq!(reporter.messages_at(Level::Error).len(), 1);
}

#[test]
fn present_blocks() {
    let file = XbrlFile::open(fixture_path("company.xbrl")).unwrap();
    assert_eq!(
        file.present_blocks().unwrap(),
        vec![
            TextBlock::ConsolidatedBalanceSheet,
            TextBlock::ConsolidatedStatementOfIncome,
            TextBlock::ConsolidatedStatementOfCashFlows,
        ]
    );
}

#[test]
fn process_manifest() {
    let reporter = MemoryReporter::new();
    let config = Config::default().with_limit(10);
    let source = ManifestSource::from_config(fixture_path("manifest.json"), &config);
    let processor = FilingProcessor::new(&config, &reporter);
    let mut sink = MemorySink::default();

    let summary = processor.run(&source, &mut sink).unwrap();
    assert_eq!(summary.documents, 5);
    assert_eq!(summary.processed, 5);
    assert_eq!(summary.extracted, 2);
    assert_eq!(summary.skipped, 3);

    let fund = &sink.records[0];
    assert_eq!(fund.descriptor.doc_id, "S100FUND");
    assert_eq!(fund.equity_ratio, Some(20.0));
    assert_eq!(fund.operating_margin, Some(-2.5));
    assert_eq!(fund.figures.lookup(OPERATING_CASH_FLOW), Some(None));
    assert_eq!(fund.figures.lookup(SALES), Some(None));

    let company = &sink.records[1];
    assert_eq!(company.descriptor.doc_id, "S100COMP");
    assert_eq!(company.equity_ratio, Some(40.0));
    assert_eq!(company.operating_margin, Some(20.0));
    assert_eq!(company.figures.get(OPERATING_CASH_FLOW), Some(-12345));
    assert_eq!(company.figures.lookup(TOTAL_OPERATING_REVENUE), Some(None));
}

#[test]
fn fund_and_company_records_share_figure_keys() {
    let reporter = MemoryReporter::new();
    let config = Config::default().with_limit(2);
    let source = ManifestSource::from_config(fixture_path("manifest.json"), &config);
    let processor = FilingProcessor::new(&config, &reporter);
    let mut sink = MemorySink::default();

    processor.run(&source, &mut sink).unwrap();
    let keys: Vec<Vec<&str>> = sink
        .records
        .iter()
        .map(|r| r.figures.iter().map(|(label, _)| label).collect())
        .collect();

    assert_eq!(keys.len(), 2);
    assert_eq!(keys[0], keys[1]);
    assert_eq!(keys[0], processor.labels().to_vec());
}

#[test]
fn json_records_have_the_same_shape() {
    let reporter = MemoryReporter::new();
    let config = Config::default().with_limit(2);
    let source = ManifestSource::from_config(fixture_path("manifest.json"), &config);
    let mut sink = JsonSink::new(Vec::new());

    FilingProcessor::new(&config, &reporter)
        .run(&source, &mut sink)
        .unwrap();
    let value: serde_json::Value = serde_json::from_slice(&sink.into_inner()).unwrap();
    let fund = value[0]["figures"].as_object().unwrap();
    let company = value[1]["figures"].as_object().unwrap();

    assert_eq!(fund.len(), company.len());
    assert!(fund[SALES].is_null());
    assert!(company[TOTAL_OPERATING_REVENUE].is_null());
}

#[test]
fn default_limit_processes_first_filing_only() {
    let reporter = MemoryReporter::new();
    let config = Config::default();
    let source = ManifestSource::from_config(fixture_path("manifest.json"), &config);
    let mut sink = MemorySink::default();

    let summary = FilingProcessor::new(&config, &reporter)
        .run(&source, &mut sink)
        .unwrap();
    assert_eq!(summary.processed, 1);
    assert_eq!(sink.records.len(), 1);
}

#[test]
fn skip_fund_filings() {
    let reporter = MemoryReporter::new();
    let config = Config::default().with_limit(10).with_skip_fund_filings(true);
    let source = ManifestSource::from_config(fixture_path("manifest.json"), &config);
    let mut sink = MemorySink::default();

    FilingProcessor::new(&config, &reporter)
        .run(&source, &mut sink)
        .unwrap();
    let ids: Vec<&str> = sink.records.iter().map(|r| r.descriptor.doc_id.as_str()).collect();
    assert_eq!(ids, vec!["S100COMP"]);
}

#[test]
fn csv_report_file() {
    let reporter = MemoryReporter::new();
    let config = Config::default().with_limit(10);
    let source = ManifestSource::from_config(fixture_path("manifest.json"), &config);
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("report.csv");

    {
        let file = std::fs::File::create(&out).unwrap();
        let mut sink = CsvSink::new(file);
        FilingProcessor::new(&config, &reporter)
            .run(&source, &mut sink)
            .unwrap();
    }

    let mut reader = csv::Reader::from_path(&out).unwrap();
    let headers = reader.headers().unwrap().clone();
    let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
    assert_eq!(rows.len(), 2);

    let column = |name: &str| headers.iter().position(|h| h == name).unwrap();
    assert_eq!(&rows[0][column(EQUITY_RATIO)], "20");
    assert_eq!(&rows[0][column(SALES)], "");
    assert_eq!(&rows[0][column(OPERATING_CASH_FLOW)], "");
    assert_eq!(&rows[1][column(OPERATING_MARGIN)], "20");
    assert_eq!(&rows[1][column(NET_INCOME)], "200000");
}

#[test]
fn json_report() {
    let reporter = MemoryReporter::new();
    let config = Config::default().with_limit(2);
    let source = ManifestSource::from_config(fixture_path("manifest.json"), &config);
    let mut sink = JsonSink::new(Vec::new());

    FilingProcessor::new(&config, &reporter)
        .run(&source, &mut sink)
        .unwrap();
    let value: serde_json::Value = serde_json::from_slice(&sink.into_inner()).unwrap();
    assert_eq!(value.as_array().unwrap().len(), 2);
    assert_eq!(value[1]["figures"][OPERATING_INCOME], 300000);
}

#[test]
fn sink_trait_object() {
    let mut sinks: Vec<Box<dyn ReportSink>> = vec![
        Box::new(MemorySink::default()),
        Box::new(CsvSink::new(Vec::new())),
    ];
    for sink in &mut sinks {
        sink.write(&[]).unwrap();
    }
}
