use crate::manifest::FilingDescriptor;
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use std::fmt;

// ============================================================================
// Text blocks
// ============================================================================

/// Known XBRL text blocks holding rendered financial statements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextBlock {
    BalanceSheet,
    ConsolidatedBalanceSheet,
    StatementOfIncomeAndRetainedEarnings,
    ConsolidatedStatementOfIncome,
    ConsolidatedStatementOfCashFlows,
}

impl TextBlock {
    pub const ALL: [TextBlock; 5] = [
        TextBlock::BalanceSheet,
        TextBlock::ConsolidatedBalanceSheet,
        TextBlock::StatementOfIncomeAndRetainedEarnings,
        TextBlock::ConsolidatedStatementOfIncome,
        TextBlock::ConsolidatedStatementOfCashFlows,
    ];

    /// Local element name of the block, without namespace prefix.
    pub const fn element_name(self) -> &'static str {
        match self {
            TextBlock::BalanceSheet => "BalanceSheetTextBlock",
            TextBlock::ConsolidatedBalanceSheet => "ConsolidatedBalanceSheetTextBlock",
            TextBlock::StatementOfIncomeAndRetainedEarnings => {
                "StatementOfIncomeAndRetainedEarningsTextBlock"
            }
            TextBlock::ConsolidatedStatementOfIncome => "ConsolidatedStatementOfIncomeTextBlock",
            TextBlock::ConsolidatedStatementOfCashFlows => {
                "ConsolidatedStatementOfCashFlowsTextBlock"
            }
        }
    }
}

impl fmt::Display for TextBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.element_name())
    }
}

// ============================================================================
// Extraction result
// ============================================================================

/// Label to value mapping produced by one block extraction.
///
/// Keys are exactly the requested labels in request order. A value is written
/// at most once: once a label resolves it is never overwritten.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractionResult {
    entries: Vec<(String, Option<i64>)>,
}

impl ExtractionResult {
    /// Every label mapped to null. Duplicate labels keep their first position.
    pub fn unresolved<S: AsRef<str>>(labels: &[S]) -> Self {
        let mut entries: Vec<(String, Option<i64>)> = Vec::with_capacity(labels.len());
        for label in labels {
            let label = label.as_ref();
            if !entries.iter().any(|(l, _)| l == label) {
                entries.push((label.to_string(), None));
            }
        }
        Self { entries }
    }

    pub fn get(&self, label: &str) -> Option<i64> {
        self.entries
            .iter()
            .find(|(l, _)| l == label)
            .and_then(|(_, v)| *v)
    }

    pub fn contains_label(&self, label: &str) -> bool {
        self.entries.iter().any(|(l, _)| l == label)
    }

    pub fn is_resolved(&self, label: &str) -> bool {
        self.get(label).is_some()
    }

    /// Sets `label` if it is requested and still null. Returns whether the
    /// value was written.
    pub fn resolve(&mut self, label: &str, value: i64) -> bool {
        match self.entries.iter_mut().find(|(l, _)| l == label) {
            Some((_, slot)) if slot.is_none() => {
                *slot = Some(value);
                true
            }
            _ => false,
        }
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(l, _)| l.as_str())
    }

    /// Labels that have not been resolved yet, in request order.
    pub fn pending(&self) -> impl Iterator<Item = &str> {
        self.entries
            .iter()
            .filter(|(_, v)| v.is_none())
            .map(|(l, _)| l.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<i64>)> {
        self.entries.iter().map(|(l, v)| (l.as_str(), *v))
    }

    pub fn resolved_count(&self) -> usize {
        self.entries.iter().filter(|(_, v)| v.is_some()).count()
    }

    pub fn is_all_null(&self) -> bool {
        self.resolved_count() == 0
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for ExtractionResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serialize_entries(&self.entries, serializer)
    }
}

impl fmt::Display for ExtractionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_entries(&self.entries, f)
    }
}

// ============================================================================
// Merged figures
// ============================================================================

/// Figures merged from several extractions of one filing.
///
/// Merging follows mapping-update semantics: a label merged again takes the
/// newer value, even when that value is null. Seeding with
/// [`Figures::with_labels`] fixes the key set and order up front.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Figures {
    entries: Vec<(String, Option<i64>)>,
}

impl Figures {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every label mapped to null, duplicates dropped.
    pub fn with_labels<S: AsRef<str>>(labels: &[S]) -> Self {
        let mut figures = Self::new();
        figures.merge(&ExtractionResult::unresolved(labels));
        figures
    }

    pub fn merge(&mut self, result: &ExtractionResult) {
        for (label, value) in result.iter() {
            match self.entries.iter_mut().find(|(l, _)| l == label) {
                Some((_, slot)) => *slot = value,
                None => self.entries.push((label.to_string(), value)),
            }
        }
    }

    /// Value of `label`, or `None` when it is absent or null.
    pub fn get(&self, label: &str) -> Option<i64> {
        self.lookup(label).flatten()
    }

    /// `None` when the label was never extracted, `Some(None)` when it was
    /// extracted but stayed null.
    pub fn lookup(&self, label: &str) -> Option<Option<i64>> {
        self.entries
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, v)| *v)
    }

    pub fn contains(&self, label: &str) -> bool {
        self.lookup(label).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<i64>)> {
        self.entries.iter().map(|(l, v)| (l.as_str(), *v))
    }

    pub fn non_null_count(&self) -> usize {
        self.entries.iter().filter(|(_, v)| v.is_some()).count()
    }

    pub fn is_all_null(&self) -> bool {
        self.non_null_count() == 0
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for Figures {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serialize_entries(&self.entries, serializer)
    }
}

impl fmt::Display for Figures {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_entries(&self.entries, f)
    }
}

fn serialize_entries<S: Serializer>(
    entries: &[(String, Option<i64>)],
    serializer: S,
) -> Result<S::Ok, S::Error> {
    let mut map = serializer.serialize_map(Some(entries.len()))?;
    for (label, value) in entries {
        map.serialize_entry(label, value)?;
    }
    map.end()
}

fn write_entries(entries: &[(String, Option<i64>)], f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("{")?;
    for (i, (label, value)) in entries.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        match value {
            Some(v) => write!(f, "{label}: {v}")?,
            None => write!(f, "{label}: null")?,
        }
    }
    f.write_str("}")
}

// ============================================================================
// Filing record
// ============================================================================

/// One extracted filing, as handed to a report sink.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilingRecord {
    #[serde(flatten)]
    pub descriptor: FilingDescriptor,
    pub figures: Figures,
    pub operating_margin: Option<f64>,
    pub equity_ratio: Option<f64>,
}

impl FilingRecord {
    pub fn new(descriptor: FilingDescriptor, figures: Figures) -> Self {
        Self {
            descriptor,
            figures,
            operating_margin: None,
            equity_ratio: None,
        }
    }
}
