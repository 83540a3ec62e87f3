//! Label resolution over tokenized tables.
//!
//! Rows are scanned in order and each row resolves at most one label:
//!
//! 1. exact pass: the first pending label (in request order) equal to a cell
//!    that is not the row's last cell;
//! 2. partial pass, only when the exact pass found nothing: the first pending
//!    label contained in any cell that is not the row's last cell.
//!
//! The value always comes from the row's last cell, whichever cell matched.
//! Once a label holds a value it stays; a label whose value cell yields no
//! number stays pending for later rows.

use crate::model::ExtractionResult;
use crate::numeric::try_parse_value;
use crate::report::Reporter;
use crate::table::{Row, Table};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
    Exact,
    Partial,
}

/// A label matched in one row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowMatch<'a> {
    pub label: &'a str,
    pub kind: MatchKind,
}

/// Resolves `labels` against `tables`. The result always has exactly the
/// requested labels as keys.
pub fn resolve<S: AsRef<str>>(
    tables: &[Table],
    labels: &[S],
    reporter: &dyn Reporter,
) -> ExtractionResult {
    let mut result = ExtractionResult::unresolved(labels);

    for (table_idx, table) in tables.iter().enumerate() {
        for (row_idx, row) in table.rows.iter().enumerate() {
            if row.is_empty() {
                continue;
            }
            reporter.debug(format_args!(
                "Table {table_idx}, Row {row_idx}: {:?}",
                row.cells
            ));
            apply_row(row, &mut result, reporter);
        }
    }

    result
}

fn apply_row(row: &Row, result: &mut ExtractionResult, reporter: &dyn Reporter) {
    let Some(found) = match_row(row, result.pending()) else {
        return;
    };
    let label = found.label.to_string();
    let kind = found.kind;

    // the last cell is present: match_row never matches an empty row
    let source = row.last_cell().unwrap_or_default();
    match try_parse_value(source) {
        Ok(Some(value)) => {
            result.resolve(&label, value);
            reporter.info(format_args!("{kind:?} match: {label} = {value}"));
        }
        Ok(None) => {
            reporter.debug(format_args!(
                "{kind:?} match for {label} has no amount in {source:?}"
            ));
        }
        Err(e) => {
            reporter.debug(format_args!(
                "{kind:?} match for {label}: cannot read {source:?} as a number: {e}"
            ));
        }
    }
}

/// Picks the one label `row` resolves, if any. Only cells with a cell after
/// them are considered as label cells.
pub fn match_row<'a, I>(row: &Row, pending: I) -> Option<RowMatch<'a>>
where
    I: IntoIterator<Item = &'a str>,
{
    let pending: Vec<&'a str> = pending.into_iter().collect();
    let label_cells = match row.cells.split_last() {
        Some((_, rest)) => rest,
        None => return None,
    };

    if let Some(label) = pending
        .iter()
        .copied()
        .find(|label| first_position(&row.cells, label).is_some_and(|i| i < label_cells.len()))
    {
        return Some(RowMatch {
            label,
            kind: MatchKind::Exact,
        });
    }

    pending
        .iter()
        .copied()
        .find(|label| label_cells.iter().any(|cell| cell.contains(label)))
        .map(|label| RowMatch {
            label,
            kind: MatchKind::Partial,
        })
}

fn first_position(cells: &[String], label: &str) -> Option<usize> {
    cells.iter().position(|cell| cell == label)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::MemoryReporter;
    use log::Level;
    use pretty_assertions::assert_eq;

    fn table(rows: &[&[&str]]) -> Table {
        Table::new(rows.iter().map(|r| Row::new(r.iter().copied())).collect())
    }

    #[test]
    fn single_row_scenario() {
        let tables = vec![table(&[&["純資産合計", "100,000"]])];
        let result = resolve(&tables, &["純資産合計", "負債純資産合計"], &MemoryReporter::new());
        assert_eq!(result.get("純資産合計"), Some(100000));
        assert!(result.contains_label("負債純資産合計"));
        assert_eq!(result.get("負債純資産合計"), None);
        assert_eq!(result.len(), 2);
    }

    #[test]
    fn keys_match_request_even_without_tables() {
        let result = resolve::<&str>(&[], &["売上高", "営業利益"], &MemoryReporter::new());
        assert_eq!(result.labels().collect::<Vec<_>>(), vec!["売上高", "営業利益"]);
        assert!(result.is_all_null());
    }

    #[test]
    fn one_label_per_row() {
        // both labels appear, only the first requested one resolves
        let tables = vec![table(&[&["純資産合計", "負債純資産合計", "700"]])];
        let result = resolve(&tables, &["負債純資産合計", "純資産合計"], &MemoryReporter::new());
        assert_eq!(result.get("負債純資産合計"), Some(700));
        assert_eq!(result.get("純資産合計"), None);
    }

    #[test]
    fn one_label_per_row_on_partial_match() {
        // both labels are substrings of the cell
        let tables = vec![table(&[&["負債純資産合計の部", "700"]])];
        let result = resolve(&tables, &["純資産合計", "負債純資産合計"], &MemoryReporter::new());
        assert_eq!(
            result.iter().collect::<Vec<_>>(),
            vec![("純資産合計", Some(700)), ("負債純資産合計", None)]
        );
    }

    #[test]
    fn exact_beats_partial_in_same_row() {
        // "営業利益" is contained in "営業利益又は営業損失" but is not an exact cell;
        // "営業利益又は営業損失" is exact and wins despite coming second
        let row = Row::new(["営業利益又は営業損失", "50"]);
        let found = match_row(&row, ["営業利益", "営業利益又は営業損失"]).unwrap();
        assert_eq!(found.label, "営業利益又は営業損失");
        assert_eq!(found.kind, MatchKind::Exact);
    }

    #[test]
    fn partial_match_when_no_exact() {
        let tables = vec![table(&[&["当期純利益又は当期純損失（△）", "△1,200"]])];
        let result = resolve(&tables, &["当期純利益"], &MemoryReporter::new());
        assert_eq!(result.get("当期純利益"), Some(-1200));
    }

    #[test]
    fn label_in_last_cell_only_does_not_match() {
        let row = Row::new(["1,000", "売上高"]);
        assert_eq!(match_row(&row, ["売上高"]), None);
        let single = Row::new(["売上高"]);
        assert_eq!(match_row(&single, ["売上高"]), None);
    }

    #[test]
    fn value_comes_from_last_cell() {
        let tables = vec![table(&[&["売上高", "1,500", "2,000"]])];
        let result = resolve(&tables, &["売上高"], &MemoryReporter::new());
        assert_eq!(result.get("売上高"), Some(2000));
    }

    #[test]
    fn first_row_wins() {
        let tables = vec![
            table(&[&["売上高", "100"]]),
            table(&[&["売上高", "200"], &["営業利益", "30"]]),
        ];
        let result = resolve(&tables, &["売上高", "営業利益"], &MemoryReporter::new());
        assert_eq!(result.get("売上高"), Some(100));
        assert_eq!(result.get("営業利益"), Some(30));
    }

    #[test]
    fn resolved_value_stable_under_more_rows() {
        let rows: &[&[&str]] = &[&["純資産合計", "10"], &["純資産合計", "99"]];
        let short = resolve(&[table(&rows[..1])], &["純資産合計"], &MemoryReporter::new());
        let long = resolve(&[table(rows)], &["純資産合計"], &MemoryReporter::new());
        assert_eq!(short.get("純資産合計"), long.get("純資産合計"));
    }

    #[test]
    fn unparsable_value_leaves_label_pending() {
        let reporter = MemoryReporter::new();
        let tables = vec![table(&[
            &["売上高", "－"],
            &["売上高", "△-5"],
            &["売上高", "1,000"],
        ])];
        let result = resolve(&tables, &["売上高"], &reporter);
        assert_eq!(result.get("売上高"), Some(1000));
        assert!(reporter.contains(Level::Debug, "cannot read"));
    }

    #[test]
    fn consumed_row_does_not_resolve_second_label() {
        // the first label matches but has no amount; the row is still spent
        let tables = vec![table(&[&["売上高", "営業利益", "－"]])];
        let result = resolve(&tables, &["売上高", "営業利益"], &MemoryReporter::new());
        assert!(result.is_all_null());
    }

    #[test]
    fn empty_rows_skipped() {
        let tables = vec![table(&[&[], &["営業利益", "300"]])];
        let result = resolve(&tables, &["営業利益"], &MemoryReporter::new());
        assert_eq!(result.get("営業利益"), Some(300));
    }
}
