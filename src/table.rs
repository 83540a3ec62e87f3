//! Tables embedded in a text block.
//!
//! Block text is an HTML fragment. Every `<table>` (nested ones included) is
//! returned in document order with its `<tr>` rows. A row's cells are the
//! trimmed texts of its `<td>` elements followed by those of its `<th>`
//! elements, so a trailing header cell becomes the row's last cell.

use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;

static TABLE_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("table").expect("valid table selector"));
static TR_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("tr").expect("valid tr selector"));
static TD_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("td").expect("valid td selector"));
static TH_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("th").expect("valid th selector"));

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    pub cells: Vec<String>,
}

impl Row {
    pub fn new<S: Into<String>>(cells: impl IntoIterator<Item = S>) -> Self {
        Self {
            cells: cells.into_iter().map(Into::into).collect(),
        }
    }

    /// Cell the row's value is read from.
    pub fn last_cell(&self) -> Option<&str> {
        self.cells.last().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    pub rows: Vec<Row>,
}

impl Table {
    pub fn new(rows: Vec<Row>) -> Self {
        Self { rows }
    }
}

/// Splits block text into tables. No tables is an empty vector.
pub fn tokenize(block_text: &str) -> Vec<Table> {
    let fragment = Html::parse_fragment(block_text);

    fragment
        .select(&TABLE_SELECTOR)
        .map(|table| Table {
            rows: table.select(&TR_SELECTOR).map(row_cells).collect(),
        })
        .collect()
}

fn row_cells(tr: ElementRef<'_>) -> Row {
    let data = tr.select(&TD_SELECTOR).map(cell_text);
    let header = tr.select(&TH_SELECTOR).map(cell_text);
    Row {
        cells: data.chain(header).collect(),
    }
}

fn cell_text(cell: ElementRef<'_>) -> String {
    cell.text().collect::<String>().trim().to_string()
}
