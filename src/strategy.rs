//! Extraction strategies for the known filing layouts.
//!
//! A strategy is an ordered list of block queries. The processor tries
//! strategies in order and falls back to the next one only while nothing has
//! been extracted.

use crate::model::TextBlock;
use crate::vocabulary::{
    BALANCE_SHEET_LABELS, CASH_FLOW_LABELS, COMPANY_INCOME_LABELS, FUND_INCOME_LABELS,
};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Layout {
    /// Investment fund statements (non-consolidated)
    Fund,
    /// Operating company statements (consolidated)
    Company,
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Layout::Fund => f.write_str("fund"),
            Layout::Company => f.write_str("company"),
        }
    }
}

/// One block with the labels to look for in it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockQuery {
    pub block: TextBlock,
    pub labels: &'static [&'static str],
}

impl BlockQuery {
    pub const fn new(block: TextBlock, labels: &'static [&'static str]) -> Self {
        Self { block, labels }
    }

    /// Operating cash flow, attempted for every filing.
    pub const fn cash_flow() -> Self {
        Self::new(TextBlock::ConsolidatedStatementOfCashFlows, CASH_FLOW_LABELS)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Strategy {
    pub layout: Layout,
    pub queries: Vec<BlockQuery>,
}

impl Strategy {
    pub fn fund() -> Self {
        Self {
            layout: Layout::Fund,
            queries: vec![
                BlockQuery::new(TextBlock::BalanceSheet, BALANCE_SHEET_LABELS),
                BlockQuery::new(
                    TextBlock::StatementOfIncomeAndRetainedEarnings,
                    FUND_INCOME_LABELS,
                ),
            ],
        }
    }

    pub fn company() -> Self {
        Self {
            layout: Layout::Company,
            queries: vec![
                BlockQuery::new(TextBlock::ConsolidatedBalanceSheet, BALANCE_SHEET_LABELS),
                BlockQuery::new(
                    TextBlock::ConsolidatedStatementOfIncome,
                    COMPANY_INCOME_LABELS,
                ),
            ],
        }
    }

    /// Fund layout first, then operating company layout.
    pub fn defaults() -> Vec<Self> {
        vec![Self::fund(), Self::company()]
    }

    pub fn blocks(&self) -> impl Iterator<Item = TextBlock> + '_ {
        self.queries.iter().map(|q| q.block)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vocabulary::*;

    #[test]
    fn fund_before_company() {
        let strategies = Strategy::defaults();
        assert_eq!(strategies[0].layout, Layout::Fund);
        assert_eq!(strategies[1].layout, Layout::Company);
    }

    #[test]
    fn both_layouts_share_balance_sheet_labels() {
        let fund = Strategy::fund();
        let company = Strategy::company();
        assert_eq!(fund.queries[0].labels, company.queries[0].labels);
        assert_eq!(fund.queries[0].labels, &[TOTAL_NET_ASSETS, TOTAL_LIABILITIES_AND_NET_ASSETS]);
        assert_eq!(
            company.blocks().collect::<Vec<_>>(),
            vec![
                TextBlock::ConsolidatedBalanceSheet,
                TextBlock::ConsolidatedStatementOfIncome
            ]
        );
    }
}
