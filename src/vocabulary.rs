//! Accounting labels searched for in EDINET financial statements.
//!
//! Labels are the literal Japanese row captions. Fund filings and operating
//! company filings caption semantically equivalent figures differently, so
//! both vocabularies are kept side by side.

/// 純資産合計 (total net assets)
pub const TOTAL_NET_ASSETS: &str = "純資産合計";
/// 負債純資産合計 (total liabilities and net assets)
pub const TOTAL_LIABILITIES_AND_NET_ASSETS: &str = "負債純資産合計";

// Fund layout income statement
pub const TOTAL_OPERATING_REVENUE: &str = "営業収益合計";
pub const OPERATING_PROFIT_OR_LOSS: &str = "営業利益又は営業損失";
pub const NET_INCOME_OR_LOSS: &str = "当期純利益又は当期純損失";

// Company layout income statement
pub const SALES: &str = "売上高";
pub const OPERATING_INCOME: &str = "営業利益";
pub const NET_INCOME: &str = "当期純利益";

pub const OPERATING_CASH_FLOW: &str = "営業活動によるキャッシュ・フロー";

pub const BALANCE_SHEET_LABELS: &[&str] = &[TOTAL_NET_ASSETS, TOTAL_LIABILITIES_AND_NET_ASSETS];

pub const FUND_INCOME_LABELS: &[&str] = &[
    TOTAL_OPERATING_REVENUE,
    OPERATING_PROFIT_OR_LOSS,
    NET_INCOME_OR_LOSS,
];

pub const COMPANY_INCOME_LABELS: &[&str] = &[SALES, OPERATING_INCOME, NET_INCOME];

pub const CASH_FLOW_LABELS: &[&str] = &[OPERATING_CASH_FLOW];

// Derived columns
pub const OPERATING_MARGIN: &str = "営業利益率";
pub const EQUITY_RATIO: &str = "自己資本比率";
