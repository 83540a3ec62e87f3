//! Percentage ratios derived from extracted figures.
//!
//! A ratio exists only when both inputs are present and the denominator is
//! non-zero. Results are rounded half away from zero to two decimals.

use crate::model::Figures;
use crate::vocabulary::{
    NET_INCOME_OR_LOSS, OPERATING_INCOME, SALES, TOTAL_LIABILITIES_AND_NET_ASSETS,
    TOTAL_NET_ASSETS, TOTAL_OPERATING_REVENUE,
};

/// `numerator / denominator * 100`, rounded to two decimals.
pub fn percentage(numerator: i64, denominator: i64) -> Option<f64> {
    if denominator == 0 {
        return None;
    }
    Some(round2(numerator as f64 / denominator as f64 * 100.0))
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn ratio_of(figures: &Figures, numerator: &str, denominator: &str) -> Option<f64> {
    percentage(figures.get(numerator)?, figures.get(denominator)?)
}

/// Fund layout operating margin: net income or loss over total operating revenue.
pub fn fund_operating_margin(figures: &Figures) -> Option<f64> {
    ratio_of(figures, NET_INCOME_OR_LOSS, TOTAL_OPERATING_REVENUE)
}

/// Company layout operating margin: operating income over sales.
pub fn company_operating_margin(figures: &Figures) -> Option<f64> {
    ratio_of(figures, OPERATING_INCOME, SALES)
}

/// Total net assets over total liabilities and net assets.
pub fn equity_ratio(figures: &Figures) -> Option<f64> {
    ratio_of(figures, TOTAL_NET_ASSETS, TOTAL_LIABILITIES_AND_NET_ASSETS)
}
