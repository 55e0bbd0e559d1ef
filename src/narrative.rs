//! Composing the insight scalars into the fixed report narrative.
//!
//! This is a pure formatting layer: given the [`Insights`] and the
//! [`ModelMetrics`], it produces the ordered [`Report`] model with the four
//! fixed section headings. Ratios and scores are printed with two decimals;
//! monetary totals use thousands-separated currency.

use crate::insights::Insights;
use crate::metrics::ModelMetrics;
use crate::model::{Block, Report, Section};

/// Title shown at the top of the rendered document.
pub const REPORT_TITLE: &str = "Superstore Project Final Report";

/// Formats a monetary value as `$1,234,567.89`.
///
/// Negative values keep the sign after the currency symbol (`$-5.00`),
/// matching common spreadsheet-style formatting.
pub fn currency(value: f64) -> String {
    let cents = (value.abs() * 100.0).round() as u128;
    let sign = if value < 0.0 && cents > 0 { "-" } else { "" };
    let whole = cents / 100;
    let frac = cents % 100;

    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!("${}{}.{:02}", sign, grouped, frac)
}

/// Builds the full report model from the computed insights and the
/// externally supplied model metrics.
pub fn compose(insights: &Insights, metrics: &ModelMetrics) -> Report {
    Report::new(REPORT_TITLE)
        .with_preamble_block(Block::text(
            "This report summarizes findings from the Superstore Sales Dataset analysis, \
             covering data exploration, cleaning, business analysis, and machine learning \
             predictions.",
        ))
        .with_preamble_block(Block::spacer())
        .with_section(data_exploration(insights))
        .with_section(business_analysis(insights))
        .with_section(machine_learning(metrics))
        .with_section(recommendations())
}

fn data_exploration(insights: &Insights) -> Section {
    Section::new("1. Data Exploration Insights")
        .with_block(Block::text(format!(
            "- Distributions: Sales (skewness: {:.2}) and Profit (skewness: {:.2}) are \
             right-skewed, indicating outliers.",
            insights.sales_skew, insights.profit_skew
        )))
        .with_block(Block::text(format!(
            "- Categorical: Most orders use {} shipping, are in the {} segment, and from \
             the {} region.",
            insights.top_ship_mode, insights.top_segment, insights.top_region
        )))
        .with_block(Block::text(format!(
            "- Correlation: Sales and Profit have a moderate positive correlation ({:.2}).",
            insights.sales_profit_corr
        )))
        .with_block(Block::spacer())
}

fn business_analysis(insights: &Insights) -> Section {
    Section::new("2. Business Analysis Insights")
        .with_block(Block::text(format!(
            "- Overall Metrics: Total Sales: {}, Total Profit: {}, Profit Margin: {:.2}%.",
            currency(insights.total_sales),
            currency(insights.total_profit),
            insights.profit_margin
        )))
        .with_block(Block::text(format!(
            "- Top Category by Sales: {} ({}).",
            insights.top_category_by_sales.label,
            currency(insights.top_category_by_sales.value)
        )))
        .with_block(Block::text(format!(
            "- Most Profitable Category: {} ({}).",
            insights.top_category_by_profit.label,
            currency(insights.top_category_by_profit.value)
        )))
        .with_block(Block::text(format!(
            "- Most Profitable Region: {} ({}).",
            insights.top_region_by_profit.label,
            currency(insights.top_region_by_profit.value)
        )))
        .with_block(Block::text(format!(
            "- Most Profitable Segment: {} ({}).",
            insights.top_segment_by_profit.label,
            currency(insights.top_segment_by_profit.value)
        )))
        .with_block(Block::text(
            "- Discount Impact: Higher discounts (above 50%) reduce average profit.",
        ))
        .with_block(Block::spacer())
}

fn machine_learning(metrics: &ModelMetrics) -> Section {
    Section::new("3. Machine Learning Insights")
        .with_block(Block::text(format!(
            "- Linear Regression R\u{b2}: {:.2} - Moderate fit, limited by non-linear \
             relationships.",
            metrics.linear_r2
        )))
        .with_block(Block::text(format!(
            "- Random Forest R\u{b2}: {:.2} - Strong fit, capturing complex patterns.",
            metrics.forest_r2
        )))
        .with_block(Block::text(format!(
            "- Top Features: {}.",
            metrics.top_features.join(", ")
        )))
        .with_block(Block::spacer())
}

// Static text, independent of the computed scalars. The named category and
// region are narrative claims and are not cross-checked against the computed
// top values.
fn recommendations() -> Section {
    Section::new("4. Recommendations")
        .with_block(Block::text(
            "- Focus marketing on high-profit categories (e.g., Technology) and regions \
             (e.g., West).",
        ))
        .with_block(Block::text(
            "- Optimize discount strategies to avoid profit loss above 50% discounts.",
        ))
        .with_block(Block::text(
            "- Deploy Random Forest model for profit prediction, refining with more data \
             or tuning.",
        ))
}
