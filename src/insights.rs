//! Aggregate insight scalars derived from the dataset.
//!
//! The dataset is expected to carry numeric `Sales` and `Profit` columns.
//! Categorical dimensions (`Segment`, `Region`, `Ship Mode`, `Category`) may
//! be present as plain string columns or, when the data has been prepared
//! for modeling, as groups of one-hot encoded indicator columns sharing a
//! `<Dimension>_` prefix. Each dimension is resolved to one of those two
//! shapes before aggregation; single-value mode lookups additionally fall
//! back to a hard-coded label when a dimension is absent entirely, while
//! group summaries fail instead.

use std::collections::BTreeMap;

use polars::prelude::*;

use crate::error::ReportError;

/// The categorical dimensions the report aggregates over.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Dimension {
    Segment,
    Region,
    ShipMode,
    Category,
}

impl Dimension {
    /// Name of the plain categorical column for this dimension.
    pub const fn column(self) -> &'static str {
        match self {
            Dimension::Segment => "Segment",
            Dimension::Region => "Region",
            Dimension::ShipMode => "Ship Mode",
            Dimension::Category => "Category",
        }
    }

    /// Column-name prefix used by the one-hot encoded representation.
    pub const fn prefix(self) -> &'static str {
        match self {
            Dimension::Segment => "Segment_",
            Dimension::Region => "Region_",
            Dimension::ShipMode => "Ship Mode_",
            Dimension::Category => "Category_",
        }
    }

    /// Hard-coded label assumed when the dimension is absent entirely.
    ///
    /// Only the mode lookups carry a fallback; `Category` is used solely for
    /// group summaries and has none.
    pub const fn fallback(self) -> Option<&'static str> {
        match self {
            Dimension::Segment => Some("Consumer"),
            Dimension::Region => Some("West"),
            Dimension::ShipMode => Some("Standard Class"),
            Dimension::Category => None,
        }
    }
}

/// How a categorical dimension is represented in the dataset.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CategoricalSource {
    /// A plain string column with the dimension's name.
    Plain(String),
    /// One-hot encoded indicator columns, in schema order, sharing `prefix`.
    Encoded {
        prefix: String,
        columns: Vec<String>,
    },
    /// Neither representation exists.
    Missing,
}

/// Resolves the representation of `dimension` in `df`.
///
/// A plain column wins over encoded columns when both exist.
pub fn resolve(df: &DataFrame, dimension: Dimension) -> CategoricalSource {
    let schema = df.schema();
    if schema.iter().any(|(name, _)| name.as_str() == dimension.column()) {
        return CategoricalSource::Plain(dimension.column().to_string());
    }
    let encoded: Vec<String> = schema
        .iter()
        .filter(|(name, _)| name.as_str().starts_with(dimension.prefix()))
        .map(|(name, _)| name.to_string())
        .collect();
    if encoded.is_empty() {
        CategoricalSource::Missing
    } else {
        CategoricalSource::Encoded {
            prefix: dimension.prefix().to_string(),
            columns: encoded,
        }
    }
}

/// Summed metrics for one distinct value of a grouping dimension.
#[derive(Clone, Debug, PartialEq)]
pub struct GroupTotals {
    pub label: String,
    pub sales: f64,
    pub profit: f64,
}

/// A group label together with the metric value that made it the top group.
#[derive(Clone, Debug, PartialEq)]
pub struct TopGroup {
    pub label: String,
    pub value: f64,
}

/// The full set of aggregate scalars interpolated into the report narrative.
#[derive(Clone, Debug)]
pub struct Insights {
    pub sales_skew: f64,
    pub profit_skew: f64,
    pub sales_profit_corr: f64,
    pub top_segment: String,
    pub top_region: String,
    pub top_ship_mode: String,
    pub total_sales: f64,
    pub total_profit: f64,
    pub profit_margin: f64,
    pub top_category_by_sales: TopGroup,
    pub top_category_by_profit: TopGroup,
    pub top_region_by_profit: TopGroup,
    pub top_segment_by_profit: TopGroup,
}

impl Insights {
    /// Computes every aggregate scalar from the loaded dataset.
    ///
    /// Fails when `Sales` or `Profit` is missing, or when a grouping
    /// dimension (`Category`, `Region`, `Segment`) has no categorical
    /// signal at all.
    pub fn from_dataframe(df: &DataFrame) -> Result<Insights, ReportError> {
        let sales = numeric_column(df, "Sales")?;
        let profit = numeric_column(df, "Profit")?;

        let sales_values: Vec<f64> = sales.iter().flatten().copied().collect();
        let profit_values: Vec<f64> = profit.iter().flatten().copied().collect();

        let total_sales: f64 = sales_values.iter().sum();
        let total_profit: f64 = profit_values.iter().sum();

        let category_groups = group_totals(df, Dimension::Category)?;
        let region_groups = group_totals(df, Dimension::Region)?;
        let segment_groups = group_totals(df, Dimension::Segment)?;

        Ok(Insights {
            sales_skew: skewness(&sales_values),
            profit_skew: skewness(&profit_values),
            sales_profit_corr: pearson(&sales, &profit),
            top_segment: mode_or_fallback(df, Dimension::Segment)?,
            top_region: mode_or_fallback(df, Dimension::Region)?,
            top_ship_mode: mode_or_fallback(df, Dimension::ShipMode)?,
            total_sales,
            total_profit,
            profit_margin: total_profit / total_sales * 100.0,
            top_category_by_sales: top_by(&category_groups, |g| g.sales),
            top_category_by_profit: top_by(&category_groups, |g| g.profit),
            top_region_by_profit: top_by(&region_groups, |g| g.profit),
            top_segment_by_profit: top_by(&segment_groups, |g| g.profit),
        })
    }
}

/// Most frequent label for `dimension`, or its hard-coded fallback.
pub fn mode_or_fallback(df: &DataFrame, dimension: Dimension) -> Result<String, ReportError> {
    let source = resolve(df, dimension);
    let labels = match source {
        CategoricalSource::Missing => {
            return dimension
                .fallback()
                .map(str::to_string)
                .ok_or_else(|| ReportError::MissingCategorical(dimension.column().to_string()));
        }
        other => row_labels(df, &other)?,
    };

    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for label in labels.into_iter().flatten() {
        *counts.entry(label).or_insert(0) += 1;
    }

    // Ties resolve to the lexicographically smallest label; BTreeMap
    // iteration order plus the strict comparison guarantee it.
    let mut best: Option<(String, usize)> = None;
    for (label, count) in counts {
        match &best {
            Some((_, best_count)) if count <= *best_count => {}
            _ => best = Some((label, count)),
        }
    }

    match best {
        Some((label, _)) => Ok(label),
        None => dimension
            .fallback()
            .map(str::to_string)
            .ok_or_else(|| ReportError::MissingCategorical(dimension.column().to_string())),
    }
}

/// Sums `Sales` and `Profit` per distinct value of `dimension`.
///
/// Unlike [`mode_or_fallback`] there is no fallback path here: a dimension
/// without any categorical signal is an error.
pub fn group_totals(df: &DataFrame, dimension: Dimension) -> Result<Vec<GroupTotals>, ReportError> {
    let source = resolve(df, dimension);
    if source == CategoricalSource::Missing {
        return Err(ReportError::MissingCategorical(
            dimension.column().to_string(),
        ));
    }

    let labels = row_labels(df, &source)?;
    let sales = numeric_column(df, "Sales")?;
    let profit = numeric_column(df, "Profit")?;

    let mut totals: BTreeMap<String, (f64, f64)> = BTreeMap::new();
    for (row, label) in labels.into_iter().enumerate() {
        let Some(label) = label else { continue };
        let entry = totals.entry(label).or_insert((0.0, 0.0));
        entry.0 += sales.get(row).copied().flatten().unwrap_or(0.0);
        entry.1 += profit.get(row).copied().flatten().unwrap_or(0.0);
    }

    if totals.is_empty() {
        return Err(ReportError::MissingCategorical(
            dimension.column().to_string(),
        ));
    }

    log::debug!(
        "grouped '{}' into {} distinct labels",
        dimension.column(),
        totals.len()
    );

    Ok(totals
        .into_iter()
        .map(|(label, (sales, profit))| GroupTotals {
            label,
            sales,
            profit,
        })
        .collect())
}

/// Row with the maximum value of `metric`; ties keep the earlier row.
///
/// `groups` is sorted by label, so ties resolve deterministically.
fn top_by<F>(groups: &[GroupTotals], metric: F) -> TopGroup
where
    F: Fn(&GroupTotals) -> f64,
{
    let mut best = TopGroup {
        label: String::new(),
        value: f64::NEG_INFINITY,
    };
    for group in groups {
        let value = metric(group);
        if value > best.value {
            best = TopGroup {
                label: group.label.clone(),
                value,
            };
        }
    }
    best
}

/// Per-row labels for a resolved categorical source.
///
/// Plain columns yield their string values directly. Encoded groups yield,
/// for each row, the name of the indicator column holding the row's maximum
/// value with the dimension prefix stripped. Rows with no usable value map
/// to `None` and are skipped by the aggregations.
fn row_labels(
    df: &DataFrame,
    source: &CategoricalSource,
) -> Result<Vec<Option<String>>, ReportError> {
    match source {
        CategoricalSource::Plain(name) => {
            let column = df.column(name.as_str())?;
            let strings = column.as_materialized_series().str()?;
            Ok(strings
                .iter()
                .map(|value| value.map(str::to_string))
                .collect())
        }
        CategoricalSource::Encoded { prefix, columns: names } => {
            let mut decoded_names = Vec::with_capacity(names.len());
            let mut columns = Vec::with_capacity(names.len());
            for name in names {
                let label = name
                    .strip_prefix(prefix.as_str())
                    .unwrap_or(name.as_str())
                    .to_string();
                decoded_names.push(label);
                columns.push(numeric_column(df, name)?);
            }

            let mut labels = Vec::with_capacity(df.height());
            for row in 0..df.height() {
                let mut best: Option<(usize, f64)> = None;
                for (index, column) in columns.iter().enumerate() {
                    let Some(value) = column.get(row).copied().flatten() else {
                        continue;
                    };
                    match best {
                        Some((_, best_value)) if value <= best_value => {}
                        _ => best = Some((index, value)),
                    }
                }
                labels.push(best.map(|(index, _)| decoded_names[index].clone()));
            }
            Ok(labels)
        }
        CategoricalSource::Missing => Ok(vec![None; df.height()]),
    }
}

/// Extracts a column as `f64` values, preserving row alignment.
fn numeric_column(df: &DataFrame, name: &str) -> Result<Vec<Option<f64>>, ReportError> {
    let column = df
        .column(name)
        .map_err(|_| ReportError::MissingColumn(name.to_string()))?;
    let series = column.as_materialized_series().cast(&DataType::Float64)?;
    Ok(series.f64()?.iter().collect())
}

/// Bias-corrected sample skewness: `n / ((n-1)(n-2)) * sum(((x - mean) / std)^3)`
/// with the standard deviation computed over `n - 1`.
pub fn skewness(values: &[f64]) -> f64 {
    let n = values.len() as f64;
    if n < 3.0 {
        return 0.0;
    }

    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0);
    let std = variance.sqrt();
    if std == 0.0 {
        return 0.0;
    }

    let sum_cubed_deviations: f64 = values
        .iter()
        .map(|v| {
            let deviation = (v - mean) / std;
            deviation * deviation * deviation
        })
        .sum();

    (n / ((n - 1.0) * (n - 2.0))) * sum_cubed_deviations
}

/// Pearson correlation over rows where both columns have a value.
pub fn pearson(xs: &[Option<f64>], ys: &[Option<f64>]) -> f64 {
    let pairs: Vec<(f64, f64)> = xs
        .iter()
        .zip(ys.iter())
        .filter_map(|(x, y)| Some((((*x)?), ((*y)?))))
        .collect();

    if pairs.len() < 2 {
        return 0.0;
    }

    let n = pairs.len() as f64;
    let mean_x: f64 = pairs.iter().map(|(x, _)| x).sum::<f64>() / n;
    let mean_y: f64 = pairs.iter().map(|(_, y)| y).sum::<f64>() / n;

    let numerator: f64 = pairs
        .iter()
        .map(|(x, y)| (x - mean_x) * (y - mean_y))
        .sum();
    let var_x: f64 = pairs.iter().map(|(x, _)| (x - mean_x).powi(2)).sum();
    let var_y: f64 = pairs.iter().map(|(_, y)| (y - mean_y).powi(2)).sum();

    if var_x == 0.0 || var_y == 0.0 {
        return 0.0;
    }

    numerator / (var_x.sqrt() * var_y.sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::df;

    fn sample_frame() -> DataFrame {
        df!(
            "Category" => ["A", "A", "B"],
            "Region" => ["West", "East", "West"],
            "Segment" => ["Consumer", "Corporate", "Consumer"],
            "Ship Mode" => ["Standard Class", "Second Class", "Standard Class"],
            "Sales" => [100.0, 50.0, 200.0],
            "Profit" => [10.0, 20.0, 5.0],
        )
        .unwrap()
    }

    #[test]
    fn group_sums_match_manual_totals() {
        let df = sample_frame();
        let groups = group_totals(&df, Dimension::Category).unwrap();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].label, "A");
        assert_eq!(groups[0].sales, 150.0);
        assert_eq!(groups[0].profit, 30.0);
        assert_eq!(groups[1].label, "B");
        assert_eq!(groups[1].profit, 5.0);

        let insights = Insights::from_dataframe(&df).unwrap();
        assert_eq!(insights.top_category_by_profit.label, "A");
        assert_eq!(insights.top_category_by_profit.value, 30.0);
        assert_eq!(insights.top_category_by_sales.label, "B");
        assert_eq!(insights.top_category_by_sales.value, 200.0);
    }

    #[test]
    fn encoded_segment_matches_plain_mode() {
        let plain = df!(
            "Segment" => ["Consumer", "Corporate", "Consumer"],
            "Sales" => [1.0, 2.0, 3.0],
            "Profit" => [1.0, 2.0, 3.0],
        )
        .unwrap();
        let encoded = df!(
            "Segment_Consumer" => [1i64, 0, 1],
            "Segment_Corporate" => [0i64, 1, 0],
            "Sales" => [1.0, 2.0, 3.0],
            "Profit" => [1.0, 2.0, 3.0],
        )
        .unwrap();

        let from_plain = mode_or_fallback(&plain, Dimension::Segment).unwrap();
        let from_encoded = mode_or_fallback(&encoded, Dimension::Segment).unwrap();
        assert_eq!(from_plain, "Consumer");
        assert_eq!(from_encoded, from_plain);
    }

    #[test]
    fn encoded_group_totals_match_plain_totals() {
        let encoded = df!(
            "Category_Furniture" => [1i64, 0, 1],
            "Category_Technology" => [0i64, 1, 0],
            "Sales" => [100.0, 50.0, 200.0],
            "Profit" => [10.0, 20.0, 5.0],
        )
        .unwrap();

        let groups = group_totals(&encoded, Dimension::Category).unwrap();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].label, "Furniture");
        assert_eq!(groups[0].sales, 300.0);
        assert_eq!(groups[0].profit, 15.0);
        assert_eq!(groups[1].label, "Technology");
        assert_eq!(groups[1].profit, 20.0);
    }

    #[test]
    fn missing_ship_mode_falls_back() {
        let df = df!(
            "Sales" => [1.0, 2.0],
            "Profit" => [1.0, 2.0],
        )
        .unwrap();
        let mode = mode_or_fallback(&df, Dimension::ShipMode).unwrap();
        assert_eq!(mode, "Standard Class");
    }

    #[test]
    fn missing_grouping_dimension_is_an_error() {
        let df = df!(
            "Sales" => [1.0, 2.0],
            "Profit" => [1.0, 2.0],
        )
        .unwrap();
        let err = group_totals(&df, Dimension::Category).unwrap_err();
        assert!(matches!(err, ReportError::MissingCategorical(name) if name == "Category"));
    }

    #[test]
    fn statistics_are_row_order_invariant() {
        let forward = vec![Some(1.0), Some(2.0), Some(3.0), Some(10.0)];
        let forward_other = vec![Some(2.0), Some(4.0), Some(6.0), Some(22.0)];
        let reversed: Vec<_> = forward.iter().rev().copied().collect();
        let reversed_other: Vec<_> = forward_other.iter().rev().copied().collect();

        let flat: Vec<f64> = forward.iter().flatten().copied().collect();
        let flat_reversed: Vec<f64> = reversed.iter().flatten().copied().collect();

        assert!((skewness(&flat) - skewness(&flat_reversed)).abs() < 1e-12);
        assert!(
            (pearson(&forward, &forward_other) - pearson(&reversed, &reversed_other)).abs()
                < 1e-12
        );
    }

    #[test]
    fn skewness_matches_known_value() {
        // Symmetric data has zero skew.
        assert_eq!(skewness(&[1.0, 2.0, 3.0]), 0.0);
        // A long right tail skews positive.
        assert!(skewness(&[1.0, 1.0, 1.0, 1.0, 100.0]) > 1.0);
    }

    #[test]
    fn pearson_of_linear_data_is_one() {
        let xs = vec![Some(1.0), Some(2.0), Some(3.0)];
        let ys = vec![Some(2.0), Some(4.0), Some(6.0)];
        let corr = pearson(&xs, &ys);
        assert!((corr - 1.0).abs() < 1e-12);
    }

    #[test]
    fn plain_column_wins_over_encoded() {
        let df = df!(
            "Region" => ["West", "East"],
            "Region_South" => [1i64, 1],
            "Sales" => [1.0, 2.0],
            "Profit" => [1.0, 2.0],
        )
        .unwrap();
        assert_eq!(
            resolve(&df, Dimension::Region),
            CategoricalSource::Plain("Region".to_string())
        );
    }

    #[test]
    fn insights_cover_the_whole_pipeline() {
        let insights = Insights::from_dataframe(&sample_frame()).unwrap();
        assert_eq!(insights.total_sales, 350.0);
        assert_eq!(insights.total_profit, 35.0);
        assert_eq!(insights.profit_margin, 10.0);
        assert_eq!(insights.top_segment, "Consumer");
        assert_eq!(insights.top_region, "West");
        assert_eq!(insights.top_ship_mode, "Standard Class");
        assert_eq!(insights.top_region_by_profit.label, "East");
        assert_eq!(insights.top_region_by_profit.value, 20.0);
    }
}
