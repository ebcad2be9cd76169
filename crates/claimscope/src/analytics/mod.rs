//! Metric calculators over the summary tables.
//!
//! All functions are pure: they borrow a slice of rows, never mutate it, and
//! return scalars or borrowed subsets. Aggregates over an empty slice are a
//! defined error rather than NaN.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::error::{DashboardError, DashboardResult};
use crate::models::{Row, Table};

/// Sum of `column` over all rows.
pub fn sum_column<R: Row>(rows: &[R], column: R::Column) -> DashboardResult<f64> {
    ensure_non_empty(rows, column)?;
    Ok(rows.iter().map(|r| r.value(column)).sum())
}

/// Arithmetic mean of `column`.
pub fn mean_column<R: Row>(rows: &[R], column: R::Column) -> DashboardResult<f64> {
    let total = sum_column(rows, column)?;
    Ok(total / rows.len() as f64)
}

/// Row with the largest value of `column`; the earliest row wins ties.
pub fn max_column<R: Row>(rows: &[R], column: R::Column) -> DashboardResult<(&R, f64)> {
    extreme(rows, column, Ordering::Greater)
}

/// Row with the smallest value of `column`; the earliest row wins ties.
pub fn min_column<R: Row>(rows: &[R], column: R::Column) -> DashboardResult<(&R, f64)> {
    extreme(rows, column, Ordering::Less)
}

/// `part / whole * 100`.
pub fn percentage(part: f64, whole: f64) -> DashboardResult<f64> {
    if whole == 0.0 {
        return Err(DashboardError::DivisionByZero { part });
    }
    Ok(part / whole * 100.0)
}

/// `a - b`, used for cross-category comparisons.
pub fn difference(a: f64, b: f64) -> f64 {
    a - b
}

/// The `n` rows with the largest (or, if `ascending`, smallest) `column`.
///
/// Ordering is stable: rows with equal values keep their input order.
pub fn top_n<R: Row>(rows: &[R], column: R::Column, n: usize, ascending: bool) -> Vec<&R> {
    let mut ranked = sort_by_column(rows, column, ascending);
    ranked.truncate(n);
    ranked
}

/// All rows stably sorted by `column`.
pub fn sort_by_column<R: Row>(rows: &[R], column: R::Column, ascending: bool) -> Vec<&R> {
    let mut sorted: Vec<&R> = rows.iter().collect();
    sorted.sort_by(|a, b| {
        let ord = a.value(column).total_cmp(&b.value(column));
        if ascending {
            ord
        } else {
            ord.reverse()
        }
    });
    sorted
}

/// Rows whose `column` lies inside `range` (inclusive), in input order.
pub fn filter_range<R: Row + Clone>(rows: &[R], column: R::Column, range: &CostRange) -> Table<R> {
    rows.iter()
        .filter(|r| range.contains(r.value(column)))
        .cloned()
        .collect()
}

fn ensure_non_empty<R: Row>(rows: &[R], column: R::Column) -> DashboardResult<()> {
    if rows.is_empty() {
        return Err(DashboardError::EmptyTable {
            column: column.to_string(),
        });
    }
    Ok(())
}

fn extreme<R: Row>(rows: &[R], column: R::Column, wanted: Ordering) -> DashboardResult<(&R, f64)> {
    ensure_non_empty(rows, column)?;
    let mut best = &rows[0];
    let mut best_value = best.value(column);
    for row in &rows[1..] {
        let value = row.value(column);
        if value.total_cmp(&best_value) == wanted {
            best = row;
            best_value = value;
        }
    }
    Ok((best, best_value))
}

/// Inclusive numeric range used to filter procedures by average cost.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CostRange {
    min: f64,
    max: f64,
}

impl CostRange {
    /// Validated range; bounds must be finite, non-negative and ordered.
    pub fn new(min: f64, max: f64) -> DashboardResult<Self> {
        if !min.is_finite() || !max.is_finite() || min < 0.0 || min > max {
            return Err(DashboardError::InvalidRange { min, max });
        }
        Ok(Self { min, max })
    }

    /// `[0, max(column)]` over `rows`, or `[0, 0]` for an empty slice.
    pub fn covering<R: Row>(rows: &[R], column: R::Column) -> Self {
        let max = max_column(rows, column).map(|(_, v)| v).unwrap_or(0.0).max(0.0);
        Self { min: 0.0, max }
    }

    /// Lower bound.
    pub fn min(&self) -> f64 {
        self.min
    }

    /// Upper bound.
    pub fn max(&self) -> f64 {
        self.max
    }

    /// Whether `value` lies within the range, bounds included.
    pub fn contains(&self, value: f64) -> bool {
        self.min <= value && value <= self.max
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Datasets, ProcedureColumn, ProcedureRow, ProcedureSummary, RegionColumn};

    fn names(rows: &[&ProcedureRow]) -> Vec<String> {
        rows.iter().map(|r| r.procedure.clone()).collect()
    }

    fn procedure(name: &str, total: u64, avg_paid: f64) -> ProcedureRow {
        ProcedureRow {
            procedure: name.to_string(),
            total,
            avg_paid,
        }
    }

    #[test]
    fn test_sum_and_mean() {
        let data = Datasets::build();
        let total = sum_column(data.fraud.rows(), crate::models::FraudColumn::Total).unwrap();
        assert_eq!(total, 20_000_000.0);

        let mean = mean_column(data.regions.rows(), RegionColumn::TotalClaims).unwrap();
        assert!((mean - 1_538_461.538).abs() < 0.01);
    }

    #[test]
    fn test_aggregates_on_empty_table() {
        let empty = ProcedureSummary::empty();
        assert!(matches!(
            sum_column(empty.rows(), ProcedureColumn::AvgPaid),
            Err(DashboardError::EmptyTable { .. })
        ));
        assert!(matches!(
            mean_column(empty.rows(), ProcedureColumn::Total),
            Err(DashboardError::EmptyTable { .. })
        ));
        assert!(max_column(empty.rows(), ProcedureColumn::Total).is_err());
        assert!(min_column(empty.rows(), ProcedureColumn::Total).is_err());
    }

    #[test]
    fn test_percentage() {
        let rate = percentage(1_993_214.0, 20_000_000.0).unwrap();
        assert!((rate - 9.96607).abs() < 1e-4);
        assert!(matches!(
            percentage(5.0, 0.0),
            Err(DashboardError::DivisionByZero { .. })
        ));
    }

    #[test]
    fn test_difference() {
        assert!((difference(14_618.33, 14_576.47) - 41.86).abs() < 1e-9);
        assert!(difference(1.0, 3.0) < 0.0);
    }

    #[test]
    fn test_top_n_most_expensive() {
        let data = Datasets::build();
        let top = top_n(data.procedures.rows(), ProcedureColumn::AvgPaid, 5, false);
        assert_eq!(
            names(&top),
            vec![
                "Heart Bypass Surgery",
                "Knee Replacement",
                "Appendectomy",
                "Childbirth (C-Section)",
                "Cataract Surgery",
            ]
        );
    }

    #[test]
    fn test_top_n_ascending() {
        let data = Datasets::build();
        let cheapest = top_n(data.procedures.rows(), ProcedureColumn::AvgPaid, 3, true);
        assert_eq!(
            names(&cheapest),
            vec!["Dental Cleaning", "Physical Therapy (per session)", "Annual Checkup"]
        );
    }

    #[test]
    fn test_top_n_stable_on_ties() {
        let rows = vec![
            procedure("a", 5, 1.0),
            procedure("b", 9, 1.0),
            procedure("c", 5, 1.0),
            procedure("d", 9, 1.0),
        ];
        let top = top_n(&rows, ProcedureColumn::Total, 3, false);
        assert_eq!(names(&top), vec!["b", "d", "a"]);
        let bottom = top_n(&rows, ProcedureColumn::Total, 3, true);
        assert_eq!(names(&bottom), vec!["a", "c", "b"]);
    }

    #[test]
    fn test_top_n_bounds() {
        let data = Datasets::build();
        assert_eq!(top_n(data.procedures.rows(), ProcedureColumn::Total, 100, false).len(), 15);
        assert!(top_n(data.procedures.rows(), ProcedureColumn::Total, 0, false).is_empty());
        assert!(top_n(ProcedureSummary::empty().rows(), ProcedureColumn::Total, 3, false).is_empty());
    }

    #[test]
    fn test_region_extremes() {
        let data = Datasets::build();
        let (max_row, max) = max_column(data.regions.rows(), RegionColumn::TotalClaims).unwrap();
        let (min_row, min) = min_column(data.regions.rows(), RegionColumn::TotalClaims).unwrap();
        assert_eq!((max_row.region.as_str(), max), ("Najran", 1_541_848.0));
        assert_eq!((min_row.region.as_str(), min), ("Hail", 1_535_090.0));
    }

    #[test]
    fn test_extremes_prefer_first_on_ties() {
        let rows = vec![procedure("a", 7, 1.0), procedure("b", 7, 1.0)];
        assert_eq!(max_column(&rows, ProcedureColumn::Total).unwrap().0.procedure, "a");
        assert_eq!(min_column(&rows, ProcedureColumn::Total).unwrap().0.procedure, "a");
    }

    #[test]
    fn test_filter_range_low_cost() {
        let data = Datasets::build();
        let range = CostRange::new(0.0, 1000.0).unwrap();
        let cheap = filter_range(data.procedures.rows(), ProcedureColumn::AvgPaid, &range);
        let names: Vec<&str> = cheap.iter().map(|r| r.procedure.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "Prescription Medication",
                "Annual Checkup",
                "Physical Therapy (per session)",
                "Dental Cleaning",
            ]
        );
    }

    #[test]
    fn test_filter_range_inclusive_bounds() {
        let data = Datasets::build();
        let range = CostRange::new(371.37, 371.37).unwrap();
        let rows = filter_range(data.procedures.rows(), ProcedureColumn::AvgPaid, &range);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows.rows()[0].procedure, "Dental Cleaning");
    }

    #[test]
    fn test_filter_range_empty_result() {
        let data = Datasets::build();
        let range = CostRange::new(50_000.0, 90_000.0).unwrap();
        let rows = filter_range(data.procedures.rows(), ProcedureColumn::AvgPaid, &range);
        assert!(rows.is_empty());
    }

    #[test]
    fn test_cost_range_validation() {
        assert!(CostRange::new(0.0, 0.0).is_ok());
        assert!(matches!(
            CostRange::new(2000.0, 1000.0),
            Err(DashboardError::InvalidRange { .. })
        ));
        assert!(CostRange::new(-1.0, 10.0).is_err());
        assert!(CostRange::new(0.0, f64::NAN).is_err());
    }

    #[test]
    fn test_covering_range() {
        let data = Datasets::build();
        let range = CostRange::covering(data.procedures.rows(), ProcedureColumn::AvgPaid);
        assert_eq!(range.min(), 0.0);
        assert_eq!(range.max(), 99_050.94);
        let all = filter_range(data.procedures.rows(), ProcedureColumn::AvgPaid, &range);
        assert_eq!(all.len(), 15);

        let empty = CostRange::covering(ProcedureSummary::empty().rows(), ProcedureColumn::AvgPaid);
        assert_eq!(empty.max(), 0.0);
    }
}
