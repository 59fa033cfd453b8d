use serde::{Deserialize, Serialize};

use super::{ChartResult, Unavailable, require};
use crate::data::filter::View;
use crate::data::model::Column;

/// How the i-th smallest of N values is assigned its cumulative fraction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CdfMethod {
    /// `i / N`: starts at 0, ends at `1 - 1/N`.
    Empirical,
    /// Evenly spaced over `[0, 1]`: `i / (N - 1)`, ends at exactly 1.
    /// A single value sits at 1.
    #[default]
    Linspace,
}

impl CdfMethod {
    pub fn fractions(self, n: usize) -> Vec<f64> {
        match self {
            CdfMethod::Empirical => (0..n).map(|i| i as f64 / n as f64).collect(),
            CdfMethod::Linspace if n == 1 => vec![1.0],
            CdfMethod::Linspace => {
                let last = (n.max(1) - 1) as f64;
                (0..n).map(|i| i as f64 / last).collect()
            }
        }
    }
}

/// Sorted sample values paired with their cumulative fractions.
#[derive(Debug, Clone, PartialEq)]
pub struct CdfSeries {
    pub values: Vec<f64>,
    pub fractions: Vec<f64>,
}

impl CdfSeries {
    pub fn from_values(mut values: Vec<f64>, method: CdfMethod) -> ChartResult<Self> {
        if values.is_empty() {
            return Err(Unavailable::NoData);
        }
        values.sort_by(f64::total_cmp);
        let fractions = method.fractions(values.len());
        Ok(Self { values, fractions })
    }

    /// `[x, y]` pairs ready for plotting.
    pub fn points(&self) -> Vec<[f64; 2]> {
        self.values
            .iter()
            .zip(&self.fractions)
            .map(|(&x, &y)| [x, y])
            .collect()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Empirical CDF of a numeric column over the non-null rows of `view`.
pub fn empirical_cdf(view: &View<'_>, column: Column, method: CdfMethod) -> ChartResult<CdfSeries> {
    require(view, &[column])?;
    let values: Vec<f64> = view.rows().filter_map(|r| r.number(column)).collect();
    CdfSeries::from_values(values, method)
}
