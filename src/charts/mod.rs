//! Aggregation layer: one derived result per chart, recomputed from a
//! filtered [`View`] on every filter change.
//!
//! Each computation is independent and returns a [`ChartResult`]; a missing
//! column or an empty subset only marks that one chart as unavailable.

pub mod cdf;
pub mod correlation;
pub mod mcs;
pub mod metrics;
pub mod timing;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::data::filter::View;
use crate::data::model::{Cell, Column};

pub use cdf::{CdfMethod, CdfSeries};
pub use correlation::CorrelationMatrix;
pub use mcs::{McsBin, McsUsage};
pub use timing::TimingShare;

// ---------------------------------------------------------------------------
// Unavailable – the "nothing to draw" outcome
// ---------------------------------------------------------------------------

/// Why a chart has no result. Distinct from a legitimate zero value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Unavailable {
    /// The source file lacks a column this chart needs.
    #[error("column '{0}' not present")]
    MissingColumn(Column),

    /// The filtered rows carry no usable values.
    #[error("no data")]
    NoData,
}

pub type ChartResult<T> = Result<T, Unavailable>;

/// Fail with the first column `view` does not carry.
pub(crate) fn require(view: &View<'_>, columns: &[Column]) -> ChartResult<()> {
    match columns.iter().find(|c| !view.has(**c)) {
        Some(c) => Err(Unavailable::MissingColumn(*c)),
        None => Ok(()),
    }
}

pub(crate) fn mean(values: impl IntoIterator<Item = f64>) -> Option<f64> {
    let (sum, n) = values
        .into_iter()
        .fold((0.0, 0usize), |(sum, n), v| (sum + v, n + 1));
    (n > 0).then(|| sum / n as f64)
}

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

// ---------------------------------------------------------------------------
// Grid slots
// ---------------------------------------------------------------------------

/// What a dashboard grid slot shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    TimingPie,
    ThroughputCdf,
    JitterCdf,
    RetryCdf,
    McsUsage,
    Correlation,
    BurstModes,
    SgiRetry,
}

impl ChartKind {
    /// The dashboard's 2 × 4 grid, row-major.
    pub const DEFAULT_LAYOUT: [ChartKind; 8] = [
        ChartKind::TimingPie,
        ChartKind::ThroughputCdf,
        ChartKind::JitterCdf,
        ChartKind::RetryCdf,
        ChartKind::McsUsage,
        ChartKind::Correlation,
        ChartKind::BurstModes,
        ChartKind::SgiRetry,
    ];

    pub fn title(self) -> &'static str {
        match self {
            ChartKind::TimingPie => "Timing Breakdown",
            ChartKind::ThroughputCdf => "CDF: Throughput",
            ChartKind::JitterCdf => "CDF: Jitter",
            ChartKind::RetryCdf => "CDF: Retry Rate",
            ChartKind::McsUsage => "MCS Usage (%)",
            ChartKind::Correlation => "Correlation Map",
            ChartKind::BurstModes => "Most Frequent MSDU / AMPDU",
            ChartKind::SgiRetry => "SGI & Retry Rate",
        }
    }
}

// ---------------------------------------------------------------------------
// ChartSet – everything the grid renders
// ---------------------------------------------------------------------------

/// All derived results for one filter selection.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSet {
    /// Rows in the filtered view.
    pub rows: usize,
    pub timing: ChartResult<TimingShare>,
    pub throughput_cdf: ChartResult<CdfSeries>,
    pub jitter_cdf: ChartResult<CdfSeries>,
    pub app_retry_cdf: ChartResult<CdfSeries>,
    pub mac_retry_cdf: ChartResult<CdfSeries>,
    pub mcs_initial: ChartResult<McsUsage>,
    pub mcs_retry: ChartResult<McsUsage>,
    pub sgi_share: ChartResult<f64>,
    pub mean_retry: ChartResult<f64>,
    pub most_msdu: ChartResult<Cell>,
    pub most_ampdu: ChartResult<Cell>,
    pub correlation: ChartResult<CorrelationMatrix>,
}

impl ChartSet {
    pub fn compute(view: &View<'_>, method: CdfMethod) -> Self {
        log::debug!("Recomputing charts over {} rows", view.len());
        Self {
            rows: view.len(),
            timing: timing::timing_share(view),
            throughput_cdf: cdf::empirical_cdf(view, Column::Throughput, method),
            jitter_cdf: cdf::empirical_cdf(view, Column::Jitter, method),
            app_retry_cdf: cdf::empirical_cdf(view, Column::AppRetry, method),
            mac_retry_cdf: cdf::empirical_cdf(view, Column::MacRetry, method),
            mcs_initial: mcs::mcs_usage(view, Column::McsInitial),
            mcs_retry: mcs::mcs_usage(view, Column::McsRetry),
            sgi_share: metrics::sgi_share(view),
            mean_retry: metrics::mean_retry(view),
            most_msdu: metrics::most_frequent(view, Column::MostMsdu),
            most_ampdu: metrics::most_frequent(view, Column::MostAmpdu),
            correlation: correlation::correlation_matrix(view),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::data::model::{Dataset, Record};

    #[test]
    fn rounding_keeps_two_decimals() {
        assert_eq!(round2(2.0), 2.0);
        assert_eq!(round2(33.333_333), 33.33);
        assert_eq!(round2(16.666_666), 16.67);
    }

    #[test]
    fn mean_of_nothing_is_none() {
        assert_eq!(mean([0.0; 0]), None);
        assert_eq!(mean([1.0, 2.0, 3.0]), Some(2.0));
    }

    #[test]
    fn empty_view_marks_every_chart_unavailable() {
        let ds = Dataset::from_records(Vec::new(), Column::ALL.into_iter().collect());
        let set = ChartSet::compute(&View::all(&ds), CdfMethod::default());

        assert_eq!(set.rows, 0);
        assert_eq!(set.timing, Err(Unavailable::NoData));
        assert_eq!(set.throughput_cdf, Err(Unavailable::NoData));
        assert_eq!(set.mcs_initial, Err(Unavailable::NoData));
        assert_eq!(set.sgi_share, Err(Unavailable::NoData));
        assert_eq!(set.mean_retry, Err(Unavailable::NoData));
        assert_eq!(set.most_ampdu, Err(Unavailable::NoData));
        assert_eq!(set.correlation, Err(Unavailable::NoData));
    }

    #[test]
    fn missing_columns_only_affect_their_charts() {
        let rec = Record {
            throughput: Some(40.0),
            app_retry: Some(1.5),
            ..Default::default()
        };
        let ds = Dataset::from_records(
            vec![rec],
            BTreeSet::from([Column::Throughput, Column::AppRetry]),
        );
        let set = ChartSet::compute(&View::all(&ds), CdfMethod::Empirical);

        assert!(set.throughput_cdf.is_ok());
        assert_eq!(set.mean_retry, Ok(1.5));
        assert_eq!(set.jitter_cdf, Err(Unavailable::MissingColumn(Column::Jitter)));
        assert_eq!(set.sgi_share, Err(Unavailable::MissingColumn(Column::Sgi)));
        assert_eq!(
            set.timing,
            Err(Unavailable::MissingColumn(Column::MgmtOverhead))
        );
        assert_eq!(
            set.correlation,
            Err(Unavailable::MissingColumn(Column::Jitter))
        );
    }

    #[test]
    fn unavailable_reads_well() {
        assert_eq!(Unavailable::NoData.to_string(), "no data");
        assert_eq!(
            Unavailable::MissingColumn(Column::Sgi).to_string(),
            "column 'sgi' not present"
        );
    }
}
