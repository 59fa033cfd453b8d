use std::collections::BTreeMap;

use super::{ChartResult, Unavailable, mean, require, round2};
use crate::data::filter::View;
use crate::data::model::{Cell, Column};

/// Short guard interval share of all guard interval indicators, in percent,
/// rounded to two decimals. Missing cells count as zero; 0 when both sums
/// are zero.
pub fn sgi_share(view: &View<'_>) -> ChartResult<f64> {
    require(view, &[Column::Sgi, Column::Lgi])?;
    if view.is_empty() {
        return Err(Unavailable::NoData);
    }
    let (sgi, lgi) = view.rows().fold((0.0, 0.0), |(s, l), r| {
        (s + r.sgi.unwrap_or(0.0), l + r.lgi.unwrap_or(0.0))
    });
    let total = sgi + lgi;
    if total > 0.0 {
        Ok(round2(sgi / total * 100.0))
    } else {
        Ok(0.0)
    }
}

/// Mean application-layer retry percentage, rounded to two decimals.
pub fn mean_retry(view: &View<'_>) -> ChartResult<f64> {
    require(view, &[Column::AppRetry])?;
    mean(view.rows().filter_map(|r| r.app_retry))
        .map(round2)
        .ok_or(Unavailable::NoData)
}

/// Most frequent non-null value of a burst-size column. Ties resolve to the
/// smallest value in [`Cell`] order.
pub fn most_frequent(view: &View<'_>, column: Column) -> ChartResult<Cell> {
    require(view, &[column])?;
    let values = view.rows().filter_map(|r| match column {
        Column::MostMsdu => r.most_msdu.as_ref(),
        Column::MostAmpdu => r.most_ampdu.as_ref(),
        _ => None,
    });
    mode(values).cloned().ok_or(Unavailable::NoData)
}

fn mode<'a>(values: impl Iterator<Item = &'a Cell>) -> Option<&'a Cell> {
    let mut counts: BTreeMap<&Cell, usize> = BTreeMap::new();
    for v in values {
        *counts.entry(v).or_default() += 1;
    }
    // Ascending iteration with a strict comparison keeps the first (smallest)
    // of equally frequent values.
    let mut best: Option<(&Cell, usize)> = None;
    for (value, count) in counts {
        if best.map_or(true, |(_, n)| count > n) {
            best = Some((value, count));
        }
    }
    best.map(|(value, _)| value)
}
