use super::{ChartResult, Unavailable, mean, require};
use crate::data::filter::View;
use crate::data::model::{Column, TIMING_COLUMNS};

/// Average time share per airtime component, in [`TIMING_COLUMNS`] order.
#[derive(Debug, Clone, PartialEq)]
pub struct TimingShare {
    pub means: [f64; 7],
}

impl TimingShare {
    pub fn labels() -> [&'static str; 7] {
        TIMING_COLUMNS.map(Column::header)
    }

    /// Each mean as a percentage of the sum of all means (pie slice sizes).
    pub fn percentages(&self) -> [f64; 7] {
        let total: f64 = self.means.iter().sum();
        self.means.map(|m| m / total * 100.0)
    }
}

/// Mean of each time-share column over its non-null values.
///
/// Unavailable when the view is empty, when any component has no values at
/// all, or when every mean is zero (nothing to split into slices).
pub fn timing_share(view: &View<'_>) -> ChartResult<TimingShare> {
    require(view, &TIMING_COLUMNS)?;
    if view.is_empty() {
        return Err(Unavailable::NoData);
    }

    let mut means = [0.0; 7];
    for (slot, col) in means.iter_mut().zip(TIMING_COLUMNS) {
        *slot = mean(view.rows().filter_map(|r| r.number(col))).ok_or(Unavailable::NoData)?;
    }

    let total: f64 = means.iter().sum();
    if total <= 0.0 {
        return Err(Unavailable::NoData);
    }
    Ok(TimingShare { means })
}
