use super::{ChartResult, Unavailable, require};
use crate::data::filter::View;
use crate::data::model::Column;

/// MCS indices the bar chart reports.
pub const MCS_INDICES: std::ops::RangeInclusive<i64> = 1..=8;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct McsBin {
    pub index: i64,
    pub count: usize,
    /// Share of the in-range total, 0 when that total is 0.
    pub percent: f64,
}

/// Dense distribution over MCS 1..=8, ascending by index.
#[derive(Debug, Clone, PartialEq)]
pub struct McsUsage {
    pub bins: [McsBin; 8],
}

impl McsUsage {
    /// Count the values falling in 1..=8; everything else is ignored.
    pub fn from_values(values: impl IntoIterator<Item = i64>) -> Self {
        let mut counts = [0usize; 8];
        for v in values {
            if MCS_INDICES.contains(&v) {
                counts[(v - 1) as usize] += 1;
            }
        }
        let total: usize = counts.iter().sum();

        let bins = std::array::from_fn(|i| {
            let count = counts[i];
            let percent = if total == 0 {
                0.0
            } else {
                count as f64 / total as f64 * 100.0
            };
            McsBin {
                index: i as i64 + 1,
                count,
                percent,
            }
        });
        Self { bins }
    }

    pub fn total(&self) -> usize {
        self.bins.iter().map(|b| b.count).sum()
    }

    pub fn bin(&self, index: i64) -> Option<&McsBin> {
        self.bins.iter().find(|b| b.index == index)
    }
}

/// MCS usage for `column` (initial or retry MCS) over `view`.
pub fn mcs_usage(view: &View<'_>, column: Column) -> ChartResult<McsUsage> {
    require(view, &[column])?;
    if view.is_empty() {
        return Err(Unavailable::NoData);
    }
    let values = view.rows().filter_map(|r| match column {
        Column::McsInitial => r.mcs_initial,
        Column::McsRetry => r.mcs_retry,
        _ => r.number(column).filter(|v| v.fract() == 0.0).map(|v| v as i64),
    });
    Ok(McsUsage::from_values(values))
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use proptest::prelude::*;

    use super::*;
    use crate::data::model::{Dataset, Record};

    #[test]
    fn percentages_of_restricted_total() {
        let usage = McsUsage::from_values([8, 8, 7, 1, 1, 1]);
        assert_eq!(usage.total(), 6);

        let pct = |i| usage.bin(i).unwrap().percent;
        assert!((pct(8) - 33.33).abs() < 0.01);
        assert!((pct(7) - 16.67).abs() < 0.01);
        assert!((pct(1) - 50.0).abs() < 1e-9);
        for i in 2..=6 {
            assert_eq!(usage.bin(i).unwrap().count, 0);
            assert_eq!(pct(i), 0.0);
        }
    }

    #[test]
    fn out_of_range_values_are_ignored() {
        let usage = McsUsage::from_values([0, 9, 11, -1]);
        assert_eq!(usage.total(), 0);
        assert!(usage.bins.iter().all(|b| b.percent == 0.0));
    }

    #[test]
    fn reads_the_requested_field() {
        let records = vec![
            Record { mcs_initial: Some(3), mcs_retry: Some(2), ..Default::default() },
            Record { mcs_initial: Some(3), mcs_retry: None, ..Default::default() },
        ];
        let ds = Dataset::from_records(
            records,
            BTreeSet::from([Column::McsInitial, Column::McsRetry]),
        );
        let view = View::all(&ds);

        let initial = mcs_usage(&view, Column::McsInitial).unwrap();
        assert_eq!(initial.bin(3).unwrap().count, 2);
        let retry = mcs_usage(&view, Column::McsRetry).unwrap();
        assert_eq!(retry.bin(2).unwrap().percent, 100.0);
    }

    proptest! {
        #[test]
        fn distribution_is_dense_and_complete(values in prop::collection::vec(-3i64..12, 0..100)) {
            let usage = McsUsage::from_values(values);
            prop_assert_eq!(usage.bins.len(), 8);
            for (i, b) in usage.bins.iter().enumerate() {
                prop_assert_eq!(b.index, i as i64 + 1);
                prop_assert!(b.percent >= 0.0);
            }
            let sum: f64 = usage.bins.iter().map(|b| b.percent).sum();
            if usage.total() > 0 {
                prop_assert!((sum - 100.0).abs() < 1e-9);
            } else {
                prop_assert_eq!(sum, 0.0);
            }
        }
    }
}
