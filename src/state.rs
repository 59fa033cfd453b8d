use std::path::Path;

use anyhow::Result;

use crate::charts::ChartSet;
use crate::config::DashboardConfig;
use crate::data::filter::{Choice, FilterOptions, FilterState, View};
use crate::data::loader::load_file;
use crate::data::model::{Dataset, SignalCategory};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// One dashboard session, independent of rendering. Owns the dataset and
/// the filter selection; nothing here is shared between sessions.
pub struct AppState {
    pub config: DashboardConfig,

    /// Loaded dataset (None until a file loads successfully).
    pub dataset: Option<Dataset>,

    /// Values the filter widgets offer.
    pub options: FilterOptions,

    /// Current filter selection.
    pub filters: FilterState,

    /// Charts for the current selection, replaced on every change.
    pub charts: Option<ChartSet>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(config: DashboardConfig) -> Self {
        Self {
            config,
            dataset: None,
            options: FilterOptions::default(),
            filters: FilterState::default(),
            charts: None,
            status_message: None,
        }
    }

    /// Ingest a newly loaded dataset, reset stale filters and recompute.
    pub fn set_dataset(&mut self, dataset: Dataset) {
        self.options = FilterOptions::from_dataset(&dataset);
        self.filters.retain_valid(&dataset);
        self.dataset = Some(dataset);
        self.status_message = None;
        self.refilter();
    }

    /// Load a file into this session. On failure the previous dataset stays.
    pub fn load(&mut self, path: &Path) -> Result<()> {
        let dataset = load_file(path)?;
        self.set_dataset(dataset);
        Ok(())
    }

    /// Recompute every chart from the current selection.
    pub fn refilter(&mut self) {
        self.charts = self.dataset.as_ref().map(|ds| {
            let view = View::filtered(ds, &self.filters);
            ChartSet::compute(&view, self.config.cdf_method)
        });
    }

    pub fn set_category(&mut self, choice: Choice<SignalCategory>) {
        if self.filters.category != choice {
            self.filters.category = choice;
            self.refilter();
        }
    }

    pub fn set_device(&mut self, choice: Choice<String>) {
        if self.filters.device != choice {
            self.filters.device = choice;
            self.refilter();
        }
    }

    pub fn set_traffic(&mut self, choice: Choice<String>) {
        if self.filters.traffic != choice {
            self.filters.traffic = choice;
            self.refilter();
        }
    }

    /// Rows in the dataset and rows passing the filters.
    pub fn row_counts(&self) -> Option<(usize, usize)> {
        let total = self.dataset.as_ref()?.len();
        let visible = self.charts.as_ref().map_or(0, |c| c.rows);
        Some((total, visible))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::charts::Unavailable;
    use crate::data::model::{Column, Record};

    fn dataset() -> Dataset {
        let rows = [("laptop", 1.0, -45.0), ("phone", 3.0, -70.0), ("phone", 5.0, -72.0)];
        let records = rows
            .into_iter()
            .map(|(device, retry, rssi)| {
                let mut rec = Record {
                    device: Some(device.to_string()),
                    app_retry: Some(retry),
                    rssi: Some(rssi),
                    ..Default::default()
                };
                rec.classify();
                rec
            })
            .collect();
        Dataset::from_records(
            records,
            BTreeSet::from([Column::Device, Column::AppRetry, Column::Rssi]),
        )
    }

    #[test]
    fn filter_changes_recompute_charts() {
        let mut state = AppState::new(DashboardConfig::default());
        state.set_dataset(dataset());
        assert_eq!(state.row_counts(), Some((3, 3)));
        assert_eq!(state.charts.as_ref().unwrap().mean_retry, Ok(3.0));

        state.set_device(Choice::Only("phone".into()));
        assert_eq!(state.row_counts(), Some((3, 2)));
        assert_eq!(state.charts.as_ref().unwrap().mean_retry, Ok(4.0));

        state.set_category(Choice::Only(SignalCategory::Excellent));
        let charts = state.charts.as_ref().unwrap();
        assert_eq!(charts.rows, 0);
        assert_eq!(charts.mean_retry, Err(Unavailable::NoData));
    }

    #[test]
    fn sessions_do_not_share_selection() {
        let mut a = AppState::new(DashboardConfig::default());
        let mut b = AppState::new(DashboardConfig::default());
        a.set_dataset(dataset());
        b.set_dataset(dataset());

        a.set_device(Choice::Only("laptop".into()));
        assert_eq!(b.filters.device, Choice::All);
        assert_eq!(b.row_counts(), Some((3, 3)));
    }

    #[test]
    fn failed_load_keeps_previous_dataset() {
        let mut state = AppState::new(DashboardConfig::default());
        state.set_dataset(dataset());
        assert!(state.load(Path::new("/nonexistent/data.csv")).is_err());
        assert_eq!(state.row_counts(), Some((3, 3)));
    }
}
