use anyhow::{Context, Result};
use eframe::egui;

use wlan_insight::app::WlanInsightApp;
use wlan_insight::config::DashboardConfig;
use wlan_insight::state::AppState;

fn main() -> Result<()> {
    env_logger::init();

    let config = DashboardConfig::discover().context("loading dashboard config")?;
    let data_path = config.data_path.clone();

    let mut state = AppState::new(config);
    state
        .load(&data_path)
        .with_context(|| format!("loading dataset {}", data_path.display()))?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 900.0])
            .with_min_inner_size([800.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        "WLAN Insight – Performance Dashboard",
        options,
        Box::new(|_cc| Ok(Box::new(WlanInsightApp::new(state)))),
    )
    .map_err(|e| anyhow::anyhow!("running UI: {e}"))
}
