use anyhow::{anyhow, Context, Result};
use eframe::egui;
use land_dashboard::app::LandDashboardApp;
use land_dashboard::config::{DashboardConfig, DATA_PATH_ENV};
use land_dashboard::data;
use land_dashboard::state::AppState;

fn main() -> Result<()> {
    env_logger::init();

    let config = DashboardConfig::from_env();

    // A missing or malformed records file stops startup.
    let dataset = data::loader::load_file(&config.data_path)
        .inspect_err(|e| log::warn!("cannot load {}: {e}", config.data_path.display()))
        .with_context(|| {
            format!(
                "failed to load land records from {} (set {} to use another file)",
                config.data_path.display(),
                DATA_PATH_ENV
            )
        })?;
    log::info!(
        "Loaded {} land records ({} owners, {} parcels, {} shared) from {}",
        dataset.len(),
        dataset.owner_options.len(),
        dataset.parcel_options.len(),
        dataset.shared_parcel_options.len(),
        config.data_path.display()
    );
    if dataset.is_empty() {
        log::warn!("{} has a header but no records", config.data_path.display());
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(config.title.clone())
            .with_inner_size([1400.0, 900.0])
            .with_min_inner_size([800.0, 500.0]),
        ..Default::default()
    };

    let title = config.title.clone();
    let state = AppState::new(dataset);
    eframe::run_native(
        &title,
        options,
        Box::new(move |_cc| Ok(Box::new(LandDashboardApp::new(config, state)))),
    )
    .map_err(|e| anyhow!("window error: {e}"))
}
