use eframe::egui::{self, ScrollArea, Ui};

use crate::config::DashboardConfig;
use crate::state::AppState;
use crate::ui::{cards, charts, panels, tables};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct LandDashboardApp {
    pub config: DashboardConfig,
    pub state: AppState,
}

impl LandDashboardApp {
    pub fn new(config: DashboardConfig, state: AppState) -> Self {
        Self { config, state }
    }
}

impl eframe::App for LandDashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(260.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: KPIs, charts, tables ----
        egui::CentralPanel::default().show(ctx, |ui| {
            ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui: &mut Ui| {
                    panels::title(ui, &self.config.title, &self.config.location);

                    let state = &self.state;
                    cards::kpi_cards(ui, &state.summary);
                    ui.add_space(12.0);

                    // No charts for an empty result.
                    if !state.summary.is_empty() {
                        ui.columns(2, |cols| {
                            charts::nature_donut(
                                &mut cols[0],
                                &state.summary.extent_by_nature,
                                &state.nature_colors,
                            );
                            charts::classification_bars(
                                &mut cols[1],
                                &state.summary.extent_by_classification,
                            );
                        });
                        ui.add_space(12.0);
                    }

                    tables::records_table(ui, &state.dataset.records, &state.visible_indices);
                    ui.add_space(12.0);
                    tables::top_owners_table(ui, &state.top_owners);
                });
        });
    }
}
