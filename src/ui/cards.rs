use eframe::egui::{self, Color32, RichText, Stroke, Ui};

use crate::color::{GOVT_ORANGE, OWNERS_PURPLE, PARCELS_AMBER, PATTA_BLUE, TOTAL_GREEN};
use crate::data::aggregate::KpiSummary;

/// One bordered KPI card.
fn kpi_card(ui: &mut Ui, title: &str, value: &str, color: Color32, icon: &str) {
    egui::Frame::group(ui.style())
        .stroke(Stroke::new(2.0, color))
        .inner_margin(12.0)
        .show(ui, |ui: &mut Ui| {
            ui.vertical_centered(|ui: &mut Ui| {
                ui.label(RichText::new(format!("{icon} {title}")).size(16.0).strong());
                ui.add_space(6.0);
                ui.label(RichText::new(value).size(26.0).color(color).strong());
            });
        });
}

pub fn format_acres(extent: f64) -> String {
    format!("{extent:.2} acres")
}

/// Five KPI cards: three extents on the first row, two counts on the second.
pub fn kpi_cards(ui: &mut Ui, summary: &KpiSummary) {
    ui.columns(3, |cols| {
        kpi_card(&mut cols[0], "Total Land Extent", &format_acres(summary.total_extent), TOTAL_GREEN, "🌾");
        kpi_card(&mut cols[1], "Patta Land Extent", &format_acres(summary.patta_extent), PATTA_BLUE, "📜");
        kpi_card(&mut cols[2], "Govt. Land Extent", &format_acres(summary.govt_extent), GOVT_ORANGE, "🏛");
    });
    ui.add_space(6.0);
    ui.columns(2, |cols| {
        kpi_card(
            &mut cols[0],
            "Distinct Owners",
            &summary.distinct_owner_count.to_string(),
            OWNERS_PURPLE,
            "👥",
        );
        kpi_card(
            &mut cols[1],
            "Total Parcels",
            &summary.distinct_parcel_count.to_string(),
            PARCELS_AMBER,
            "🧾",
        );
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_acres_two_decimals() {
        assert_eq!(format_acres(4.5), "4.50 acres");
        assert_eq!(format_acres(0.0), "0.00 acres");
        assert_eq!(format_acres(1.005_1), "1.01 acres");
    }
}
