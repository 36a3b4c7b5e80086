use eframe::egui::Ui;
use egui_extras::{Column, TableBuilder};

use crate::data::aggregate::OwnerTotal;
use crate::data::model::{LandRecord, OptDisplay, REQUIRED_COLUMNS};

const ROW_HEIGHT: f32 = 20.0;

/// The filtered records, one row per source row, source column order.
pub fn records_table(ui: &mut Ui, records: &[LandRecord], visible: &[usize]) {
    ui.heading("📋 Detailed Land Records");

    TableBuilder::new(ui)
        .id_salt("records_table")
        .striped(true)
        .resizable(true)
        .vscroll(true)
        .max_scroll_height(360.0)
        .columns(Column::auto().at_least(80.0), REQUIRED_COLUMNS.len() - 1)
        .column(Column::remainder())
        .header(ROW_HEIGHT, |mut header| {
            for name in REQUIRED_COLUMNS {
                header.col(|ui| {
                    ui.strong(name);
                });
            }
        })
        .body(|body| {
            body.rows(ROW_HEIGHT, visible.len(), |mut row| {
                let r = &records[visible[row.index()]];
                let cells = [
                    OptDisplay(r.account_number).to_string(),
                    r.owner_name.clone(),
                    OptDisplay(r.parcel_number).to_string(),
                    r.land_nature.clone(),
                    r.land_classification.clone(),
                    r.land_sub_classification.clone(),
                    OptDisplay(r.extent_acres).to_string(),
                ];
                for text in cells {
                    row.col(|ui| {
                        ui.label(text);
                    });
                }
            });
        });
}

/// The fixed leaderboard, computed over the whole table.
pub fn top_owners_table(ui: &mut Ui, owners: &[OwnerTotal]) {
    ui.heading("🏆 Top 5 Land Owners by Total Extent");

    TableBuilder::new(ui)
        .id_salt("top_owners_table")
        .striped(true)
        .vscroll(false)
        .column(Column::exact(30.0))
        .column(Column::auto().at_least(200.0))
        .column(Column::remainder())
        .header(ROW_HEIGHT, |mut header| {
            header.col(|ui| {
                ui.strong("#");
            });
            header.col(|ui| {
                ui.strong("Land owner name");
            });
            header.col(|ui| {
                ui.strong("Total Land in Acres");
            });
        })
        .body(|mut body| {
            for (rank, owner) in owners.iter().enumerate() {
                body.row(ROW_HEIGHT, |mut row| {
                    row.col(|ui| {
                        ui.label((rank + 1).to_string());
                    });
                    row.col(|ui| {
                        ui.label(&owner.owner);
                    });
                    row.col(|ui| {
                        ui.label(format!("{:.2}", owner.extent));
                    });
                });
            }
        });
}
