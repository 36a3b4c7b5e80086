use std::f64::consts::TAU;

use eframe::egui::{Color32, Stroke, Ui};
use egui_plot::{Bar, BarChart, Legend, Plot, PlotPoints, Polygon};

use crate::color::{ColorMap, TOTAL_GREEN};
use crate::data::aggregate::{ClassificationTotal, NatureShare};

const CHART_HEIGHT: f32 = 320.0;
/// Inner radius of the donut relative to the outer one.
const DONUT_HOLE: f64 = 0.4;
/// Arc segments per full turn; each segment is drawn as a convex quad.
const SEGMENTS_PER_TURN: f64 = 180.0;

// ---------------------------------------------------------------------------
// Donut chart – row share per land nature
// ---------------------------------------------------------------------------

/// A slice of the donut: nature, display label and start/end angle in radians.
#[derive(Debug, Clone, PartialEq)]
pub struct Slice {
    /// Raw land nature, the colour key.
    pub nature: String,
    pub label: String,
    pub start: f64,
    pub end: f64,
    pub percent: f64,
}

/// Split a full turn proportionally to the row counts. Natures with no rows
/// get no slice.
pub fn donut_slices(shares: &[NatureShare]) -> Vec<Slice> {
    let total: usize = shares.iter().map(|s| s.rows).sum();
    if total == 0 {
        return Vec::new();
    }
    let mut angle = 0.0;
    shares
        .iter()
        .filter(|s| s.rows > 0)
        .map(|s| {
            let fraction = s.rows as f64 / total as f64;
            let slice = Slice {
                nature: s.nature.clone(),
                label: if s.nature.is_empty() { "(blank)".to_string() } else { s.nature.clone() },
                start: angle,
                end: angle + fraction * TAU,
                percent: fraction * 100.0,
            };
            angle = slice.end;
            slice
        })
        .collect()
}

fn polar(r: f64, theta: f64) -> [f64; 2] {
    // start at twelve o'clock, run clockwise
    [r * theta.sin(), r * theta.cos()]
}

pub fn nature_donut(ui: &mut Ui, shares: &[NatureShare], colors: &ColorMap) {
    ui.strong("Land Parcel Distribution by Nature");

    Plot::new("nature_donut")
        .legend(Legend::default())
        .height(CHART_HEIGHT)
        .data_aspect(1.0)
        .show_axes(false)
        .show_grid(false)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .show(ui, |plot_ui| {
            for slice in donut_slices(shares) {
                let color = colors.color_for(&slice.nature);
                let name = format!("{} ({:.1}%)", slice.label, slice.percent);
                let steps = (((slice.end - slice.start) / TAU) * SEGMENTS_PER_TURN).ceil().max(1.0) as usize;
                let step = (slice.end - slice.start) / steps as f64;

                for k in 0..steps {
                    let a0 = slice.start + step * k as f64;
                    let a1 = a0 + step;
                    let quad = vec![
                        polar(DONUT_HOLE, a0),
                        polar(1.0, a0),
                        polar(1.0, a1),
                        polar(DONUT_HOLE, a1),
                    ];
                    plot_ui.polygon(
                        Polygon::new(PlotPoints::new(quad))
                            .name(&name)
                            .fill_color(color)
                            .stroke(Stroke::new(0.5, color)),
                    );
                }
            }
        });
}

// ---------------------------------------------------------------------------
// Bar chart – extent per classification
// ---------------------------------------------------------------------------

pub fn classification_bars(ui: &mut Ui, totals: &[ClassificationTotal]) {
    ui.strong("Total Land by Classification");

    let labels: Vec<String> = totals
        .iter()
        .map(|t| {
            if t.classification.is_empty() {
                "(blank)".to_string()
            } else {
                t.classification.clone()
            }
        })
        .collect();

    let bars: Vec<Bar> = totals
        .iter()
        .zip(&labels)
        .enumerate()
        .map(|(i, (t, label))| {
            Bar::new(i as f64, t.extent)
                .name(label)
                .fill(TOTAL_GREEN)
                .width(0.6)
        })
        .collect();

    let axis_labels = labels.clone();
    Plot::new("classification_bars")
        .height(CHART_HEIGHT)
        .y_axis_label("Acres")
        .x_axis_label("Land classification")
        .x_axis_formatter(move |mark, _range| {
            let i = mark.value.round();
            if (mark.value - i).abs() > 1e-6 || i < 0.0 {
                return String::new();
            }
            axis_labels.get(i as usize).cloned().unwrap_or_default()
        })
        .allow_drag(false)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(
                BarChart::new(bars)
                    .name("Acres")
                    .color(Color32::DARK_GREEN),
            );
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn share(nature: &str, rows: usize) -> NatureShare {
        NatureShare {
            nature: nature.to_string(),
            rows,
            extent: 0.0,
        }
    }

    #[test]
    fn test_slices_cover_full_turn_by_row_count() {
        let slices = donut_slices(&[share("Govt", 1), share("Patta", 3), share("", 0)]);
        assert_eq!(slices.len(), 2);
        assert!((slices[0].percent - 25.0).abs() < 1e-9);
        assert!((slices[1].start - slices[0].end).abs() < 1e-12);
        assert!((slices[1].end - TAU).abs() < 1e-9);
    }

    #[test]
    fn test_no_rows_no_slices() {
        assert!(donut_slices(&[]).is_empty());
        assert!(donut_slices(&[share("Patta", 0)]).is_empty());
    }

    #[test]
    fn test_blank_nature_gets_placeholder_label() {
        let slices = donut_slices(&[share("", 2)]);
        assert_eq!(slices[0].label, "(blank)");
        assert_eq!(slices[0].nature, "");
    }

    #[test]
    fn test_blank_nature_keeps_its_colour() {
        let colors = ColorMap::new(["", "Patta"]);
        let slices = donut_slices(&[share("", 2), share("Patta", 1)]);
        assert_ne!(colors.color_for(&slices[0].nature), Color32::GRAY);
        assert_eq!(colors.color_for(&slices[0].nature), colors.color_for(""));
    }
}
