use std::f64::consts::{FRAC_PI_2, TAU};

use eframe::egui::{Color32, RichText, Stroke, Ui};
use egui_plot::{Legend, MarkerShape, Plot, PlotPoint, PlotPoints, Points, Polygon, Text};

use crate::data::aggregate::{LabeledCount, SliceLabel, total};
use crate::data::model::{LaunchRecord, SiteSelection};
use crate::state::AppState;

pub const OUTCOME_AXIS_LABEL: &str = "Launch Outcome (0=Failure, 1=Success)";
pub const PAYLOAD_AXIS_LABEL: &str = "Payload Mass (kg)";

/// Arc segments wider than this are split so every polygon stays convex.
const MAX_SEGMENT: f64 = FRAC_PI_2;
/// Points per full turn of the pie outline.
const ARC_RESOLUTION: f64 = 180.0;
/// Slices smaller than this share get no in-chart percentage label.
const MIN_LABELED_SHARE: f64 = 0.04;

// ---------------------------------------------------------------------------
// Titles
// ---------------------------------------------------------------------------

pub fn pie_title(selection: &SiteSelection) -> String {
    match selection {
        SiteSelection::All => "Total Successful Launches by Site".to_string(),
        SiteSelection::Site(site) => format!("Success vs. Failure for {site}"),
    }
}

pub fn scatter_title(selection: &SiteSelection) -> String {
    format!("Payload vs. Launch Outcome for {}", selection.label())
}

// ---------------------------------------------------------------------------
// Pie geometry
// ---------------------------------------------------------------------------

/// One drawable slice of the unit-radius pie.
#[derive(Debug, Clone, PartialEq)]
pub struct Slice {
    pub label: SliceLabel,
    pub share: f64,
    /// Start angle in radians; slices run clockwise from 12 o'clock.
    pub start: f64,
    pub sweep: f64,
}

/// Lay out non-empty counts as consecutive slices. Zero counts are dropped;
/// an all-zero table yields no slices.
pub fn layout_slices(counts: &[LabeledCount]) -> Vec<Slice> {
    let sum = total(counts);
    if sum == 0 {
        return Vec::new();
    }
    let mut start = FRAC_PI_2;
    counts
        .iter()
        .filter(|c| c.count > 0)
        .map(|c| {
            let share = c.count as f64 / sum as f64;
            let sweep = share * TAU;
            let slice = Slice {
                label: c.label.clone(),
                share,
                start,
                sweep,
            };
            start -= sweep;
            slice
        })
        .collect()
}

/// Convex polygons (centre + arc) covering a slice, each spanning at most a
/// quarter turn.
pub fn slice_polygons(slice: &Slice) -> Vec<Vec<[f64; 2]>> {
    let pieces = (slice.sweep / MAX_SEGMENT).ceil().max(1.0) as usize;
    let piece_sweep = slice.sweep / pieces as f64;
    let steps = ((piece_sweep / TAU) * ARC_RESOLUTION).ceil().max(1.0) as usize;

    (0..pieces)
        .map(|p| {
            let from = slice.start - p as f64 * piece_sweep;
            let mut poly = Vec::with_capacity(steps + 2);
            poly.push([0.0, 0.0]);
            for s in 0..=steps {
                let a = from - piece_sweep * s as f64 / steps as f64;
                poly.push([a.cos(), a.sin()]);
            }
            poly
        })
        .collect()
}

fn label_anchor(slice: &Slice) -> PlotPoint {
    let mid = slice.start - slice.sweep / 2.0;
    PlotPoint::new(0.65 * mid.cos(), 0.65 * mid.sin())
}

/// Render the pie chart for the current site selection.
pub fn success_pie(ui: &mut Ui, state: &AppState, height: f32) {
    ui.label(RichText::new(pie_title(&state.selected_site)).strong().size(16.0));

    let slices = layout_slices(&state.pie_counts);
    if slices.is_empty() {
        ui.label("No launches to show.");
        return;
    }

    Plot::new("success_pie")
        .legend(Legend::default())
        .height(height)
        .data_aspect(1.0)
        .include_x(-1.1)
        .include_x(1.1)
        .include_y(-1.1)
        .include_y(1.1)
        .show_axes(false)
        .show_grid(false)
        .show_x(false)
        .show_y(false)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .show(ui, |plot_ui| {
            for slice in &slices {
                let color = state.site_colors.slice_color(&slice.label);
                let name = slice.label.to_string();
                for piece in slice_polygons(slice) {
                    let points: PlotPoints = piece.into();
                    plot_ui.polygon(
                        Polygon::new(points)
                            .name(&name)
                            .fill_color(color)
                            .stroke(Stroke::new(1.0, Color32::WHITE)),
                    );
                }
                if slice.share >= MIN_LABELED_SHARE {
                    let text = RichText::new(format!("{:.1}%", slice.share * 100.0))
                        .color(Color32::WHITE)
                        .strong();
                    plot_ui.text(Text::new(label_anchor(slice), text));
                }
            }
        });
}

// ---------------------------------------------------------------------------
// Scatter
// ---------------------------------------------------------------------------

/// Group scatter points by booster category, ordered as `categories`.
/// Categories without a visible launch are omitted.
pub fn points_by_booster<'a>(
    records: impl IntoIterator<Item = &'a LaunchRecord>,
    categories: &[String],
) -> Vec<(String, Vec<[f64; 2]>)> {
    let mut groups: Vec<(String, Vec<[f64; 2]>)> =
        categories.iter().map(|c| (c.clone(), Vec::new())).collect();
    for rec in records {
        let point = [rec.payload_mass_kg, f64::from(rec.outcome.class())];
        match groups.iter_mut().find(|(c, _)| *c == rec.booster_category) {
            Some((_, pts)) => pts.push(point),
            None => groups.push((rec.booster_category.clone(), vec![point])),
        }
    }
    groups.retain(|(_, pts)| !pts.is_empty());
    groups
}

/// Render the payload vs. outcome scatter chart, coloured by booster.
pub fn payload_scatter(ui: &mut Ui, state: &AppState, height: f32) {
    ui.label(RichText::new(scatter_title(&state.selected_site)).strong().size(16.0));

    let Some(dataset) = &state.dataset else {
        return;
    };
    let groups = points_by_booster(state.visible_records(), dataset.booster_categories());
    let (x_min, x_max) = state.slider_domain();

    Plot::new("payload_scatter")
        .legend(Legend::default())
        .height(height)
        .x_axis_label(PAYLOAD_AXIS_LABEL)
        .y_axis_label(OUTCOME_AXIS_LABEL)
        .include_x(x_min)
        .include_x(x_max)
        .include_y(-0.25)
        .include_y(1.25)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for (category, pts) in groups {
                let points: PlotPoints = pts.into();
                plot_ui.points(
                    Points::new(points)
                        .name(&category)
                        .color(state.booster_colors.color_for(&category))
                        .shape(MarkerShape::Circle)
                        .filled(true)
                        .radius(5.0),
                );
            }
        });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Outcome;

    fn count(site: &str, n: u64) -> LabeledCount {
        LabeledCount {
            label: SliceLabel::Site(site.into()),
            count: n,
        }
    }

    #[test]
    fn titles_follow_selection() {
        assert_eq!(pie_title(&SiteSelection::All), "Total Successful Launches by Site");
        assert_eq!(
            pie_title(&SiteSelection::Site("KSC LC-39A".into())),
            "Success vs. Failure for KSC LC-39A"
        );
        assert_eq!(
            scatter_title(&SiteSelection::All),
            "Payload vs. Launch Outcome for All Sites"
        );
        assert_eq!(
            scatter_title(&SiteSelection::Site("A".into())),
            "Payload vs. Launch Outcome for A"
        );
    }

    #[test]
    fn slices_cover_full_turn_and_skip_zeros() {
        let slices = layout_slices(&[count("A", 3), count("B", 0), count("C", 1)]);
        assert_eq!(slices.len(), 2);
        let sweep: f64 = slices.iter().map(|s| s.sweep).sum();
        assert!((sweep - TAU).abs() < 1e-9);
        assert!((slices[0].share - 0.75).abs() < 1e-12);
        assert!((slices[1].start - (FRAC_PI_2 - 0.75 * TAU)).abs() < 1e-9);
    }

    #[test]
    fn all_zero_counts_have_no_slices() {
        assert!(layout_slices(&[count("A", 0)]).is_empty());
        assert!(layout_slices(&[]).is_empty());
    }

    #[test]
    fn wide_slices_are_split_into_convex_pieces() {
        let slices = layout_slices(&[count("A", 1)]);
        let pieces = slice_polygons(&slices[0]);
        assert_eq!(pieces.len(), 4);
        for piece in &pieces {
            assert_eq!(piece[0], [0.0, 0.0]);
            for p in &piece[1..] {
                assert!(((p[0] * p[0] + p[1] * p[1]).sqrt() - 1.0).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn scatter_groups_by_booster_in_category_order() {
        let records = [
            LaunchRecord::new("A", 500.0, Outcome::Success, "FT"),
            LaunchRecord::new("A", 700.0, Outcome::Failure, "v1.1"),
            LaunchRecord::new("B", 900.0, Outcome::Success, "FT"),
        ];
        let categories = ["v1.1".to_string(), "B5".to_string(), "FT".to_string()];
        let groups = points_by_booster(&records, &categories);
        assert_eq!(
            groups,
            vec![
                ("v1.1".to_string(), vec![[700.0, 0.0]]),
                ("FT".to_string(), vec![[500.0, 1.0], [900.0, 1.0]]),
            ]
        );
    }
}
