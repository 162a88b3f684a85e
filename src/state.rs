use crate::color::ColorMap;
use crate::config::SliderConfig;
use crate::data::aggregate::{NamedCounts, OutcomeSummary, aggregate};
use crate::data::filter::filtered_indices;
use crate::data::model::{LaunchDataset, LaunchRecord, PayloadRange, SiteSelection};
use crate::error::DashboardError;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
///
/// Control changes go through the setters below; each one recomputes only
/// the chart data that depends on the changed control.
pub struct AppState {
    /// Loaded dataset (None until a file is loaded).
    pub dataset: Option<LaunchDataset>,

    /// Configured payload slider domain and step.
    pub slider: SliderConfig,

    /// Dropdown value.
    pub selected_site: SiteSelection,

    /// Payload slider values.
    pub payload_range: PayloadRange,

    /// Pie chart table for `selected_site` (cached).
    pub pie_counts: NamedCounts,

    /// Indices of launches shown in the scatter chart (cached).
    pub visible_indices: Vec<usize>,

    /// Colours for pie slices per site.
    pub site_colors: ColorMap,

    /// Colours for scatter points per booster category.
    pub booster_colors: ColorMap,

    /// Text typed into the dropdown's search box.
    pub site_search: String,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(slider: SliderConfig) -> Self {
        let (low, high) = slider.domain(None);
        Self {
            dataset: None,
            slider,
            selected_site: SiteSelection::All,
            payload_range: PayloadRange::new(low, high),
            pie_counts: NamedCounts::new(),
            visible_indices: Vec::new(),
            site_colors: ColorMap::new(&[]),
            booster_colors: ColorMap::new(&[]),
            site_search: String::new(),
            status_message: None,
        }
    }

    /// Ingest a newly loaded dataset and reset the controls to their
    /// defaults: all sites, full observed payload range.
    pub fn set_dataset(&mut self, dataset: LaunchDataset) {
        if dataset.is_empty() {
            log::warn!("dataset has no launches");
        }
        self.site_colors = ColorMap::new(dataset.sites());
        self.booster_colors = ColorMap::new(dataset.booster_categories());
        self.selected_site = SiteSelection::All;
        self.payload_range = dataset.full_payload_range();
        self.site_search.clear();

        self.dataset = Some(dataset);
        self.status_message = None;

        self.recompute_pie();
        self.refilter();
    }

    /// Dropdown changed: both charts depend on the site.
    pub fn select_site(&mut self, selection: SiteSelection) {
        if selection == self.selected_site {
            return;
        }
        log::debug!("site selection → {selection}");
        self.selected_site = selection;
        self.recompute_pie();
        self.refilter();
    }

    /// Slider changed: only the scatter chart depends on the range.
    pub fn set_payload_range(&mut self, range: PayloadRange) {
        if range == self.payload_range {
            return;
        }
        log::debug!("payload range → [{}, {}]", range.low, range.high);
        self.payload_range = range;
        self.refilter();
    }

    /// Restore the payload range to the dataset's observed extremes.
    pub fn reset_payload_range(&mut self) {
        if let Some(ds) = &self.dataset {
            let full = ds.full_payload_range();
            self.set_payload_range(full);
        }
    }

    /// Effective slider bounds for the loaded dataset.
    pub fn slider_domain(&self) -> (f64, f64) {
        self.slider
            .domain(self.dataset.as_ref().and_then(|ds| ds.payload_bounds()))
    }

    /// Recompute `pie_counts` after a site change.
    pub fn recompute_pie(&mut self) {
        let Some(ds) = &self.dataset else {
            return;
        };
        match aggregate(ds, &self.selected_site) {
            Ok(counts) => {
                self.pie_counts = counts;
                self.status_message = None;
            }
            Err(e) => {
                log::warn!("pie aggregation failed: {e}");
                self.pie_counts.clear();
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }

    /// Recompute `visible_indices` after a site or range change.
    pub fn refilter(&mut self) {
        if let Some(ds) = &self.dataset {
            self.visible_indices = filtered_indices(ds, &self.selected_site, self.payload_range);
        }
    }

    /// Launches currently shown in the scatter chart, in dataset order.
    pub fn visible_records(&self) -> impl Iterator<Item = &LaunchRecord> {
        let records = self.dataset.as_ref().map(|ds| ds.records()).unwrap_or(&[]);
        self.visible_indices.iter().map(move |&i| &records[i])
    }

    pub fn visible_summary(&self) -> OutcomeSummary {
        OutcomeSummary::of(self.visible_records())
    }
}

/// Resolve the `--site` value given at startup against the loaded dataset.
///
/// A specific site must occur in the dataset; without a dataset only `ALL`
/// is accepted.
pub fn initial_selection(
    state: &AppState,
    value: &str,
) -> Result<SiteSelection, DashboardError> {
    let selection = SiteSelection::from_value(value);
    if let SiteSelection::Site(site) = &selection {
        if !state.dataset.as_ref().is_some_and(|ds| ds.has_site(site)) {
            return Err(DashboardError::UnknownSite(site.clone()));
        }
    }
    Ok(selection)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::aggregate::{LabeledCount, SliceLabel};
    use crate::data::model::Outcome;

    fn loaded() -> AppState {
        let mut state = AppState::new(SliderConfig::default());
        state.set_dataset(LaunchDataset::from_records(vec![
            LaunchRecord::new("A", 500.0, Outcome::Success, "FT"),
            LaunchRecord::new("A", 700.0, Outcome::Failure, "v1.1"),
            LaunchRecord::new("B", 900.0, Outcome::Success, "FT"),
        ]));
        state
    }

    #[test]
    fn loading_resets_to_defaults() {
        let state = loaded();
        assert_eq!(state.selected_site, SiteSelection::All);
        assert_eq!(state.payload_range, PayloadRange::new(500.0, 900.0));
        assert_eq!(state.visible_indices, vec![0, 1, 2]);
        assert_eq!(state.pie_counts.len(), 2);
        assert_eq!(state.slider_domain(), (0.0, 10_000.0));
    }

    #[test]
    fn site_change_recomputes_both_charts() {
        let mut state = loaded();
        state.select_site(SiteSelection::Site("A".into()));
        assert_eq!(state.visible_indices, vec![0, 1]);
        assert_eq!(
            state.pie_counts[0],
            LabeledCount { label: SliceLabel::Outcome(Outcome::Success), count: 1 }
        );
    }

    #[test]
    fn range_change_leaves_pie_untouched() {
        let mut state = loaded();
        let pie_before = state.pie_counts.clone();
        state.set_payload_range(PayloadRange::new(600.0, 1000.0));
        assert_eq!(state.visible_indices, vec![1, 2]);
        assert_eq!(state.pie_counts, pie_before);

        state.reset_payload_range();
        assert_eq!(state.visible_indices, vec![0, 1, 2]);
    }

    #[test]
    fn unknown_site_clears_pie_and_reports() {
        let mut state = loaded();
        state.select_site(SiteSelection::Site("Z".into()));
        assert!(state.pie_counts.is_empty());
        assert!(state.visible_indices.is_empty());
        assert!(state.status_message.is_some());
    }

    #[test]
    fn valid_site_after_unknown_clears_status() {
        let mut state = loaded();
        state.select_site(SiteSelection::Site("Z".into()));
        assert!(state.status_message.is_some());
        state.select_site(SiteSelection::Site("A".into()));
        assert_eq!(state.status_message, None);
        assert_eq!(state.pie_counts.len(), 2);
    }

    #[test]
    fn startup_site_must_exist() {
        let state = loaded();
        assert_eq!(initial_selection(&state, "ALL"), Ok(SiteSelection::All));
        assert_eq!(
            initial_selection(&state, "B"),
            Ok(SiteSelection::Site("B".into()))
        );
        assert_eq!(
            initial_selection(&state, "BOGUS"),
            Err(DashboardError::UnknownSite("BOGUS".into()))
        );
    }

    #[test]
    fn startup_site_without_dataset_only_accepts_all() {
        let state = AppState::new(SliderConfig::default());
        assert_eq!(initial_selection(&state, "ALL"), Ok(SiteSelection::All));
        assert!(initial_selection(&state, "BOGUS").is_err());
    }

    #[test]
    fn summary_tracks_visible_rows() {
        let mut state = loaded();
        state.set_payload_range(PayloadRange::new(600.0, 800.0));
        let summary = state.visible_summary();
        assert_eq!(summary, OutcomeSummary { launches: 1, successes: 0 });
    }

    #[test]
    fn empty_state_has_no_rows() {
        let state = AppState::new(SliderConfig::default());
        assert_eq!(state.visible_records().count(), 0);
        assert_eq!(state.slider_domain(), (0.0, 10_000.0));
    }
}
