use crate::color::ColorMap;
use crate::data::aggregate::{aggregate, top_owners, KpiSummary, OwnerTotal, TOP_OWNER_LIMIT};
use crate::data::filter::{filtered_indices, FilterField, FilterSelection};
use crate::data::model::LandDataset;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI session state, independent of rendering.
pub struct AppState {
    /// Loaded records.
    pub dataset: LandDataset,

    /// Current picks in the filter panel.
    pub selection: FilterSelection,

    /// Indices of records passing the current filters (cached).
    pub visible_indices: Vec<usize>,

    /// KPIs over `visible_indices` (cached).
    pub summary: KpiSummary,

    /// Leaderboard over the full table; only changes when a new file loads.
    pub top_owners: Vec<OwnerTotal>,

    /// Colours per land nature, stable across filter changes.
    pub nature_colors: ColorMap,

    /// Text typed into the owner search box.
    pub owner_search: String,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(dataset: LandDataset) -> Self {
        let mut state = Self {
            selection: FilterSelection::default(),
            visible_indices: Vec::new(),
            summary: KpiSummary::default(),
            top_owners: top_owners(&dataset.records, TOP_OWNER_LIMIT),
            nature_colors: nature_colors(&dataset),
            owner_search: String::new(),
            status_message: None,
            dataset,
        };
        state.refilter();
        state
    }

    /// Replace the dataset (File → Open…) and clear every filter.
    pub fn set_dataset(&mut self, dataset: LandDataset) {
        *self = Self::new(dataset);
    }

    /// Recompute `visible_indices` and the summary after a filter change.
    pub fn refilter(&mut self) {
        self.visible_indices = filtered_indices(&self.dataset.records, &self.selection);
        self.summary = aggregate(self.visible_indices.iter().map(|&i| &self.dataset.records[i]));
        log::debug!(
            "{} of {} records visible",
            self.visible_indices.len(),
            self.dataset.len()
        );
    }

    pub fn toggle_owner(&mut self, owner: &str) {
        self.selection.toggle_owner(owner);
        self.refilter();
    }

    pub fn toggle_number(&mut self, field: FilterField, value: i64) {
        self.selection.toggle_number(field, value);
        self.refilter();
    }

    /// Clear all four filters.
    pub fn reset_filters(&mut self) {
        self.selection.reset();
        self.owner_search.clear();
        self.refilter();
    }

    /// Owner choices matching the search box (case-insensitive substring).
    pub fn owner_choices(&self) -> Vec<&str> {
        let needle = self.owner_search.trim().to_lowercase();
        self.dataset
            .owner_options
            .iter()
            .filter(|o| needle.is_empty() || o.to_lowercase().contains(&needle))
            .map(String::as_str)
            .collect()
    }
}

fn nature_colors(dataset: &LandDataset) -> ColorMap {
    let natures: std::collections::BTreeSet<&str> = dataset
        .records
        .iter()
        .map(|r| r.land_nature.as_str())
        .collect();
    ColorMap::new(natures)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::record;

    fn state() -> AppState {
        let rows = vec![
            record("Anil", Some(1), "Patta", Some(1.5)),
            record("Anil", Some(1), "Patta", Some(1.5)),
            record("Bhanu", Some(2), "Govt land", Some(3.0)),
            record("Chitra", Some(3), "Inam", Some(0.5)),
        ];
        AppState::new(LandDataset::from_records(rows, "test"))
    }

    #[test]
    fn test_new_state_shows_everything() {
        let s = state();
        assert_eq!(s.visible_indices, vec![0, 1, 2, 3]);
        assert!((s.summary.total_extent - 5.0).abs() < 1e-9);
        assert_eq!(s.top_owners[0].owner, "Anil");
    }

    #[test]
    fn test_toggle_recomputes_summary_but_not_top_owners() {
        let mut s = state();
        let before = s.top_owners.clone();
        s.toggle_owner("Bhanu");
        assert_eq!(s.visible_indices, vec![2]);
        assert!((s.summary.govt_extent - 3.0).abs() < 1e-9);
        assert_eq!(s.top_owners, before);
    }

    #[test]
    fn test_disjoint_filters_give_empty_summary() {
        let mut s = state();
        s.toggle_number(FilterField::Parcel, 2);
        s.toggle_number(FilterField::SharedParcel, 1);
        assert!(s.visible_indices.is_empty());
        assert!(s.summary.is_empty());
    }

    #[test]
    fn test_reset_clears_selection_and_search() {
        let mut s = state();
        s.owner_search = "an".into();
        s.toggle_owner("Anil");
        s.toggle_number(FilterField::Account, 9);
        s.reset_filters();
        assert_eq!(s.selection, FilterSelection::default());
        assert!(s.owner_search.is_empty());
        assert_eq!(s.visible_indices.len(), 4);
    }

    #[test]
    fn test_owner_search_is_case_insensitive() {
        let mut s = state();
        s.owner_search = "AN".into();
        assert_eq!(s.owner_choices(), vec!["Anil", "Bhanu"]);
        s.owner_search.clear();
        assert_eq!(s.owner_choices().len(), 3);
    }
}
