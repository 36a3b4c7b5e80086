use std::collections::BTreeSet;

use super::model::LandRecord;

// ---------------------------------------------------------------------------
// Filter selection: which values are picked per filterable field
// ---------------------------------------------------------------------------

/// The user's current picks in the four multi-select controls.
///
/// An empty set means "no filter" for that field. Non-empty sets restrict by
/// membership and all of them combine with AND, including `parcels` and
/// `shared_parcels`, which both constrain the parcel number.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSelection {
    pub owners: BTreeSet<String>,
    pub accounts: BTreeSet<i64>,
    pub parcels: BTreeSet<i64>,
    pub shared_parcels: BTreeSet<i64>,
}

/// Identifies one of the four filter controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterField {
    Owner,
    Account,
    Parcel,
    SharedParcel,
}

impl FilterSelection {
    /// Clear every selection back to the no-filter state.
    pub fn reset(&mut self) {
        *self = FilterSelection::default();
    }

    /// `true` when no field restricts anything.
    pub fn is_empty(&self) -> bool {
        self.owners.is_empty()
            && self.accounts.is_empty()
            && self.parcels.is_empty()
            && self.shared_parcels.is_empty()
    }

    /// Number of selected values for a field.
    pub fn selected_count(&self, field: FilterField) -> usize {
        match field {
            FilterField::Owner => self.owners.len(),
            FilterField::Account => self.accounts.len(),
            FilterField::Parcel => self.parcels.len(),
            FilterField::SharedParcel => self.shared_parcels.len(),
        }
    }

    /// Add or remove an owner name.
    pub fn toggle_owner(&mut self, owner: &str) {
        if !self.owners.remove(owner) {
            self.owners.insert(owner.to_string());
        }
    }

    /// Add or remove a numeric value in one of the numeric fields.
    /// Ignored for [`FilterField::Owner`].
    pub fn toggle_number(&mut self, field: FilterField, value: i64) {
        let set = match field {
            FilterField::Account => &mut self.accounts,
            FilterField::Parcel => &mut self.parcels,
            FilterField::SharedParcel => &mut self.shared_parcels,
            FilterField::Owner => return,
        };
        if !set.remove(&value) {
            set.insert(value);
        }
    }

    /// Whether a single record passes every active filter.
    pub fn matches(&self, record: &LandRecord) -> bool {
        if !self.owners.is_empty() && !record.owner().is_some_and(|o| self.owners.contains(o)) {
            return false;
        }
        if !member(&self.accounts, record.account_number) {
            return false;
        }
        if !member(&self.parcels, record.parcel_number) {
            return false;
        }
        member(&self.shared_parcels, record.parcel_number)
    }
}

/// Empty selection passes everything; a null value never matches a
/// non-empty selection.
fn member(selected: &BTreeSet<i64>, value: Option<i64>) -> bool {
    selected.is_empty() || value.is_some_and(|v| selected.contains(&v))
}

/// Return indices of records that pass all active filters, in source order.
pub fn filtered_indices(records: &[LandRecord], selection: &FilterSelection) -> Vec<usize> {
    records
        .iter()
        .enumerate()
        .filter(|(_, r)| selection.matches(r))
        .map(|(i, _)| i)
        .collect()
}

/// Borrowed view of the records passing all active filters.
pub fn apply_filters<'a>(records: &'a [LandRecord], selection: &FilterSelection) -> Vec<&'a LandRecord> {
    records.iter().filter(|r| selection.matches(r)).collect()
}
