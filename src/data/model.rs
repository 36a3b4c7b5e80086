use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

// ---------------------------------------------------------------------------
// Column names of the source table
// ---------------------------------------------------------------------------

pub const COL_ACCOUNT_NO: &str = "Account No.";
pub const COL_OWNER_NAME: &str = "Land owner name";
pub const COL_PARCEL_NUMBER: &str = "Land Parcel Number";
pub const COL_LAND_NATURE: &str = "Land nature";
pub const COL_CLASSIFICATION: &str = "Land classification";
pub const COL_SUB_CLASSIFICATION: &str = "Land sub-classification";
pub const COL_EXTENT: &str = "Land Extent (in acres)";

/// Every column the loader requires, in display order.
pub const REQUIRED_COLUMNS: [&str; 7] = [
    COL_ACCOUNT_NO,
    COL_OWNER_NAME,
    COL_PARCEL_NUMBER,
    COL_LAND_NATURE,
    COL_CLASSIFICATION,
    COL_SUB_CLASSIFICATION,
    COL_EXTENT,
];

// ---------------------------------------------------------------------------
// CellValue – a raw cell before coercion
// ---------------------------------------------------------------------------

/// A raw cell as read from any of the supported file formats.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Number(f64),
    Empty,
}

impl CellValue {
    /// Trimmed text rendering; numbers print the way a spreadsheet shows them.
    pub fn to_text(&self) -> String {
        match self {
            CellValue::Text(s) => s.trim().to_string(),
            CellValue::Number(v) if v.fract() == 0.0 && v.is_finite() => format!("{}", *v as i64),
            CellValue::Number(v) => v.to_string(),
            CellValue::Empty => String::new(),
        }
    }

    /// Numeric coercion. Anything that is not a finite number becomes `None`.
    pub fn to_f64(&self) -> Option<f64> {
        let v = match self {
            CellValue::Number(v) => *v,
            CellValue::Text(s) => s.trim().parse::<f64>().ok()?,
            CellValue::Empty => return None,
        };
        v.is_finite().then_some(v)
    }

    /// Integer coercion: integral numbers only (`12.0` is accepted as `12`).
    pub fn to_i64(&self) -> Option<i64> {
        if let CellValue::Text(s) = self {
            if let Ok(i) = s.trim().parse::<i64>() {
                return Some(i);
            }
        }
        let v = self.to_f64()?;
        (v.fract() == 0.0 && v.abs() < i64::MAX as f64).then_some(v as i64)
    }
}

// ---------------------------------------------------------------------------
// LandRecord – one row of the source table
// ---------------------------------------------------------------------------

/// A single land record. Numeric fields are `None` when the source cell
/// could not be coerced.
#[derive(Debug, Clone, PartialEq)]
pub struct LandRecord {
    pub account_number: Option<i64>,
    /// Empty string stands for a missing owner.
    pub owner_name: String,
    pub parcel_number: Option<i64>,
    pub land_nature: String,
    pub land_classification: String,
    pub land_sub_classification: String,
    pub extent_acres: Option<f64>,
}

impl LandRecord {
    /// Owner name, or `None` for a blank cell.
    pub fn owner(&self) -> Option<&str> {
        (!self.owner_name.is_empty()).then_some(self.owner_name.as_str())
    }

    pub fn is_patta(&self) -> bool {
        self.land_nature.to_lowercase().contains("patta")
    }

    pub fn is_govt(&self) -> bool {
        self.land_nature.to_lowercase().contains("govt")
    }
}

/// Formats an optional integer cell for tables; nulls render blank.
pub struct OptDisplay<T>(pub Option<T>);

impl<T: fmt::Display> fmt::Display for OptDisplay<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Some(v) => write!(f, "{v}"),
            None => Ok(()),
        }
    }
}

// ---------------------------------------------------------------------------
// LandDataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The full parsed table with pre-computed filter choices.
#[derive(Debug, Clone)]
pub struct LandDataset {
    /// All records, in source order.
    pub records: Vec<LandRecord>,
    /// Where the records came from (file name), for the top bar.
    pub source: String,
    /// Sorted distinct non-null owner names.
    pub owner_options: Vec<String>,
    /// Sorted distinct non-null account numbers.
    pub account_options: Vec<i64>,
    /// Sorted distinct non-null parcel numbers.
    pub parcel_options: Vec<i64>,
    /// Sorted parcel numbers appearing in more than one row.
    pub shared_parcel_options: Vec<i64>,
}

impl LandDataset {
    /// Build the filter choices from the loaded records.
    pub fn from_records(records: Vec<LandRecord>, source: impl Into<String>) -> Self {
        let owner_options: BTreeSet<&str> = records.iter().filter_map(|r| r.owner()).collect();
        let account_options: BTreeSet<i64> =
            records.iter().filter_map(|r| r.account_number).collect();
        let parcel_options: BTreeSet<i64> =
            records.iter().filter_map(|r| r.parcel_number).collect();

        LandDataset {
            owner_options: owner_options.into_iter().map(str::to_string).collect(),
            account_options: account_options.into_iter().collect(),
            parcel_options: parcel_options.into_iter().collect(),
            shared_parcel_options: shared_parcels(&records),
            records,
            source: source.into(),
        }
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Parcel numbers with a row count above one, ascending. Null parcels are
/// never shared.
pub fn shared_parcels(records: &[LandRecord]) -> Vec<i64> {
    let mut counts: BTreeMap<i64, usize> = BTreeMap::new();
    for parcel in records.iter().filter_map(|r| r.parcel_number) {
        *counts.entry(parcel).or_default() += 1;
    }
    counts
        .into_iter()
        .filter(|&(_, n)| n > 1)
        .map(|(parcel, _)| parcel)
        .collect()
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn record(owner: &str, parcel: Option<i64>, nature: &str, extent: Option<f64>) -> LandRecord {
        LandRecord {
            account_number: None,
            owner_name: owner.to_string(),
            parcel_number: parcel,
            land_nature: nature.to_string(),
            land_classification: String::new(),
            land_sub_classification: String::new(),
            extent_acres: extent,
        }
    }

    #[test]
    fn test_cell_coercion() {
        assert_eq!(CellValue::Text(" 12 ".into()).to_i64(), Some(12));
        assert_eq!(CellValue::Number(12.0).to_i64(), Some(12));
        assert_eq!(CellValue::Text("12.0".into()).to_i64(), Some(12));
        assert_eq!(CellValue::Number(12.5).to_i64(), None);
        assert_eq!(CellValue::Text("n/a".into()).to_i64(), None);
        assert_eq!(CellValue::Text("1.25".into()).to_f64(), Some(1.25));
        assert_eq!(CellValue::Text("NaN".into()).to_f64(), None);
        assert_eq!(CellValue::Empty.to_f64(), None);
        assert_eq!(CellValue::Number(7.0).to_text(), "7");
        assert_eq!(CellValue::Text("  Patta ".into()).to_text(), "Patta");
    }

    #[test]
    fn test_nature_classification_is_case_insensitive() {
        assert!(record("A", None, "PATTA Land", None).is_patta());
        assert!(record("A", None, "Govt. poramboke", None).is_govt());
        assert!(!record("A", None, "Inam", None).is_patta());
        assert!(!record("A", None, "Inam", None).is_govt());
    }

    #[test]
    fn test_shared_parcels_requires_two_rows() {
        let records = vec![
            record("A", Some(3), "Patta", Some(1.0)),
            record("B", Some(1), "Patta", Some(1.0)),
            record("C", Some(3), "Patta", Some(1.0)),
            record("D", None, "Patta", Some(1.0)),
            record("E", None, "Patta", Some(1.0)),
            record("F", Some(2), "Patta", Some(1.0)),
            record("G", Some(1), "Patta", Some(1.0)),
            record("H", Some(1), "Patta", Some(1.0)),
        ];
        assert_eq!(shared_parcels(&records), vec![1, 3]);
    }

    #[test]
    fn test_options_are_sorted_distinct_non_null() {
        let mut records = vec![
            record("Ravi", Some(9), "Patta", Some(1.0)),
            record("", Some(4), "Patta", Some(1.0)),
            record("Anil", None, "Patta", Some(1.0)),
            record("Ravi", Some(4), "Patta", Some(1.0)),
        ];
        records[0].account_number = Some(20);
        records[2].account_number = Some(5);
        let ds = LandDataset::from_records(records, "test");

        assert_eq!(ds.owner_options, vec!["Anil", "Ravi"]);
        assert_eq!(ds.account_options, vec![5, 20]);
        assert_eq!(ds.parcel_options, vec![4, 9]);
        assert_eq!(ds.shared_parcel_options, vec![4]);
        assert_eq!(ds.len(), 4);
    }
}
