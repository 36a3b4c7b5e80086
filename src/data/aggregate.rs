use std::collections::BTreeMap;

use super::model::LandRecord;

/// How many owners the leaderboard shows.
pub const TOP_OWNER_LIMIT: usize = 5;

// ---------------------------------------------------------------------------
// KPI summary of a (possibly filtered) row set
// ---------------------------------------------------------------------------

/// Extent total for one land classification.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassificationTotal {
    pub classification: String,
    pub extent: f64,
}

/// Row count and raw extent for one land nature.
#[derive(Debug, Clone, PartialEq)]
pub struct NatureShare {
    pub nature: String,
    pub rows: usize,
    pub extent: f64,
}

/// Summed extent for one owner over the whole table.
#[derive(Debug, Clone, PartialEq)]
pub struct OwnerTotal {
    pub owner: String,
    pub extent: f64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct KpiSummary {
    pub row_count: usize,
    pub total_extent: f64,
    pub patta_extent: f64,
    pub govt_extent: f64,
    pub distinct_owner_count: usize,
    pub distinct_parcel_count: usize,
    /// Max extent per (classification, parcel), summed per classification.
    pub extent_by_classification: Vec<ClassificationTotal>,
    /// Raw per-row counts and extents, no parcel de-duplication.
    pub extent_by_nature: Vec<NatureShare>,
}

impl KpiSummary {
    pub fn is_empty(&self) -> bool {
        self.row_count == 0
    }
}

/// Sum of per-parcel maximum extents. Rows without a parcel number are
/// skipped; a parcel whose extents are all null contributes nothing.
pub fn parcel_extent<'a>(rows: impl IntoIterator<Item = &'a LandRecord>) -> f64 {
    let mut per_parcel: BTreeMap<i64, Option<f64>> = BTreeMap::new();
    for r in rows {
        let Some(parcel) = r.parcel_number else {
            continue;
        };
        let slot = per_parcel.entry(parcel).or_default();
        *slot = max_opt(*slot, r.extent_acres);
    }
    per_parcel.values().flatten().sum()
}

fn max_opt(a: Option<f64>, b: Option<f64>) -> Option<f64> {
    match (a, b) {
        (Some(x), Some(y)) => Some(x.max(y)),
        (x, None) => x,
        (None, y) => y,
    }
}

/// Compute every KPI and chart series for the given rows.
pub fn aggregate<'a>(rows: impl IntoIterator<Item = &'a LandRecord>) -> KpiSummary {
    let rows: Vec<&LandRecord> = rows.into_iter().collect();

    let total_extent = parcel_extent(rows.iter().copied());
    let patta_extent = parcel_extent(rows.iter().copied().filter(|r| r.is_patta()));
    let govt_extent = parcel_extent(rows.iter().copied().filter(|r| r.is_govt()));

    let mut owners = std::collections::BTreeSet::new();
    let mut parcels = std::collections::BTreeSet::new();
    let mut by_class_parcel: BTreeMap<(&str, i64), Option<f64>> = BTreeMap::new();
    let mut by_nature: BTreeMap<&str, NatureShare> = BTreeMap::new();

    for r in &rows {
        if let Some(owner) = r.owner() {
            owners.insert(owner);
        }
        if let Some(parcel) = r.parcel_number {
            parcels.insert(parcel);
            let slot = by_class_parcel
                .entry((r.land_classification.as_str(), parcel))
                .or_default();
            *slot = max_opt(*slot, r.extent_acres);
        }
        let share = by_nature
            .entry(r.land_nature.as_str())
            .or_insert_with(|| NatureShare {
                nature: r.land_nature.clone(),
                rows: 0,
                extent: 0.0,
            });
        share.rows += 1;
        share.extent += r.extent_acres.unwrap_or(0.0);
    }

    let mut by_class: BTreeMap<&str, f64> = BTreeMap::new();
    for ((class, _), extent) in by_class_parcel {
        *by_class.entry(class).or_default() += extent.unwrap_or(0.0);
    }

    let summary = KpiSummary {
        row_count: rows.len(),
        total_extent,
        patta_extent,
        govt_extent,
        distinct_owner_count: owners.len(),
        distinct_parcel_count: parcels.len(),
        extent_by_classification: by_class
            .into_iter()
            .map(|(classification, extent)| ClassificationTotal {
                classification: classification.to_string(),
                extent,
            })
            .collect(),
        extent_by_nature: by_nature.into_values().collect(),
    };
    log::debug!(
        "aggregated {} rows: total {:.2}, {} parcels",
        summary.row_count,
        summary.total_extent,
        summary.distinct_parcel_count
    );
    summary
}

// ---------------------------------------------------------------------------
// Top owners over the full table
// ---------------------------------------------------------------------------

/// Owners ranked by raw summed extent (no parcel de-duplication), largest
/// first, at most `limit` entries. Callers pass the full unfiltered table.
/// Equal totals keep owner-name order.
pub fn top_owners(records: &[LandRecord], limit: usize) -> Vec<OwnerTotal> {
    let mut totals: BTreeMap<&str, f64> = BTreeMap::new();
    for r in records {
        if let Some(owner) = r.owner() {
            *totals.entry(owner).or_default() += r.extent_acres.unwrap_or(0.0);
        }
    }

    let mut ranked: Vec<OwnerTotal> = totals
        .into_iter()
        .map(|(owner, extent)| OwnerTotal {
            owner: owner.to_string(),
            extent,
        })
        .collect();
    // sort_by is stable
    ranked.sort_by(|a, b| b.extent.total_cmp(&a.extent));
    ranked.truncate(limit);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::{apply_filters, FilterField, FilterSelection};
    use crate::data::model::tests::record;
    use crate::data::model::shared_parcels;

    const EPS: f64 = 1e-9;

    fn worked_example() -> Vec<LandRecord> {
        vec![
            record("A", Some(1), "Patta", Some(1.5)),
            record("A", Some(1), "Patta", Some(1.5)),
            record("B", Some(2), "Govt land", Some(3.0)),
        ]
    }

    #[test]
    fn test_worked_example() {
        let rows = worked_example();
        let kpi = aggregate(&rows);

        assert!((kpi.total_extent - 4.5).abs() < EPS);
        assert!((kpi.patta_extent - 1.5).abs() < EPS);
        assert!((kpi.govt_extent - 3.0).abs() < EPS);
        assert_eq!(kpi.distinct_owner_count, 2);
        assert_eq!(kpi.distinct_parcel_count, 2);
        assert_eq!(kpi.row_count, 3);
        assert_eq!(shared_parcels(&rows), vec![1]);
    }

    #[test]
    fn test_duplicate_parcel_counts_once() {
        let rows = vec![
            record("A", Some(7), "Patta", Some(2.0)),
            record("B", Some(7), "Patta", Some(2.0)),
        ];
        assert!((aggregate(&rows).total_extent - 2.0).abs() < EPS);
    }

    #[test]
    fn test_parcel_takes_maximum_extent() {
        let rows = vec![
            record("A", Some(7), "Patta", Some(1.0)),
            record("B", Some(7), "Patta", None),
            record("C", Some(7), "Patta", Some(2.5)),
            record("D", Some(8), "Patta", None),
            record("E", None, "Patta", Some(10.0)),
        ];
        let kpi = aggregate(&rows);
        assert!((kpi.total_extent - 2.5).abs() < EPS);
        assert_eq!(kpi.distinct_parcel_count, 2);
    }

    #[test]
    fn test_patta_and_govt_bounded_by_total() {
        let rows = vec![
            record("A", Some(1), "Patta", Some(1.25)),
            record("B", Some(2), "Govt", Some(0.75)),
            record("C", Some(3), "Inam", Some(4.0)),
            record("D", Some(4), "patta / govt dispute", Some(0.5)),
            record("E", Some(1), "Govt", Some(1.0)),
        ];
        let kpi = aggregate(&rows);
        assert!(kpi.patta_extent + kpi.govt_extent <= kpi.total_extent + EPS);
        assert!((kpi.total_extent - 6.5).abs() < EPS);
    }

    #[test]
    fn test_classification_dedupes_by_parcel() {
        let mut rows = vec![
            record("A", Some(1), "Patta", Some(1.0)),
            record("B", Some(1), "Patta", Some(1.0)),
            record("C", Some(2), "Patta", Some(2.0)),
            record("D", Some(3), "Govt", Some(4.0)),
        ];
        rows[0].land_classification = "Wet".into();
        rows[1].land_classification = "Wet".into();
        rows[2].land_classification = "Wet".into();
        rows[3].land_classification = "Dry".into();

        let kpi = aggregate(&rows);
        assert_eq!(
            kpi.extent_by_classification,
            vec![
                ClassificationTotal { classification: "Dry".into(), extent: 4.0 },
                ClassificationTotal { classification: "Wet".into(), extent: 3.0 },
            ]
        );
    }

    #[test]
    fn test_nature_share_uses_raw_rows() {
        let kpi = aggregate(&worked_example());
        assert_eq!(
            kpi.extent_by_nature,
            vec![
                NatureShare { nature: "Govt land".into(), rows: 1, extent: 3.0 },
                NatureShare { nature: "Patta".into(), rows: 2, extent: 3.0 },
            ]
        );
    }

    #[test]
    fn test_empty_rows_give_zero_summary() {
        let kpi = aggregate(std::iter::empty());
        assert!(kpi.is_empty());
        assert_eq!(kpi, KpiSummary::default());
    }

    #[test]
    fn test_top_owners_ranked_and_truncated() {
        let rows = vec![
            record("Fatima", Some(1), "Patta", Some(1.0)),
            record("Balu", Some(2), "Patta", Some(2.0)),
            record("Ammu", Some(3), "Patta", Some(2.0)),
            record("Chandra", Some(4), "Patta", Some(5.0)),
            record("Balu", Some(2), "Patta", Some(2.0)),
            record("Devi", Some(5), "Patta", None),
            record("Esha", Some(6), "Patta", Some(0.5)),
            record("", Some(7), "Patta", Some(9.0)),
        ];
        let top = top_owners(&rows, TOP_OWNER_LIMIT);
        let names: Vec<&str> = top.iter().map(|o| o.owner.as_str()).collect();

        // Balu sums raw rows (4.0) even though both rows are parcel 2.
        assert_eq!(names, vec!["Chandra", "Balu", "Ammu", "Fatima", "Esha"]);
        assert!((top[1].extent - 4.0).abs() < EPS);
        assert!(top.windows(2).all(|w| w[0].extent >= w[1].extent));
    }

    #[test]
    fn test_top_owners_ties_keep_name_order() {
        let rows = vec![
            record("Zoya", Some(1), "Patta", Some(1.0)),
            record("Arun", Some(2), "Patta", Some(1.0)),
            record("Mani", Some(3), "Patta", Some(1.0)),
        ];
        let names: Vec<String> = top_owners(&rows, 2).into_iter().map(|o| o.owner).collect();
        assert_eq!(names, vec!["Arun", "Mani"]);
    }

    #[test]
    fn test_top_owners_ignore_filters() {
        let rows = worked_example();
        let mut selection = FilterSelection::default();
        selection.toggle_number(FilterField::Parcel, 1);
        let filtered = apply_filters(&rows, &selection);
        assert_eq!(filtered.len(), 2);

        let top = top_owners(&rows, TOP_OWNER_LIMIT);
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].owner, "A");
        assert!((top[0].extent - 3.0).abs() < EPS);
    }

    #[test]
    fn test_aggregate_filtered_view() {
        let rows = worked_example();
        let mut selection = FilterSelection::default();
        selection.toggle_owner("B");
        let kpi = aggregate(apply_filters(&rows, &selection));
        assert!((kpi.total_extent - 3.0).abs() < EPS);
        assert_eq!(kpi.patta_extent, 0.0);
        assert_eq!(kpi.distinct_owner_count, 1);
    }
}
