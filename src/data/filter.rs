use super::model::{LaunchDataset, PayloadRange, SiteSelection};

// ---------------------------------------------------------------------------
// Payload filter – scatter chart input
// ---------------------------------------------------------------------------

/// Return indices of launches whose payload lies in `range` and whose site
/// passes `selection`, in dataset order.
///
/// An inverted range (`low > high`) matches nothing. A site that does not
/// occur in the dataset also matches nothing; unlike the pie aggregation this
/// is not treated as an error.
pub fn filtered_indices(
    dataset: &LaunchDataset,
    selection: &SiteSelection,
    range: PayloadRange,
) -> Vec<usize> {
    if range.is_inverted() {
        return Vec::new();
    }
    dataset
        .records()
        .iter()
        .enumerate()
        .filter(|(_, rec)| range.contains(rec.payload_mass_kg))
        .filter(|(_, rec)| selection.matches(&rec.site))
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{LaunchRecord, Outcome};

    fn sample() -> LaunchDataset {
        LaunchDataset::from_records(vec![
            LaunchRecord::new("A", 500.0, Outcome::Success, "FT"),
            LaunchRecord::new("A", 700.0, Outcome::Failure, "v1.1"),
            LaunchRecord::new("B", 900.0, Outcome::Success, "FT"),
        ])
    }

    #[test]
    fn range_filter_across_all_sites() {
        let ds = sample();
        let range = PayloadRange::new(600.0, 1000.0);
        assert_eq!(filtered_indices(&ds, &SiteSelection::All, range), vec![1, 2]);
        let idx = filtered_indices(&ds, &SiteSelection::Site("B".into()), range);
        assert_eq!(idx, vec![2]);
        assert_eq!(
            ds.records()[idx[0]],
            LaunchRecord::new("B", 900.0, Outcome::Success, "FT")
        );
    }

    #[test]
    fn example_range_keeps_only_heavy_launch() {
        let ds = LaunchDataset::from_records(vec![
            LaunchRecord::new("A", 500.0, Outcome::Success, "FT"),
            LaunchRecord::new("B", 900.0, Outcome::Success, "FT"),
        ]);
        let idx = filtered_indices(&ds, &SiteSelection::All, PayloadRange::new(600.0, 1000.0));
        assert_eq!(idx, vec![1]);
    }

    #[test]
    fn full_range_returns_everything_in_order() {
        let ds = sample();
        let idx = filtered_indices(&ds, &SiteSelection::All, ds.full_payload_range());
        assert_eq!(idx, vec![0, 1, 2]);
    }

    #[test]
    fn inverted_range_is_empty_for_any_site() {
        let ds = sample();
        let inverted = PayloadRange::new(1000.0, 0.0);
        for sel in [
            SiteSelection::All,
            SiteSelection::Site("A".into()),
            SiteSelection::Site("B".into()),
        ] {
            assert!(filtered_indices(&ds, &sel, inverted).is_empty());
        }
    }

    #[test]
    fn bounds_are_inclusive() {
        let ds = sample();
        let eps = 1e-6;
        let exact = filtered_indices(&ds, &SiteSelection::All, PayloadRange::new(500.0, 700.0));
        assert_eq!(exact, vec![0, 1]);
        let narrowed = filtered_indices(
            &ds,
            &SiteSelection::All,
            PayloadRange::new(500.0 + eps, 700.0 - eps),
        );
        assert!(narrowed.is_empty());
    }

    #[test]
    fn unknown_site_matches_nothing() {
        let ds = sample();
        let idx = filtered_indices(&ds, &SiteSelection::Site("Z".into()), ds.full_payload_range());
        assert!(idx.is_empty());
    }

    #[test]
    fn filtering_is_deterministic() {
        let ds = sample();
        let sel = SiteSelection::Site("A".into());
        let range = PayloadRange::new(0.0, 10_000.0);
        assert_eq!(
            filtered_indices(&ds, &sel, range),
            filtered_indices(&ds, &sel, range)
        );
    }
}
