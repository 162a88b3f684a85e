use std::fmt;

use crate::error::DashboardError;

use super::model::{LaunchDataset, LaunchRecord, Outcome, SiteSelection};

// ---------------------------------------------------------------------------
// Labeled counts – pie chart input
// ---------------------------------------------------------------------------

/// Label of one pie slice.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SliceLabel {
    Site(String),
    Outcome(Outcome),
}

impl fmt::Display for SliceLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SliceLabel::Site(s) => write!(f, "{s}"),
            SliceLabel::Outcome(o) => write!(f, "{o}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabeledCount {
    pub label: SliceLabel,
    pub count: u64,
}

/// Ordered slice table handed to the pie renderer.
pub type NamedCounts = Vec<LabeledCount>;

/// Sum of all counts in a table.
pub fn total(counts: &[LabeledCount]) -> u64 {
    counts.iter().map(|c| c.count).sum()
}

// ---------------------------------------------------------------------------
// Site aggregation
// ---------------------------------------------------------------------------

/// Derive the pie chart table for a site selection.
///
/// * `All` → per site, the sum of the outcome column (successes), in order of
///   first appearance. Sites without a success are kept with a zero count.
/// * `Site(s)` → per outcome present at `s`, the number of launches, largest
///   count first and ties in order of first appearance.
pub fn aggregate(
    dataset: &LaunchDataset,
    selection: &SiteSelection,
) -> Result<NamedCounts, DashboardError> {
    match selection {
        SiteSelection::All => Ok(successes_by_site(dataset)),
        SiteSelection::Site(site) => {
            if !dataset.has_site(site) {
                return Err(DashboardError::UnknownSite(site.clone()));
            }
            Ok(outcomes_for_site(dataset, site))
        }
    }
}

fn successes_by_site(dataset: &LaunchDataset) -> NamedCounts {
    dataset
        .sites()
        .iter()
        .map(|site| LabeledCount {
            label: SliceLabel::Site(site.clone()),
            count: dataset
                .records()
                .iter()
                .filter(|r| &r.site == site)
                .map(|r| u64::from(r.outcome.class()))
                .sum(),
        })
        .collect()
}

fn outcomes_for_site(dataset: &LaunchDataset, site: &str) -> NamedCounts {
    let mut counts: NamedCounts = Vec::new();
    for rec in dataset.records().iter().filter(|r| r.site == site) {
        let label = SliceLabel::Outcome(rec.outcome);
        match counts.iter_mut().find(|c| c.label == label) {
            Some(entry) => entry.count += 1,
            None => counts.push(LabeledCount { label, count: 1 }),
        }
    }
    // Stable sort keeps first-appearance order among equal counts.
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts
}

// ---------------------------------------------------------------------------
// Summary of a row selection
// ---------------------------------------------------------------------------

/// Launch/success totals for a set of rows, shown in the top bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OutcomeSummary {
    pub launches: usize,
    pub successes: usize,
}

impl OutcomeSummary {
    pub fn of<'a>(records: impl IntoIterator<Item = &'a LaunchRecord>) -> Self {
        records
            .into_iter()
            .fold(OutcomeSummary::default(), |mut acc, r| {
                acc.launches += 1;
                if r.outcome.is_success() {
                    acc.successes += 1;
                }
                acc
            })
    }

    /// Success share in `[0, 1]`, `None` when there are no launches.
    pub fn success_rate(&self) -> Option<f64> {
        if self.launches == 0 {
            None
        } else {
            Some(self.successes as f64 / self.launches as f64)
        }
    }
}
