use std::fmt;

// ---------------------------------------------------------------------------
// Outcome – the binary `class` column
// ---------------------------------------------------------------------------

/// Launch result as stored in the `class` column: `1` success, `0` failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Outcome {
    Failure,
    Success,
}

impl Outcome {
    /// Interpret a raw `class` cell. Only exact `0` and `1` are accepted.
    pub fn from_class(value: f64) -> Option<Self> {
        if value == 0.0 {
            Some(Outcome::Failure)
        } else if value == 1.0 {
            Some(Outcome::Success)
        } else {
            None
        }
    }

    /// Raw column value (`0` or `1`).
    pub fn class(self) -> u8 {
        match self {
            Outcome::Failure => 0,
            Outcome::Success => 1,
        }
    }

    pub fn is_success(self) -> bool {
        self == Outcome::Success
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.class())
    }
}

// ---------------------------------------------------------------------------
// LaunchRecord – one row of the dataset
// ---------------------------------------------------------------------------

/// A single launch (one row of the source table).
#[derive(Debug, Clone, PartialEq)]
pub struct LaunchRecord {
    /// `Launch Site`.
    pub site: String,
    /// `Payload Mass (kg)`.
    pub payload_mass_kg: f64,
    /// `class`.
    pub outcome: Outcome,
    /// `Booster Version Category`, used as the scatter colour dimension.
    pub booster_category: String,
    /// `Flight Number`, display only.
    pub flight_number: Option<u32>,
    /// `Booster Version`, display only.
    pub booster_version: Option<String>,
}

impl LaunchRecord {
    pub fn new(
        site: impl Into<String>,
        payload_mass_kg: f64,
        outcome: Outcome,
        booster_category: impl Into<String>,
    ) -> Self {
        Self {
            site: site.into(),
            payload_mass_kg,
            outcome,
            booster_category: booster_category.into(),
            flight_number: None,
            booster_version: None,
        }
    }
}

// ---------------------------------------------------------------------------
// LaunchDataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The loaded launch table with indices derived once at construction.
///
/// There is no mutable access to the records: the dataset is read-only for
/// its whole lifetime.
#[derive(Debug, Clone, Default)]
pub struct LaunchDataset {
    records: Vec<LaunchRecord>,
    /// Distinct sites in order of first appearance.
    sites: Vec<String>,
    /// Distinct booster categories in order of first appearance.
    booster_categories: Vec<String>,
    /// Observed (min, max) payload mass; `None` when empty.
    payload_bounds: Option<(f64, f64)>,
}

impl LaunchDataset {
    /// Build indices from the loaded records.
    pub fn from_records(records: Vec<LaunchRecord>) -> Self {
        let mut sites: Vec<String> = Vec::new();
        let mut booster_categories: Vec<String> = Vec::new();
        let mut payload_bounds: Option<(f64, f64)> = None;

        for rec in &records {
            if !sites.contains(&rec.site) {
                sites.push(rec.site.clone());
            }
            if !booster_categories.contains(&rec.booster_category) {
                booster_categories.push(rec.booster_category.clone());
            }
            let m = rec.payload_mass_kg;
            payload_bounds = Some(match payload_bounds {
                Some((lo, hi)) => (lo.min(m), hi.max(m)),
                None => (m, m),
            });
        }

        LaunchDataset {
            records,
            sites,
            booster_categories,
            payload_bounds,
        }
    }

    pub fn records(&self) -> &[LaunchRecord] {
        &self.records
    }

    pub fn sites(&self) -> &[String] {
        &self.sites
    }

    pub fn booster_categories(&self) -> &[String] {
        &self.booster_categories
    }

    pub fn has_site(&self, site: &str) -> bool {
        self.sites.iter().any(|s| s == site)
    }

    /// Smallest and largest payload mass in the table.
    pub fn payload_bounds(&self) -> Option<(f64, f64)> {
        self.payload_bounds
    }

    /// The range covering every record, or `0..=0` for an empty table.
    pub fn full_payload_range(&self) -> PayloadRange {
        let (low, high) = self.payload_bounds.unwrap_or((0.0, 0.0));
        PayloadRange::new(low, high)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Selection – what the controls currently say
// ---------------------------------------------------------------------------

/// The dropdown value: the `ALL` sentinel or one launch site.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum SiteSelection {
    #[default]
    All,
    Site(String),
}

impl SiteSelection {
    pub const ALL_VALUE: &'static str = "ALL";

    /// Parse a raw selector value; `"ALL"` maps to [`SiteSelection::All`].
    pub fn from_value(value: &str) -> Self {
        if value == Self::ALL_VALUE {
            SiteSelection::All
        } else {
            SiteSelection::Site(value.to_string())
        }
    }

    /// Human-facing label, as shown in the dropdown.
    pub fn label(&self) -> &str {
        match self {
            SiteSelection::All => "All Sites",
            SiteSelection::Site(s) => s,
        }
    }

    /// Whether `site` passes this selection.
    pub fn matches(&self, site: &str) -> bool {
        match self {
            SiteSelection::All => true,
            SiteSelection::Site(s) => s == site,
        }
    }
}

impl fmt::Display for SiteSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SiteSelection::All => write!(f, "{}", Self::ALL_VALUE),
            SiteSelection::Site(s) => write!(f, "{s}"),
        }
    }
}

/// Closed payload interval `[low, high]` in kilograms.
///
/// `low > high` is representable and simply matches nothing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PayloadRange {
    pub low: f64,
    pub high: f64,
}

impl PayloadRange {
    pub fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }

    /// Inclusive at both ends.
    pub fn contains(&self, mass_kg: f64) -> bool {
        self.low <= mass_kg && mass_kg <= self.high
    }

    pub fn is_inverted(&self) -> bool {
        self.low > self.high
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outcome_accepts_only_zero_and_one() {
        assert_eq!(Outcome::from_class(0.0), Some(Outcome::Failure));
        assert_eq!(Outcome::from_class(1.0), Some(Outcome::Success));
        assert_eq!(Outcome::from_class(0.5), None);
        assert_eq!(Outcome::from_class(2.0), None);
        assert_eq!(Outcome::Success.to_string(), "1");
    }

    #[test]
    fn dataset_indices_follow_first_appearance() {
        let ds = LaunchDataset::from_records(vec![
            LaunchRecord::new("B", 900.0, Outcome::Success, "FT"),
            LaunchRecord::new("A", 500.0, Outcome::Success, "v1.1"),
            LaunchRecord::new("B", 4000.0, Outcome::Failure, "v1.1"),
            LaunchRecord::new("A", 0.0, Outcome::Failure, "B5"),
        ]);
        assert_eq!(ds.sites(), ["B", "A"]);
        assert_eq!(ds.booster_categories(), ["FT", "v1.1", "B5"]);
        assert_eq!(ds.payload_bounds(), Some((0.0, 4000.0)));
        assert!(ds.has_site("A"));
        assert!(!ds.has_site("C"));
    }

    #[test]
    fn empty_dataset_has_no_bounds() {
        let ds = LaunchDataset::from_records(Vec::new());
        assert!(ds.is_empty());
        assert_eq!(ds.payload_bounds(), None);
        assert_eq!(ds.full_payload_range(), PayloadRange::new(0.0, 0.0));
    }

    #[test]
    fn site_selection_round_trips_sentinel() {
        assert_eq!(SiteSelection::from_value("ALL"), SiteSelection::All);
        assert_eq!(
            SiteSelection::from_value("KSC LC-39A"),
            SiteSelection::Site("KSC LC-39A".into())
        );
        assert_eq!(SiteSelection::All.to_string(), "ALL");
        assert_eq!(SiteSelection::All.label(), "All Sites");
        assert!(SiteSelection::All.matches("anything"));
        assert!(!SiteSelection::Site("A".into()).matches("B"));
    }

    #[test]
    fn payload_range_is_inclusive() {
        let r = PayloadRange::new(500.0, 700.0);
        assert!(r.contains(500.0));
        assert!(r.contains(700.0));
        assert!(!r.contains(499.999));
        assert!(!r.contains(700.001));
        assert!(PayloadRange::new(2.0, 1.0).is_inverted());
    }
}
