use thiserror::Error;

/// Errors raised by the chart derivations.
///
/// Loading and configuration failures are reported through `anyhow` instead;
/// by the time a derivation runs the dataset is already validated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DashboardError {
    /// The selector named a site that does not occur in the dataset.
    #[error("unknown launch site: {0}")]
    UnknownSite(String),
}
