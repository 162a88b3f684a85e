/// Data layer: launch records, loading, and the two chart derivations.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse + validate file → LaunchDataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────────┐
///   │ LaunchDataset │  Vec<LaunchRecord>, site index, payload bounds
///   └──────────────┘
///        │                         │
///        ▼                         ▼
///   ┌───────────┐            ┌──────────┐
///   │ aggregate  │ site →     │  filter   │ site + payload range →
///   │            │ pie counts │           │ scatter row indices
///   └───────────┘            └──────────┘
/// ```
///
/// Both derivations are pure functions of the dataset and the selection.

pub mod aggregate;
pub mod filter;
pub mod loader;
pub mod model;
