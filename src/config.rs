use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

/// Dashboard configuration, read from an optional JSON file.
///
/// Every field has a default, so `{}` is a valid config file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Heading shown above the controls (also the window title).
    pub title: String,

    /// Launch table loaded at startup. Overridden by the command line.
    pub data_path: Option<PathBuf>,

    pub window: WindowConfig,

    pub slider: SliderConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub width: f32,
    pub height: f32,
}

/// Payload slider domain in kilograms.
///
/// The effective domain is widened to the dataset's payload extremes when
/// those fall outside `[min, max]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SliderConfig {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            title: "SpaceX Launch Records Dashboard".to_string(),
            data_path: None,
            window: WindowConfig::default(),
            slider: SliderConfig::default(),
        }
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1200.0,
            height: 800.0,
        }
    }
}

impl Default for SliderConfig {
    fn default() -> Self {
        Self {
            min: 0.0,
            max: 10_000.0,
            step: 1_000.0,
        }
    }
}

impl SliderConfig {
    /// Slider bounds covering both the configured domain and `bounds`.
    pub fn domain(&self, bounds: Option<(f64, f64)>) -> (f64, f64) {
        match bounds {
            Some((lo, hi)) => (self.min.min(lo), self.max.max(hi)),
            None => (self.min, self.max),
        }
    }
}

impl DashboardConfig {
    /// Read and validate a config file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: Self = serde_json::from_str(&text)
            .with_context(|| format!("parsing config {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let s = &self.slider;
        if !(s.min.is_finite() && s.max.is_finite()) || s.min > s.max {
            bail!("slider.min ({}) must not exceed slider.max ({})", s.min, s.max);
        }
        if !(s.step.is_finite() && s.step > 0.0) {
            bail!("slider.step must be positive, got {}", s.step);
        }
        if self.window.width <= 0.0 || self.window.height <= 0.0 {
            bail!("window size must be positive");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn empty_object_gives_defaults() {
        let config: DashboardConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, DashboardConfig::default());
        assert_eq!(config.slider.step, 1_000.0);
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config: DashboardConfig =
            serde_json::from_str(r#"{"slider": {"max": 16000}, "data_path": "launches.csv"}"#)
                .unwrap();
        assert_eq!(config.slider.max, 16_000.0);
        assert_eq!(config.slider.min, 0.0);
        assert_eq!(config.data_path, Some(PathBuf::from("launches.csv")));
        assert_eq!(config.window, WindowConfig::default());
    }

    #[test]
    fn load_rejects_bad_slider() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("dash.json");
        fs::write(&path, r#"{"slider": {"min": 5000, "max": 100}}"#).unwrap();
        assert!(DashboardConfig::load(&path).is_err());

        fs::write(&path, r#"{"slider": {"step": 0}}"#).unwrap();
        assert!(DashboardConfig::load(&path).is_err());
    }

    #[test]
    fn domain_widens_to_dataset_bounds() {
        let slider = SliderConfig::default();
        assert_eq!(slider.domain(None), (0.0, 10_000.0));
        assert_eq!(slider.domain(Some((0.0, 9_600.0))), (0.0, 10_000.0));
        assert_eq!(slider.domain(Some((-1.0, 15_600.0))), (-1.0, 15_600.0));
    }
}
