use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::data::aggregate::SliceLabel;
use crate::data::model::Outcome;

pub const SUCCESS_COLOR: Color32 = Color32::from_rgb(44, 160, 44);
pub const FAILURE_COLOR: Color32 = Color32::from_rgb(214, 39, 40);

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

pub fn outcome_color(outcome: Outcome) -> Color32 {
    match outcome {
        Outcome::Success => SUCCESS_COLOR,
        Outcome::Failure => FAILURE_COLOR,
    }
}

// ---------------------------------------------------------------------------
// Color mapping: category name → Color32
// ---------------------------------------------------------------------------

/// Maps the distinct values of a text column (sites, booster categories)
/// to distinct colours.
#[derive(Debug, Clone)]
pub struct ColorMap {
    mapping: BTreeMap<String, Color32>,
    default_color: Color32,
}

impl ColorMap {
    /// Build a colour map; colours are assigned in the order of `values`.
    pub fn new(values: &[String]) -> Self {
        let palette = generate_palette(values.len());
        let mapping = values.iter().cloned().zip(palette).collect();

        ColorMap {
            mapping,
            default_color: Color32::GRAY,
        }
    }

    pub fn color_for(&self, value: &str) -> Color32 {
        self.mapping
            .get(value)
            .copied()
            .unwrap_or(self.default_color)
    }

    /// Colour of a pie slice: outcomes use the success/failure colours,
    /// sites their palette entry.
    pub fn slice_color(&self, label: &SliceLabel) -> Color32 {
        match label {
            SliceLabel::Site(s) => self.color_for(s),
            SliceLabel::Outcome(o) => outcome_color(*o),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_has_distinct_colours() {
        let p = generate_palette(4);
        assert_eq!(p.len(), 4);
        for i in 0..p.len() {
            for j in (i + 1)..p.len() {
                assert_ne!(p[i], p[j]);
            }
        }
        assert!(generate_palette(0).is_empty());
    }

    #[test]
    fn unknown_value_falls_back_to_grey() {
        let map = ColorMap::new(&["FT".to_string(), "B5".to_string()]);
        assert_ne!(map.color_for("FT"), map.color_for("B5"));
        assert_eq!(map.color_for("v1.0"), Color32::GRAY);
    }

    #[test]
    fn outcome_slices_use_fixed_colours() {
        let map = ColorMap::new(&[]);
        assert_eq!(map.slice_color(&SliceLabel::Outcome(Outcome::Success)), SUCCESS_COLOR);
        assert_eq!(map.slice_color(&SliceLabel::Outcome(Outcome::Failure)), FAILURE_COLOR);
    }
}
