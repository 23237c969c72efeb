//! Text width estimation.
//!
//! No font is ever loaded: widths are approximated from per-character
//! factors of the font size, so layout behaves identically with or without
//! a graphics stack. Results are estimates and callers must tolerate
//! approximately-fitted text.

use serde::{Deserialize, Serialize};

/// Width factor applied to every character by the flat model.
pub const FLAT_RATIO: f64 = 0.6;

/// Width factors used by the classified model.
pub struct GlyphRatios;

impl GlyphRatios {
    pub const NARROW: f64 = 0.4;
    pub const MEDIUM: f64 = 0.65;
    pub const WIDE: f64 = 0.9;
}

/// How character widths are approximated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GlyphModel {
    /// Every character is `0.6 × font_size` wide.
    #[default]
    Flat,
    /// Characters are bucketed into narrow, medium and wide classes.
    Classified,
}

/// Character width bucket for the classified model
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlyphClass {
    Narrow,
    Medium,
    Wide,
}

impl GlyphClass {
    pub fn of(ch: char) -> Self {
        match ch {
            '1' | 'i' | 'j' | 'l' | '.' | ',' => GlyphClass::Narrow,
            'W' | 'M' | 'w' | 'm' => GlyphClass::Wide,
            _ => GlyphClass::Medium,
        }
    }

    pub fn ratio(self) -> f64 {
        match self {
            GlyphClass::Narrow => GlyphRatios::NARROW,
            GlyphClass::Medium => GlyphRatios::MEDIUM,
            GlyphClass::Wide => GlyphRatios::WIDE,
        }
    }
}

/// Estimated rendered width of `text` in px at `font_size`.
///
/// Characters are counted as Unicode scalar values, not bytes.
pub fn estimate_text_width(text: &str, font_size: f64, model: GlyphModel) -> f64 {
    match model {
        GlyphModel::Flat => text.chars().count() as f64 * font_size * FLAT_RATIO,
        GlyphModel::Classified => text
            .chars()
            .map(|ch| font_size * GlyphClass::of(ch).ratio())
            .sum(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_string_has_no_width() {
        assert_eq!(estimate_text_width("", 14.0, GlyphModel::Flat), 0.0);
        assert_eq!(estimate_text_width("", 14.0, GlyphModel::Classified), 0.0);
    }

    #[test]
    fn flat_model_counts_chars() {
        let w = estimate_text_width("abcde", 10.0, GlyphModel::Flat);
        assert!((w - 30.0).abs() < 1e-9);
        // Multi-byte characters count once
        let w = estimate_text_width("éé", 10.0, GlyphModel::Flat);
        assert!((w - 12.0).abs() < 1e-9);
    }

    #[test]
    fn classified_model_buckets() {
        let narrow = estimate_text_width("il1", 10.0, GlyphModel::Classified);
        let wide = estimate_text_width("WMw", 10.0, GlyphModel::Classified);
        let medium = estimate_text_width("abc", 10.0, GlyphModel::Classified);
        assert!((narrow - 12.0).abs() < 1e-9);
        assert!((wide - 27.0).abs() < 1e-9);
        assert!((medium - 19.5).abs() < 1e-9);
    }

    #[test]
    fn widths_grow_with_length() {
        for model in [GlyphModel::Flat, GlyphModel::Classified] {
            let mut prev = 0.0;
            for n in 1..20 {
                let w = estimate_text_width(&"wi".repeat(n), 12.0, model);
                assert!(w > prev);
                prev = w;
            }
        }
    }
}
