//! Pill-shaped badge sizing and row packing.

use super::metrics::{estimate_text_width, GlyphModel};
use serde::Serialize;

/// Sizing parameters for one family of badges.
#[derive(Debug, Clone, Copy)]
pub struct BadgeStyle {
    pub font_size: f64,
    pub padding_x: f64,
    pub padding_y: f64,
    /// Corner radius as a fraction of the badge height
    pub radius_ratio: f64,
    /// Leading icon size, 0 when the badge carries no icon
    pub icon_size: f64,
    pub icon_gap: f64,
    pub model: GlyphModel,
}

impl BadgeStyle {
    /// Label-only badge used for technology tags.
    pub const TECH: BadgeStyle = BadgeStyle {
        font_size: 10.0,
        padding_x: 8.0,
        padding_y: 4.0,
        radius_ratio: 1.0 / 3.0,
        icon_size: 0.0,
        icon_gap: 0.0,
        model: GlyphModel::Flat,
    };

    /// Icon + number badge used for star and fork counts.
    pub const STAT: BadgeStyle = BadgeStyle {
        font_size: 10.0,
        padding_x: 8.0,
        padding_y: 4.0,
        radius_ratio: 0.5,
        icon_size: 12.0,
        icon_gap: 4.0,
        model: GlyphModel::Flat,
    };

    pub fn height(&self) -> f64 {
        self.font_size + self.padding_y * 2.0
    }

    fn icon_extent(&self) -> f64 {
        if self.icon_size > 0.0 {
            self.icon_size + self.icon_gap
        } else {
            0.0
        }
    }

    /// Compute the pill geometry for `label`.
    pub fn measure(&self, label: &str) -> BadgeMetrics {
        let text_width = estimate_text_width(label, self.font_size, self.model);
        let height = self.height();
        BadgeMetrics {
            width: text_width + self.icon_extent() + self.padding_x * 2.0,
            height,
            radius: height * self.radius_ratio,
            text_x: self.padding_x + self.icon_extent(),
            text_width,
        }
    }
}

/// Resolved pill dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BadgeMetrics {
    pub width: f64,
    pub height: f64,
    pub radius: f64,
    /// Offset of the label from the badge's left edge
    pub text_x: f64,
    pub text_width: f64,
}

/// Row packing limits.
#[derive(Debug, Clone, Copy)]
pub struct PackOptions {
    pub max_width: f64,
    pub row_height: f64,
    pub gap: f64,
    pub max_badges: usize,
    pub max_rows: usize,
}

impl Default for PackOptions {
    fn default() -> Self {
        Self {
            max_width: 320.0,
            row_height: 24.0,
            gap: 6.0,
            max_badges: 8,
            max_rows: 2,
        }
    }
}

/// A badge with its offset inside the packed block.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacedBadge {
    pub label: String,
    pub x: f64,
    pub y: f64,
    pub row: usize,
    pub metrics: BadgeMetrics,
}

/// Pack badges left to right, wrapping to a new row when the next badge
/// would cross `max_width`.
///
/// Only the first `max_badges` labels are considered. Badges that would open
/// a row past `max_rows` are dropped.
pub fn pack_badges<S: AsRef<str>>(
    labels: &[S],
    style: &BadgeStyle,
    opts: &PackOptions,
) -> Vec<PlacedBadge> {
    let mut placed = Vec::new();
    let mut x = 0.0;
    let mut row = 0;

    for label in labels.iter().take(opts.max_badges) {
        let label = label.as_ref();
        let metrics = style.measure(label);

        // A badge wider than the row still gets a row to itself.
        if x > 0.0 && x + metrics.width > opts.max_width {
            x = 0.0;
            row += 1;
        }
        if row >= opts.max_rows {
            break;
        }

        placed.push(PlacedBadge {
            label: label.to_string(),
            x,
            y: row as f64 * opts.row_height,
            row,
            metrics,
        });
        x += metrics.width + opts.gap;
    }
    placed
}
