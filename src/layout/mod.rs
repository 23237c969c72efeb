//! Layout engines for variable-length card content.
//!
//! Everything here is a pure function of its inputs: width estimation,
//! word wrapping, number compaction and badge packing.

pub mod badge;
pub mod metrics;
pub mod multiline;
pub mod number;

pub use badge::{pack_badges, BadgeMetrics, BadgeStyle, PackOptions, PlacedBadge};
pub use metrics::{estimate_text_width, GlyphModel};
pub use multiline::{layout_text, LayoutBox, TextBlock, ELLIPSIS, FALLBACK_TEXT};
pub use number::format_compact;
