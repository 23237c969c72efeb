//! Drawing tree, themes and the SVG serializer.
//!
//! - `types`: renderer-agnostic primitives produced by the card composer
//! - `renderer`: drawing tree → SVG string
//! - `theme`: theme table and shared gradient/clip definitions
//! - `styles`: card geometry and typography constants
//!
//! Pure string building, no DOM manipulation.

mod types;
mod renderer;
pub mod theme;
pub mod styles;

pub use types::*;
pub use renderer::{escape_xml, fmt_num, render_drawing};
pub use theme::{all_themes, Appearance, Theme, ThemeTokens};
