//! gitcard - Render GitHub profile cards as SVG
//!
//! The core is a pure layout pipeline: a [`CardRecord`] and a [`Theme`] go
//! in, a renderer-agnostic [`Drawing`] comes out, and the drawing is
//! serialized to SVG (or JSON for an interactive preview).
//!
//! # Example
//!
//! ```rust
//! use gitcard::{render_card_svg, CardRecord};
//!
//! let record = CardRecord {
//!     github_user: "octocat".to_string(),
//!     ..Default::default()
//! };
//! let svg = render_card_svg(&record, "dark");
//! assert!(svg.contains("@octocat"));
//! ```
//!
//! # Modules
//!
//! - `layout`: text width estimation, word wrapping, number compaction, badge packing
//! - `card`: the card composer
//! - `svg`: drawing tree, themes and the SVG serializer
//! - `github`, `server`: data fetching and HTTP serving around the core

pub mod types;
pub mod layout;
pub mod card;
pub mod svg;
pub mod config;
pub mod error;
pub mod github;
pub mod logging;
pub mod server;

pub use card::compose;
pub use error::{CardError, Result};
pub use svg::{Drawing, Theme};
pub use types::*;

/// Compose a card, resolving `theme_id` against the theme table.
///
/// Unknown theme ids fall back to the default theme.
pub fn compose_card(record: &CardRecord, theme_id: &str) -> Drawing {
    card::compose(record, Theme::resolve(theme_id))
}

/// Render a card to SVG text.
///
/// # Example
/// ```rust
/// let svg = gitcard::render_card_svg(&gitcard::CardRecord::default(), "classic");
/// assert!(svg.starts_with("<svg"));
/// ```
pub fn render_card_svg(record: &CardRecord, theme_id: &str) -> String {
    svg::render_drawing(&compose_card(record, theme_id))
}

/// Render a card's drawing tree as pretty-printed JSON.
pub fn render_card_json(record: &CardRecord, theme_id: &str) -> Result<String> {
    Ok(serde_json::to_string_pretty(&compose_card(record, theme_id))?)
}
