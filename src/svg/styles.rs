//! Card geometry and typography constants.
//!
//! Geometry is shared by every theme; only colors vary per theme.

/// Fixed canvas size in logical units
pub struct Canvas;

impl Canvas {
    pub const WIDTH: f64 = 384.0;
    pub const HEIGHT: f64 = 536.0;
    pub const OUTER_RADIUS: f64 = 20.0;
    /// Inset of the inner panel from the canvas edge
    pub const INSET: f64 = 8.0;
    pub const INNER_RADIUS: f64 = 12.0;
    pub const PADDING: f64 = 8.0;
}

/// Fixed font sizes used on the card (in px)
pub struct FontSizes;

impl FontSizes {
    pub const HANDLE: f64 = 18.0;
    pub const HEADER_STAT: f64 = 16.0;
    pub const BIO: f64 = 12.0;
    pub const REPO_NAME: f64 = 14.0;
    pub const REPO_DESCRIPTION: f64 = 11.0;
    pub const CAPTION: f64 = 10.0;
}

/// Font weights used per element type
pub struct FontWeights;

impl FontWeights {
    pub const MEDIUM: u32 = 500;
    pub const SEMIBOLD: u32 = 600;
    pub const BOLD: u32 = 700;
    pub const HEAVY: u32 = 800;
}

pub struct Header;

impl Header {
    pub const X: f64 = 24.0;
    pub const Y: f64 = 24.0;
    pub const LOGO_SIZE: f64 = 24.0;
    pub const HANDLE_X: f64 = 34.0;
    /// Vertical center line of the header row
    pub const CENTER_Y: f64 = 12.0;
    pub const STAT_ICON_SIZE: f64 = 15.0;
    pub const STAT_ICON_GAP: f64 = 6.0;

    /// Right edge of the repository-count stat, relative to the header group
    pub fn stat_anchor_x() -> f64 {
        Canvas::WIDTH - Self::X * 2.0 - Canvas::PADDING
    }
}

pub struct Avatar;

impl Avatar {
    pub const X: f64 = 64.0;
    pub const Y: f64 = 56.0;
    pub const SIZE: f64 = 256.0;
    pub const RING_RADIUS: f64 = 125.0;
    pub const RING_WIDTH: f64 = 6.0;
}

pub struct Bio;

impl Bio {
    pub const X: f64 = 24.0;
    pub const Y: f64 = 268.0;
    /// Outer width budget including horizontal padding
    pub const MAX_WIDTH: f64 = 300.0;
    pub const PADDING_X: f64 = 10.0;
    pub const PADDING_Y: f64 = 6.0;
    pub const MAX_LINES: usize = 2;
    /// Extra width of the slanted top edge of the background
    pub const SKEW: f64 = 12.0;

    pub fn text_width() -> f64 {
        Self::MAX_WIDTH - Self::PADDING_X * 2.0
    }
}

pub struct Repos;

impl Repos {
    pub const X: f64 = 24.0;
    pub const Y: f64 = 320.0;
    pub const ITEM_SPACING: f64 = 46.0;
    pub const ICON_SIZE: f64 = 14.0;
    pub const ICON_Y: f64 = 2.0;
    pub const TEXT_X: f64 = 22.0;
    pub const NAME_Y: f64 = 8.0;
    pub const DESCRIPTION_Y: f64 = 24.0;
    pub const DESCRIPTION_MAX_WIDTH: f64 = 250.0;
    pub const DESCRIPTION_MAX_LINES: usize = 2;
    /// Names longer than this many characters are cut
    pub const NAME_MAX_CHARS: usize = 25;
    pub const BADGES_X: f64 = 285.0;
    pub const FORK_BADGE_Y: f64 = 22.0;
}

pub struct Footer;

impl Footer {
    pub const X: f64 = 24.0;
    pub const Y: f64 = 468.0;
    pub const CAPTION: &'static str = "FAVORITE TECHNOLOGIES";
    pub const BADGES_Y: f64 = 12.0;
}

/// Stroke widths per element type (in px)
pub struct StrokeWidths;

impl StrokeWidths {
    pub const BADGE_BORDER: f64 = 0.5;
    pub const TEXT_OUTLINE_RATIO: f64 = 1.0 / 12.0;
}

pub const FONT_STACK_SANS: &str = "'Inter', system-ui, sans-serif";
pub const FONT_STACK_MONO: &str = "'JetBrains Mono', ui-monospace, monospace";
