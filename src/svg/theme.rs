//! Theme table.
//!
//! Every theme-dependent value is resolved once into a [`ThemeTokens`]
//! value; region builders only ever read tokens and never compare theme ids.
//! Adding a theme means adding an entry to [`THEMES`].

use super::styles::{Avatar, Canvas};
use super::types::{ClipShape, Def, GradientStop};
use lazy_static::lazy_static;
use serde::Serialize;
use std::collections::HashMap;
use tracing::warn;

/// Theme used when an unknown id is requested.
pub const DEFAULT_THEME_ID: &str = "classic";

/// Ids of the shared definitions emitted in every card.
pub struct DefIds;

impl DefIds {
    pub const CARD_CLIP: &'static str = "card-border-clip";
    pub const AVATAR_CLIP: &'static str = "avatarClip";
    pub const AVATAR_FADE: &'static str = "avatarFadeGradient";
    pub const BIO_REFLECT: &'static str = "bio-reflect-gradient";
    pub const BADGE_SHINE: &'static str = "tech-badge-shine-gradient";
    pub const TEXT_SHADOW: &'static str = "text-shadow";
    pub const CLASSIC_BACKGROUND: &'static str = "classic-gradient";
    pub const BADGE_LIGHT: &'static str = "badge-bg-light";
    pub const BADGE_DARK: &'static str = "badge-bg-dark";
    pub const BADGE_HOLOGRAPHIC: &'static str = "badge-bg-holographic";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Appearance {
    Light,
    Dark,
}

/// Background and foreground of a pill.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PillColors {
    pub bg: &'static str,
    pub text: &'static str,
}

/// Technology badge colors.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BadgeColors {
    pub text: &'static str,
    pub border_outer: &'static str,
    pub border_inner: &'static str,
    /// Id of the gradient filling the badge
    pub gradient_id: &'static str,
}

/// How the canvas behind the inner panel is painted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Backdrop {
    /// One of the shared gradients
    Gradient { id: &'static str },
    /// A full-canvas image pattern
    Image { id: &'static str, href: &'static str },
}

impl Backdrop {
    pub fn paint_id(&self) -> &'static str {
        match self {
            Backdrop::Gradient { id } | Backdrop::Image { id, .. } => *id,
        }
    }
}

/// Resolved color tokens for one theme.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ThemeTokens {
    pub appearance: Appearance,
    pub main_text: &'static str,
    pub sub_text: &'static str,
    pub icon: &'static str,
    /// Outline behind text glyphs
    pub stroke: &'static str,
    pub bio_bg: &'static str,
    pub bio_text: &'static str,
    pub star_badge: PillColors,
    pub fork_badge: PillColors,
    pub badge: BadgeColors,
    pub backdrop: Backdrop,
    pub panel_fill: &'static str,
    pub avatar_fade: &'static str,
    pub avatar_ring: &'static str,
    /// Start and middle opacity of the badge shine
    pub shine_opacity: (f64, f64),
    pub bio_reflect_opacity: f64,
}

/// A named visual variant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Theme {
    pub id: &'static str,
    pub name: &'static str,
    /// Style classes for the outer container of an on-screen preview
    pub outer_class: &'static str,
    /// Style classes for the inner container of an on-screen preview
    pub inner_class: &'static str,
    pub tokens: ThemeTokens,
}

impl Theme {
    pub fn appearance(&self) -> Appearance {
        self.tokens.appearance
    }

    /// Look up a theme by id.
    pub fn find(id: &str) -> Option<&'static Theme> {
        THEME_INDEX.get(id.trim().to_ascii_lowercase().as_str()).copied()
    }

    /// Look up a theme by id, falling back to the default theme.
    pub fn resolve(id: &str) -> &'static Theme {
        Self::find(id).unwrap_or_else(|| {
            warn!(theme = id, fallback = DEFAULT_THEME_ID, "unknown theme");
            Self::default_theme()
        })
    }

    pub fn default_theme() -> &'static Theme {
        &THEMES[0]
    }
}

struct Palette {
    main_text: &'static str,
    sub_text: &'static str,
    icon: &'static str,
    stroke: &'static str,
    bio_bg: &'static str,
    bio_text: &'static str,
    star_badge: PillColors,
    fork_badge: PillColors,
    shine_opacity: (f64, f64),
    bio_reflect_opacity: f64,
}

const LIGHT: Palette = Palette {
    main_text: "#1F2937",
    sub_text: "#6B7280",
    icon: "#111827",
    stroke: "#FFFFFF",
    bio_bg: "rgba(255, 255, 255, 0.75)",
    bio_text: "#374151",
    star_badge: PillColors { bg: "#FEF3C7", text: "#92400E" },
    fork_badge: PillColors { bg: "#E0E7FF", text: "#3730A3" },
    shine_opacity: (1.0, 0.5),
    bio_reflect_opacity: 0.7,
};

const DARK: Palette = Palette {
    main_text: "#F9FAFB",
    sub_text: "#9CA3AF",
    icon: "#F3F4F6",
    stroke: "#111827",
    bio_bg: "rgba(17, 24, 39, 0.7)",
    bio_text: "#E5E7EB",
    star_badge: PillColors { bg: "rgba(251, 191, 36, 0.2)", text: "#FCD34D" },
    fork_badge: PillColors { bg: "rgba(129, 140, 248, 0.2)", text: "#C7D2FE" },
    shine_opacity: (0.3, 0.1),
    bio_reflect_opacity: 0.15,
};

const LIGHT_BADGE: BadgeColors = BadgeColors {
    text: "#374151",
    border_outer: "rgba(0, 0, 0, 0.15)",
    border_inner: "rgba(255, 255, 255, 0.7)",
    gradient_id: DefIds::BADGE_LIGHT,
};

struct Surface {
    backdrop: Backdrop,
    panel_fill: &'static str,
    avatar_fade: &'static str,
    badge: BadgeColors,
}

const fn tokens(appearance: Appearance, surface: Surface) -> ThemeTokens {
    let p = match appearance {
        Appearance::Light => LIGHT,
        Appearance::Dark => DARK,
    };
    let avatar_ring = match appearance {
        Appearance::Light => "#FFFFFF",
        Appearance::Dark => "#1F2937",
    };
    ThemeTokens {
        appearance,
        main_text: p.main_text,
        sub_text: p.sub_text,
        icon: p.icon,
        stroke: p.stroke,
        bio_bg: p.bio_bg,
        bio_text: p.bio_text,
        star_badge: p.star_badge,
        fork_badge: p.fork_badge,
        badge: surface.badge,
        backdrop: surface.backdrop,
        panel_fill: surface.panel_fill,
        avatar_fade: surface.avatar_fade,
        avatar_ring,
        shine_opacity: p.shine_opacity,
        bio_reflect_opacity: p.bio_reflect_opacity,
    }
}

/// All themes; the first entry is the default.
pub static THEMES: [Theme; 4] = [
    Theme {
        id: "classic",
        name: "Classic",
        outer_class: "p-2 bg-gradient-to-br from-yellow-300 to-orange-400",
        inner_class: "bg-slate-50",
        tokens: tokens(
            Appearance::Light,
            Surface {
                backdrop: Backdrop::Gradient { id: DefIds::CLASSIC_BACKGROUND },
                panel_fill: "#F8FAFC",
                avatar_fade: "#F8FAFC",
                badge: LIGHT_BADGE,
            },
        ),
    },
    Theme {
        id: "holographic",
        name: "Holo",
        outer_class: "p-2 bg-cover bg-center bg-[url('/templates/holographic.jpg')]",
        inner_class: "bg-white/70 backdrop-blur-sm",
        tokens: tokens(
            Appearance::Light,
            Surface {
                backdrop: Backdrop::Image { id: "bg-holo", href: "/templates/holographic.jpg" },
                panel_fill: "rgba(255, 255, 255, 0.70)",
                avatar_fade: "#FFFFFF",
                badge: BadgeColors {
                    text: "#4B5563",
                    border_outer: "rgba(192, 132, 252, 0.4)",
                    border_inner: "rgba(56, 189, 248, 0.3)",
                    gradient_id: DefIds::BADGE_HOLOGRAPHIC,
                },
            },
        ),
    },
    Theme {
        id: "blue",
        name: "Silver",
        outer_class: "p-2 bg-cover bg-center bg-[url('/templates/blue.jpg')]",
        inner_class: "bg-white/90 backdrop-blur-sm",
        tokens: tokens(
            Appearance::Light,
            Surface {
                backdrop: Backdrop::Image { id: "bg-blue", href: "/templates/blue.jpg" },
                panel_fill: "rgba(255, 255, 255, 0.90)",
                avatar_fade: "#FFFFFF",
                badge: LIGHT_BADGE,
            },
        ),
    },
    Theme {
        id: "dark",
        name: "Dark",
        outer_class: "p-2 bg-cover bg-center bg-[url('/templates/dark.jpg')]",
        inner_class: "bg-gray-800/85 backdrop-blur-sm",
        tokens: tokens(
            Appearance::Dark,
            Surface {
                backdrop: Backdrop::Image { id: "bg-dark", href: "/templates/dark.jpg" },
                panel_fill: "rgba(31, 41, 55, 0.85)",
                avatar_fade: "#1F2937",
                badge: BadgeColors {
                    text: "#D1D5DB",
                    border_outer: "rgba(255, 255, 255, 0.2)",
                    border_inner: "rgba(0, 0, 0, 0.25)",
                    gradient_id: DefIds::BADGE_DARK,
                },
            },
        ),
    },
];

lazy_static! {
    static ref THEME_INDEX: HashMap<&'static str, &'static Theme> =
        THEMES.iter().map(|theme| (theme.id, theme)).collect();
}

/// Every registered theme, default first.
pub fn all_themes() -> &'static [Theme] {
    &THEMES
}

fn vertical_gradient(id: &str, stops: Vec<GradientStop>) -> Def {
    Def::LinearGradient {
        id: id.to_string(),
        vector: (0.0, 0.0, 0.0, 1.0),
        stops,
    }
}

/// Gradients, clip regions and patterns referenced by a card in `tokens`.
pub fn build_defs(tokens: &ThemeTokens) -> Vec<Def> {
    let (shine_start, shine_mid) = tokens.shine_opacity;
    let mut defs = vec![
        Def::LinearGradient {
            id: DefIds::AVATAR_FADE.to_string(),
            vector: (1.0, 0.0, 0.0, 1.0),
            stops: vec![
                GradientStop::new(0.4, tokens.avatar_fade, 0.0),
                GradientStop::new(0.8, tokens.avatar_fade, 1.0),
            ],
        },
        vertical_gradient(
            DefIds::BADGE_LIGHT,
            vec![
                GradientStop::new(0.0, "#F9FAFB", 1.0),
                GradientStop::new(1.0, "#E5E7EB", 1.0),
            ],
        ),
        vertical_gradient(
            DefIds::BADGE_DARK,
            vec![
                GradientStop::new(0.0, "rgba(80, 90, 110, 0.6)", 1.0),
                GradientStop::new(1.0, "rgba(40, 50, 65, 0.6)", 1.0),
            ],
        ),
        vertical_gradient(
            DefIds::BADGE_HOLOGRAPHIC,
            vec![
                GradientStop::new(0.0, "rgba(239, 225, 230, 0.7)", 1.0),
                GradientStop::new(1.0, "rgba(239, 216, 228, 0.7)", 1.0),
            ],
        ),
        vertical_gradient(
            DefIds::BADGE_SHINE,
            vec![
                GradientStop::new(0.0, "rgba(255, 255, 255, 0.7)", shine_start),
                GradientStop::new(0.5, "rgba(255, 255, 255, 0)", shine_mid),
                GradientStop::new(1.0, "rgba(255, 255, 255, 0)", 0.0),
            ],
        ),
        vertical_gradient(
            DefIds::BIO_REFLECT,
            vec![
                GradientStop::new(0.0, "white", tokens.bio_reflect_opacity),
                GradientStop::new(0.5, "white", 0.0),
                GradientStop::new(1.0, "white", 0.0),
            ],
        ),
        Def::LinearGradient {
            id: DefIds::CLASSIC_BACKGROUND.to_string(),
            vector: (0.0, 0.0, 1.0, 1.0),
            stops: vec![
                GradientStop::new(0.0, "#FDE047", 1.0),
                GradientStop::new(1.0, "#F97316", 1.0),
            ],
        },
        Def::ClipPath {
            id: DefIds::CARD_CLIP.to_string(),
            shape: ClipShape::Rect {
                x: Canvas::INSET,
                y: Canvas::INSET,
                width: Canvas::WIDTH - Canvas::INSET * 2.0,
                height: Canvas::HEIGHT - Canvas::INSET * 2.0,
                rx: Canvas::INNER_RADIUS,
            },
        },
        Def::ClipPath {
            id: DefIds::AVATAR_CLIP.to_string(),
            shape: ClipShape::Circle {
                cx: Avatar::SIZE / 2.0,
                cy: Avatar::SIZE / 2.0,
                r: Avatar::SIZE / 2.0,
            },
        },
        Def::DropShadow {
            id: DefIds::TEXT_SHADOW.to_string(),
            dx: 3.0,
            dy: 3.0,
            std_deviation: 2.0,
            opacity: 0.5,
        },
    ];

    if let Backdrop::Image { id, href } = tokens.backdrop {
        defs.push(Def::Pattern {
            id: id.to_string(),
            href: href.to_string(),
            width: Canvas::WIDTH,
            height: Canvas::HEIGHT,
        });
    }
    defs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_is_case_insensitive() {
        assert_eq!(Theme::find("Dark").map(|t| t.id), Some("dark"));
        assert_eq!(Theme::find(" holographic ").map(|t| t.id), Some("holographic"));
        assert!(Theme::find("aurora").is_none());
    }

    #[test]
    fn unknown_theme_falls_back_to_default() {
        assert_eq!(Theme::resolve("nope").id, DEFAULT_THEME_ID);
        assert_eq!(Theme::default_theme().id, DEFAULT_THEME_ID);
    }

    #[test]
    fn appearance_comes_from_table() {
        assert_eq!(Theme::resolve("dark").appearance(), Appearance::Dark);
        for id in ["classic", "holographic", "blue"] {
            assert_eq!(Theme::resolve(id).appearance(), Appearance::Light);
        }
    }

    #[test]
    fn badge_gradient_is_always_defined() {
        for theme in all_themes() {
            let defs = build_defs(&theme.tokens);
            let has = |id: &str| {
                defs.iter().any(|d| matches!(d,
                    Def::LinearGradient { id: gid, .. } | Def::Pattern { id: gid, .. } if gid == id))
            };
            assert!(has(theme.tokens.badge.gradient_id), "{}", theme.id);
            assert!(has(theme.tokens.backdrop.paint_id()), "{}", theme.id);
        }
    }
}
