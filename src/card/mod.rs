//! Card composer.
//!
//! Arranges a [`CardRecord`] into a fixed-size [`Drawing`]. Each region
//! (header, avatar, bio, repositories, technology badges) is laid out
//! independently from the shared geometry constants; the theme only
//! contributes colors through [`ThemeTokens`].

pub mod classify;
pub mod icons;

use crate::layout::{
    estimate_text_width, format_compact, layout_text, pack_badges, BadgeStyle, GlyphModel,
    PackOptions, PlacedBadge, TextBlock, ELLIPSIS,
};
use crate::svg::styles::{Avatar, Bio, Canvas, FontSizes, FontWeights, Footer, Header, Repos, StrokeWidths};
use crate::svg::theme::{build_defs, BadgeColors, DefIds, PillColors, Theme, ThemeTokens};
use crate::svg::{
    Baseline, Circle, Drawing, FontFamily, Group, ImageNode, Paint, PathNode, Rect, Stroke,
    TextAnchor, TextRun,
};
use crate::types::{CardRecord, HighlightedRepo};
use classify::classify;
use icons::Icon;

/// Width model used for every fitting decision on a card.
pub const CARD_GLYPH_MODEL: GlyphModel = GlyphModel::Flat;

/// Compose a card for `record` in `theme`.
pub fn compose(record: &CardRecord, theme: &Theme) -> Drawing {
    let tokens = theme.tokens;

    let mut main = Group::at(0.0, 0.0).clipped(DefIds::CARD_CLIP);
    main.push(header(record, tokens));
    main.push(avatar(&record.avatar_url, tokens));
    main.push(bio(record.bio.as_deref(), tokens));
    main.push(repositories(&record.layout_repos(), tokens));
    if let Some(footer) = technologies(&record.layout_languages(), tokens) {
        main.push(footer);
    }

    Drawing {
        width: Canvas::WIDTH,
        height: Canvas::HEIGHT,
        defs: build_defs(&tokens),
        children: vec![background(tokens).into(), main.into()],
    }
}

/// Cut `name` to `max_chars` characters followed by an ellipsis.
///
/// Counts characters, not estimated pixels.
pub fn truncate_name(name: &str, max_chars: usize) -> String {
    if name.chars().count() > max_chars {
        let head: String = name.chars().take(max_chars).collect();
        format!("{}{}", head, ELLIPSIS)
    } else {
        name.to_string()
    }
}

// ============================================================================
// Background
// ============================================================================

fn background(tokens: ThemeTokens) -> Group {
    let inset = Canvas::INSET;
    Group::at(0.0, 0.0)
        .with(Rect::new(
            0.0,
            0.0,
            Canvas::WIDTH,
            Canvas::HEIGHT,
            Canvas::OUTER_RADIUS,
            Paint::reference(tokens.backdrop.paint_id()),
        ))
        .with(Rect::new(
            inset,
            inset,
            Canvas::WIDTH - inset * 2.0,
            Canvas::HEIGHT - inset * 2.0,
            Canvas::INNER_RADIUS,
            Paint::color(tokens.panel_fill),
        ))
}

// ============================================================================
// Header
// ============================================================================

fn header(record: &CardRecord, tokens: ThemeTokens) -> Group {
    let stat = (record.public_repos > 0).then(|| header_stat(record.public_repos, tokens));
    let handle_right = stat
        .as_ref()
        .map_or(Header::stat_anchor_x(), |(_, left)| left - Header::STAT_ICON_GAP);
    let handle = fit_chars(
        &format!("@{}", record.github_user),
        handle_right - Header::HANDLE_X,
        FontSizes::HANDLE,
    );

    let mut group = Group::at(Header::X, Header::Y);
    group.push(Icon::GitHub.node(0.0, 0.0, Header::LOGO_SIZE, tokens.icon));
    group.push(outlined_text(
        Header::HANDLE_X,
        Header::CENTER_Y,
        handle,
        FontSizes::HANDLE,
        FontWeights::BOLD,
        tokens,
    ));
    if let Some((stat, _)) = stat {
        group.push(stat);
    }
    group
}

/// Right-aligned count with a leading icon; the group origin is the right
/// edge of the number. Also returns the icon's left edge in header space.
fn header_stat(value: u64, tokens: ThemeTokens) -> (Group, f64) {
    let label = format_compact(Some(value));
    let text_width = estimate_text_width(&label, FontSizes::HEADER_STAT, CARD_GLYPH_MODEL);

    let mut text = outlined_text(0.0, 0.0, label, FontSizes::HEADER_STAT, FontWeights::HEAVY, tokens);
    text.anchor = TextAnchor::End;

    let icon_x = -(text_width + Header::STAT_ICON_GAP + Header::STAT_ICON_SIZE);
    let group = Group::at(Header::stat_anchor_x(), Header::CENTER_Y)
        .with(text)
        .with(Icon::Repo.node(
            icon_x,
            -Header::STAT_ICON_SIZE / 2.0,
            Header::STAT_ICON_SIZE,
            tokens.sub_text,
        ));
    (group, Header::stat_anchor_x() + icon_x)
}

/// Cut a single-line label by character count so it stays within
/// `max_width`, ellipsis included.
fn fit_chars(text: &str, max_width: f64, font_size: f64) -> String {
    if estimate_text_width(text, font_size, CARD_GLYPH_MODEL) <= max_width {
        return text.to_string();
    }
    let per_char = estimate_text_width("m", font_size, CARD_GLYPH_MODEL);
    let budget = (max_width / per_char).floor() as usize;
    truncate_name(text, budget.saturating_sub(ELLIPSIS.chars().count()))
}

// ============================================================================
// Avatar
// ============================================================================

fn avatar(href: &str, tokens: ThemeTokens) -> Group {
    let size = Avatar::SIZE;
    let mut clipped = Group::at(0.0, 0.0).clipped(DefIds::AVATAR_CLIP);
    if !href.trim().is_empty() {
        clipped.push(ImageNode {
            x: 0.0,
            y: 0.0,
            width: size,
            height: size,
            href: href.to_string(),
        });
    }
    clipped.push(Rect::new(0.0, 0.0, size, size, 0.0, Paint::reference(DefIds::AVATAR_FADE)));

    Group::at(Avatar::X, Avatar::Y).with(clipped).with(Circle {
        cx: size / 2.0,
        cy: size / 2.0,
        r: Avatar::RING_RADIUS,
        fill: Paint::None,
        stroke: Some(Stroke::new(tokens.avatar_ring, Avatar::RING_WIDTH)),
    })
}

// ============================================================================
// Bio
// ============================================================================

fn bio(text: Option<&str>, tokens: ThemeTokens) -> Group {
    let block = TextBlock::new(Bio::text_width(), FontSizes::BIO, Bio::MAX_LINES)
        .with_model(CARD_GLYPH_MODEL);
    let layout = layout_text(text, &block);

    // The background follows the text, not the other way round.
    let bg_width = layout.width + Bio::PADDING_X * 2.0;
    let bg_height = layout.height + Bio::PADDING_Y * 2.0;
    let d = format!(
        "M 0 0 L {} 0 L {} {} L 0 {} Z",
        crate::svg::fmt_num(bg_width + Bio::SKEW),
        crate::svg::fmt_num(bg_width),
        crate::svg::fmt_num(bg_height),
        crate::svg::fmt_num(bg_height)
    );

    let mut run = TextRun::new(Bio::PADDING_X, Bio::PADDING_Y, String::new(), FontSizes::BIO, Paint::color(tokens.bio_text));
    run.lines = layout.lines;
    run.line_height = block.line_advance();
    run.font_weight = FontWeights::MEDIUM;
    run.baseline = Baseline::Hanging;

    Group::at(Bio::X, Bio::Y)
        .with(PathNode::new(d.clone(), Paint::color(tokens.bio_bg)))
        .with(PathNode::new(d, Paint::reference(DefIds::BIO_REFLECT)))
        .with(run)
}

// ============================================================================
// Repositories
// ============================================================================

fn repositories(repos: &[&HighlightedRepo], tokens: ThemeTokens) -> Group {
    let mut group = Group::at(Repos::X, Repos::Y);
    for (index, repo) in repos.iter().enumerate() {
        group.push(repository(repo, index as f64 * Repos::ITEM_SPACING, tokens));
    }
    group
}

fn repository(repo: &HighlightedRepo, y: f64, tokens: ThemeTokens) -> Group {
    let icon = Icon::for_category(classify(&repo.name, repo.description.as_deref()));

    let block = TextBlock::new(
        Repos::DESCRIPTION_MAX_WIDTH,
        FontSizes::REPO_DESCRIPTION,
        Repos::DESCRIPTION_MAX_LINES,
    )
    .with_model(CARD_GLYPH_MODEL);
    let description = layout_text(repo.description.as_deref(), &block);

    let mut desc = TextRun::new(
        Repos::TEXT_X,
        Repos::DESCRIPTION_Y,
        String::new(),
        FontSizes::REPO_DESCRIPTION,
        Paint::color(tokens.main_text),
    );
    desc.lines = description.lines;
    desc.line_height = block.line_advance();
    desc.baseline = Baseline::Hanging;
    desc.stroke = Some(text_outline(FontSizes::REPO_DESCRIPTION, tokens));

    let badges = Group::at(Repos::BADGES_X, 0.0)
        .with(stat_badge(Icon::Star, repo.stars, 0.0, tokens.star_badge))
        .with(stat_badge(Icon::Fork, repo.forks, Repos::FORK_BADGE_Y, tokens.fork_badge));

    Group::at(0.0, y)
        .with(icon.node(0.0, Repos::ICON_Y, Repos::ICON_SIZE, tokens.main_text))
        .with(outlined_text(
            Repos::TEXT_X,
            Repos::NAME_Y,
            truncate_name(&repo.name, Repos::NAME_MAX_CHARS),
            FontSizes::REPO_NAME,
            FontWeights::BOLD,
            tokens,
        ))
        .with(desc)
        .with(badges)
}

fn stat_badge(icon: Icon, value: u64, y: f64, colors: PillColors) -> Group {
    let style = BadgeStyle::STAT;
    let label = format_compact(Some(value));
    let m = style.measure(&label);

    let mut text = TextRun::new(m.text_x, m.height / 2.0, label, style.font_size, Paint::color(colors.text));
    text.font_weight = FontWeights::MEDIUM;
    text.baseline = Baseline::Middle;

    Group::at(0.0, y)
        .with(Rect::new(0.0, 0.0, m.width, m.height, m.radius, Paint::color(colors.bg)))
        .with(icon.node(
            style.padding_x,
            (m.height - style.icon_size) / 2.0,
            style.icon_size,
            colors.text,
        ))
        .with(text)
}

// ============================================================================
// Technologies
// ============================================================================

fn technologies(languages: &[&str], tokens: ThemeTokens) -> Option<Group> {
    if languages.is_empty() {
        return None;
    }

    let mut caption = TextRun::new(0.0, 0.0, Footer::CAPTION, FontSizes::CAPTION, Paint::color(tokens.sub_text));
    caption.font_weight = FontWeights::BOLD;
    caption.letter_spacing = Some(0.05);

    let mut row = Group::at(0.0, Footer::BADGES_Y);
    for placed in pack_badges(languages, &BadgeStyle::TECH, &PackOptions::default()) {
        row.push(tech_badge(&placed, tokens.badge));
    }

    Some(Group::at(Footer::X, Footer::Y).with(caption).with(row))
}

fn tech_badge(placed: &PlacedBadge, colors: BadgeColors) -> Group {
    let m = placed.metrics;
    let border = StrokeWidths::BADGE_BORDER;

    let mut label = TextRun::new(
        m.width / 2.0,
        m.height / 2.0,
        placed.label.clone(),
        BadgeStyle::TECH.font_size,
        Paint::color(colors.text),
    );
    label.font_weight = FontWeights::SEMIBOLD;
    label.anchor = TextAnchor::Middle;
    label.baseline = Baseline::Middle;
    label.stroke = Some(Stroke::new("rgba(0,0,0,0.4)", 0.5));
    label.opacity = Some(0.9);

    Group::at(placed.x, placed.y)
        .with(
            Rect::new(0.5, 1.0, m.width, m.height, m.radius, Paint::color("rgba(0,0,0,0.1)"))
                .filtered(DefIds::TEXT_SHADOW),
        )
        .with(
            Rect::new(0.0, 0.0, m.width, m.height, m.radius, Paint::reference(colors.gradient_id))
                .stroked(Stroke::new(colors.border_outer, border)),
        )
        .with(
            Rect::new(0.5, 0.5, m.width - 1.0, m.height - 1.0, m.radius - 0.5, Paint::None)
                .stroked(Stroke::new(colors.border_inner, border)),
        )
        .with(Rect::new(
            0.5,
            0.5,
            m.width - 1.0,
            (m.height - 1.0) / 2.0,
            m.radius - 0.5,
            Paint::reference(DefIds::BADGE_SHINE),
        ))
        .with(label)
}

// ============================================================================
// Text helpers
// ============================================================================

fn text_outline(font_size: f64, tokens: ThemeTokens) -> Stroke {
    Stroke::new(tokens.stroke, font_size * StrokeWidths::TEXT_OUTLINE_RATIO)
}

/// Single-line monospace label with a legibility outline, vertically centered on `y`.
fn outlined_text(
    x: f64,
    y: f64,
    text: String,
    font_size: f64,
    font_weight: u32,
    tokens: ThemeTokens,
) -> TextRun {
    let mut run = TextRun::new(x, y, text, font_size, Paint::color(tokens.main_text));
    run.font_family = FontFamily::Mono;
    run.font_weight = font_weight;
    run.stroke = Some(text_outline(font_size, tokens));
    run.baseline = Baseline::Middle;
    run
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::FALLBACK_TEXT;
    use crate::svg::Node;

    fn sample_record() -> CardRecord {
        CardRecord {
            name: "Ada Lovelace".to_string(),
            github_user: "ada".to_string(),
            avatar_url: "data:image/png;base64,AAAA".to_string(),
            bio: Some("Analytical engines and poetry".to_string()),
            public_repos: 1234,
            top_languages: vec!["Rust".to_string(), "Python".to_string()],
            highlighted_repos: vec![HighlightedRepo {
                id: Some("R_1".to_string()),
                name: "engine".to_string(),
                description: Some("A REST api for numbers".to_string()),
                stars: 1500,
                forks: 12,
                ..Default::default()
            }],
            ..Default::default()
        }
    }

    fn texts(drawing: &Drawing) -> Vec<String> {
        drawing.text_runs().iter().map(|run| run.content()).collect()
    }

    #[test]
    fn truncates_names_by_character_count() {
        assert_eq!(truncate_name("short", 25), "short");
        let exact = "a".repeat(25);
        assert_eq!(truncate_name(&exact, 25), exact);
        let long = "é".repeat(40);
        let cut = truncate_name(&long, 25);
        assert_eq!(cut.chars().count(), 28);
        assert!(cut.ends_with("..."));
    }

    #[test]
    fn composes_all_regions() {
        let drawing = compose(&sample_record(), Theme::default_theme());
        assert_eq!((drawing.width, drawing.height), (384.0, 536.0));
        let texts = texts(&drawing);
        assert!(texts.contains(&"@ada".to_string()));
        assert!(texts.contains(&"1.2K".to_string()));
        assert!(texts.contains(&"engine".to_string()));
        assert!(texts.contains(&"1.5K".to_string()));
        assert!(texts.contains(&"12".to_string()));
        assert!(texts.contains(&Footer::CAPTION.to_string()));
        assert!(texts.contains(&"Rust".to_string()));
    }

    #[test]
    fn missing_repo_count_hides_header_stat() {
        let record = CardRecord {
            public_repos: 0,
            ..sample_record()
        };
        let drawing = compose(&record, Theme::default_theme());
        let ends: Vec<_> = drawing
            .text_runs()
            .into_iter()
            .filter(|run| run.anchor == TextAnchor::End)
            .collect();
        assert!(ends.is_empty());
    }

    #[test]
    fn bio_background_is_sized_from_layout() {
        let group = bio(None, Theme::default_theme().tokens);
        let width = estimate_text_width(FALLBACK_TEXT, FontSizes::BIO, CARD_GLYPH_MODEL);
        let Node::Path(path) = &group.children[0] else {
            panic!("expected background path");
        };
        let bg_width = width + Bio::PADDING_X * 2.0;
        let expected = format!(
            "M 0 0 L {} 0 L {} {} L 0 {} Z",
            crate::svg::fmt_num(bg_width + Bio::SKEW),
            crate::svg::fmt_num(bg_width),
            crate::svg::fmt_num(FontSizes::BIO + Bio::PADDING_Y * 2.0),
            crate::svg::fmt_num(FontSizes::BIO + Bio::PADDING_Y * 2.0),
        );
        assert_eq!(path.d, expected);
    }

    #[test]
    fn repository_icon_follows_classification() {
        let drawing = compose(&sample_record(), Theme::default_theme());
        let gears = Icon::Gears.path_data();
        assert!(drawing
            .nodes()
            .iter()
            .any(|node| matches!(node, Node::Path(p) if p.d == gears)));
    }

    #[test]
    fn geometry_does_not_depend_on_theme() {
        let record = sample_record();
        let base = compose(&record, Theme::default_theme());
        for theme in crate::svg::theme::all_themes() {
            let other = compose(&record, theme);
            let a: Vec<_> = base.text_runs().iter().map(|r| (r.x, r.y, r.lines.clone())).collect();
            let b: Vec<_> = other.text_runs().iter().map(|r| (r.x, r.y, r.lines.clone())).collect();
            assert_eq!(a, b, "{}", theme.id);
            assert_eq!(base.nodes().len(), other.nodes().len(), "{}", theme.id);
        }
    }

    #[test]
    fn long_handle_stops_before_the_repo_icon() {
        let record = CardRecord {
            github_user: "a".repeat(39),
            ..sample_record()
        };
        let group = header(&record, Theme::default_theme().tokens);
        let Node::Text(handle) = &group.children[1] else {
            panic!("expected the handle text");
        };
        let (_, icon_left) = header_stat(record.public_repos, Theme::default_theme().tokens);
        let width = estimate_text_width(&handle.content(), FontSizes::HANDLE, CARD_GLYPH_MODEL);

        assert!(handle.content().starts_with("@aaa"));
        assert!(handle.content().ends_with(ELLIPSIS));
        assert!(Header::HANDLE_X + width <= icon_left - Header::STAT_ICON_GAP);
    }

    #[test]
    fn short_handle_is_untouched() {
        let group = header(&sample_record(), Theme::default_theme().tokens);
        let Node::Text(handle) = &group.children[1] else {
            panic!("expected the handle text");
        };
        assert_eq!(handle.content(), "@ada");
    }
}
