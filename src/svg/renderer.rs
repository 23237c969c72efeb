//! SVG renderer - serializes a composed [`Drawing`] into an SVG string.
//!
//! Pure string building, no DOM manipulation.
//! Renders back-to-front in document order: defs first, then nodes.

use super::styles::{FONT_STACK_MONO, FONT_STACK_SANS};
use super::types::{
    Baseline, Circle, ClipShape, Def, Drawing, FontFamily, Group, ImageNode, Node, Paint,
    PathNode, Rect, Stroke, TextAnchor, TextRun,
};

/// Render a drawing as a standalone SVG document.
pub fn render_drawing(drawing: &Drawing) -> String {
    let mut parts: Vec<String> = Vec::new();

    let w = fmt_num(drawing.width);
    let h = fmt_num(drawing.height);
    parts.push(format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink" width="{w}" height="{h}" viewBox="0 0 {w} {h}" fill="none" style="color-scheme:light dark">"#,
    ));

    parts.push("<defs>".to_string());
    for def in &drawing.defs {
        parts.push(render_def(def));
    }
    parts.push("</defs>".to_string());

    for node in &drawing.children {
        parts.push(render_node(node));
    }

    parts.push("</svg>".to_string());
    parts.join("\n")
}

// ============================================================================
// Definitions
// ============================================================================

fn render_def(def: &Def) -> String {
    match def {
        Def::LinearGradient { id, vector, stops } => {
            let (x1, y1, x2, y2) = *vector;
            let stops: Vec<String> = stops
                .iter()
                .map(|stop| {
                    format!(
                        r#"    <stop offset="{}%" stop-color="{}" stop-opacity="{}" />"#,
                        fmt_num(stop.offset * 100.0),
                        escape_xml(&stop.color),
                        fmt_num(stop.opacity)
                    )
                })
                .collect();
            format!(
                "  <linearGradient id=\"{}\" x1=\"{}%\" y1=\"{}%\" x2=\"{}%\" y2=\"{}%\">\n{}\n  </linearGradient>",
                escape_xml(id),
                fmt_num(x1 * 100.0),
                fmt_num(y1 * 100.0),
                fmt_num(x2 * 100.0),
                fmt_num(y2 * 100.0),
                stops.join("\n")
            )
        }
        Def::ClipPath { id, shape } => {
            let shape = match shape {
                ClipShape::Circle { cx, cy, r } => format!(
                    r#"<circle cx="{}" cy="{}" r="{}" />"#,
                    fmt_num(*cx),
                    fmt_num(*cy),
                    fmt_num(*r)
                ),
                ClipShape::Rect { x, y, width, height, rx } => format!(
                    r#"<rect x="{}" y="{}" width="{}" height="{}" rx="{}" />"#,
                    fmt_num(*x),
                    fmt_num(*y),
                    fmt_num(*width),
                    fmt_num(*height),
                    fmt_num(*rx)
                ),
            };
            format!(r#"  <clipPath id="{}">{}</clipPath>"#, escape_xml(id), shape)
        }
        Def::Pattern { id, href, width, height } => format!(
            r#"  <pattern id="{id}" patternUnits="userSpaceOnUse" width="{w}" height="{h}"><image xlink:href="{href}" href="{href}" width="{w}" height="{h}" preserveAspectRatio="xMidYMid slice" /></pattern>"#,
            id = escape_xml(id),
            href = escape_xml(href),
            w = fmt_num(*width),
            h = fmt_num(*height),
        ),
        Def::DropShadow { id, dx, dy, std_deviation, opacity } => format!(
            r##"  <filter id="{}" x="-20%" y="-20%" width="140%" height="140%"><feDropShadow dx="{}" dy="{}" stdDeviation="{}" flood-color="#000000" flood-opacity="{}" /></filter>"##,
            escape_xml(id),
            fmt_num(*dx),
            fmt_num(*dy),
            fmt_num(*std_deviation),
            fmt_num(*opacity)
        ),
    }
}

// ============================================================================
// Nodes
// ============================================================================

fn render_node(node: &Node) -> String {
    match node {
        Node::Group(group) => render_group(group),
        Node::Rect(rect) => render_rect(rect),
        Node::Circle(circle) => render_circle(circle),
        Node::Path(path) => render_path(path),
        Node::Text(run) => render_text(run),
        Node::Image(image) => render_image(image),
    }
}

fn render_group(group: &Group) -> String {
    let mut attrs = String::new();
    if group.x != 0.0 || group.y != 0.0 || group.scale != 1.0 {
        let mut transform = format!("translate({}, {})", fmt_num(group.x), fmt_num(group.y));
        if group.scale != 1.0 {
            transform.push_str(&format!(" scale({})", fmt_num(group.scale)));
        }
        attrs.push_str(&format!(r#" transform="{}""#, transform));
    }
    if let Some(ref clip) = group.clip {
        attrs.push_str(&format!(r#" clip-path="url(#{})""#, escape_xml(clip)));
    }

    if group.children.is_empty() {
        return format!("<g{} />", attrs);
    }
    let children: Vec<String> = group.children.iter().map(render_node).collect();
    format!("<g{}>\n{}\n</g>", attrs, children.join("\n"))
}

fn render_rect(rect: &Rect) -> String {
    let mut out = format!(
        r#"<rect x="{}" y="{}" width="{}" height="{}""#,
        fmt_num(rect.x),
        fmt_num(rect.y),
        fmt_num(rect.width),
        fmt_num(rect.height)
    );
    if rect.rx > 0.0 {
        out.push_str(&format!(r#" rx="{}""#, fmt_num(rect.rx)));
    }
    out.push_str(&paint_attr("fill", &rect.fill));
    out.push_str(&stroke_attrs(rect.stroke.as_ref()));
    if let Some(ref filter) = rect.filter {
        out.push_str(&format!(r#" filter="url(#{})""#, escape_xml(filter)));
    }
    out.push_str(" />");
    out
}

fn render_circle(circle: &Circle) -> String {
    format!(
        r#"<circle cx="{}" cy="{}" r="{}"{}{} />"#,
        fmt_num(circle.cx),
        fmt_num(circle.cy),
        fmt_num(circle.r),
        paint_attr("fill", &circle.fill),
        stroke_attrs(circle.stroke.as_ref())
    )
}

fn render_path(path: &PathNode) -> String {
    let rule = if path.fill_rule_evenodd {
        r#" fill-rule="evenodd""#
    } else {
        ""
    };
    format!(
        r#"<path d="{}"{}{} />"#,
        escape_xml(&path.d),
        paint_attr("fill", &path.fill),
        rule
    )
}

fn render_image(image: &ImageNode) -> String {
    format!(
        r#"<image x="{}" y="{}" width="{}" height="{}" href="{href}" xlink:href="{href}" preserveAspectRatio="xMidYMid slice" />"#,
        fmt_num(image.x),
        fmt_num(image.y),
        fmt_num(image.width),
        fmt_num(image.height),
        href = escape_xml(&image.href),
    )
}

fn render_text(run: &TextRun) -> String {
    let family = match run.font_family {
        FontFamily::Sans => FONT_STACK_SANS,
        FontFamily::Mono => FONT_STACK_MONO,
    };
    let mut attrs = format!(
        r#"x="{}" y="{}" font-family="{}" font-size="{}" font-weight="{}""#,
        fmt_num(run.x),
        fmt_num(run.y),
        escape_xml(family),
        fmt_num(run.font_size),
        run.font_weight
    );
    attrs.push_str(&paint_attr("fill", &run.fill));
    if let Some(ref stroke) = run.stroke {
        attrs.push_str(&stroke_attrs(Some(stroke)));
        attrs.push_str(r#" stroke-linejoin="round" paint-order="stroke""#);
    }
    match run.anchor {
        TextAnchor::Start => {}
        TextAnchor::Middle => attrs.push_str(r#" text-anchor="middle""#),
        TextAnchor::End => attrs.push_str(r#" text-anchor="end""#),
    }
    match run.baseline {
        Baseline::Auto => {}
        Baseline::Middle => attrs.push_str(r#" dominant-baseline="middle""#),
        Baseline::Hanging => attrs.push_str(r#" dominant-baseline="hanging""#),
    }
    if let Some(spacing) = run.letter_spacing {
        attrs.push_str(&format!(r#" letter-spacing="{}em""#, fmt_num(spacing)));
    }
    if let Some(opacity) = run.opacity {
        attrs.push_str(&format!(r#" opacity="{}""#, fmt_num(opacity)));
    }

    if run.lines.len() <= 1 {
        let content = run.lines.first().map(String::as_str).unwrap_or("");
        return format!("<text {}>{}</text>", attrs, escape_xml(content));
    }

    // Multi-line runs: one tspan per line, each advancing by line_height
    let spans: Vec<String> = run
        .lines
        .iter()
        .enumerate()
        .map(|(i, line)| {
            let dy = if i == 0 { 0.0 } else { run.line_height };
            format!(
                r#"<tspan x="{}" dy="{}">{}</tspan>"#,
                fmt_num(run.x),
                fmt_num(dy),
                escape_xml(line)
            )
        })
        .collect();
    format!("<text {}>{}</text>", attrs, spans.join(""))
}

// ============================================================================
// Utilities
// ============================================================================

fn paint_value(paint: &Paint) -> String {
    match paint {
        Paint::None => "none".to_string(),
        Paint::Color(c) => escape_xml(c),
        Paint::Ref(id) => format!("url(#{})", escape_xml(id)),
    }
}

fn paint_attr(name: &str, paint: &Paint) -> String {
    format!(r#" {}="{}""#, name, paint_value(paint))
}

fn stroke_attrs(stroke: Option<&Stroke>) -> String {
    match stroke {
        Some(stroke) => format!(
            r#" stroke="{}" stroke-width="{}""#,
            paint_value(&stroke.paint),
            fmt_num(stroke.width)
        ),
        None => String::new(),
    }
}

/// Escape special XML characters in text content.
///
/// Characters XML 1.0 cannot carry at all (C0 controls other than tab, LF
/// and CR, plus U+FFFE and U+FFFF) are dropped.
pub fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            '\t' | '\n' | '\r' => out.push(ch),
            '\u{0}'..='\u{1F}' | '\u{FFFE}' | '\u{FFFF}' => {}
            _ => out.push(ch),
        }
    }
    out
}

/// Format a coordinate with at most two decimals, dropping trailing zeros.
pub fn fmt_num(n: f64) -> String {
    if n.fract() == 0.0 {
        return format!("{}", n as i64);
    }
    let s = format!("{:.2}", n);
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::svg::types::TextRun;

    #[test]
    fn numbers_are_trimmed() {
        assert_eq!(fmt_num(12.0), "12");
        assert_eq!(fmt_num(27.599999), "27.6");
        assert_eq!(fmt_num(0.5), "0.5");
        assert_eq!(fmt_num(-3.25), "-3.25");
    }

    #[test]
    fn multiline_text_uses_tspans() {
        let mut run = TextRun::new(10.0, 6.0, "first", 12.0, Paint::color("#000"));
        run.lines.push("second & more".to_string());
        run.line_height = 15.6;
        let svg = render_text(&run);
        assert!(svg.contains(r#"<tspan x="10" dy="0">first</tspan>"#));
        assert!(svg.contains(r#"<tspan x="10" dy="15.6">second &amp; more</tspan>"#));
    }

    #[test]
    fn groups_carry_translation_and_clip() {
        let group = Group::at(24.0, 320.0)
            .clipped("card-border-clip")
            .with(Rect::new(0.0, 0.0, 10.0, 10.0, 2.0, Paint::None));
        let svg = render_group(&group);
        assert!(svg.starts_with(r#"<g transform="translate(24, 320)" clip-path="url(#card-border-clip)">"#));
        assert!(svg.contains(r#"fill="none""#));
    }

    #[test]
    fn document_is_well_formed() {
        let drawing = Drawing {
            width: 100.0,
            height: 50.0,
            defs: vec![Def::ClipPath {
                id: "c".to_string(),
                shape: ClipShape::Circle { cx: 5.0, cy: 5.0, r: 5.0 },
            }],
            children: vec![Node::Text(TextRun::new(1.0, 2.0, "<hi>", 10.0, Paint::color("red")))],
        };
        let svg = render_drawing(&drawing);
        let doc = roxmltree::Document::parse(&svg).unwrap();
        assert_eq!(doc.root_element().tag_name().name(), "svg");
        assert!(svg.contains("&lt;hi&gt;"));
    }

    #[test]
    fn forbidden_control_chars_are_dropped() {
        assert_eq!(escape_xml("a\u{0}b\u{8}c\u{B}\u{C}d\u{1F}e"), "abcde");
        assert_eq!(escape_xml("tab\there\nline\r"), "tab\there\nline\r");
        assert_eq!(escape_xml("x\u{FFFF}y & z"), "xy &amp; z");
    }

    #[test]
    fn control_chars_in_text_keep_the_document_parseable() {
        let run = TextRun::new(0.0, 0.0, "bell\u{7} and null\u{0}", 12.0, Paint::color("#000"));
        let drawing = Drawing {
            width: 10.0,
            height: 10.0,
            defs: Vec::new(),
            children: vec![Node::Text(run)],
        };
        let svg = render_drawing(&drawing);
        let doc = roxmltree::Document::parse(&svg).unwrap();
        let text = doc.descendants().find(|n| n.has_tag_name("text")).unwrap();
        assert_eq!(text.text(), Some("bell and null"));
    }
}
