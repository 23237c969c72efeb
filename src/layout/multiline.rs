//! Greedy word wrapping into a bounded number of lines.

use super::metrics::{estimate_text_width, GlyphModel};
use serde::Serialize;

/// Text used when there is nothing to lay out.
pub const FALLBACK_TEXT: &str = "No description available.";

/// Appended to the last kept line when content is cut off.
pub const ELLIPSIS: &str = "...";

pub const DEFAULT_LINE_HEIGHT_FACTOR: f64 = 1.3;

/// Wrapped text with its bounding box.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutBox {
    pub lines: Vec<String>,
    /// Width of the widest line
    pub width: f64,
    pub height: f64,
}

/// Parameters for [`layout_text`].
#[derive(Debug, Clone, Copy)]
pub struct TextBlock {
    pub max_width: f64,
    pub font_size: f64,
    pub max_lines: usize,
    pub line_height_factor: f64,
    pub model: GlyphModel,
}

impl TextBlock {
    pub fn new(max_width: f64, font_size: f64, max_lines: usize) -> Self {
        Self {
            max_width,
            font_size,
            max_lines,
            line_height_factor: DEFAULT_LINE_HEIGHT_FACTOR,
            model: GlyphModel::default(),
        }
    }

    pub fn with_model(mut self, model: GlyphModel) -> Self {
        self.model = model;
        self
    }

    pub fn with_line_height(mut self, factor: f64) -> Self {
        self.line_height_factor = factor;
        self
    }

    /// Distance between consecutive baselines.
    pub fn line_advance(&self) -> f64 {
        self.font_size * self.line_height_factor
    }

    fn width_of(&self, text: &str) -> f64 {
        estimate_text_width(text, self.font_size, self.model)
    }
}

/// Wrap `text` into at most `block.max_lines` lines no wider than
/// `block.max_width`.
///
/// Missing or blank text becomes [`FALLBACK_TEXT`]. A single word wider than
/// the limit keeps its own line unbroken. When the text needs more lines than
/// allowed, the last kept line is shortened until it fits with a trailing
/// [`ELLIPSIS`].
pub fn layout_text(text: Option<&str>, block: &TextBlock) -> LayoutBox {
    let text = match text {
        Some(t) if !t.trim().is_empty() => t,
        _ => FALLBACK_TEXT,
    };
    let max_lines = block.max_lines.max(1);

    let mut lines = wrap_words(text, block, max_lines);
    if lines.len() > max_lines {
        lines.truncate(max_lines);
        if let Some(last) = lines.last_mut() {
            *last = truncate_with_ellipsis(last, block);
        }
    }

    let width = lines
        .iter()
        .map(|line| block.width_of(line))
        .fold(0.0, f64::max);
    let height = lines.len() as f64 * block.line_advance()
        - block.font_size * (block.line_height_factor - 1.0);

    LayoutBox {
        lines,
        width,
        height,
    }
}

/// Stops once one line more than `max_lines` is known to exist.
fn wrap_words(text: &str, block: &TextBlock, max_lines: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if lines.len() > max_lines {
            return lines;
        }
        if current.is_empty() {
            current.push_str(word);
            continue;
        }
        let candidate = format!("{} {}", current, word);
        if block.width_of(&candidate) <= block.max_width {
            current = candidate;
        } else {
            lines.push(std::mem::replace(&mut current, word.to_string()));
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Longest prefix of `line` that fits with a trailing ellipsis.
///
/// Prefix widths only grow, so the cut point is found by bisection over char
/// boundaries instead of re-measuring after every removed char.
fn truncate_with_ellipsis(line: &str, block: &TextBlock) -> String {
    let fits = |end: usize| block.width_of(&line[..end]) + block.width_of(ELLIPSIS) <= block.max_width;

    let mut bounds: Vec<usize> = line.char_indices().map(|(i, _)| i).collect();
    bounds.push(line.len());

    // bounds[lo] always fits (or is the empty prefix); bounds[hi] never does
    let (mut lo, mut hi) = (0, bounds.len());
    while hi - lo > 1 {
        let mid = lo + (hi - lo) / 2;
        if fits(bounds[mid]) {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    format!("{}{}", line[..bounds[lo]].trim_end(), ELLIPSIS)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(max_width: f64, max_lines: usize) -> TextBlock {
        TextBlock::new(max_width, 10.0, max_lines)
    }

    #[test]
    fn missing_text_uses_fallback() {
        let out = layout_text(None, &block(500.0, 2));
        assert_eq!(out.lines, vec![FALLBACK_TEXT.to_string()]);

        let out = layout_text(Some("   "), &block(500.0, 2));
        assert_eq!(out.lines, vec![FALLBACK_TEXT.to_string()]);
    }

    #[test]
    fn short_text_stays_on_one_line() {
        let out = layout_text(Some("hello world"), &block(500.0, 2));
        assert_eq!(out.lines, vec!["hello world".to_string()]);
        // 11 chars * 10 * 0.6
        assert!((out.width - 66.0).abs() < 1e-9);
        assert!((out.height - 10.0).abs() < 1e-9);
    }

    #[test]
    fn wraps_greedily() {
        // Each char is 6px wide; 60px fits 10 chars.
        let out = layout_text(Some("aaaa bbbb cccc dddd"), &block(60.0, 5));
        assert_eq!(out.lines, vec!["aaaa bbbb", "cccc dddd"]);
        let expected_height = 2.0 * 10.0 * 1.3 - 10.0 * 0.3;
        assert!((out.height - expected_height).abs() < 1e-9);
    }

    #[test]
    fn overlong_word_keeps_its_own_line() {
        let out = layout_text(Some("a supercalifragilistic b"), &block(60.0, 5));
        assert_eq!(out.lines, vec!["a", "supercalifragilistic", "b"]);
        assert!(out.width > 60.0);
    }

    #[test]
    fn overflow_is_truncated_with_ellipsis() {
        let text = "lorem ipsum dolor sit amet consectetur adipiscing elit sed do";
        let b = block(60.0, 2);
        let out = layout_text(Some(text), &b);
        assert_eq!(out.lines.len(), 2);
        let last = out.lines.last().unwrap();
        assert!(last.ends_with(ELLIPSIS));
        assert!(estimate_text_width(last, 10.0, GlyphModel::Flat) <= 60.0);
    }

    #[test]
    fn zero_max_lines_still_yields_a_line() {
        let out = layout_text(Some("one two three"), &block(20.0, 0));
        assert_eq!(out.lines.len(), 1);
        assert!(out.lines[0].ends_with(ELLIPSIS));
    }

    #[test]
    fn layout_is_deterministic() {
        let b = block(80.0, 3).with_model(GlyphModel::Classified);
        let text = "Building tools for the web, one commit at a time";
        assert_eq!(layout_text(Some(text), &b), layout_text(Some(text), &b));
    }

    #[test]
    fn line_count_never_exceeds_limit() {
        let words = "x xx xxx xxxx xxxxx xxxxxx xxxxxxx".repeat(4);
        for max_lines in 1..5 {
            for width in [10.0, 35.0, 90.0, 400.0] {
                let out = layout_text(Some(&words), &block(width, max_lines));
                assert!(out.lines.len() <= max_lines);
                assert!(!out.lines.is_empty());
                for line in &out.lines {
                    let single_word = !line.contains(' ');
                    assert!(
                        single_word || estimate_text_width(line, 10.0, GlyphModel::Flat) <= width,
                        "{:?} overflows {}",
                        line,
                        width
                    );
                }
            }
        }
    }

    #[test]
    fn line_height_factor_drives_height() {
        let b = block(60.0, 5).with_line_height(1.5);
        let out = layout_text(Some("aaaa bbbb cccc dddd eeee"), &b);
        assert_eq!(out.lines.len(), 3);
        // 3 lines * 15px advance, minus the 5px gap after the last line
        assert!((out.height - 40.0).abs() < 1e-9);
        assert!((b.line_advance() - 15.0).abs() < 1e-9);
    }

    #[test]
    fn huge_overflowing_line_is_cut_quickly() {
        let text = format!("a b {} c", "x".repeat(200_000));
        let b = TextBlock::new(280.0, 12.0, 2);
        let out = layout_text(Some(&text), &b);
        assert_eq!(out.lines.len(), 2);
        assert_eq!(out.lines[0], "a b");
        let last = &out.lines[1];
        assert!(last.ends_with(ELLIPSIS));
        assert!(estimate_text_width(last, 12.0, GlyphModel::Flat) <= 280.0);
        // 280 / 7.2 leaves room for 38 chars: 35 x's plus the ellipsis
        assert_eq!(last.chars().count(), 38);
    }

    #[test]
    fn truncation_respects_multibyte_boundaries() {
        let text = "é".repeat(50) + " " + &"ü".repeat(50) + " end";
        let out = layout_text(Some(&text), &block(120.0, 2));
        assert_eq!(out.lines.len(), 2);
        assert!(out.lines[1].starts_with('ü'));
        assert!(out.lines[1].ends_with(ELLIPSIS));
    }
}
