//! Renderer-agnostic drawing tree produced by the card composer.
//!
//! Coordinates are absolute within the enclosing group; groups carry a
//! translation (and optional uniform scale) applied to their children.

use serde::Serialize;

/// A complete composed graphic.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Drawing {
    pub width: f64,
    pub height: f64,
    pub defs: Vec<Def>,
    pub children: Vec<Node>,
}

/// Reusable paint servers and clip regions, referenced by id.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Def {
    LinearGradient {
        id: String,
        /// Direction vector as `(x1, y1, x2, y2)` in bounding-box units
        vector: (f64, f64, f64, f64),
        stops: Vec<GradientStop>,
    },
    ClipPath { id: String, shape: ClipShape },
    /// Full-canvas background image
    Pattern {
        id: String,
        href: String,
        width: f64,
        height: f64,
    },
    DropShadow {
        id: String,
        dx: f64,
        dy: f64,
        std_deviation: f64,
        opacity: f64,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GradientStop {
    /// 0.0 ..= 1.0
    pub offset: f64,
    pub color: String,
    pub opacity: f64,
}

impl GradientStop {
    pub fn new(offset: f64, color: &str, opacity: f64) -> Self {
        Self {
            offset,
            color: color.to_string(),
            opacity,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "shape", rename_all = "camelCase")]
pub enum ClipShape {
    Circle { cx: f64, cy: f64, r: f64 },
    Rect { x: f64, y: f64, width: f64, height: f64, rx: f64 },
}

/// Drawing primitives.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Node {
    Group(Group),
    Rect(Rect),
    Circle(Circle),
    Path(PathNode),
    Text(TextRun),
    Image(ImageNode),
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    pub x: f64,
    pub y: f64,
    /// Uniform scale applied after translation, 1.0 when unscaled
    pub scale: f64,
    /// Id of a [`Def::ClipPath`]
    pub clip: Option<String>,
    pub children: Vec<Node>,
}

impl Group {
    pub fn at(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            scale: 1.0,
            ..Default::default()
        }
    }

    pub fn clipped(mut self, clip_id: &str) -> Self {
        self.clip = Some(clip_id.to_string());
        self
    }

    pub fn scaled(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    pub fn push(&mut self, node: impl Into<Node>) {
        self.children.push(node.into());
    }

    pub fn with(mut self, node: impl Into<Node>) -> Self {
        self.push(node);
        self
    }
}

/// Fill or stroke: a literal color or a reference to a [`Def`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
pub enum Paint {
    None,
    Color(String),
    Ref(String),
}

impl Paint {
    pub fn color(c: &str) -> Self {
        Paint::Color(c.to_string())
    }

    pub fn reference(id: &str) -> Self {
        Paint::Ref(id.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Stroke {
    pub paint: Paint,
    pub width: f64,
}

impl Stroke {
    pub fn new(color: &str, width: f64) -> Self {
        Self {
            paint: Paint::color(color),
            width,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub rx: f64,
    pub fill: Paint,
    pub stroke: Option<Stroke>,
    /// Id of a [`Def::DropShadow`]
    pub filter: Option<String>,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64, rx: f64, fill: Paint) -> Self {
        Self {
            x,
            y,
            width,
            height,
            rx,
            fill,
            stroke: None,
            filter: None,
        }
    }

    pub fn stroked(mut self, stroke: Stroke) -> Self {
        self.stroke = Some(stroke);
        self
    }

    pub fn filtered(mut self, filter_id: &str) -> Self {
        self.filter = Some(filter_id.to_string());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Circle {
    pub cx: f64,
    pub cy: f64,
    pub r: f64,
    pub fill: Paint,
    pub stroke: Option<Stroke>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PathNode {
    /// SVG path data
    pub d: String,
    pub fill: Paint,
    pub fill_rule_evenodd: bool,
}

impl PathNode {
    pub fn new(d: impl Into<String>, fill: Paint) -> Self {
        Self {
            d: d.into(),
            fill,
            fill_rule_evenodd: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAnchor {
    #[default]
    Start,
    Middle,
    End,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Baseline {
    #[default]
    Auto,
    Middle,
    Hanging,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FontFamily {
    Sans,
    Mono,
}

/// One or more lines of text sharing a style.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TextRun {
    pub x: f64,
    pub y: f64,
    pub lines: Vec<String>,
    /// Baseline advance between lines
    pub line_height: f64,
    pub font_size: f64,
    pub font_weight: u32,
    pub font_family: FontFamily,
    pub fill: Paint,
    /// Outline painted behind the glyphs for legibility
    pub stroke: Option<Stroke>,
    pub anchor: TextAnchor,
    pub baseline: Baseline,
    /// In em
    pub letter_spacing: Option<f64>,
    pub opacity: Option<f64>,
}

impl TextRun {
    pub fn new(x: f64, y: f64, text: impl Into<String>, font_size: f64, fill: Paint) -> Self {
        Self {
            x,
            y,
            lines: vec![text.into()],
            line_height: font_size,
            font_size,
            font_weight: 400,
            font_family: FontFamily::Sans,
            fill,
            stroke: None,
            anchor: TextAnchor::Start,
            baseline: Baseline::Auto,
            letter_spacing: None,
            opacity: None,
        }
    }

    /// Full visible text, lines joined with a space.
    pub fn content(&self) -> String {
        self.lines.join(" ")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageNode {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub href: String,
}

macro_rules! impl_into_node {
    ($($ty:ident => $variant:ident),* $(,)?) => {
        $(impl From<$ty> for Node {
            fn from(value: $ty) -> Self {
                Node::$variant(value)
            }
        })*
    };
}

impl_into_node! {
    Group => Group,
    Rect => Rect,
    Circle => Circle,
    PathNode => Path,
    TextRun => Text,
    ImageNode => Image,
}

impl Node {
    /// Depth-first iterator over this node and all descendants.
    pub fn walk(&self) -> Vec<&Node> {
        let mut out = vec![self];
        if let Node::Group(group) = self {
            for child in &group.children {
                out.extend(child.walk());
            }
        }
        out
    }
}

impl Drawing {
    /// All nodes in document order.
    pub fn nodes(&self) -> Vec<&Node> {
        self.children.iter().flat_map(Node::walk).collect()
    }

    /// All text runs in document order.
    pub fn text_runs(&self) -> Vec<&TextRun> {
        self.nodes()
            .into_iter()
            .filter_map(|node| match node {
                Node::Text(run) => Some(run),
                _ => None,
            })
            .collect()
    }
}
