//! Icon lookup table. Paths are drawn on a 16×16 grid.

use super::classify::ProjectCategory;
use crate::svg::{Group, Paint, PathNode};
use serde::Serialize;

const GRID: f64 = 16.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Icon {
    GitHub,
    Repo,
    Star,
    Fork,
    Globe,
    Mobile,
    Database,
    Gears,
    Robot,
    Gamepad,
    Code,
}

impl Icon {
    /// Icon for a repository category; uncategorized repos get [`Icon::Code`].
    pub fn for_category(category: Option<ProjectCategory>) -> Self {
        match category {
            Some(ProjectCategory::Web) => Icon::Globe,
            Some(ProjectCategory::Mobile) => Icon::Mobile,
            Some(ProjectCategory::Database) => Icon::Database,
            Some(ProjectCategory::Api) => Icon::Gears,
            Some(ProjectCategory::MlAi) => Icon::Robot,
            Some(ProjectCategory::Game) => Icon::Gamepad,
            Some(ProjectCategory::Tooling) | None => Icon::Code,
        }
    }

    pub fn path_data(self) -> &'static str {
        match self {
            Icon::GitHub => "M8 0C3.58 0 0 3.58 0 8c0 3.54 2.29 6.53 5.47 7.59.4.07.55-.17.55-.38 0-.19-.01-.82-.01-1.49-2.01.37-2.53-.49-2.69-.94-.09-.23-.48-.94-.82-1.13-.28-.15-.68-.52-.01-.53.63-.01 1.08.58 1.23.82.72 1.21 1.87.87 2.33.66.07-.52.28-.87.51-1.07-1.78-.2-3.64-.89-3.64-3.95 0-.87.31-1.59.82-2.15-.08-.2-.36-1.02.08-2.12 0 0 .67-.21 2.2.82.64-.18 1.32-.27 2-.27.68 0 1.36.09 2 .27 1.53-1.04 2.2-.82 2.2-.82.44 1.1.16 1.92.08 2.12.51.56.82 1.27.82 2.15 0 3.07-1.87 3.75-3.65 3.95.29.25.54.73.54 1.48 0 1.07-.01 1.93-.01 2.2 0 .21.15.46.55.38A8.01 8.01 0 0 0 16 8c0-4.42-3.58-8-8-8z",
            Icon::Repo => "M2 2.5A2.5 2.5 0 0 1 4.5 0h8.75a.75.75 0 0 1 .75.75v12.5a.75.75 0 0 1-.75.75h-2.5v-1.5h1.75v-2h-8a1 1 0 0 0-.71 1.7.75.75 0 0 1-1.07 1.05A2.5 2.5 0 0 1 2 11.5zm10.5-1h-8a1 1 0 0 0-1 1v6.7A2.5 2.5 0 0 1 4.5 9h8zM5 12.25v3.25l1.5-1 1.5 1v-3.25z",
            Icon::Star => "M8 .5l2.3 4.7 5.2.8-3.8 3.6.9 5.2L8 12.4l-4.6 2.4.9-5.2L.5 6l5.2-.8z",
            Icon::Fork => "M4 1a2 2 0 1 1 0 4 2 2 0 0 1 0-4zm8 0a2 2 0 1 1 0 4 2 2 0 0 1 0-4zM8 11a2 2 0 1 1 0 4 2 2 0 0 1 0-4zM3.25 5h1.5v1.5c0 .4.35.75.75.75h5c.4 0 .75-.35.75-.75V5h1.5v1.5a2.25 2.25 0 0 1-2.25 2.25h-1.75V11h-1.5V8.75H5.5A2.25 2.25 0 0 1 3.25 6.5z",
            Icon::Globe => "M8 0a8 8 0 1 0 0 16A8 8 0 0 0 8 0zm5.9 7.25h-2.7a12 12 0 0 0-1.1-5 6.5 6.5 0 0 1 3.8 5zM8 1.6c.8 1 1.5 3 1.7 5.65H6.3C6.5 4.6 7.2 2.6 8 1.6zM5.9 2.25a12 12 0 0 0-1.1 5H2.1a6.5 6.5 0 0 1 3.8-5zM2.1 8.75h2.7a12 12 0 0 0 1.1 5 6.5 6.5 0 0 1-3.8-5zM8 14.4c-.8-1-1.5-3-1.7-5.65h3.4C9.5 11.4 8.8 13.4 8 14.4zm2.1-.65a12 12 0 0 0 1.1-5h2.7a6.5 6.5 0 0 1-3.8 5z",
            Icon::Mobile => "M4.5 0h7A1.5 1.5 0 0 1 13 1.5v13a1.5 1.5 0 0 1-1.5 1.5h-7A1.5 1.5 0 0 1 3 14.5v-13A1.5 1.5 0 0 1 4.5 0zm0 1.5v11h7v-11zM8 13.25a.75.75 0 1 0 0 1.5.75.75 0 0 0 0-1.5z",
            Icon::Database => "M8 0c3.9 0 7 1.3 7 3v10c0 1.7-3.1 3-7 3s-7-1.3-7-3V3c0-1.7 3.1-3 7-3zm5.5 5.2C12.2 5.9 10.2 6.3 8 6.3s-4.2-.4-5.5-1.1V8c0 .6 2.2 1.5 5.5 1.5s5.5-.9 5.5-1.5zm0 4.8c-1.3.7-3.3 1.1-5.5 1.1s-4.2-.4-5.5-1.1V13c0 .6 2.2 1.5 5.5 1.5s5.5-.9 5.5-1.5z",
            Icon::Gears => "M7 0h2l.4 2.1 1.3.6 1.8-1.2 1.4 1.4-1.2 1.8.6 1.3L16 7v2l-2.1.4-.6 1.3 1.2 1.8-1.4 1.4-1.8-1.2-1.3.6L9 16H7l-.4-2.1-1.3-.6-1.8 1.2-1.4-1.4 1.2-1.8-.6-1.3L0 9V7l2.1-.4.6-1.3-1.2-1.8 1.4-1.4 1.8 1.2 1.3-.6zM8 5.5a2.5 2.5 0 1 0 0 5 2.5 2.5 0 0 0 0-5z",
            Icon::Robot => "M7.25 0h1.5v2H12a2 2 0 0 1 2 2v1h2v4h-2v3a2 2 0 0 1-2 2H4a2 2 0 0 1-2-2V9H0V5h2V4a2 2 0 0 1 2-2h3.25zM5.5 6a1.25 1.25 0 1 0 0 2.5 1.25 1.25 0 0 0 0-2.5zm5 0a1.25 1.25 0 1 0 0 2.5 1.25 1.25 0 0 0 0-2.5zM5 10.5v1h6v-1z",
            Icon::Gamepad => "M4 4h8a4 4 0 0 1 4 4v1.5a2.5 2.5 0 0 1-4.5 1.5l-1-1h-5l-1 1A2.5 2.5 0 0 1 0 9.5V8a4 4 0 0 1 4-4zm0 2v1.25H2.75v1.5H4V10h1.5V8.75h1.25v-1.5H5.5V6zm7 .5a.75.75 0 1 0 0 1.5.75.75 0 0 0 0-1.5zm1.5 1.5a.75.75 0 1 0 0 1.5.75.75 0 0 0 0-1.5z",
            Icon::Code => "M5.5 4 1.5 8l4 4 1.06-1.06L3.62 8l2.94-2.94zm5 0-1.06 1.06L12.38 8l-2.94 2.94L10.5 12l4-4z",
        }
    }

    /// Whether the path relies on even-odd filling for its cut-outs.
    fn evenodd(self) -> bool {
        !matches!(self, Icon::Star | Icon::Code | Icon::GitHub)
    }

    /// Place the icon with its top-left corner at `(x, y)`, scaled to `size`.
    pub fn node(self, x: f64, y: f64, size: f64, fill: &str) -> Group {
        let mut path = PathNode::new(self.path_data(), Paint::color(fill));
        path.fill_rule_evenodd = self.evenodd();
        Group::at(x, y).scaled(size / GRID).with(path)
    }
}
