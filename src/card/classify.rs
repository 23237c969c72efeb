//! Keyword-based repository classification.
//!
//! Categories are checked in declaration order and the first category with
//! any keyword contained in the case-folded `name + " " + description` wins.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectCategory {
    Web,
    Mobile,
    Database,
    Api,
    MlAi,
    Game,
    Tooling,
}

/// Ordered (category, keywords) table; order is significant.
pub const CATEGORY_KEYWORDS: &[(ProjectCategory, &[&str])] = &[
    (
        ProjectCategory::Web,
        &[
            "react", "vue", "angular", "nextjs", "vite", "tailwind", "css", "html", "django",
            "flask", "rails", "express", "webapp", "website", "portfolio", "frontend", "backend",
            "fullstack",
        ],
    ),
    (
        ProjectCategory::Mobile,
        &["android", "ios", "flutter", "react-native", "swift", "kotlin", "xamarin", "mobile"],
    ),
    (
        ProjectCategory::Database,
        &["database", "sql", "mongodb", "postgres", "mysql", "firebase", "db", "orm"],
    ),
    (
        ProjectCategory::Api,
        &["api", "rest", "graphql", "microservice", "server"],
    ),
    (
        ProjectCategory::MlAi,
        &[
            "tensorflow", "pytorch", "scikit-learn", "keras", "machine-learning", "ai",
            "neural-network", "nlp",
        ],
    ),
    (
        ProjectCategory::Game,
        &["unity", "unreal", "game", "gamedev", "phaser", "godot"],
    ),
    (
        ProjectCategory::Tooling,
        &[
            "cli", "tool", "script", "automation", "config", "dotfiles", "library", "sdk",
            "framework",
        ],
    ),
];

/// Classify a repository, or `None` when no keyword matches.
pub fn classify(name: &str, description: Option<&str>) -> Option<ProjectCategory> {
    let haystack = format!(
        "{} {}",
        name.to_lowercase(),
        description.unwrap_or("").to_lowercase()
    );
    CATEGORY_KEYWORDS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|kw| haystack.contains(kw)))
        .map(|(category, _)| *category)
}
