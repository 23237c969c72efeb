//! Card input records.
//!
//! A `CardRecord` is produced wholesale by the data-fetch collaborator (or
//! deserialized from JSON) and only read during layout.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Maximum number of repositories surfaced on a card
pub const MAX_HIGHLIGHTED_REPOS: usize = 3;

/// Maximum number of languages carried by a card
pub const MAX_TOP_LANGUAGES: usize = 8;

/// Snapshot of one account's public statistics.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CardRecord {
    /// Display name
    pub name: String,
    /// Account login, rendered as `@handle`
    #[serde(alias = "handle")]
    pub github_user: String,
    /// Image reference: a URL or an already-embedded data URI
    pub avatar_url: String,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub followers: u64,
    pub public_repos: u64,
    pub total_stars: u64,
    pub contributions_last_year: u64,
    pub top_languages: Vec<String>,
    pub highlighted_repos: Vec<HighlightedRepo>,
}

/// A repository surfaced prominently on the card.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightedRepo {
    pub id: Option<String>,
    pub name: String,
    pub description: Option<String>,
    pub url: Option<String>,
    pub stars: u64,
    pub forks: u64,
}

impl HighlightedRepo {
    /// Identifier, if present and non-blank.
    pub fn valid_id(&self) -> Option<&str> {
        self.id.as_deref().map(str::trim).filter(|id| !id.is_empty())
    }
}

impl CardRecord {
    /// Repositories eligible for layout: entries with a unique, non-empty
    /// identifier, in input order, capped at [`MAX_HIGHLIGHTED_REPOS`].
    pub fn layout_repos(&self) -> Vec<&HighlightedRepo> {
        let mut seen = HashSet::new();
        self.highlighted_repos
            .iter()
            .filter(|repo| repo.valid_id().is_some_and(|id| seen.insert(id)))
            .take(MAX_HIGHLIGHTED_REPOS)
            .collect()
    }

    /// Distinct, non-blank language names in input order, capped at
    /// [`MAX_TOP_LANGUAGES`].
    pub fn layout_languages(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.top_languages
            .iter()
            .map(|lang| lang.trim())
            .filter(|lang| !lang.is_empty() && seen.insert(*lang))
            .take(MAX_TOP_LANGUAGES)
            .collect()
    }

    /// Replace the avatar reference, typically with an embedded data URI.
    pub fn with_avatar(mut self, avatar: impl Into<String>) -> Self {
        self.avatar_url = avatar.into();
        self
    }
}
