//! GitHub data and avatar collaborators.
//!
//! Fetches an owner (user or organization) through the GraphQL API and
//! normalizes it into a [`CardRecord`]. Nothing here is cached or retried.

use crate::config::GithubConfig;
use crate::error::{CardError, Result};
use crate::types::{CardRecord, HighlightedRepo, MAX_HIGHLIGHTED_REPOS, MAX_TOP_LANGUAGES};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use lazy_static::lazy_static;
use regex::Regex;
use reqwest::header::CONTENT_TYPE;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, info, warn};

const OWNER_QUERY: &str = r#"
query GetOwner($username: String!) {
  repositoryOwner(login: $username) {
    __typename
    login
    avatarUrl
    ... on User {
      name
      bio
      location
      followers { totalCount }
      contributionsCollection { contributionCalendar { totalContributions } }
      pinnedItems(first: 3, types: REPOSITORY) {
        nodes { ... on Repository { id name description url stargazerCount forkCount } }
      }
    }
    ... on Organization {
      name
      description
      location
      membersWithRole { totalCount }
      pinnedItems(first: 3, types: REPOSITORY) {
        nodes { ... on Repository { id name description url stargazerCount forkCount } }
      }
    }
    repositories(first: 10, ownerAffiliations: OWNER, isFork: false, orderBy: {field: STARGAZERS, direction: DESC}) {
      totalCount
      nodes {
        id name description url stargazerCount forkCount
        languages(first: 5, orderBy: {field: SIZE, direction: DESC}) { nodes { name } }
      }
    }
  }
}
"#;

const DEFAULT_BIO: &str = "GitHub Profile";
const DEFAULT_LOCATION: &str = "On GitHub";
const DEFAULT_AVATAR_MIME: &str = "image/png";

lazy_static! {
    static ref RE_HANDLE: Regex =
        Regex::new(r"^[A-Za-z0-9](?:[A-Za-z0-9]|-[A-Za-z0-9]){0,38}$").unwrap();
}

/// Check that `handle` is a plausible GitHub login and return it trimmed.
pub fn validate_handle(handle: &str) -> Result<&str> {
    let trimmed = handle.trim().trim_start_matches('@');
    if trimmed.len() <= 39 && RE_HANDLE.is_match(trimmed) {
        Ok(trimmed)
    } else {
        Err(CardError::InvalidHandle(handle.to_string()))
    }
}

/// Encode raw image bytes as a `data:` URI.
pub fn to_data_uri(mime: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime, BASE64.encode(bytes))
}

pub struct GithubClient {
    http: reqwest::Client,
    config: GithubConfig,
}

impl GithubClient {
    pub fn new(config: &GithubConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        if config.token.is_none() {
            warn!("no GitHub token configured; the GraphQL API requires one");
        }
        Ok(Self {
            http,
            config: config.clone(),
        })
    }

    /// Fetch and normalize the account behind `handle`.
    pub async fn fetch_card(&self, handle: &str) -> Result<CardRecord> {
        let login = validate_handle(handle)?;
        info!(login, "fetching GitHub owner");

        let body = serde_json::json!({
            "query": OWNER_QUERY,
            "variables": { "username": login },
        });
        let mut request = self.http.post(&self.config.api_url).json(&body);
        if let Some(ref token) = self.config.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(CardError::Upstream(format!("GitHub API returned {}", status)));
        }
        let payload: GraphqlResponse = response.json().await?;
        payload.into_record(login)
    }

    /// Download an image and return it as an embeddable data URI.
    pub async fn fetch_avatar_data_uri(&self, url: &str) -> Result<String> {
        debug!(url, "fetching avatar");
        let response = self.http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(CardError::Upstream(format!(
                "avatar download failed with {}",
                status
            )));
        }
        let mime = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(';').next())
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .unwrap_or(DEFAULT_AVATAR_MIME)
            .to_string();
        let bytes = response.bytes().await?;
        Ok(to_data_uri(&mime, &bytes))
    }

    /// Fetch the account and embed its avatar, ready for composition.
    pub async fn fetch_embedded_card(&self, handle: &str) -> Result<CardRecord> {
        let record = self.fetch_card(handle).await?;
        let avatar = self.fetch_avatar_data_uri(&record.avatar_url).await?;
        Ok(record.with_avatar(avatar))
    }
}

// ============================================================================
// GraphQL response shape
// ============================================================================

#[derive(Debug, Deserialize)]
struct GraphqlResponse {
    data: Option<OwnerData>,
    #[serde(default)]
    errors: Vec<GraphqlError>,
}

#[derive(Debug, Deserialize)]
struct GraphqlError {
    message: String,
    #[serde(rename = "type")]
    kind: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct OwnerData {
    repository_owner: Option<Owner>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Owner {
    #[serde(rename = "__typename")]
    typename: String,
    login: String,
    #[serde(default)]
    avatar_url: String,
    name: Option<String>,
    bio: Option<String>,
    description: Option<String>,
    location: Option<String>,
    followers: Option<Count>,
    members_with_role: Option<Count>,
    contributions_collection: Option<Contributions>,
    pinned_items: Option<Nodes<Option<RepoNode>>>,
    repositories: Option<RepoConnection>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Count {
    total_count: u64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Contributions {
    contribution_calendar: Calendar,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Calendar {
    total_contributions: u64,
}

#[derive(Debug, Deserialize)]
struct Nodes<T> {
    #[serde(default = "Vec::new")]
    nodes: Vec<T>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RepoConnection {
    total_count: u64,
    #[serde(default)]
    nodes: Vec<RepoNode>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RepoNode {
    id: Option<String>,
    #[serde(default)]
    name: String,
    description: Option<String>,
    url: Option<String>,
    #[serde(default)]
    stargazer_count: u64,
    #[serde(default)]
    fork_count: u64,
    languages: Option<Nodes<LanguageNode>>,
}

#[derive(Debug, Deserialize)]
struct LanguageNode {
    name: String,
}

impl GraphqlResponse {
    fn into_record(self, login: &str) -> Result<CardRecord> {
        if !self.errors.is_empty() {
            let not_found = self
                .errors
                .iter()
                .any(|e| e.kind.as_deref() == Some("NOT_FOUND"));
            let messages: Vec<&str> = self.errors.iter().map(|e| e.message.as_str()).collect();
            warn!(login, errors = ?messages, "GraphQL errors");
            return Err(if not_found {
                CardError::NotFound(login.to_string())
            } else {
                CardError::Upstream(messages.join("; "))
            });
        }
        self.data
            .and_then(|data| data.repository_owner)
            .map(Owner::into_record)
            .ok_or_else(|| CardError::NotFound(login.to_string()))
    }
}

impl RepoNode {
    fn to_highlighted(&self) -> HighlightedRepo {
        HighlightedRepo {
            id: self.id.clone(),
            name: self.name.clone(),
            description: self.description.clone(),
            url: self.url.clone(),
            stars: self.stargazer_count,
            forks: self.fork_count,
        }
    }
}

impl Owner {
    fn into_record(self) -> CardRecord {
        let is_user = self.typename == "User";
        let repos = self.repositories.unwrap_or(RepoConnection {
            total_count: 0,
            nodes: Vec::new(),
        });

        let total_stars = repos.nodes.iter().map(|r| r.stargazer_count).sum();
        let top_languages = rank_languages(&repos.nodes);

        let mut highlighted: Vec<HighlightedRepo> = self
            .pinned_items
            .map(|pinned| pinned.nodes.into_iter().flatten().collect::<Vec<_>>())
            .unwrap_or_default()
            .iter()
            .map(RepoNode::to_highlighted)
            .collect();
        if highlighted.is_empty() {
            highlighted = repos
                .nodes
                .iter()
                .take(MAX_HIGHLIGHTED_REPOS)
                .map(RepoNode::to_highlighted)
                .collect();
        }

        let bio = if is_user { self.bio } else { self.description };
        let followers = if is_user {
            self.followers
        } else {
            self.members_with_role
        };

        CardRecord {
            name: self
                .name
                .filter(|n| !n.trim().is_empty())
                .unwrap_or_else(|| self.login.clone()),
            github_user: self.login,
            avatar_url: self.avatar_url,
            bio: Some(
                bio.filter(|b| !b.trim().is_empty())
                    .unwrap_or_else(|| DEFAULT_BIO.to_string()),
            ),
            location: Some(
                self.location
                    .filter(|l| !l.trim().is_empty())
                    .unwrap_or_else(|| DEFAULT_LOCATION.to_string()),
            ),
            followers: followers.map(|c| c.total_count).unwrap_or(0),
            public_repos: repos.total_count,
            total_stars,
            contributions_last_year: self
                .contributions_collection
                .filter(|_| is_user)
                .map(|c| c.contribution_calendar.total_contributions)
                .unwrap_or(0),
            top_languages,
            highlighted_repos: highlighted,
        }
    }
}

/// Languages ordered by how many repositories use them; ties keep first-seen order.
fn rank_languages(repos: &[RepoNode]) -> Vec<String> {
    let mut order: Vec<String> = Vec::new();
    let mut counts: HashMap<String, usize> = HashMap::new();
    for lang in repos
        .iter()
        .filter_map(|r| r.languages.as_ref())
        .flat_map(|langs| langs.nodes.iter())
    {
        let count = counts.entry(lang.name.clone()).or_insert(0);
        if *count == 0 {
            order.push(lang.name.clone());
        }
        *count += 1;
    }
    order.sort_by(|a, b| counts[b].cmp(&counts[a]));
    order.truncate(MAX_TOP_LANGUAGES);
    order
}

#[cfg(test)]
mod tests {
    use super::*;

    const USER_FIXTURE: &str = r#"{
      "data": {
        "repositoryOwner": {
          "__typename": "User",
          "login": "octo",
          "avatarUrl": "https://avatars.example/octo.png",
          "name": null,
          "bio": "",
          "location": "Paris",
          "followers": { "totalCount": 42 },
          "contributionsCollection": { "contributionCalendar": { "totalContributions": 365 } },
          "pinnedItems": { "nodes": [] },
          "repositories": {
            "totalCount": 17,
            "nodes": [
              { "id": "R_a", "name": "alpha", "description": null, "url": "u", "stargazerCount": 10, "forkCount": 1,
                "languages": { "nodes": [{ "name": "Go" }, { "name": "Rust" }] } },
              { "id": "R_b", "name": "beta", "description": "d", "url": "u", "stargazerCount": 5, "forkCount": 0,
                "languages": { "nodes": [{ "name": "Rust" }] } },
              { "id": "R_c", "name": "gamma", "description": "d", "url": "u", "stargazerCount": 2, "forkCount": 0,
                "languages": { "nodes": [{ "name": "C" }] } },
              { "id": "R_d", "name": "delta", "description": "d", "url": "u", "stargazerCount": 1, "forkCount": 0,
                "languages": { "nodes": [] } }
            ]
          }
        }
      }
    }"#;

    #[test]
    fn user_payload_is_normalized() {
        let payload: GraphqlResponse = serde_json::from_str(USER_FIXTURE).unwrap();
        let record = payload.into_record("octo").unwrap();
        assert_eq!(record.name, "octo");
        assert_eq!(record.bio.as_deref(), Some(DEFAULT_BIO));
        assert_eq!(record.location.as_deref(), Some("Paris"));
        assert_eq!(record.followers, 42);
        assert_eq!(record.public_repos, 17);
        assert_eq!(record.total_stars, 18);
        assert_eq!(record.contributions_last_year, 365);
        assert_eq!(record.top_languages, vec!["Rust", "Go", "C"]);
        // nothing pinned: top starred repos are used instead
        let names: Vec<&str> = record.highlighted_repos.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["alpha", "beta", "gamma"]);
    }

    #[test]
    fn organization_uses_description_and_members() {
        let json = r#"{"data": {"repositoryOwner": {
            "__typename": "Organization", "login": "acme", "avatarUrl": "a",
            "name": "Acme", "description": "We build things", "location": null,
            "membersWithRole": { "totalCount": 9 },
            "pinnedItems": { "nodes": [ { "id": "R_p", "name": "pinned", "description": null, "url": "u", "stargazerCount": 3, "forkCount": 2 } ] },
            "repositories": { "totalCount": 1, "nodes": [] }
        }}}"#;
        let payload: GraphqlResponse = serde_json::from_str(json).unwrap();
        let record = payload.into_record("acme").unwrap();
        assert_eq!(record.bio.as_deref(), Some("We build things"));
        assert_eq!(record.location.as_deref(), Some(DEFAULT_LOCATION));
        assert_eq!(record.followers, 9);
        assert_eq!(record.contributions_last_year, 0);
        assert_eq!(record.highlighted_repos.len(), 1);
        assert_eq!(record.highlighted_repos[0].forks, 2);
    }

    #[test]
    fn missing_owner_is_not_found() {
        let payload: GraphqlResponse =
            serde_json::from_str(r#"{"data": {"repositoryOwner": null}}"#).unwrap();
        assert!(matches!(payload.into_record("ghost"), Err(CardError::NotFound(_))));

        let payload: GraphqlResponse = serde_json::from_str(
            r#"{"data": null, "errors": [{"type": "NOT_FOUND", "message": "Could not resolve"}]}"#,
        )
        .unwrap();
        assert!(matches!(payload.into_record("ghost"), Err(CardError::NotFound(_))));
    }

    #[test]
    fn other_graphql_errors_are_upstream() {
        let payload: GraphqlResponse = serde_json::from_str(
            r#"{"errors": [{"message": "rate limited"}]}"#,
        )
        .unwrap();
        match payload.into_record("octo") {
            Err(CardError::Upstream(msg)) => assert_eq!(msg, "rate limited"),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn handles_are_validated() {
        assert_eq!(validate_handle("octocat").unwrap(), "octocat");
        assert_eq!(validate_handle(" @my-name ").unwrap(), "my-name");
        for bad in ["", "   ", "-lead", "trail-", "dou--ble", "a b", "x".repeat(40).as_str()] {
            assert!(validate_handle(bad).is_err(), "{:?}", bad);
        }
    }

    #[test]
    fn data_uri_is_base64() {
        assert_eq!(to_data_uri("image/png", b"hi"), "data:image/png;base64,aGk=");
    }
}
