use anyhow::{Context, Result};
use axum::extract::{Query, State};
use axum::http::header::{CACHE_CONTROL, CONTENT_TYPE};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{error, info, warn};

use super::state::ServerState;
use crate::error::CardError;
use crate::github::validate_handle;
use crate::svg::Theme;
use crate::types::CardRecord;

const SVG_CONTENT_TYPE: &str = "image/svg+xml";

pub async fn run_server(state: ServerState) -> Result<()> {
    let addr = state.config.server.addr.clone();
    let app = router(Arc::new(state));
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind server address {}", addr))?;
    info!(addr = %addr, "serving cards");
    axum::serve(listener, app).await?;
    Ok(())
}

pub fn router(state: Arc<ServerState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/card", get(card_svg))
        .route("/api/card.json", get(card_json))
        .route("/api/render", post(render_posted))
        .with_state(state)
}

async fn health() -> impl IntoResponse {
    (StatusCode::OK, Json(serde_json::json!({ "status": "ok" })))
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct CardQuery {
    #[serde(alias = "username", alias = "handle")]
    user: Option<String>,
    #[serde(alias = "template")]
    theme: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ThemeQuery {
    #[serde(alias = "template")]
    theme: Option<String>,
}

/// Plain-text error reply.
#[derive(Debug)]
pub struct ServerError {
    pub status: StatusCode,
    pub message: String,
}

impl ServerError {
    fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }
}

impl From<CardError> for ServerError {
    fn from(err: CardError) -> Self {
        let status = if err.is_client_error() {
            StatusCode::BAD_REQUEST
        } else if err.is_upstream() {
            StatusCode::BAD_GATEWAY
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            error!(status = %self.status, message = %self.message, "request failed");
        } else {
            warn!(status = %self.status, message = %self.message, "rejected request");
        }
        (
            self.status,
            [(CONTENT_TYPE, "text/plain; charset=utf-8")],
            self.message,
        )
            .into_response()
    }
}

/// Validate the query before any fetch or layout work.
pub(crate) fn resolve_query<'a>(
    query: &'a CardQuery,
    default_theme: &'a str,
) -> Result<(&'a str, &'static Theme), ServerError> {
    let user = query
        .user
        .as_deref()
        .filter(|u| !u.trim().is_empty())
        .ok_or_else(|| ServerError::bad_request("missing \"user\" query parameter"))?;
    let handle = validate_handle(user)?;
    Ok((handle, pick_theme(query.theme.as_deref(), default_theme)))
}

/// Requested theme, else the configured default, else the built-in default.
fn pick_theme(requested: Option<&str>, default_theme: &str) -> &'static Theme {
    if let Some(theme) = requested.and_then(Theme::find) {
        return theme;
    }
    if let Some(id) = requested {
        warn!(theme = id, fallback = default_theme, "unknown theme requested");
    }
    Theme::resolve(default_theme)
}

async fn fetch_record(
    state: &ServerState,
    query: &CardQuery,
) -> Result<(CardRecord, &'static Theme), ServerError> {
    let (handle, theme) = resolve_query(query, &state.config.default_theme)?;
    let record = state.github.fetch_embedded_card(handle).await?;
    Ok((record, theme))
}

fn svg_response(svg: String, cache_control: &str) -> Response {
    (
        StatusCode::OK,
        [(CONTENT_TYPE, SVG_CONTENT_TYPE.to_string()), (CACHE_CONTROL, cache_control.to_string())],
        svg,
    )
        .into_response()
}

async fn card_svg(
    State(state): State<Arc<ServerState>>,
    Query(query): Query<CardQuery>,
) -> Result<Response, ServerError> {
    let (record, theme) = fetch_record(&state, &query).await?;
    let svg = crate::svg::render_drawing(&crate::card::compose(&record, theme));
    Ok(svg_response(svg, &state.config.server.cache_control))
}

async fn card_json(
    State(state): State<Arc<ServerState>>,
    Query(query): Query<CardQuery>,
) -> Result<Response, ServerError> {
    let (record, theme) = fetch_record(&state, &query).await?;
    let drawing = crate::card::compose(&record, theme);
    Ok(Json(drawing).into_response())
}

/// Render caller-supplied card data without touching GitHub.
async fn render_posted(
    State(state): State<Arc<ServerState>>,
    Query(query): Query<ThemeQuery>,
    Json(record): Json<CardRecord>,
) -> Result<Response, ServerError> {
    let theme = pick_theme(query.theme.as_deref(), &state.config.default_theme);
    let svg = crate::svg::render_drawing(&crate::card::compose(&record, theme));
    Ok(svg_response(svg, "no-store"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(user: Option<&str>, theme: Option<&str>) -> CardQuery {
        CardQuery {
            user: user.map(String::from),
            theme: theme.map(String::from),
        }
    }

    #[test]
    fn missing_user_is_a_bad_request() {
        for q in [query(None, None), query(Some("  "), None)] {
            let err = resolve_query(&q, "classic").unwrap_err();
            assert_eq!(err.status, StatusCode::BAD_REQUEST);
        }
    }

    #[test]
    fn invalid_user_is_a_bad_request() {
        let q = query(Some("-nope-"), None);
        let err = resolve_query(&q, "classic").unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
    }

    #[test]
    fn theme_defaults_and_falls_back() {
        let q = query(Some("octocat"), None);
        let (handle, theme) = resolve_query(&q, "dark").unwrap();
        assert_eq!(handle, "octocat");
        assert_eq!(theme.id, "dark");

        let q = query(Some("octocat"), Some("aurora"));
        assert_eq!(resolve_query(&q, "dark").unwrap().1.id, "dark");

        let q = query(Some("octocat"), Some("HOLOGRAPHIC"));
        assert_eq!(resolve_query(&q, "dark").unwrap().1.id, "holographic");
    }

    #[test]
    fn bad_configured_theme_uses_builtin_default() {
        assert_eq!(pick_theme(Some("aurora"), "nope").id, "classic");
        assert_eq!(pick_theme(None, "nope").id, "classic");
    }

    #[test]
    fn upstream_failures_map_to_bad_gateway() {
        let err: ServerError = CardError::NotFound("ghost".into()).into();
        assert_eq!(err.status, StatusCode::BAD_GATEWAY);
        let err: ServerError = CardError::Upstream("boom".into()).into();
        assert_eq!(err.status, StatusCode::BAD_GATEWAY);
        assert!(err.message.contains("boom"));
        let err: ServerError = CardError::Config("bad".into()).into();
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
    }
}
