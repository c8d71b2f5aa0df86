//! The `/feed` endpoint: parameter validation, issue resolution and the
//! three delivery modes.

use axum::{
    body::Body,
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use base64::Engine;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::Deserialize;
use tracing::{error, info};

use super::server::usage;
use super::state::ServerState;
use crate::github::models::RepoContent;
use crate::magazines::{DeliveryAction, FileType, Magazine};
use crate::resolver::FeedError;

/// Raw query parameters of a feed request.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct FeedParams {
    pub magazine: Option<String>,
    pub filetype: Option<String>,
    pub date: Option<String>,
    pub action: Option<String>,
}

/// A validated feed request. Construction happens entirely before any
/// outbound call is made.
#[derive(Debug)]
struct FeedRequest {
    magazine: Magazine,
    file_type: FileType,
    date: DateTime<Utc>,
    action: DeliveryAction,
}

impl FeedRequest {
    /// Validate raw parameters. On failure, returns the offending values for
    /// the error response.
    fn validate(params: &FeedParams) -> Result<FeedRequest, String> {
        let magazine = params.magazine.as_deref().and_then(Magazine::parse);
        let file_type = params.filetype.as_deref().and_then(FileType::parse);

        match (magazine, file_type) {
            (Some(magazine), Some(file_type)) => Ok(FeedRequest {
                magazine,
                file_type,
                date: parse_requested_date(params.date.as_deref()),
                action: DeliveryAction::parse(params.action.as_deref()),
            }),
            _ => Err(format!(
                "magazine:{}, filetype:{}",
                params.magazine.as_deref().unwrap_or("none"),
                params.filetype.as_deref().unwrap_or("none"),
            )),
        }
    }
}

/// `YYYYMMDD`; anything else (including absence and `latest`) means "now".
fn parse_requested_date(raw: Option<&str>) -> DateTime<Utc> {
    raw.and_then(|s| NaiveDate::parse_from_str(s, "%Y%m%d").ok())
        .map(|date| date.and_time(NaiveTime::MIN).and_utc())
        .unwrap_or_else(Utc::now)
}

pub async fn feed(State(state): State<ServerState>, Query(params): Query<FeedParams>) -> Response {
    let request = match FeedRequest::validate(&params) {
        Ok(request) => request,
        Err(offending) => {
            return (
                StatusCode::BAD_REQUEST,
                format!(
                    "{}\nRequired params must be given proper values!\n{}",
                    offending,
                    usage(&state.config)
                ),
            )
                .into_response();
        }
    };

    info!(
        "Feed request: magazine={} filetype={} action={:?}",
        request.magazine, request.file_type, request.action
    );

    let path = match state
        .resolver
        .resolve(request.magazine, request.date, request.file_type)
        .await
    {
        Ok(path) => path,
        Err(err) => return feed_error_response(err),
    };

    let content = match state.resolver.fetch_content(&path).await {
        Ok(content) => content,
        Err(err) => return feed_error_response(err),
    };

    deliver(&state, content, request.action).await
}

fn feed_error_response(err: FeedError) -> Response {
    let status = match err {
        FeedError::NoMatchingIssue { .. } => StatusCode::NOT_FOUND,
        _ => StatusCode::BAD_GATEWAY,
    };
    error!("Feed request failed: {}", err);
    (status, format!("{}\n", err)).into_response()
}

async fn deliver(state: &ServerState, content: RepoContent, action: DeliveryAction) -> Response {
    match action {
        DeliveryAction::Url => content.download_url.clone().into_response(),
        DeliveryAction::Redirect => Response::builder()
            .status(StatusCode::FOUND)
            .header(header::LOCATION, content.download_url.as_str())
            .body(Body::empty())
            .unwrap(),
        DeliveryAction::Download => match issue_bytes(state, &content).await {
            Ok(bytes) => Response::builder()
                .status(StatusCode::OK)
                .header(header::CONTENT_TYPE, "application/octet-stream")
                .header(
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{}\"", content.name),
                )
                .body(Body::from(bytes))
                .unwrap(),
            Err(err) => feed_error_response(err),
        },
        DeliveryAction::Other(other) => format!("Unexpected action: {}", other).into_response(),
    }
}

/// Raw issue bytes: decode the inline payload when present, otherwise fetch
/// from the download URL.
async fn issue_bytes(state: &ServerState, content: &RepoContent) -> Result<Vec<u8>, FeedError> {
    if let Some(inline) = content.inline_content() {
        // The contents API wraps its base64 in newlines
        let compact: String = inline.chars().filter(|c| !c.is_whitespace()).collect();
        return base64::engine::general_purpose::STANDARD
            .decode(compact.as_bytes())
            .map_err(|err| {
                FeedError::ByteFetch(anyhow::Error::new(err).context("Failed to decode inline content"))
            });
    }

    state
        .github
        .download(&content.download_url)
        .await
        .map_err(FeedError::ByteFetch)
}
