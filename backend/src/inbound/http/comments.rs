//! Comment handlers: submit, track by passcode, list and report.
//!
//! ```text
//! POST /api/v1/comments          {"sector":"Transport","comment":"...","useModels":false}
//! GET  /api/v1/comments/k3v9q2xa
//! GET  /api/v1/comments
//! GET  /api/v1/comments/report
//! ```
//!
//! Submission works with or without a session; listing and the report need
//! one. `/comments/report` is registered ahead of `/comments/{passcode}` so
//! the literal segment wins.

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::domain::ports::{SubmissionReceipt, SubmissionRequest};
use crate::domain::{CommentOwner, CommentView, Error, Sector, SubmissionReport};
use crate::inbound::http::ApiResult;
use crate::inbound::http::cache_control::private_no_cache_header;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Shortest passcode input worth a lookup.
pub const TRACK_CODE_MIN_CHARS: usize = 4;

/// Body of `POST /api/v1/comments`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmitCommentRequest {
    /// Sector label, matched case-insensitively.
    #[schema(example = "Transport")]
    pub sector: String,
    /// Comment text; at least five characters once trimmed.
    #[schema(example = "The new freight corridor rules are confusing and slow.")]
    pub comment: String,
    /// Prefer the model-backed analysis when the server has it loaded.
    #[serde(default)]
    pub use_models: bool,
}

/// Response of `POST /api/v1/comments`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmitCommentResponse {
    /// Tracking code for later lookups.
    #[schema(example = "k3v9q2xa")]
    pub passcode: String,
    /// Lowercase sentiment label.
    #[schema(example = "negative")]
    pub sentiment: String,
    /// Classifier confidence in `[0, 1]`.
    #[schema(example = 0.9)]
    pub confidence: f32,
    /// Short synopsis of the comment.
    pub summary: String,
}

impl From<SubmissionReceipt> for SubmitCommentResponse {
    fn from(receipt: SubmissionReceipt) -> Self {
        Self {
            passcode: receipt.passcode.to_string(),
            confidence: receipt.sentiment.confidence(),
            sentiment: receipt.sentiment.into_label(),
            summary: receipt.summary,
        }
    }
}

fn parse_sector(raw: &str) -> Result<Sector, Error> {
    raw.parse::<Sector>().map_err(|err| {
        Error::invalid_request(err.to_string())
            .with_details(json!({ "field": "sector", "code": "unknown_sector" }))
    })
}

/// Submit a comment as the signed-in user or as a guest.
#[utoipa::path(
    post,
    path = "/api/v1/comments",
    request_body = SubmitCommentRequest,
    responses(
        (status = 201, description = "Comment stored", body = SubmitCommentResponse),
        (status = 400, description = "Unknown sector or comment too short", body = Error),
        (status = 503, description = "Storage unavailable", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["comments"],
    operation_id = "submitComment",
    security([])
)]
#[post("/comments")]
pub async fn submit_comment(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<SubmitCommentRequest>,
) -> ApiResult<HttpResponse> {
    let SubmitCommentRequest {
        sector,
        comment,
        use_models,
    } = payload.into_inner();
    let sector = parse_sector(&sector)?;
    let owner = session
        .user_id()
        .map_or(CommentOwner::Guest, CommentOwner::User);
    let receipt = state
        .submissions
        .submit(SubmissionRequest {
            owner,
            sector,
            text: comment,
            use_heavy_models: use_models,
        })
        .await?;
    Ok(HttpResponse::Created().json(SubmitCommentResponse::from(receipt)))
}

/// Printable report of the signed-in user's submissions.
#[utoipa::path(
    get,
    path = "/api/v1/comments/report",
    responses(
        (status = 200, description = "Submission report", body = SubmissionReport),
        (status = 401, description = "Login required", body = Error),
        (status = 503, description = "Storage unavailable", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["comments"],
    operation_id = "submissionReport"
)]
#[get("/comments/report")]
pub async fn submission_report(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    let views = state.submissions.list_mine(user_id).await?;
    Ok(HttpResponse::Ok()
        .insert_header(private_no_cache_header())
        .json(SubmissionReport::from_views(views)))
}

/// Track a comment by passcode. No session needed.
#[utoipa::path(
    get,
    path = "/api/v1/comments/{passcode}",
    params(("passcode" = String, Path, description = "Passcode handed out at submission")),
    responses(
        (status = 200, description = "Stored comment", body = CommentView),
        (status = 400, description = "Passcode too short", body = Error),
        (status = 404, description = "No comment with that passcode", body = Error),
        (status = 503, description = "Storage unavailable", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["comments"],
    operation_id = "trackComment",
    security([])
)]
#[get("/comments/{passcode}")]
pub async fn track_comment(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<CommentView>> {
    let raw = path.into_inner();
    let code = raw.trim();
    if code.chars().count() < TRACK_CODE_MIN_CHARS {
        return Err(Error::invalid_request(format!(
            "passcode must contain at least {TRACK_CODE_MIN_CHARS} characters"
        ))
        .with_details(json!({ "field": "passcode", "code": "too_short" })));
    }
    state
        .submissions
        .track(code)
        .await?
        .map(web::Json)
        .ok_or_else(|| Error::not_found("no comment with that passcode"))
}

/// List the signed-in user's comments, most recent first.
#[utoipa::path(
    get,
    path = "/api/v1/comments",
    responses(
        (status = 200, description = "Comments", body = [CommentView]),
        (status = 401, description = "Login required", body = Error),
        (status = 503, description = "Storage unavailable", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["comments"],
    operation_id = "listMyComments"
)]
#[get("/comments")]
pub async fn list_my_comments(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    let views = state.submissions.list_mine(user_id).await?;
    Ok(HttpResponse::Ok()
        .insert_header(private_no_cache_header())
        .json(views))
}

#[cfg(test)]
#[path = "comments_tests.rs"]
mod tests;
