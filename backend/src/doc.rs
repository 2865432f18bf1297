//! OpenAPI document for the REST API.
//!
//! Served through Swagger UI at `/docs` in debug builds. Domain types derive
//! `ToSchema` directly, so the schemas below are the wire shapes.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{CommentView, Error, ErrorCode, ReportEntry, SubmissionReport};
use crate::inbound::http::comments::{SubmitCommentRequest, SubmitCommentResponse};
use crate::inbound::http::users::{LoginRequest, RegisterRequest, RegisterResponse};

/// Adds the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);
        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/v1/login.",
            ))),
        );
    }
}

/// OpenAPI document for the consultation API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "E-consultation comment API",
        description = "Submit sector-tagged comments, track them by passcode and review your own submissions."
    ),
    servers((url = "/", description = "Relative to the deployment base URL")),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::users::register,
        crate::inbound::http::users::login,
        crate::inbound::http::users::logout,
        crate::inbound::http::sectors::list_sectors,
        crate::inbound::http::comments::submit_comment,
        crate::inbound::http::comments::submission_report,
        crate::inbound::http::comments::track_comment,
        crate::inbound::http::comments::list_my_comments,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        CommentView,
        ReportEntry,
        SubmissionReport,
        RegisterRequest,
        RegisterResponse,
        LoginRequest,
        SubmitCommentRequest,
        SubmitCommentResponse,
    )),
    tags(
        (name = "accounts", description = "Registration and sessions"),
        (name = "comments", description = "Comment submission, tracking and reports"),
        (name = "health", description = "Orchestration probes")
    )
)]
pub struct ApiDoc;
