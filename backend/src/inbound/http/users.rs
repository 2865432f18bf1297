//! Account handlers: registration, login, logout.
//!
//! ```text
//! POST /api/v1/register {"username":"asha","password":"s3cret","mobile":"+91 98765 43210"}
//! POST /api/v1/login    {"username":"asha","password":"s3cret"}
//! POST /api/v1/logout
//! ```

use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::domain::{
    Credentials, CredentialsValidationError, Error, Registration, UserId, UserValidationError,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Body of `POST /api/v1/register`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    /// Unique account name.
    #[schema(example = "asha")]
    pub username: String,
    /// Plain password; only its hash is stored.
    pub password: String,
    /// Optional contact number, stored as given.
    #[serde(default)]
    #[schema(example = "+91 98765 43210")]
    pub mobile: Option<String>,
}

/// Body of `POST /api/v1/login`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    /// Account name.
    #[schema(example = "asha")]
    pub username: String,
    /// Account password.
    pub password: String,
}

/// Response of `POST /api/v1/register`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterResponse {
    /// Identifier of the new account.
    #[schema(value_type = i32, example = 7)]
    pub user_id: UserId,
}

fn map_credentials_error(err: &CredentialsValidationError) -> Error {
    let (field, code) = match err {
        CredentialsValidationError::EmptyUsername => ("username", "empty_username"),
        CredentialsValidationError::EmptyPassword => ("password", "empty_password"),
        CredentialsValidationError::InvalidAccount(UserValidationError::MobileTooLong {
            ..
        }) => ("mobile", "mobile_too_long"),
        CredentialsValidationError::InvalidAccount(UserValidationError::UsernameTooLong {
            ..
        }) => ("username", "username_too_long"),
        CredentialsValidationError::InvalidAccount(_) => ("username", "invalid_username"),
    };
    Error::invalid_request(err.to_string()).with_details(json!({ "field": field, "code": code }))
}

/// Create an account.
#[utoipa::path(
    post,
    path = "/api/v1/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = RegisterResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 409, description = "Username taken", body = Error),
        (status = 503, description = "Storage unavailable", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["accounts"],
    operation_id = "register",
    security([])
)]
#[post("/register")]
pub async fn register(
    state: web::Data<HttpState>,
    payload: web::Json<RegisterRequest>,
) -> ApiResult<HttpResponse> {
    let RegisterRequest {
        username,
        password,
        mobile,
    } = payload.into_inner();
    let registration = Registration::try_from_parts(&username, &password, mobile.as_deref())
        .map_err(|err| map_credentials_error(&err))?;
    let user_id = state.accounts.register(&registration).await?;
    Ok(HttpResponse::Created().json(RegisterResponse { user_id }))
}

/// Authenticate and start a session.
#[utoipa::path(
    post,
    path = "/api/v1/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unknown user or wrong password", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["accounts"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<LoginRequest>,
) -> ApiResult<HttpResponse> {
    let LoginRequest { username, password } = payload.into_inner();
    let credentials = Credentials::try_from_parts(&username, &password)
        .map_err(|err| map_credentials_error(&err))?;
    let user_id = state.accounts.login(&credentials).await?;
    session.sign_in(user_id)?;
    Ok(HttpResponse::Ok().finish())
}

/// End the current session. Always succeeds.
#[utoipa::path(
    post,
    path = "/api/v1/logout",
    responses((status = 204, description = "Session cleared")),
    tags = ["accounts"],
    operation_id = "logout"
)]
#[post("/logout")]
pub async fn logout(session: SessionContext) -> HttpResponse {
    session.sign_out();
    HttpResponse::NoContent().finish()
}
