// HTTP handlers for authentication endpoints

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};

use crate::auth::{
    error::AuthError,
    models::{LoginRequest, RegisterRequest, RegisterResponse, TokenResponse},
};
use crate::AppState;

/// Register a new user
/// POST /register
#[utoipa::path(
    post,
    path = "/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered", body = RegisterResponse),
        (status = 400, description = "Missing or malformed fields, or a body that is not JSON", body = String, example = json!({"error": "email and password are required"})),
        (status = 409, description = "Email already registered", body = String, example = json!({"error": "Email already exists"})),
        (status = 500, description = "Internal server error", body = String, example = json!({"error": "Database error"}))
    ),
    tag = "auth"
)]
pub async fn register_handler(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<RegisterResponse>), AuthError> {
    let Json(request) = payload?;
    let credentials = request.into_credentials()?;
    state.auth.register(&credentials).await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "User registered successfully".to_string(),
        }),
    ))
}

/// Login a user
/// POST /login
#[utoipa::path(
    post,
    path = "/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Signed token valid for one hour", body = TokenResponse),
        (status = 400, description = "Missing fields, or a body that is not JSON", body = String, example = json!({"error": "email and password are required"})),
        (status = 401, description = "Invalid credentials", body = String, example = json!({"error": "Invalid email or password"})),
        (status = 500, description = "Internal server error", body = String, example = json!({"error": "Authentication error"}))
    ),
    tag = "auth"
)]
pub async fn login_handler(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<TokenResponse>, AuthError> {
    let Json(request) = payload?;
    let credentials = request.into_credentials()?;
    let token = state.auth.login(&credentials).await?;

    Ok(Json(TokenResponse { token }))
}
