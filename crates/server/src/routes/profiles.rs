use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use axum_extra::extract::WithRejection;

use models::profiles::user_profile::ProfilePatch;
use service::accounts::domain::{LoginInput, RegisterInput, UserWithProfile};

use crate::errors::{ApiError, ValidatedJson};
use crate::state::AppState;

const USER_NOT_FOUND: &str = "User not found";

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/users/:id", get(get_user))
        .route("/users/:id/profile", put(update_profile))
}

#[utoipa::path(
    post, path = "/register", tag = "accounts",
    request_body = crate::openapi::RegisterRequest,
    responses(
        (status = 201, description = "Registered", body = crate::openapi::AccountResponse),
        (status = 400, description = "Email already registered"),
        (status = 422, description = "Validation Error")
    )
)]
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<RegisterInput>,
) -> Result<(StatusCode, Json<UserWithProfile>), ApiError> {
    let user = state.accounts.register(input).await?;
    Ok((StatusCode::CREATED, Json(user.into())))
}

#[utoipa::path(
    post, path = "/login", tag = "accounts",
    request_body = crate::openapi::LoginRequest,
    responses(
        (status = 200, description = "Logged In", body = crate::openapi::AccountResponse),
        (status = 401, description = "Invalid email or password")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<LoginInput>,
) -> Result<Json<UserWithProfile>, ApiError> {
    let user = state.accounts.login(input).await?;
    let full = state.accounts.get_user(user.id).await?.unwrap_or_else(|| user.into());
    Ok(Json(full))
}

#[utoipa::path(
    get, path = "/users/{id}", tag = "accounts",
    params(("id" = i32, Path, description = "User id")),
    responses(
        (status = 200, description = "Found", body = crate::openapi::AccountResponse),
        (status = 404, description = "Not Found")
    )
)]
pub async fn get_user(
    State(state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<i32>, ApiError>,
) -> Result<Json<UserWithProfile>, ApiError> {
    state
        .accounts
        .get_user(id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found(USER_NOT_FOUND))
}

#[utoipa::path(
    put, path = "/users/{id}/profile", tag = "accounts",
    params(("id" = i32, Path, description = "User id")),
    request_body = crate::openapi::ProfileDoc,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::AccountResponse),
        (status = 404, description = "Not Found")
    )
)]
pub async fn update_profile(
    State(state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<i32>, ApiError>,
    ValidatedJson(patch): ValidatedJson<ProfilePatch>,
) -> Result<Json<UserWithProfile>, ApiError> {
    let updated = state.accounts.update_profile(id, patch).await?;
    Ok(Json(updated))
}
