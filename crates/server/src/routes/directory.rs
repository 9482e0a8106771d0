use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use axum_extra::extract::WithRejection;
use tracing::info;

use common::pagination::Pagination;
use common::types::Detail;
use service::directory::domain::{DetailsPatch, NewUser, UserDetails, UserPatch, UserWithDetails};
use service::directory::{details_service, user_service};

use crate::errors::{ApiError, ValidatedJson};
use crate::state::AppState;

const USER_NOT_FOUND: &str = "User not found";
const DETAILS_NOT_FOUND: &str = "User details not found";

type UserId = WithRejection<Path<i32>, ApiError>;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/users/", get(list_users).post(create_user))
        .route("/users", get(list_users).post(create_user))
        .route("/users/:id", get(get_user).put(update_user).delete(delete_user))
        .route(
            "/users/:id/details/",
            get(get_details).post(create_details).put(update_details).delete(delete_details),
        )
        .route(
            "/users/:id/details",
            get(get_details).post(create_details).put(update_details).delete(delete_details),
        )
}

#[utoipa::path(
    post, path = "/users/", tag = "users",
    request_body = crate::openapi::NewUserDoc,
    responses(
        (status = 201, description = "Created", body = crate::openapi::DirectoryUserDoc),
        (status = 400, description = "Email or username taken"),
        (status = 422, description = "Validation Error")
    )
)]
pub async fn create_user(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<NewUser>,
) -> Result<(StatusCode, Json<UserWithDetails>), ApiError> {
    let user = user_service::create_user(&state.db, input).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

#[utoipa::path(
    get, path = "/users/", tag = "users",
    params(
        ("skip" = Option<u64>, Query, description = "Rows to skip"),
        ("limit" = Option<u64>, Query, description = "Max rows, 1..=100")
    ),
    responses((status = 200, description = "List OK", body = [crate::openapi::DirectoryUserDoc]))
)]
pub async fn list_users(
    State(state): State<AppState>,
    WithRejection(Query(page), _): WithRejection<Query<Pagination>, ApiError>,
) -> Result<Json<Vec<UserWithDetails>>, ApiError> {
    let users = user_service::list_users(&state.db, page).await?;
    info!(count = users.len(), "list users");
    Ok(Json(users))
}

#[utoipa::path(
    get, path = "/users/{id}", tag = "users",
    params(("id" = i32, Path, description = "User id")),
    responses(
        (status = 200, description = "Found", body = crate::openapi::DirectoryUserDoc),
        (status = 404, description = "Not Found")
    )
)]
pub async fn get_user(
    State(state): State<AppState>,
    WithRejection(Path(id), _): UserId,
) -> Result<Json<UserWithDetails>, ApiError> {
    user_service::get_user(&state.db, id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found(USER_NOT_FOUND))
}

#[utoipa::path(
    put, path = "/users/{id}", tag = "users",
    params(("id" = i32, Path, description = "User id")),
    request_body = crate::openapi::UserPatchDoc,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::DirectoryUserDoc),
        (status = 400, description = "Email or username taken"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn update_user(
    State(state): State<AppState>,
    WithRejection(Path(id), _): UserId,
    ValidatedJson(patch): ValidatedJson<UserPatch>,
) -> Result<Json<UserWithDetails>, ApiError> {
    Ok(Json(user_service::update_user(&state.db, id, patch).await?))
}

#[utoipa::path(
    delete, path = "/users/{id}", tag = "users",
    params(("id" = i32, Path, description = "User id")),
    responses(
        (status = 200, description = "Deleted", body = crate::openapi::DetailDoc),
        (status = 404, description = "Not Found")
    )
)]
pub async fn delete_user(
    State(state): State<AppState>,
    WithRejection(Path(id), _): UserId,
) -> Result<Json<Detail>, ApiError> {
    if !user_service::delete_user(&state.db, id).await? {
        return Err(ApiError::not_found(USER_NOT_FOUND));
    }
    Ok(Json(Detail::new(format!("User {id} deleted"))))
}

#[utoipa::path(
    post, path = "/users/{id}/details/", tag = "details",
    params(("id" = i32, Path, description = "User id")),
    request_body = crate::openapi::DetailsDoc,
    responses(
        (status = 201, description = "Created", body = crate::openapi::UserDetailsDoc),
        (status = 400, description = "Details already exist"),
        (status = 404, description = "User Not Found")
    )
)]
pub async fn create_details(
    State(state): State<AppState>,
    WithRejection(Path(id), _): UserId,
    ValidatedJson(patch): ValidatedJson<DetailsPatch>,
) -> Result<(StatusCode, Json<UserDetails>), ApiError> {
    let details = details_service::create_details(&state.db, id, patch).await?;
    Ok((StatusCode::CREATED, Json(details)))
}

#[utoipa::path(
    get, path = "/users/{id}/details/", tag = "details",
    params(("id" = i32, Path, description = "User id")),
    responses(
        (status = 200, description = "Found", body = crate::openapi::UserDetailsDoc),
        (status = 404, description = "Not Found")
    )
)]
pub async fn get_details(
    State(state): State<AppState>,
    WithRejection(Path(id), _): UserId,
) -> Result<Json<UserDetails>, ApiError> {
    details_service::get_details(&state.db, id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found(DETAILS_NOT_FOUND))
}

#[utoipa::path(
    put, path = "/users/{id}/details/", tag = "details",
    params(("id" = i32, Path, description = "User id")),
    request_body = crate::openapi::DetailsDoc,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::UserDetailsDoc),
        (status = 404, description = "Not Found")
    )
)]
pub async fn update_details(
    State(state): State<AppState>,
    WithRejection(Path(id), _): UserId,
    ValidatedJson(patch): ValidatedJson<DetailsPatch>,
) -> Result<Json<UserDetails>, ApiError> {
    Ok(Json(details_service::update_details(&state.db, id, patch).await?))
}

#[utoipa::path(
    delete, path = "/users/{id}/details/", tag = "details",
    params(("id" = i32, Path, description = "User id")),
    responses(
        (status = 200, description = "Deleted", body = crate::openapi::DetailDoc),
        (status = 404, description = "Not Found")
    )
)]
pub async fn delete_details(
    State(state): State<AppState>,
    WithRejection(Path(id), _): UserId,
) -> Result<Json<Detail>, ApiError> {
    if !details_service::delete_details(&state.db, id).await? {
        return Err(ApiError::not_found(DETAILS_NOT_FOUND));
    }
    Ok(Json(Detail::new("User details deleted")))
}
