use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use axum_extra::extract::WithRejection;
use tracing::info;

use common::pagination::Pagination;
use models::library::book::NewBook;
use service::book_service::{self, Book};

use crate::errors::{ApiError, ValidatedJson};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/books/", get(list_books).post(create_book))
        .route("/books", get(list_books).post(create_book))
        .route("/books/:id", get(get_book))
}

#[utoipa::path(
    post, path = "/books/", tag = "books",
    request_body = crate::openapi::NewBookDoc,
    responses(
        (status = 201, description = "Created", body = crate::openapi::BookDoc),
        (status = 400, description = "Book id already exists"),
        (status = 422, description = "Validation Error")
    )
)]
pub async fn create_book(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<NewBook>,
) -> Result<(StatusCode, Json<Book>), ApiError> {
    let book = book_service::create_book(&state.db, input).await?;
    Ok((StatusCode::CREATED, Json(book)))
}

#[utoipa::path(
    get, path = "/books/", tag = "books",
    params(
        ("skip" = Option<u64>, Query, description = "Rows to skip"),
        ("limit" = Option<u64>, Query, description = "Max rows, 1..=100")
    ),
    responses((status = 200, description = "List OK", body = [crate::openapi::BookDoc]))
)]
pub async fn list_books(
    State(state): State<AppState>,
    WithRejection(Query(page), _): WithRejection<Query<Pagination>, ApiError>,
) -> Result<Json<Vec<Book>>, ApiError> {
    let books = book_service::list_books(&state.db, page).await?;
    info!(count = books.len(), "list books");
    Ok(Json(books))
}

#[utoipa::path(
    get, path = "/books/{id}", tag = "books",
    params(("id" = i32, Path, description = "Book id")),
    responses(
        (status = 200, description = "Found", body = crate::openapi::BookDoc),
        (status = 404, description = "Not Found")
    )
)]
pub async fn get_book(
    State(state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<i32>, ApiError>,
) -> Result<Json<Book>, ApiError> {
    book_service::get_book(&state.db, id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found(format!("Book with id-{id}, not found")))
}
