use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use shared::CreateBookRequest;
use tracing::info;

use crate::domain::{BookError, BookService};

/// Application state shared across request handlers
#[derive(Clone)]
pub struct AppState {
    pub book_service: BookService,
}

impl AppState {
    /// Create new application state with the given BookService
    pub fn new(book_service: BookService) -> Self {
        Self { book_service }
    }
}

impl IntoResponse for BookError {
    fn into_response(self) -> Response {
        let status = match self {
            BookError::NotFound(_) => StatusCode::NOT_FOUND,
            BookError::Validation(_) => StatusCode::BAD_REQUEST,
        };
        (status, self.to_string()).into_response()
    }
}

/// Book API routes, nested under /api by the server bootstrap
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/books", get(list_books).post(create_book))
        .route(
            "/books/:id",
            get(get_book).put(update_book).delete(delete_book),
        )
}

/// Axum handler function for GET /api/books
pub async fn list_books(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/books");

    (StatusCode::OK, Json(state.book_service.list_books()))
}

/// Axum handler function for GET /api/books/:id
pub async fn get_book(State(state): State<AppState>, Path(id): Path<u64>) -> impl IntoResponse {
    info!("GET /api/books/{}", id);

    match state.book_service.get_book(id) {
        Ok(book) => (StatusCode::OK, Json(book)).into_response(),
        Err(err) => err.into_response(),
    }
}

/// Axum handler function for POST /api/books
pub async fn create_book(
    State(state): State<AppState>,
    Json(request): Json<CreateBookRequest>,
) -> impl IntoResponse {
    info!("POST /api/books - request: {:?}", request);

    match state.book_service.create_book(request) {
        Ok(book) => (StatusCode::OK, Json(book)).into_response(),
        Err(err) => {
            tracing::error!("Error creating book: {}", err);
            err.into_response()
        }
    }
}

/// Axum handler function for PUT /api/books/:id
pub async fn update_book(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Json(request): Json<CreateBookRequest>,
) -> impl IntoResponse {
    info!("PUT /api/books/{} - request: {:?}", id, request);

    match state.book_service.update_book(id, request) {
        Ok(book) => (StatusCode::OK, Json(book)).into_response(),
        Err(err) => {
            tracing::error!("Error updating book {}: {}", id, err);
            err.into_response()
        }
    }
}

/// Axum handler function for DELETE /api/books/:id
pub async fn delete_book(State(state): State<AppState>, Path(id): Path<u64>) -> impl IntoResponse {
    info!("DELETE /api/books/{}", id);

    match state.book_service.delete_book(id) {
        Ok(book) => (StatusCode::OK, Json(book)).into_response(),
        Err(err) => {
            tracing::error!("Error deleting book {}: {}", id, err);
            err.into_response()
        }
    }
}
