//! HTTP layer for the to-do service.
//!
//! Handlers translate between JSON over HTTP and `ToDoRepository` calls;
//! every business rule lives in `todo-core`.

pub mod config;
pub mod error;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{header, HeaderName, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use tokio::net::TcpListener;
use todo_core::{ToDo, ToDoInput, ToDoRepository};
use tower_http::trace::TraceLayer;
use tracing::{error, info};

pub use config::Config;
pub use error::AppError;

/// Base path of the to-do resource.
pub const TODOS_PATH: &str = "/api/todos";

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
}

pub fn app(repo: ToDoRepository) -> Router {
    Router::new()
        .route("/health", get(health))
        .route(TODOS_PATH, post(add_todo))
        .route("/api/todos/list", get(list_todos))
        .route("/api/todos/list/{priority}", get(list_todos_by_priority))
        .route(
            "/api/todos/{id}",
            get(get_todo)
                .patch(update_todo)
                .put(replace_todo)
                .delete(remove_todo),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(repo)
}

/// Serve `app(repo)` on `listener` until Ctrl-C.
pub async fn run(listener: TcpListener, repo: ToDoRepository) -> Result<(), std::io::Error> {
    axum::serve(listener, app(repo))
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("shutdown signal received"),
        Err(err) => {
            error!(error = %err, "cannot listen for shutdown signal");
            std::future::pending::<()>().await;
        }
    }
}

fn location(todo: &ToDo) -> Result<[(HeaderName, String); 1], AppError> {
    let id = todo.id().ok_or(AppError::MissingId)?;
    Ok([(header::LOCATION, format!("{TODOS_PATH}/{id}"))])
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

async fn add_todo(
    State(repo): State<ToDoRepository>,
    payload: Result<Json<ToDoInput>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(input) = payload?;
    let created = repo.add(input).await?;
    info!(id = ?created.id(), "todo created");
    Ok((StatusCode::CREATED, location(&created)?))
}

async fn update_todo(
    State(repo): State<ToDoRepository>,
    Path(id): Path<i64>,
    payload: Result<Json<ToDoInput>, JsonRejection>,
) -> Result<StatusCode, AppError> {
    let Json(patch) = payload?;
    repo.update(id, patch).await?;
    info!(id, "todo updated");
    Ok(StatusCode::NO_CONTENT)
}

/// Replacing stores a new row, so the response points at the new id.
async fn replace_todo(
    State(repo): State<ToDoRepository>,
    Path(id): Path<i64>,
    payload: Result<Json<ToDoInput>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(input) = payload?;
    let replacement = repo.replace(id, input).await?;
    info!(old_id = id, new_id = ?replacement.id(), "todo replaced");
    Ok((StatusCode::NO_CONTENT, location(&replacement)?))
}

async fn remove_todo(
    State(repo): State<ToDoRepository>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    repo.remove(id).await?;
    info!(id, "todo removed");
    Ok(StatusCode::NO_CONTENT)
}

async fn get_todo(
    State(repo): State<ToDoRepository>,
    Path(id): Path<i64>,
) -> Result<Json<ToDo>, AppError> {
    Ok(Json(repo.get_by_id(id).await?))
}

async fn list_todos(State(repo): State<ToDoRepository>) -> Result<Json<Vec<ToDo>>, AppError> {
    Ok(Json(repo.list_all().await?))
}

async fn list_todos_by_priority(
    State(repo): State<ToDoRepository>,
    Path(priority): Path<i32>,
) -> Result<Json<Vec<ToDo>>, AppError> {
    Ok(Json(repo.list_by_priority(priority).await?))
}
