use axum::{
    Router,
    extract::DefaultBodyLimit,
    response::IntoResponse,
    routing::{get, post},
};
use sqlx::SqlitePool;
use tower_http::services::ServeDir;

use crate::{config::Config, template::Template, upload::ImageStore};

mod admin;
mod faction;
mod health;
mod hero;
mod index;
mod login;
mod register;
mod suggestions;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub pool: SqlitePool,
    pub images: ImageStore,
    pub catalog_command: codex_catalog::Command,
    pub catalog_query: codex_catalog::Query,
    pub user_command: codex_user::Command,
    pub user_query: codex_user::Query,
    pub suggestion_command: codex_suggestion::Command,
    pub suggestion_query: codex_suggestion::Query,
}

impl AppState {
    pub fn new(config: Config, pool: SqlitePool) -> Self {
        Self {
            images: ImageStore::new(&config.server.static_dir),
            catalog_command: codex_catalog::Command(pool.clone()),
            catalog_query: codex_catalog::Query(pool.clone()),
            user_command: codex_user::Command(pool.clone()),
            user_query: codex_user::Query(pool.clone()),
            suggestion_command: codex_suggestion::Command(pool.clone()),
            suggestion_query: codex_suggestion::Query(pool.clone()),
            config,
            pool,
        }
    }
}

pub async fn fallback(template: Template) -> impl IntoResponse {
    template.not_found()
}

/// Admin forms carrying an image, exempt from the default request body limit.
fn upload_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/admin/add-faction",
            get(admin::faction::add_page).post(admin::faction::add),
        )
        .route(
            "/admin/edit-faction/{id}",
            get(admin::faction::edit_page).post(admin::faction::edit),
        )
        .route(
            "/admin/add-hero",
            get(admin::hero::add_page).post(admin::hero::add),
        )
        .route(
            "/admin/edit-hero/{id}",
            get(admin::hero::edit_page).post(admin::hero::edit),
        )
        .layer(DefaultBodyLimit::disable())
}

pub fn router(app_state: AppState) -> Router {
    let static_dir = ServeDir::new(&app_state.config.server.static_dir);

    Router::new()
        .route("/health", get(health::health))
        .route("/ready", get(health::ready))
        .with_state(app_state.pool.clone())
        .route("/", get(index::page))
        .route("/faction/{id}", get(faction::page))
        .route("/hero/{id}", get(hero::page))
        .route("/register", get(register::page).post(register::action))
        .route("/login", get(login::page).post(login::action))
        .route("/logout", get(login::logout).post(login::logout))
        .route(
            "/suggestions",
            get(suggestions::page).post(suggestions::action),
        )
        .route("/admin", get(admin::dashboard))
        .route("/admin/login", get(admin::login_page).post(admin::login))
        .route("/admin/logout", get(admin::logout).post(admin::logout))
        .route("/admin/delete-faction", post(admin::faction::delete))
        .route("/admin/delete-hero", post(admin::hero::delete))
        .route(
            "/admin/suggestion/{id}/status",
            post(admin::suggestion::status),
        )
        .route(
            "/admin/suggestion/{id}/delete",
            post(admin::suggestion::delete),
        )
        .merge(upload_routes())
        .fallback(fallback)
        .nest_service("/static", static_dir)
        .with_state(app_state)
}
