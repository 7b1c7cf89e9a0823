use axum::{extract::State, response::IntoResponse};
use codex_catalog::FactionRow;
use codex_user::UserRow;

use crate::{auth::AuthOptional, routes::AppState, template::Template};

#[derive(askama::Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub factions: Vec<FactionRow>,
    pub user: Option<UserRow>,
}

pub async fn page(
    template: Template,
    State(app): State<AppState>,
    AuthOptional(user): AuthOptional,
) -> impl IntoResponse {
    let factions = crate::try_page_response!(anyhow: app.catalog_query.list_factions(), template);

    template.render(IndexTemplate { factions, user })
}
