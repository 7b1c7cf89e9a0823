use axum::{
    extract::{Path, State},
    response::IntoResponse,
};
use codex_catalog::{FactionRow, HeroRow};

use crate::{routes::AppState, template::Template};

#[derive(askama::Template)]
#[template(path = "faction.html")]
pub struct FactionTemplate {
    pub faction: FactionRow,
    pub heroes: Vec<HeroRow>,
}

pub async fn page(
    template: Template,
    State(app): State<AppState>,
    Path(id): Path<i64>,
) -> impl IntoResponse {
    let faction = crate::try_page_response!(opt: app.catalog_query.find_faction(id), template);
    let heroes = crate::try_page_response!(
        anyhow: app.catalog_query.list_heroes_by_faction(faction.id),
        template
    );

    template.render(FactionTemplate { faction, heroes })
}
