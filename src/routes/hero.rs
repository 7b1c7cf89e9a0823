use axum::{
    extract::{Path, State},
    response::IntoResponse,
};
use codex_catalog::{FactionRow, HeroRow};

use crate::{routes::AppState, template::Template};

#[derive(askama::Template)]
#[template(path = "hero.html")]
pub struct HeroTemplate {
    pub hero: HeroRow,
    pub faction: Option<FactionRow>,
}

pub async fn page(
    template: Template,
    State(app): State<AppState>,
    Path(id): Path<i64>,
) -> impl IntoResponse {
    let hero = crate::try_page_response!(opt: app.catalog_query.find_hero(id), template);

    let faction = match hero.faction_id {
        Some(faction_id) => crate::try_page_response!(
            anyhow: app.catalog_query.find_faction(faction_id),
            template
        ),
        None => None,
    };

    template.render(HeroTemplate { hero, faction })
}
