use axum::{
    extract::{Form, Path, State},
    response::{IntoResponse, Redirect, Response},
};
use codex_catalog::{FactionInput, FactionRow};
use serde::Deserialize;
use validator::Validate;

use super::{ImageForm, found, store_image, unexpected};
use crate::{
    auth::{AuthAdmin, AuthAdminAction},
    routes::AppState,
    template::Template,
    upload::ImageKind,
};

#[derive(askama::Template)]
#[template(path = "admin_add_faction.html")]
pub struct AddFactionTemplate;

#[derive(askama::Template)]
#[template(path = "admin_edit_faction.html")]
pub struct EditFactionTemplate {
    pub faction: FactionRow,
}

pub async fn add_page(template: Template, _: AuthAdmin) -> impl IntoResponse {
    template.render(AddFactionTemplate)
}

pub async fn add(
    template: Template,
    State(app): State<AppState>,
    _: AuthAdminAction,
    form: ImageForm,
) -> Result<Redirect, Response> {
    let input = FactionInput {
        name: form.required("name")?.to_owned(),
    };
    input.validate().map_err(|e| template.error(e.into()))?;

    let image = store_image(&app, &template, ImageKind::Faction, form.file.as_ref()).await?;

    if let Err(err) = app.catalog_command.create_faction(input, image.clone()).await {
        app.images.remove(image.as_deref()).await;

        return Err(template.error(err));
    }

    Ok(Redirect::to("/admin"))
}

pub async fn edit_page(
    template: Template,
    State(app): State<AppState>,
    _: AuthAdmin,
    Path(id): Path<i64>,
) -> impl IntoResponse {
    let faction = crate::try_page_response!(opt: app.catalog_query.find_faction(id), template);

    template.render(EditFactionTemplate { faction })
}

pub async fn edit(
    template: Template,
    State(app): State<AppState>,
    _: AuthAdminAction,
    Path(id): Path<i64>,
    form: ImageForm,
) -> Result<Redirect, Response> {
    let faction = found(&template, app.catalog_query.find_faction(id).await)?;

    let input = FactionInput {
        name: form.required("name")?.to_owned(),
    };
    input.validate().map_err(|e| template.error(e.into()))?;

    if form.file.is_some() {
        app.images.remove(faction.image.as_deref()).await;
    }

    let image = store_image(&app, &template, ImageKind::Faction, form.file.as_ref()).await?;

    app.catalog_command
        .update_faction(faction.id, input, image)
        .await
        .map_err(|e| template.error(e))?;

    Ok(Redirect::to("/admin"))
}

#[derive(Deserialize)]
pub struct DeleteInput {
    pub faction_id: i64,
}

pub async fn delete(
    template: Template,
    State(app): State<AppState>,
    _: AuthAdminAction,
    Form(input): Form<DeleteInput>,
) -> Result<Redirect, Response> {
    let faction = found(&template, app.catalog_query.find_faction(input.faction_id).await)?;

    let heroes = app
        .catalog_query
        .list_heroes_by_faction(faction.id)
        .await
        .map_err(|e| unexpected(&template, e))?;

    for hero in &heroes {
        app.images.remove(hero.image.as_deref()).await;
    }
    app.images.remove(faction.image.as_deref()).await;

    app.catalog_command
        .delete_faction(faction.id)
        .await
        .map_err(|e| template.error(e))?;

    Ok(Redirect::to("/admin"))
}
