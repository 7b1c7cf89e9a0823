use axum::{
    extract::{Form, Path, State},
    response::{IntoResponse, Redirect, Response},
};
use codex_catalog::{HeroInput, HeroRow, parse_faction_id};
use serde::Deserialize;
use validator::Validate;

use super::{FactionOption, ImageForm, found, store_image, unexpected};
use crate::{
    auth::{AuthAdmin, AuthAdminAction},
    routes::AppState,
    template::Template,
    upload::ImageKind,
};

#[derive(askama::Template)]
#[template(path = "admin_add_hero.html")]
pub struct AddHeroTemplate {
    pub factions: Vec<FactionOption>,
}

#[derive(askama::Template)]
#[template(path = "admin_edit_hero.html")]
pub struct EditHeroTemplate {
    pub hero: HeroRow,
    pub factions: Vec<FactionOption>,
}

fn hero_input(template: &Template, form: &ImageForm) -> Result<HeroInput, Response> {
    let input = HeroInput {
        name: form.required("name")?.to_owned(),
        description: form.optional("description").map(str::to_owned),
        faction_id: parse_faction_id(form.optional("faction_id")),
    };
    input.validate().map_err(|e| template.error(e.into()))?;

    Ok(input)
}

pub async fn add_page(
    template: Template,
    State(app): State<AppState>,
    _: AuthAdmin,
) -> impl IntoResponse {
    let factions = crate::try_page_response!(anyhow: app.catalog_query.list_factions(), template);

    template.render(AddHeroTemplate {
        factions: FactionOption::from_rows(factions, None),
    })
}

pub async fn add(
    template: Template,
    State(app): State<AppState>,
    _: AuthAdminAction,
    form: ImageForm,
) -> Result<Redirect, Response> {
    let input = hero_input(&template, &form)?;
    let image = store_image(&app, &template, ImageKind::Hero, form.file.as_ref()).await?;

    if let Err(err) = app.catalog_command.create_hero(input, image.clone()).await {
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
    let hero = crate::try_page_response!(opt: app.catalog_query.find_hero(id), template);
    let factions = crate::try_page_response!(anyhow: app.catalog_query.list_factions(), template);

    template.render(EditHeroTemplate {
        factions: FactionOption::from_rows(factions, hero.faction_id),
        hero,
    })
}

pub async fn edit(
    template: Template,
    State(app): State<AppState>,
    _: AuthAdminAction,
    Path(id): Path<i64>,
    form: ImageForm,
) -> Result<Redirect, Response> {
    let hero = found(&template, app.catalog_query.find_hero(id).await)?;
    let input = hero_input(&template, &form)?;

    if let Some(faction_id) = input.faction_id {
        found(&template, app.catalog_query.find_faction(faction_id).await)?;
    }

    if form.file.is_some() {
        app.images.remove(hero.image.as_deref()).await;
    }

    let image = store_image(&app, &template, ImageKind::Hero, form.file.as_ref()).await?;

    app.catalog_command
        .update_hero(hero.id, input, image)
        .await
        .map_err(|e| template.error(e))?;

    Ok(Redirect::to("/admin"))
}

#[derive(Deserialize)]
pub struct DeleteInput {
    pub hero_id: i64,
}

pub async fn delete(
    template: Template,
    State(app): State<AppState>,
    _: AuthAdminAction,
    Form(input): Form<DeleteInput>,
) -> Result<Redirect, Response> {
    let hero = found(&template, app.catalog_query.find_hero(input.hero_id).await)?;

    app.images.remove(hero.image.as_deref()).await;

    app.catalog_command
        .delete_hero(hero.id)
        .await
        .map_err(|e| unexpected(&template, e))?;

    Ok(Redirect::to("/admin"))
}
