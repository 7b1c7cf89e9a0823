use axum::{
    extract::{Form, Path, State},
    response::{Redirect, Response},
};
use serde::Deserialize;

use crate::{auth::AuthAdminAction, routes::AppState, template::Template};

#[derive(Deserialize)]
pub struct StatusInput {
    pub new_status: String,
}

pub async fn status(
    template: Template,
    State(app): State<AppState>,
    _: AuthAdminAction,
    Path(id): Path<i64>,
    Form(input): Form<StatusInput>,
) -> Result<Redirect, Response> {
    app.suggestion_command
        .update_status(id, &input.new_status)
        .await
        .map_err(|e| template.error(e))?;

    Ok(Redirect::to("/admin"))
}

pub async fn delete(
    template: Template,
    State(app): State<AppState>,
    _: AuthAdminAction,
    Path(id): Path<i64>,
) -> Result<Redirect, Response> {
    app.suggestion_command
        .delete(id)
        .await
        .map_err(|e| template.error(e))?;

    Ok(Redirect::to("/admin"))
}
