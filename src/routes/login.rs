use axum::{
    extract::{Form, State},
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::CookieJar;
use codex_user::LoginInput;
use serde::Deserialize;

use crate::{
    auth::{self, USER_COOKIE},
    routes::AppState,
    template::Template,
};

#[derive(askama::Template)]
#[template(path = "login.html")]
pub struct LoginTemplate {
    pub error: Option<String>,
    pub username: String,
}

pub async fn page(template: Template) -> impl IntoResponse {
    template.render(LoginTemplate {
        error: None,
        username: String::new(),
    })
}

#[derive(Deserialize)]
pub struct ActionInput {
    pub username: String,
    pub password: String,
}

pub async fn action(
    template: Template,
    State(app): State<AppState>,
    jar: CookieJar,
    Form(input): Form<ActionInput>,
) -> impl IntoResponse {
    let result = app
        .user_command
        .login(LoginInput {
            username: input.username.to_owned(),
            password: input.password,
        })
        .await;

    match result {
        Ok(id) => sign_in(&template, &app, jar, id),
        Err(err) => match err.user_message() {
            Some(error) => template.render(LoginTemplate {
                error: Some(error),
                username: input.username,
            }),
            None => {
                tracing::error!("{err}");
                template.server_error()
            }
        },
    }
}

pub async fn logout(jar: CookieJar) -> impl IntoResponse {
    (jar.remove(auth::removal_cookie(USER_COOKIE)), Redirect::to("/"))
}

pub(super) fn sign_in(template: &Template, app: &AppState, jar: CookieJar, id: i64) -> Response {
    match auth::user_cookie(&app.config.session, id) {
        Ok(cookie) => (jar.add(cookie), Redirect::to("/")).into_response(),
        Err(e) => {
            tracing::error!("{e}");
            template.server_error()
        }
    }
}
