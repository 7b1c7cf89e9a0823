use axum::{
    extract::{Form, State},
    response::IntoResponse,
};
use axum_extra::extract::CookieJar;
use codex_user::RegisterInput;
use serde::Deserialize;

use crate::{routes::AppState, template::Template};

#[derive(askama::Template)]
#[template(path = "register.html")]
pub struct RegisterTemplate {
    pub error: Option<String>,
    pub username: String,
    pub email: String,
}

pub async fn page(template: Template) -> impl IntoResponse {
    template.render(RegisterTemplate {
        error: None,
        username: String::new(),
        email: String::new(),
    })
}

#[derive(Deserialize)]
pub struct ActionInput {
    pub username: String,
    pub email: String,
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
        .register(RegisterInput {
            username: input.username.to_owned(),
            email: input.email.to_owned(),
            password: input.password,
        })
        .await;

    match result {
        Ok(id) => super::login::sign_in(&template, &app, jar, id),
        Err(err) => match err.user_message() {
            Some(error) => template.render(RegisterTemplate {
                error: Some(error),
                username: input.username,
                email: input.email,
            }),
            None => {
                tracing::error!("{err}");
                template.server_error()
            }
        },
    }
}
