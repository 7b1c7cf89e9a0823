use axum::{
    extract::{Form, Query, State},
    response::{IntoResponse, Redirect},
};
use codex_suggestion::SubmitInput;
use serde::Deserialize;

use crate::{auth::AuthUser, routes::AppState, template::Template};

#[derive(askama::Template)]
#[template(path = "suggestions.html")]
pub struct SuggestionsTemplate {
    pub username: String,
    pub success: bool,
    pub error: Option<String>,
    pub title: String,
    pub content: String,
}

#[derive(Deserialize)]
pub struct PageQuery {
    pub success: Option<String>,
}

pub async fn page(
    template: Template,
    AuthUser(user): AuthUser,
    Query(query): Query<PageQuery>,
) -> impl IntoResponse {
    template.render(SuggestionsTemplate {
        username: user.username,
        success: query.success.as_deref() == Some("1"),
        error: None,
        title: String::new(),
        content: String::new(),
    })
}

#[derive(Deserialize)]
pub struct ActionInput {
    pub title: String,
    pub content: String,
}

pub async fn action(
    template: Template,
    State(app): State<AppState>,
    AuthUser(user): AuthUser,
    Form(input): Form<ActionInput>,
) -> impl IntoResponse {
    let result = app
        .suggestion_command
        .submit(SubmitInput {
            user_id: user.id,
            title: input.title.to_owned(),
            content: input.content.to_owned(),
        })
        .await;

    match result {
        Ok(_) => Redirect::to("/suggestions?success=1").into_response(),
        Err(err) => match err.user_message() {
            Some(error) => template.render(SuggestionsTemplate {
                username: user.username,
                success: false,
                error: Some(error),
                title: input.title,
                content: input.content,
            }),
            None => {
                tracing::error!("{err}");
                template.server_error()
            }
        },
    }
}
