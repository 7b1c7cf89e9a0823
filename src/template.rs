use axum::{
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{Html, IntoResponse, Response},
};
use std::convert::Infallible;

pub const SERVER_ERROR_MESSAGE: &str = "Something went wrong, please retry later";

pub struct Template;

impl Template {
    pub fn render<T: askama::Template>(&self, template: T) -> Response {
        self.render_status(StatusCode::OK, template)
    }

    pub fn render_status<T: askama::Template>(&self, status: StatusCode, template: T) -> Response {
        match template.render() {
            Ok(html) => (status, Html(html)).into_response(),
            Err(err) => {
                tracing::error!("Failed to render template. Error: {err}");

                (StatusCode::INTERNAL_SERVER_ERROR, SERVER_ERROR_MESSAGE).into_response()
            }
        }
    }

    pub fn not_found(&self) -> Response {
        self.render_status(StatusCode::NOT_FOUND, NotFoundTemplate)
    }

    pub fn server_error(&self) -> Response {
        self.render_status(StatusCode::INTERNAL_SERVER_ERROR, ServerTemplate)
    }

    /// Response for a failed admin mutation.
    pub fn error(&self, err: codex_shared::Error) -> Response {
        match err {
            codex_shared::Error::NotFound(_) => self.not_found(),
            codex_shared::Error::Validate(_) | codex_shared::Error::User(_) => {
                let message = err.user_message().unwrap_or_else(|| err.to_string());

                (StatusCode::UNPROCESSABLE_ENTITY, message).into_response()
            }
            err => {
                tracing::error!("{err}");

                self.server_error()
            }
        }
    }
}

impl<S: Send + Sync> FromRequestParts<S> for Template {
    type Rejection = Infallible;

    async fn from_request_parts(_parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Template)
    }
}

#[derive(askama::Template)]
#[template(path = "404.html")]
pub struct NotFoundTemplate;

#[derive(askama::Template)]
#[template(path = "500.html")]
pub struct ServerTemplate;

#[macro_export]
macro_rules! try_page_response {
    // Result<Option<T>, anyhow::Error>
    (opt: $result:expr, $template:expr) => {
        match $result.await {
            Ok(Some(r)) => r,
            Ok(_) => return $template.not_found(),
            Err(err) => {
                tracing::error!("{err}");

                return $template.server_error();
            }
        }
    };

    // Result<T, anyhow::Error>
    (anyhow: $result:expr, $template:expr) => {
        match $result.await {
            Ok(r) => r,
            Err(err) => {
                tracing::error!("{err}");

                return $template.server_error();
            }
        }
    };
}
