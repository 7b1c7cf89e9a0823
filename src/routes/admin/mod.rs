use std::collections::HashMap;

use axum::{
    extract::{Form, FromRequest, Multipart, Request, State},
    http::{StatusCode, header},
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::CookieJar;
use codex_catalog::{FactionRow, HeroListView};
use codex_suggestion::AdminView;
use serde::Deserialize;

use crate::{
    auth::{self, ADMIN_COOKIE},
    routes::AppState,
    template::Template,
    upload::{ImageKind, Upload},
};

pub mod faction;
pub mod hero;
pub mod suggestion;

#[derive(askama::Template)]
#[template(path = "admin_login.html")]
pub struct AdminLoginTemplate {
    pub error: Option<String>,
}

#[derive(askama::Template)]
#[template(path = "admin_dashboard.html")]
pub struct AdminDashboardTemplate {
    pub factions: Vec<FactionRow>,
    pub heroes: Vec<HeroListView>,
    pub suggestions: Vec<AdminView>,
}

/// Option of the faction picker on hero forms.
pub struct FactionOption {
    pub id: i64,
    pub name: String,
    pub selected: bool,
}

impl FactionOption {
    pub fn from_rows(factions: Vec<FactionRow>, selected: Option<i64>) -> Vec<Self> {
        factions
            .into_iter()
            .map(|f| FactionOption {
                selected: selected == Some(f.id),
                id: f.id,
                name: f.name,
            })
            .collect()
    }
}

pub async fn dashboard(
    template: Template,
    State(app): State<AppState>,
    jar: CookieJar,
) -> impl IntoResponse {
    if !auth::is_admin(&jar, &app.config) {
        return template.render(AdminLoginTemplate { error: None });
    }

    let factions = crate::try_page_response!(anyhow: app.catalog_query.list_factions(), template);
    let heroes = crate::try_page_response!(
        anyhow: app.catalog_query.list_heroes_with_faction(),
        template
    );
    let suggestions =
        crate::try_page_response!(anyhow: app.suggestion_query.list_admin(), template);

    template.render(AdminDashboardTemplate {
        factions,
        heroes,
        suggestions,
    })
}

pub async fn login_page(
    template: Template,
    State(app): State<AppState>,
    jar: CookieJar,
) -> impl IntoResponse {
    if auth::is_admin(&jar, &app.config) {
        return Redirect::to("/admin").into_response();
    }

    template.render(AdminLoginTemplate { error: None })
}

#[derive(Deserialize)]
pub struct LoginInput {
    pub password: String,
}

pub async fn login(
    template: Template,
    State(app): State<AppState>,
    jar: CookieJar,
    Form(input): Form<LoginInput>,
) -> impl IntoResponse {
    if input.password != app.config.admin.password {
        tracing::warn!("admin login rejected");

        return template.render(AdminLoginTemplate {
            error: Some("Invalid password".to_owned()),
        });
    }

    match auth::admin_cookie(&app.config) {
        Ok(cookie) => (jar.add(cookie), Redirect::to("/admin")).into_response(),
        Err(e) => unexpected(&template, e),
    }
}

pub async fn logout(jar: CookieJar) -> impl IntoResponse {
    (
        jar.remove(auth::removal_cookie(ADMIN_COOKIE)),
        Redirect::to("/admin"),
    )
}

/// Fields of an admin form with its optional `file` part.
///
/// Accepts `multipart/form-data` as well as url encoded bodies.
pub struct ImageForm {
    fields: HashMap<String, String>,
    pub file: Option<Upload>,
}

impl ImageForm {
    pub fn required(&self, name: &str) -> Result<&str, Response> {
        self.fields.get(name).map(String::as_str).ok_or_else(|| {
            (
                StatusCode::UNPROCESSABLE_ENTITY,
                format!("Missing field `{name}`"),
            )
                .into_response()
        })
    }

    pub fn optional(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }
}

impl<S: Send + Sync> FromRequest<S> for ImageForm {
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_multipart = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v.starts_with("multipart/form-data"));

        if !is_multipart {
            let Form(fields) = Form::<HashMap<String, String>>::from_request(req, state)
                .await
                .map_err(IntoResponse::into_response)?;

            return Ok(ImageForm { fields, file: None });
        }

        let mut multipart = Multipart::from_request(req, state)
            .await
            .map_err(IntoResponse::into_response)?;

        let mut fields = HashMap::new();
        let mut file = None;

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(IntoResponse::into_response)?
        {
            let Some(name) = field.name().map(str::to_owned) else {
                continue;
            };

            if name == "file" {
                let file_name = field.file_name().map(str::to_owned).unwrap_or_default();
                let data = field.bytes().await.map_err(IntoResponse::into_response)?;

                if !file_name.is_empty() {
                    file = Some(Upload { file_name, data });
                }

                continue;
            }

            let value = field.text().await.map_err(IntoResponse::into_response)?;
            fields.insert(name, value);
        }

        Ok(ImageForm { fields, file })
    }
}

async fn store_image(
    app: &AppState,
    template: &Template,
    kind: ImageKind,
    file: Option<&Upload>,
) -> Result<Option<String>, Response> {
    let Some(upload) = file else {
        return Ok(None);
    };

    match app.images.save(kind, upload).await {
        Ok(url) => Ok(Some(url)),
        Err(e) => Err(unexpected(template, format!("failed to store image: {e}"))),
    }
}

fn found<T>(template: &Template, result: anyhow::Result<Option<T>>) -> Result<T, Response> {
    match result {
        Ok(Some(value)) => Ok(value),
        Ok(None) => Err(template.not_found()),
        Err(e) => Err(unexpected(template, e)),
    }
}

fn unexpected(template: &Template, err: impl std::fmt::Display) -> Response {
    tracing::error!("{err}");

    template.server_error()
}
