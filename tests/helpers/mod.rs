#![allow(dead_code)]

use axum::{
    Router,
    body::Body,
    http::{Request, Response, header},
};
use codex::{
    AppState,
    config::{AdminConfig, Config, DatabaseConfig, ObservabilityConfig, ServerConfig, SessionConfig},
};
use http_body_util::BodyExt;
use sqlx::SqlitePool;
use temp_dir::TempDir;
use tower::ServiceExt;

const BOUNDARY: &str = "codex-test-boundary";

pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub dir: TempDir,
}

pub async fn setup_test_app() -> anyhow::Result<TestApp> {
    let dir = TempDir::new()?;
    let database_url = format!("sqlite:{}", dir.child("db.sqlite3").to_str().unwrap());
    let static_dir = dir.child("static").to_str().unwrap().to_owned();

    let config = Config {
        server: ServerConfig {
            host: "127.0.0.1".to_owned(),
            port: 8000,
            static_dir,
        },
        database: DatabaseConfig {
            url: database_url.to_owned(),
            max_connections: 5,
        },
        admin: AdminConfig {
            password: "changeme".to_owned(),
        },
        session: SessionConfig {
            secret: "test_secret_key_minimum_32_characters_long".to_owned(),
            issuer: "codex".to_owned(),
            audience: "codex".to_owned(),
            expiration_days: 7,
        },
        observability: ObservabilityConfig::default(),
    };

    let pool = codex::db::create_pool(&database_url, config.database.max_connections).await?;
    codex_db::migrate(&pool).await?;

    let state = AppState::new(config, pool);
    state.images.init().await?;

    Ok(TestApp {
        router: codex::router(state.clone()),
        state,
        dir,
    })
}

impl TestApp {
    pub fn pool(&self) -> &SqlitePool {
        &self.state.pool
    }

    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.router.clone().oneshot(request).await.unwrap()
    }

    pub async fn get(&self, uri: &str, cookie: Option<&str>) -> Response<Body> {
        let mut builder = Request::builder().method("GET").uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }

        self.send(builder.body(Body::empty()).unwrap()).await
    }

    pub async fn post_form(
        &self,
        uri: &str,
        fields: &[(&str, &str)],
        cookie: Option<&str>,
    ) -> Response<Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }

        let body = serde_urlencoded::to_string(fields).unwrap();

        self.send(builder.body(Body::from(body)).unwrap()).await
    }

    pub async fn post_multipart(
        &self,
        uri: &str,
        fields: &[(&str, &str)],
        file: Option<(&str, &[u8])>,
        cookie: Option<&str>,
    ) -> Response<Body> {
        let mut body = Vec::new();
        for (name, value) in fields {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
                )
                .as_bytes(),
            );
        }
        if let Some((file_name, data)) = file {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
                )
                .as_bytes(),
            );
            body.extend_from_slice(data);
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

        let mut builder = Request::builder().method("POST").uri(uri).header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        );
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }

        self.send(builder.body(Body::from(body)).unwrap()).await
    }

    /// `Cookie` header value of a valid admin session.
    pub fn admin_cookie(&self) -> String {
        codex::auth::admin_cookie(&self.state.config)
            .unwrap()
            .stripped()
            .to_string()
    }

    /// `Cookie` header value of a session for `user_id`.
    pub fn user_cookie(&self, user_id: i64) -> String {
        codex::auth::user_cookie(&self.state.config.session, user_id)
            .unwrap()
            .stripped()
            .to_string()
    }

    pub async fn create_user(&self, name: &str) -> anyhow::Result<i64> {
        let id = self
            .state
            .user_command
            .register(codex_user::RegisterInput {
                username: name.to_owned(),
                email: format!("{name}@codex.localhost"),
                password: "my_password".to_owned(),
            })
            .await?;

        Ok(id)
    }

    pub async fn create_faction(&self, name: &str) -> anyhow::Result<i64> {
        let id = self
            .state
            .catalog_command
            .create_faction(
                codex_catalog::FactionInput {
                    name: name.to_owned(),
                },
                None,
            )
            .await?;

        Ok(id)
    }

    pub async fn create_hero(&self, name: &str, faction_id: Option<i64>) -> anyhow::Result<i64> {
        let id = self
            .state
            .catalog_command
            .create_hero(
                codex_catalog::HeroInput {
                    name: name.to_owned(),
                    description: None,
                    faction_id,
                },
                None,
            )
            .await?;

        Ok(id)
    }
}

pub async fn body_string(response: Response<Body>) -> String {
    let body = response.into_body().collect().await.unwrap().to_bytes();

    String::from_utf8(body.to_vec()).unwrap()
}

pub fn location(response: &Response<Body>) -> Option<&str> {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
}

/// Raw `Set-Cookie` header for `name`, if the response sets one.
pub fn set_cookie<'a>(response: &'a Response<Body>, name: &str) -> Option<&'a str> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find(|v| v.starts_with(&format!("{name}=")))
}

/// Value part of the `Set-Cookie` header for `name`.
pub fn cookie_value<'a>(response: &'a Response<Body>, name: &str) -> Option<&'a str> {
    set_cookie(response, name)?
        .split(';')
        .next()?
        .split_once('=')
        .map(|(_, value)| value)
}
