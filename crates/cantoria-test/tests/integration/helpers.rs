#![allow(clippy::expect_used, dead_code)]
//! Test helpers for integration tests.
//!
//! Every test takes the shared database lock, truncates all tables and seeds
//! two accounts: the configured bootstrap admin and one musician login.

use diesel_async::RunQueryDsl;
use salvo::http::header::AUTHORIZATION;
use salvo::http::{Method, StatusCode};
use salvo::prelude::*;
use salvo::test::{RequestBuilder, ResponseExt};
use serde_json::Value;
use tokio::sync::{Mutex, MutexGuard, OnceCell};

use cantoria_test::cantoria_app::app::build_router;
use cantoria_test::cantoria_core::config::{
    AuthConfig, BootstrapAdminConfig, DatabaseConfig, LoggingConfig, SearchConfig, ServerConfig,
    Settings,
};
use cantoria_test::cantoria_db::db::connection::create_pool;
use cantoria_test::cantoria_db::db::enums::UserRole;
use cantoria_test::cantoria_db::db::migrate::run_migrations;
use cantoria_test::cantoria_db::db::query::user::create_user;
use cantoria_test::cantoria_db::model::user::NewAuthUser;
use cantoria_test::cantoria_service::auth::authenticate::bootstrap_admin;
use cantoria_test::cantoria_service::auth::password::hash_password;
use cantoria_test::{TEST_DATABASE_URL_VAR, test_database_url};

pub const ADMIN_EMAIL: &str = "admin@paroquia.test";
pub const ADMIN_PASSWORD: &str = "admin-secret";
pub const MUSICO_EMAIL: &str = "ana@paroquia.test";
pub const MUSICO_PASSWORD: &str = "ana-secret";

const TABLES: &str = "auth_token, auth_user, musician_note, musician_suggestion, \
    availability_block, mass_assignment, mass_song, mass, musician, library_song";

/// Tests share one database, so they run one at a time.
static DB_LOCK: Mutex<()> = Mutex::const_new(());
static MIGRATED: OnceCell<()> = OnceCell::const_new();

fn test_settings(database_url: &str) -> Settings {
    Settings {
        database: DatabaseConfig {
            url: database_url.to_string(),
            max_connections: 2,
        },
        auth: AuthConfig {
            token_ttl_hours: 1,
            bootstrap_admin: Some(BootstrapAdminConfig {
                email: ADMIN_EMAIL.to_string(),
                name: "Coordenação".to_string(),
                password: ADMIN_PASSWORD.to_string(),
            }),
        },
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 5800,
        },
        logging: LoggingConfig {
            level: "debug".to_string(),
        },
        search: SearchConfig {
            youtube_api_key: None,
            api_base_url: "http://127.0.0.1:9".to_string(),
            converter_base_url: "https://www.y2mate.com/youtube/".to_string(),
            max_results: 5,
        },
    }
}

/// A clean database and a service wired to it.
pub struct TestDb {
    _guard: MutexGuard<'static, ()>,
    pub service: Service,
}

impl TestDb {
    /// ## Summary
    /// Prepares a clean database, or returns `None` when no test database is
    /// configured.
    ///
    /// ## Panics
    /// Panics if the database cannot be migrated, cleared or seeded.
    pub async fn new() -> Option<Self> {
        let Some(url) = test_database_url() else {
            eprintln!("[TestDb] {TEST_DATABASE_URL_VAR} not set, skipping");
            return None;
        };

        let guard = DB_LOCK.lock().await;

        MIGRATED
            .get_or_try_init(|| async { run_migrations(&url).await.map(|_applied| ()) })
            .await
            .expect("Failed to run migrations");

        let settings = test_settings(&url);
        let pool = create_pool(&url, 2).await.expect("Failed to create pool");

        {
            let mut conn = pool.get().await.expect("Failed to get connection");
            diesel::sql_query(format!("TRUNCATE {TABLES} RESTART IDENTITY CASCADE"))
                .execute(&mut conn)
                .await
                .expect("Failed to truncate tables");

            bootstrap_admin(&mut conn, &settings.auth)
                .await
                .expect("Failed to seed admin")
                .expect("Admin should be created on an empty database");

            let password_hash = hash_password(MUSICO_PASSWORD).expect("Failed to hash password");
            create_user(
                &mut conn,
                &NewAuthUser {
                    email: MUSICO_EMAIL,
                    password_hash: &password_hash,
                    name: "Ana",
                    role: UserRole::Musico,
                    instrument: Some("Soprano"),
                    phone: None,
                },
            )
            .await
            .expect("Failed to seed musician login");
        }

        let router = build_router(settings, pool)
            .await
            .expect("Failed to build router");

        Some(Self {
            _guard: guard,
            service: Service::new(router),
        })
    }

    /// ## Panics
    /// Panics unless the login succeeds.
    pub async fn login(&self, email: &str, password: &str) -> String {
        let res = TestRequest::post("/api/auth/login")
            .json(serde_json::json!({ "email": email, "password": password }))
            .send(&self.service)
            .await
            .assert_status(StatusCode::OK);
        res.json()["token"]
            .as_str()
            .expect("Login response should carry a token")
            .to_string()
    }

    pub async fn admin_token(&self) -> String {
        self.login(ADMIN_EMAIL, ADMIN_PASSWORD).await
    }

    pub async fn musico_token(&self) -> String {
        self.login(MUSICO_EMAIL, MUSICO_PASSWORD).await
    }

    /// Creates a musician as admin and returns its id.
    pub async fn seed_musician(&self, admin: &str, name: &str, instrument: &str) -> String {
        let res = TestRequest::post("/api/musicos")
            .bearer(admin)
            .json(serde_json::json!({ "nome": name, "funcao": instrument }))
            .send(&self.service)
            .await
            .assert_status(StatusCode::CREATED);
        res.id()
    }

    /// Creates a mass as admin and returns its id.
    pub async fn seed_mass(&self, admin: &str, date: &str, time: &str, kind: &str) -> String {
        let res = TestRequest::post("/api/missas")
            .bearer(admin)
            .json(serde_json::json!({ "data": date, "horario": time, "tipo": kind }))
            .send(&self.service)
            .await
            .assert_status(StatusCode::CREATED);
        res.id()
    }
}

/// Test request builder for JSON API calls.
pub struct TestRequest {
    method: Method,
    path: String,
    token: Option<String>,
    body: Option<Value>,
}

impl TestRequest {
    #[must_use]
    pub fn new(method: Method, path: &str) -> Self {
        Self {
            method,
            path: path.to_string(),
            token: None,
            body: None,
        }
    }

    #[must_use]
    pub fn get(path: &str) -> Self {
        Self::new(Method::GET, path)
    }

    #[must_use]
    pub fn post(path: &str) -> Self {
        Self::new(Method::POST, path)
    }

    #[must_use]
    pub fn put(path: &str) -> Self {
        Self::new(Method::PUT, path)
    }

    #[must_use]
    pub fn delete(path: &str) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Sends the request with `Authorization: Bearer <token>`.
    #[must_use]
    pub fn bearer(mut self, token: &str) -> Self {
        self.token = Some(token.to_string());
        self
    }

    #[must_use]
    pub fn json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// ## Panics
    /// Panics if the response body cannot be read.
    pub async fn send(self, service: &Service) -> TestResponse {
        let url = format!("http://127.0.0.1:5800{}", self.path);
        let mut client = RequestBuilder::new(&url, self.method);

        if let Some(token) = self.token {
            client = client.add_header(AUTHORIZATION, format!("Bearer {token}"), true);
        }
        if let Some(body) = self.body {
            client = client.json(&body);
        }

        let mut response = client.send(service).await;
        let status = response
            .status_code
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let body = response.take_string().await.expect("Failed to read body");

        TestResponse { status, body }
    }
}

pub struct TestResponse {
    pub status: StatusCode,
    pub body: String,
}

impl TestResponse {
    #[must_use]
    pub fn assert_status(self, expected: StatusCode) -> Self {
        assert_eq!(
            self.status, expected,
            "Expected status {expected} but got {}: {}",
            self.status, self.body
        );
        self
    }

    /// ## Panics
    /// Panics if the body is not JSON.
    #[must_use]
    pub fn json(&self) -> Value {
        serde_json::from_str(&self.body).expect("Response body should be JSON")
    }

    /// The `id` field of a JSON object body.
    #[must_use]
    pub fn id(&self) -> String {
        self.json()["id"]
            .as_str()
            .expect("Response should carry an id")
            .to_string()
    }

    /// ## Panics
    /// Panics unless `field` holds an RFC 3339 timestamp.
    #[must_use]
    pub fn timestamp(&self, field: &str) -> chrono::DateTime<chrono::Utc> {
        self.json()[field]
            .as_str()
            .and_then(|raw| raw.parse().ok())
            .unwrap_or_else(|| panic!("{field} should be a timestamp: {}", self.body))
    }

    /// The `error` field of a JSON error body.
    #[must_use]
    pub fn error(&self) -> String {
        self.json()["error"].as_str().unwrap_or_default().to_string()
    }
}
