//! Shared test harness: the real router wired to in-memory stores.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use serde_json::Value;
use tower::ServiceExt;

use authgate_api::state::AppState;
use authgate_auth::identity::MemoryIdentityStore;
use authgate_auth::jwt::{JwtDecoder, JwtEncoder};
use authgate_auth::password::PasswordHasher;
use authgate_auth::session::{MemorySessionStore, NewIdentity, SessionManager};
use authgate_auth::tenancy::MemoryTenantStore;
use authgate_core::config::AppConfig;
use authgate_core::config::auth::AuthConfig;
use authgate_core::config::database::DatabaseConfig;
use authgate_core::config::logging::LoggingConfig;
use authgate_core::config::server::{CorsConfig, ServerConfig};
use authgate_entity::user::UserRole;

const PRIVATE_PEM: &str = include_str!("../fixtures/private.pem");
const PUBLIC_PEM: &str = include_str!("../fixtures/public.pem");

/// Default password used by seeded identities.
pub const PASSWORD: &str = "secret@123";

/// Test application context.
pub struct TestApp {
    /// The Axum router for making test requests.
    pub router: Router,
    /// Shared state (for seeding and direct assertions).
    pub state: AppState,
    /// In-memory session store handle.
    pub sessions: MemorySessionStore,
    /// In-memory identity store handle.
    pub identities: MemoryIdentityStore,
    /// In-memory tenant store handle.
    pub tenants: MemoryTenantStore,
    /// Decoder for inspecting issued tokens.
    pub decoder: JwtDecoder,
}

/// A captured HTTP response.
pub struct TestResponse {
    /// Response status.
    pub status: StatusCode,
    /// Parsed JSON body (Null when the body was empty).
    pub body: Value,
    /// All Set-Cookie header values, in order.
    pub set_cookies: Vec<String>,
}

impl TestApp {
    /// Create a new test application backed by in-memory stores.
    pub fn new() -> Self {
        let config = test_config();

        let encoder =
            Arc::new(JwtEncoder::new(PRIVATE_PEM.as_bytes(), &config.auth).expect("test key"));
        let decoder = JwtDecoder::new(PUBLIC_PEM.as_bytes(), &config.auth).expect("test key");

        let identities = MemoryIdentityStore::new();
        let sessions = MemorySessionStore::new();
        let tenants = MemoryTenantStore::new();

        let session_manager = Arc::new(SessionManager::new(
            Arc::new(identities.clone()),
            Arc::new(sessions.clone()),
            PasswordHasher::new(),
            encoder,
        ));

        let state = AppState {
            config: Arc::new(config),
            session_manager,
            jwt_decoder: Arc::new(decoder.clone()),
            identity_store: Arc::new(identities.clone()),
            session_store: Arc::new(sessions.clone()),
            tenant_store: Arc::new(tenants.clone()),
        };

        let router = authgate_api::build_router(state.clone());

        Self {
            router,
            state,
            sessions,
            identities,
            tenants,
            decoder,
        }
    }

    /// Issue a request against the router.
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        bearer: Option<&str>,
        cookie: Option<&str>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(path);

        if let Some(token) = bearer {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }

        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();

        let set_cookies = response
            .headers()
            .get_all(header::SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok().map(String::from))
            .collect();

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };

        TestResponse {
            status,
            body,
            set_cookies,
        }
    }

    /// Seed an identity with the default password, bypassing HTTP.
    pub async fn seed_user(&self, email: &str, role: UserRole) -> i64 {
        self.state
            .session_manager
            .create_identity(NewIdentity {
                first_name: "Seed".to_string(),
                last_name: "User".to_string(),
                email: email.to_string(),
                password: PASSWORD.to_string(),
                role,
                tenant_id: None,
            })
            .await
            .expect("seed user")
            .id
    }

    /// Log a seeded identity in and return its access token.
    pub async fn login_token(&self, email: &str) -> String {
        let response = self
            .request(
                "POST",
                "/api/auth/login",
                Some(serde_json::json!({"email": email, "password": PASSWORD})),
                None,
                None,
            )
            .await;
        assert_eq!(response.status, StatusCode::OK, "login failed: {:?}", response.body);
        cookie_value(&response.set_cookies, "accessToken").expect("access cookie")
    }
}

/// Pull a cookie's value out of a list of Set-Cookie headers.
pub fn cookie_value(set_cookies: &[String], name: &str) -> Option<String> {
    set_cookies.iter().find_map(|header| {
        let (cookie_name, rest) = header.split_once('=')?;
        if cookie_name == name {
            Some(rest.split(';').next().unwrap_or("").to_string())
        } else {
            None
        }
    })
}

fn test_config() -> AppConfig {
    AppConfig {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            shutdown_grace_seconds: 1,
            cors: CorsConfig::default(),
        },
        database: DatabaseConfig {
            url: "postgres://unused".to_string(),
            max_connections: 1,
            min_connections: 1,
            connect_timeout_seconds: 1,
            idle_timeout_seconds: 1,
        },
        auth: AuthConfig {
            issuer: "authgate".to_string(),
            access_private_key_path: "unused".to_string(),
            access_public_key_path: "unused".to_string(),
            refresh_secret: "test-refresh-secret".to_string(),
            access_ttl_minutes: 60,
            refresh_ttl_days: 365,
            cookie_domain: "localhost".to_string(),
        },
        logging: LoggingConfig::default(),
    }
}
