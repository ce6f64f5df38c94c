use std::error::Error;

use notes_auth::jwt::JwtKeys;
use notes_models::db::{config::DbConfig, connection::DbConnection};
use notesd::api::{ApiState, router};
use reqwest::{Response, StatusCode};
use serde_json::{Value, json};
use tokio::{net::TcpListener, task::JoinHandle};

pub const SECRET: &[u8] = b"integration-test-secret";

/// A notesd router served on an ephemeral port with a fresh in-memory database.
pub struct TestContext {
    pub base: String,
    pub client: reqwest::Client,
    pub keys: JwtKeys,
    server: JoinHandle<()>,
}

impl TestContext {
    pub async fn new() -> Self {
        let connection = DbConnection::new(&DbConfig::in_memory())
            .and_then(DbConnection::setup)
            .expect("Failed to set up in-memory database");
        let keys = JwtKeys::new(SECRET).expect("Failed to build keys");
        let app = router(ApiState {
            connection,
            keys: keys.clone(),
        });

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("Listener has no address");
        let server = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Server failed");
        });

        Self {
            base: format!("http://{addr}"),
            client: reqwest::Client::new(),
            keys,
            server,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base)
    }

    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<Response, Box<dyn Error>> {
        Ok(self
            .client
            .post(self.url("/register"))
            .json(&json!({ "username": username, "email": email, "password": password }))
            .send()
            .await?)
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<Response, Box<dyn Error>> {
        Ok(self
            .client
            .post(self.url("/login"))
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await?)
    }

    /// Registers `name` with email `{name}@example.com` and returns `(id, token)`.
    pub async fn user(&self, name: &str) -> Result<(i64, String), Box<dyn Error>> {
        let email = format!("{name}@example.com");
        let response = self.register(name, &email, "password123").await?;
        assert_eq!(response.status(), StatusCode::CREATED);
        let id = response.json::<Value>().await?["id"]
            .as_i64()
            .ok_or("register response has no id")?;

        let response = self.login(&email, "password123").await?;
        assert_eq!(response.status(), StatusCode::OK);
        let token = response.json::<Value>().await?["token"]
            .as_str()
            .ok_or("login response has no token")?
            .to_string();

        Ok((id, token))
    }

    pub async fn get_with(
        &self,
        path: &str,
        authorization: &str,
    ) -> Result<Response, Box<dyn Error>> {
        Ok(self
            .client
            .get(self.url(path))
            .header("Authorization", authorization)
            .send()
            .await?)
    }
}

impl Drop for TestContext {
    fn drop(&mut self) {
        self.server.abort();
    }
}

pub fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}
