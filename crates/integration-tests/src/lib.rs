//! End-to-end tests for the user registry API.
//!
//! # Running Tests
//!
//! ```bash
//! # Start PostgreSQL and the API
//! POSTGRES_DSN=postgres://... cargo run -p user-registry-api
//!
//! # Run the ignored tests against it
//! API_BASE_URL=http://localhost:8080 cargo test -p user-registry-integration-tests -- --ignored
//! ```
//!
//! Usernames and emails are randomized so runs do not collide with existing
//! rows.

use reqwest::{Client, Response};
use serde_json::{Value, json};
use uuid::Uuid;

/// Base URL for the API (configurable via environment).
#[must_use]
pub fn api_base_url() -> String {
    std::env::var("API_BASE_URL").unwrap_or_else(|_| "http://localhost:8080".to_string())
}

/// A unique username with a readable prefix.
#[must_use]
pub fn unique_username(prefix: &str) -> String {
    format!("{prefix}_{}", Uuid::new_v4().simple())
}

/// Thin client over the API routes.
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

impl ApiClient {
    /// Client pointed at [`api_base_url`].
    #[must_use]
    pub fn new() -> Self {
        Self {
            client: Client::new(),
            base_url: api_base_url(),
        }
    }

    /// POST /api/users/register
    ///
    /// # Errors
    ///
    /// Returns `reqwest::Error` if the request cannot be sent.
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> reqwest::Result<Response> {
        self.register_raw(&json!({
            "username": username,
            "email": email,
            "password": password,
        }))
        .await
    }

    /// POST /api/users/register with an arbitrary JSON body.
    ///
    /// # Errors
    ///
    /// Returns `reqwest::Error` if the request cannot be sent.
    pub async fn register_raw(&self, body: &Value) -> reqwest::Result<Response> {
        self.client
            .post(format!("{}/api/users/register", self.base_url))
            .json(body)
            .send()
            .await
    }

    /// GET /api/users
    ///
    /// # Errors
    ///
    /// Returns `reqwest::Error` if the request cannot be sent.
    pub async fn list(&self) -> reqwest::Result<Response> {
        self.client
            .get(format!("{}/api/users", self.base_url))
            .send()
            .await
    }

    /// GET /api/user?username=<term>
    ///
    /// `term` is sent as-is and must not need percent-encoding.
    ///
    /// # Errors
    ///
    /// Returns `reqwest::Error` if the request cannot be sent.
    pub async fn search(&self, term: &str) -> reqwest::Result<Response> {
        self.client
            .get(format!("{}/api/user?username={term}", self.base_url))
            .send()
            .await
    }

    /// DELETE /api/users/{id}
    ///
    /// # Errors
    ///
    /// Returns `reqwest::Error` if the request cannot be sent.
    pub async fn delete(&self, id: &str) -> reqwest::Result<Response> {
        self.client
            .delete(format!("{}/api/users/{id}", self.base_url))
            .send()
            .await
    }

    /// GET on any path, relative to the base URL.
    ///
    /// # Errors
    ///
    /// Returns `reqwest::Error` if the request cannot be sent.
    pub async fn get(&self, path: &str) -> reqwest::Result<Response> {
        self.client
            .get(format!("{}{path}", self.base_url))
            .send()
            .await
    }
}
