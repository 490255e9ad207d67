#![allow(dead_code)]

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    body::Body,
    http::{HeaderMap, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt; // for oneshot

use malls_api::config::AppConfig;
use malls_api::database::{DocumentStore, MemoryStore};
use malls_api::services::UserService;
use malls_api::{app, AppState};

pub const TOKEN_HEADER: &str = "x-auth-token";

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

impl TestResponse {
    pub fn id(&self) -> String {
        self.body["_id"].as_str().unwrap_or_default().to_string()
    }

    pub fn message(&self) -> &str {
        self.body["message"].as_str().unwrap_or_default()
    }
}

/// Full router over a fresh in-memory store
pub struct TestApp {
    pub router: Router,
    pub state: AppState,
}

impl TestApp {
    pub fn new() -> Self {
        let mut config = AppConfig::development();
        config.security.bcrypt_cost = 4;
        config.api.enable_request_logging = false;

        let store: Arc<dyn DocumentStore> = Arc::new(MemoryStore::new());
        let state = AppState::new(Arc::new(config), store);
        Self {
            router: app(state.clone()),
            state,
        }
    }

    pub async fn send(&self, method: Method, uri: &str, token: Option<&str>, body: Option<Value>) -> Result<TestResponse> {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(TOKEN_HEADER, token);
        }

        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_vec(&body)?))?,
            None => builder.body(Body::empty())?,
        };

        self.send_request(request).await
    }

    pub async fn send_request(&self, request: Request<Body>) -> Result<TestResponse> {
        let response = self.router.clone().oneshot(request).await?;
        let status = response.status();
        let headers = response.headers().clone();

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).context("response body is not JSON")?
        };

        Ok(TestResponse { status, headers, body })
    }

    pub async fn get(&self, uri: &str) -> Result<TestResponse> {
        self.send(Method::GET, uri, None, None).await
    }

    pub async fn get_auth(&self, uri: &str, token: &str) -> Result<TestResponse> {
        self.send(Method::GET, uri, Some(token), None).await
    }

    pub async fn post(&self, uri: &str, token: Option<&str>, body: Value) -> Result<TestResponse> {
        self.send(Method::POST, uri, token, Some(body)).await
    }

    pub async fn put(&self, uri: &str, token: Option<&str>, body: Value) -> Result<TestResponse> {
        self.send(Method::PUT, uri, token, Some(body)).await
    }

    pub async fn delete(&self, uri: &str, token: Option<&str>) -> Result<TestResponse> {
        self.send(Method::DELETE, uri, token, None).await
    }

    pub async fn register(&self, name: &str, email: &str, password: &str) -> Result<TestResponse> {
        self.post(
            "/api/users",
            None,
            json!({ "name": name, "email": email, "password": password }),
        )
        .await
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<TestResponse> {
        self.post("/api/auth", None, json!({ "email": email, "password": password }))
            .await
    }

    /// Register, then log in; returns the session token
    pub async fn user_token(&self, email: &str) -> Result<String> {
        let registered = self.register("first user", email, "firstuser").await?;
        anyhow::ensure!(registered.status == StatusCode::OK, "register failed: {}", registered.body);

        let login = self.login(email, "firstuser").await?;
        let token = login
            .headers
            .get(TOKEN_HEADER)
            .context("login did not return a token")?
            .to_str()?
            .to_string();
        Ok(token)
    }

    /// Register, promote out of band, then log in
    pub async fn admin_token(&self, email: &str) -> Result<String> {
        let registered = self.register("admin user", email, "firstuser").await?;
        anyhow::ensure!(registered.status == StatusCode::OK, "register failed: {}", registered.body);

        let users = UserService::new(Arc::clone(&self.state.store), self.state.config.security.clone());
        users.set_admin(email, true).await?;

        let login = self.login(email, "firstuser").await?;
        Ok(login
            .headers
            .get(TOKEN_HEADER)
            .context("login did not return a token")?
            .to_str()?
            .to_string())
    }

    pub async fn create_mall(&self, token: &str, name: &str) -> Result<TestResponse> {
        self.post("/api/malls", Some(token), mall_body(name)).await
    }

    pub async fn create_store(&self, token: &str, name: &str) -> Result<TestResponse> {
        self.post("/api/stores", Some(token), json!({ "name": name, "type": "Fast Food" }))
            .await
    }
}

pub fn mall_body(name: &str) -> Value {
    json!({
        "name": name,
        "address": "Krekelstraat 35",
        "city": "Izegem",
        "province": "West-Vlaanderen",
        "postalCode": "8870"
    })
}

pub fn employee_body(first_name: &str) -> Value {
    json!({
        "firstName": first_name,
        "lastName": "Ehisson",
        "type": "Manager",
        "salary": 3200,
        "hireDate": "2023-09-01"
    })
}
