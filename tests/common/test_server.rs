use std::path::Path;
use std::sync::Arc;

use reqwest::{Client, RequestBuilder, Response};
use serde_json::{Value, json};
use tempfile::TempDir;
use tokio::task::JoinHandle;

use dayreport::auth::TokenIssuer;
use dayreport::config::ServerConfig;
use dayreport::server::{AppState, create_router};
use dayreport::store::{SqliteStore, Store};

/// A server running in-process on an ephemeral port, backed by a fresh
/// database in a temp dir.
pub struct TestServer {
    pub temp_dir: TempDir,
    pub base_url: String,
    pub admin_token: String,
    pub store: Arc<SqliteStore>,
    client: Client,
    handle: JoinHandle<()>,
}

/// A profile created through the admin API, with a token to act as it.
pub struct TestProfile {
    pub id: String,
    pub token: String,
}

impl TestServer {
    pub async fn start() -> Self {
        Self::start_with(ServerConfig::default()).await
    }

    pub async fn start_with(mut config: ServerConfig) -> Self {
        let temp_dir = TempDir::new().expect("create temp dir");
        config.data_dir = temp_dir.path().to_path_buf();

        let store = Arc::new(SqliteStore::new(config.db_path()).expect("open store"));
        store.initialize().expect("initialize store");

        let admin = TokenIssuer::new()
            .issue_stored(store.as_ref(), None, None)
            .expect("issue admin token");

        let dyn_store: Arc<dyn Store> = store.clone();
        let app = create_router(Arc::new(AppState::new(dyn_store, &config)));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind");
        let port = listener.local_addr().expect("local addr").port();
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("serve");
        });

        let base_url = format!("http://127.0.0.1:{port}");
        let client = Client::new();
        Self::wait_for_ready(&client, &base_url).await;

        Self {
            temp_dir,
            base_url,
            admin_token: admin.raw,
            store,
            client,
            handle,
        }
    }

    async fn wait_for_ready(client: &Client, base_url: &str) {
        for _ in 0..50 {
            if client
                .get(format!("{base_url}/health"))
                .send()
                .await
                .is_ok()
            {
                return;
            }
            tokio::time::sleep(std::time::Duration::from_millis(20)).await;
        }
        panic!("Server did not become ready");
    }

    pub fn data_dir(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    pub fn get(&self, path: &str, token: &str) -> RequestBuilder {
        self.client.get(self.url(path)).bearer_auth(token)
    }

    pub fn post(&self, path: &str, token: &str) -> RequestBuilder {
        self.client.post(self.url(path)).bearer_auth(token)
    }

    pub fn patch(&self, path: &str, token: &str) -> RequestBuilder {
        self.client.patch(self.url(path)).bearer_auth(token)
    }

    pub fn anonymous_get(&self, path: &str) -> RequestBuilder {
        self.client.get(self.url(path))
    }

    /// Creates a profile with an optional role tag and issues it a token.
    pub async fn create_profile(&self, first_name: &str, role: Option<&str>) -> TestProfile {
        let resp: Value = self
            .post("/api/v1/admin/profiles", &self.admin_token)
            .json(&json!({ "first_name": first_name, "last_name": "Test", "role": role }))
            .send()
            .await
            .expect("create profile")
            .json()
            .await
            .expect("parse profile");
        let id = resp["data"]["id"].as_str().expect("profile id").to_string();

        let resp: Value = self
            .post(&format!("/api/v1/admin/profiles/{id}/tokens"), &self.admin_token)
            .json(&json!({}))
            .send()
            .await
            .expect("create token")
            .json()
            .await
            .expect("parse token");
        let token = resp["data"]["token"].as_str().expect("token").to_string();

        TestProfile { id, token }
    }

    /// Submits a report and returns the raw response.
    pub async fn submit(&self, token: &str, body: Value) -> Response {
        self.post("/api/v1/reports", token)
            .json(&body)
            .send()
            .await
            .expect("submit report")
    }

    /// Reads a successful JSON response body.
    pub async fn json_ok(resp: Response) -> Value {
        let status = resp.status();
        let body: Value = resp.json().await.expect("parse json");
        assert!(status.is_success(), "unexpected {status}: {body}");
        body
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
