// Shared wiring for integration tests: a mock backend per test plus a
// fresh in-memory session, so no test touches the real API or the user's
// config directory.

use std::sync::Arc;

use wiremock::MockServer;

use a11y_guide_client::api::ApiClient;
use a11y_guide_client::services::{
    ChecklistService, PostService, ProgressService, ProjectService, UserService,
};
use a11y_guide_client::session::{MemoryStorage, Session};

pub struct TestBackend {
    pub server: MockServer,
    pub session: Arc<Session>,
    pub client: Arc<ApiClient>,
}

impl TestBackend {
    pub async fn start() -> Self {
        let server = MockServer::start().await;
        let session = Arc::new(Session::new(Box::new(MemoryStorage::new())));
        let client = Arc::new(
            ApiClient::new(&server.uri(), 10, session.clone()).expect("test client"),
        );
        Self { server, session, client }
    }

    pub fn users(&self) -> UserService {
        UserService::new(self.client.clone())
    }

    pub fn projects(&self) -> ProjectService {
        ProjectService::new(self.client.clone())
    }

    pub fn posts(&self) -> PostService {
        PostService::new(self.client.clone())
    }

    pub fn checklists(&self) -> ChecklistService {
        ChecklistService::new(self.client.clone())
    }

    pub fn progress(&self) -> ProgressService {
        ProgressService::new(self.client.clone())
    }

    pub fn login_as(&self, username: &str, role: &str) {
        let user = serde_json::from_value(serde_json::json!({
            "id": "u-test", "username": username, "role": role
        }))
        .expect("test user");
        self.session.establish("test-token", &user);
    }
}

/// Client whose requests all fail at the connection level. Port 9 is the
/// discard service, closed on loopback in practice.
pub fn unreachable_client() -> (Arc<Session>, Arc<ApiClient>) {
    let session = Arc::new(Session::new(Box::new(MemoryStorage::new())));
    let client = Arc::new(
        ApiClient::new("http://127.0.0.1:9", 1, session.clone()).expect("test client"),
    );
    (session, client)
}
