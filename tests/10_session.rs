mod common;

use std::sync::Arc;

use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

use a11y_guide_client::api::ApiClient;
use a11y_guide_client::session::{
    MemoryStorage, Session, SessionStorage, AUTH_TOKEN_KEY, AUTH_USER_KEY,
};

use common::TestBackend;

#[tokio::test]
async fn login_establishes_and_persists_session() {
    let backend = TestBackend::start().await;

    Mock::given(method("POST"))
        .and(path("/users/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "token": "tok-1",
            "user": { "id": "u1", "username": "anna", "role": "admin" }
        })))
        .mount(&backend.server)
        .await;

    let response = backend.session.login(&backend.users(), "anna", "hemligt").await;

    assert!(response.success);
    assert_eq!(response.message, "Inloggning lyckades");
    assert!(backend.session.is_authenticated());
    assert_eq!(backend.session.token().as_deref(), Some("tok-1"));
    assert_eq!(backend.session.role_display().as_deref(), Some("Administratör"));
}

#[tokio::test]
async fn failed_login_reports_server_message_and_stays_anonymous() {
    let backend = TestBackend::start().await;

    Mock::given(method("POST"))
        .and(path("/users/login"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "message": "Felaktigt användarnamn eller lösenord"
        })))
        .mount(&backend.server)
        .await;

    let response = backend.session.login(&backend.users(), "anna", "fel").await;

    assert!(!response.success);
    assert_eq!(response.message, "Felaktigt användarnamn eller lösenord");
    assert!(!backend.session.is_authenticated());
}

#[tokio::test]
async fn session_restores_from_shared_storage() {
    let storage = Arc::new(MemoryStorage::new());

    let first = Session::new(Box::new(storage.clone()));
    let user = serde_json::from_value(json!({
        "id": "u1", "username": "anna", "role": "designer"
    }))
    .unwrap();
    first.establish("tok-2", &user);

    let second = Session::new(Box::new(storage));
    second.initialize();

    assert!(second.is_authenticated());
    assert_eq!(second.token().as_deref(), Some("tok-2"));
    assert_eq!(second.role().as_deref(), Some("designer"));
}

#[tokio::test]
async fn unauthorized_response_tears_down_the_session() {
    let storage = Arc::new(MemoryStorage::new());
    let session = Arc::new(Session::new(Box::new(storage.clone())));
    let user = serde_json::from_value(json!({
        "id": "u1", "username": "anna", "role": "admin"
    }))
    .unwrap();
    session.establish("expired-tok", &user);

    let server = wiremock::MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/projects"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "message": "Token har gått ut"
        })))
        .mount(&server)
        .await;

    let client = Arc::new(ApiClient::new(&server.uri(), 10, session.clone()).unwrap());
    let projects = a11y_guide_client::services::ProjectService::new(client);
    let response = projects.list().await;

    assert!(!response.success);
    assert!(!session.is_authenticated());
    assert!(storage.get(AUTH_TOKEN_KEY).is_none());
    assert!(storage.get(AUTH_USER_KEY).is_none());
    assert_eq!(session.take_redirect().as_deref(), Some("/login"));
}
