use std::time::Duration;

use construct_client_core::{guard, GuardDecision};
use construct_shared::{
    errors::ValidationError,
    req_args::LoginReqArgs,
    route::{NavigateTo, Route},
    uac::AuthError,
};
use serde_json::json;
use wiremock::{
    matchers::{body_json, method, path},
    Mock, ResponseTemplate,
};

use crate::helpers::{no_cb, spawn_app};

fn login_args() -> LoginReqArgs {
    LoginReqArgs::new("u", "p".to_string().into())
}

#[tokio::test]
async fn login_success_stores_token_and_navigates_to_dashboard() {
    // Arrange
    let app = spawn_app().await;
    Mock::given(method("POST"))
        .and(path("/api/login/"))
        .and(body_json(json!({"username": "u", "password": "p"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"token": "T"})))
        .expect(1)
        .mount(&app.server)
        .await;

    // Act
    let outcome = app.core_client.login(login_args(), no_cb).await.unwrap();

    // Assert
    assert_eq!(outcome, Ok(NavigateTo(Route::Dashboard)));
    let session = app.core_client.session();
    assert_eq!(session.token.as_ref().map(|t| t.as_str()), Some("T"));
    assert_eq!(session.username().unwrap().as_ref(), "u");
    assert!(!session.is_loading);
    assert_eq!(app.stored_token().as_deref(), Some("T"));
}

#[tokio::test]
async fn login_rejected_uses_detail_and_stays_logged_out() {
    // Arrange
    let app = spawn_app().await;
    Mock::given(method("POST"))
        .and(path("/api/login/"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"detail": "bad creds"})))
        .mount(&app.server)
        .await;

    // Act
    let outcome = app.core_client.login(login_args(), no_cb).await.unwrap();

    // Assert
    assert_eq!(outcome, Err(AuthError::Rejected("bad creds".to_string())));
    assert_eq!(outcome.unwrap_err().to_string(), "bad creds");
    assert!(!app.core_client.is_logged_in());
    assert!(!app.core_client.session().is_loading);
    assert_eq!(app.stored_token(), None);
}

#[tokio::test]
async fn login_rejected_without_detail_uses_non_field_errors() {
    // Arrange
    let app = spawn_app().await;
    Mock::given(method("POST"))
        .and(path("/api/login/"))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_json(json!({"non_field_errors": ["Unable to log in."]})),
        )
        .mount(&app.server)
        .await;

    // Act
    let outcome = app.core_client.login(login_args(), no_cb).await.unwrap();

    // Assert
    assert_eq!(
        outcome,
        Err(AuthError::Rejected("Unable to log in.".to_string()))
    );
}

#[tokio::test]
async fn login_rejected_with_unknown_body_uses_fallback() {
    // Arrange
    let app = spawn_app().await;
    Mock::given(method("POST"))
        .and(path("/api/login/"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({"something": "else"})))
        .mount(&app.server)
        .await;

    // Act
    let outcome = app.core_client.login(login_args(), no_cb).await.unwrap();

    // Assert
    assert_eq!(
        outcome.unwrap_err().to_string(),
        "Invalid credentials. Please check your username and password."
    );
}

#[tokio::test]
async fn login_non_json_response_is_network_error() {
    // Arrange
    let app = spawn_app().await;
    Mock::given(method("POST"))
        .and(path("/api/login/"))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>"))
        .mount(&app.server)
        .await;

    // Act
    let outcome = app.core_client.login(login_args(), no_cb).await.unwrap();

    // Assert
    assert_eq!(outcome, Err(AuthError::Network));
    assert!(!app.core_client.is_logged_in());
}

#[tokio::test]
async fn login_unreachable_server_is_network_error() {
    // Arrange
    // Nothing listens on the discard port
    let core_client = construct_client_core::Client::new(
        "http://127.0.0.1:9".to_string(),
        Box::new(construct_client_core::MemoryStorage::default()),
    );

    // Act
    let outcome = core_client.login(login_args(), no_cb).await.unwrap();

    // Assert
    assert_eq!(
        outcome.unwrap_err().to_string(),
        "Network error. Could not connect to the server."
    );
    assert!(!core_client.session().is_loading);
}

#[tokio::test]
async fn login_missing_fields_sends_nothing() {
    // Arrange
    let app = spawn_app().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"token": "T"})))
        .expect(0)
        .mount(&app.server)
        .await;
    let args = LoginReqArgs::new("u", String::new().into());

    // Act
    let outcome = app.core_client.login(args, no_cb).await.unwrap();

    // Assert
    assert_eq!(
        outcome,
        Err(AuthError::Validation(ValidationError::MissingLoginFields))
    );
    assert!(!app.core_client.session().is_loading);
}

#[tokio::test]
async fn login_keeps_session_loading_until_answered() {
    // Arrange
    let app = spawn_app().await;
    Mock::given(method("POST"))
        .and(path("/api/login/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"token": "T"}))
                .set_delay(Duration::from_millis(300)),
        )
        .mount(&app.server)
        .await;

    // Act - Start and look while the server is still answering
    let rx = app.core_client.login(login_args(), no_cb);
    tokio::time::sleep(Duration::from_millis(50)).await;

    // Assert - Loading, so the guard makes no decision yet
    let session = app.core_client.session();
    assert!(session.is_loading);
    assert_eq!(guard(&Route::Dashboard, &session), GuardDecision::Loading);

    // Act - Finish
    let outcome = rx.await.unwrap();

    // Assert - Settled and logged in
    assert_eq!(outcome, Ok(NavigateTo(Route::Dashboard)));
    let session = app.core_client.session();
    assert!(!session.is_loading);
    assert_eq!(
        guard(&Route::Dashboard, &session),
        GuardDecision::Render(Route::Dashboard)
    );
}
