use std::time::Duration;

use construct_shared::{
    errors::ValidationError,
    req_args::RegisterReqArgs,
    route::{NavigateTo, Route},
    uac::AuthError,
};
use rstest::rstest;
use serde_json::json;
use wiremock::{
    matchers::{body_json, method, path},
    Mock, ResponseTemplate,
};

use crate::helpers::{no_cb, spawn_app};

fn register_args(email: &str, password: &str, password2: &str) -> RegisterReqArgs {
    RegisterReqArgs::new(
        "newbie",
        email,
        password.to_string().into(),
        password2.to_string().into(),
    )
}

#[tokio::test]
async fn register_success_logs_in() {
    // Arrange
    let app = spawn_app().await;
    Mock::given(method("POST"))
        .and(path("/api/register/"))
        .and(body_json(json!({
            "username": "newbie",
            "email": "new@site.com",
            "password": "secret1",
            "password2": "secret1"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "user": {"id": 7, "username": "newbie", "email": "new@site.com"},
            "token": "R"
        })))
        .expect(1)
        .mount(&app.server)
        .await;

    // Act
    let outcome = app
        .core_client
        .register(register_args("new@site.com", "secret1", "secret1"), no_cb)
        .await
        .unwrap();

    // Assert
    assert_eq!(outcome, Ok(NavigateTo(Route::Dashboard)));
    assert!(app.core_client.is_logged_in());
    assert_eq!(
        app.core_client.session().username().unwrap().as_ref(),
        "newbie"
    );
    assert_eq!(app.stored_token().as_deref(), Some("R"));
}

#[tokio::test]
async fn register_rejected_uses_first_field_error() {
    // Arrange
    let app = spawn_app().await;
    Mock::given(method("POST"))
        .and(path("/api/register/"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "email": ["user with this email already exists."],
            "username": ["A user with that username already exists."]
        })))
        .mount(&app.server)
        .await;

    // Act
    let outcome = app
        .core_client
        .register(register_args("new@site.com", "secret1", "secret1"), no_cb)
        .await
        .unwrap();

    // Assert
    assert_eq!(
        outcome,
        Err(AuthError::Rejected(
            "A user with that username already exists.".to_string()
        ))
    );
    assert!(!app.core_client.is_logged_in());
}

#[tokio::test]
async fn register_rejected_with_unknown_body_uses_fallback() {
    // Arrange
    let app = spawn_app().await;
    Mock::given(method("POST"))
        .and(path("/api/register/"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({})))
        .mount(&app.server)
        .await;

    // Act
    let outcome = app
        .core_client
        .register(register_args("new@site.com", "secret1", "secret1"), no_cb)
        .await
        .unwrap();

    // Assert
    assert_eq!(outcome.unwrap_err().to_string(), "Registration failed.");
}

#[rstest]
#[case::mismatch("new@site.com", "secret1", "secret2", ValidationError::PasswordsDoNotMatch)]
#[case::short("new@site.com", "abc", "abc", ValidationError::PasswordTooShort)]
#[case::bad_email("not-an-email", "secret1", "secret1", ValidationError::InvalidEmail)]
#[case::missing("", "secret1", "secret1", ValidationError::MissingRegistrationFields)]
#[tokio::test]
async fn register_validation_sends_nothing(
    #[case] email: &str,
    #[case] password: &str,
    #[case] password2: &str,
    #[case] expected: ValidationError,
) {
    // Arrange
    let app = spawn_app().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"token": "R"})))
        .expect(0)
        .mount(&app.server)
        .await;

    // Act
    let outcome = app
        .core_client
        .register(register_args(email, password, password2), no_cb)
        .await
        .unwrap();

    // Assert
    assert_eq!(outcome, Err(AuthError::Validation(expected)));
    assert!(!app.core_client.is_logged_in());
}

#[tokio::test]
async fn mismatched_passwords_message() {
    // Arrange
    let app = spawn_app().await;

    // Act
    let outcome = app
        .core_client
        .register(register_args("new@site.com", "secret1", "secret2"), no_cb)
        .await
        .unwrap();

    // Assert
    assert_eq!(outcome.unwrap_err().to_string(), "Passwords do not match.");
}

#[tokio::test]
async fn register_keeps_session_loading_until_rejected() {
    // Arrange
    let app = spawn_app().await;
    Mock::given(method("POST"))
        .and(path("/api/register/"))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_json(json!({"email": ["Enter a valid email address."]}))
                .set_delay(Duration::from_millis(300)),
        )
        .mount(&app.server)
        .await;

    // Act
    let rx = app
        .core_client
        .register(register_args("new@site.com", "secret1", "secret1"), no_cb);
    tokio::time::sleep(Duration::from_millis(50)).await;

    // Assert - In flight
    assert!(app.core_client.session().is_loading);

    // Act - Finish
    let outcome = rx.await.unwrap();

    // Assert - Loading ends with the failure too
    assert_eq!(
        outcome,
        Err(AuthError::Rejected("Enter a valid email address.".to_string()))
    );
    assert!(!app.core_client.session().is_loading);
    assert!(!app.core_client.is_logged_in());
}
