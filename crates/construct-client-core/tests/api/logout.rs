use construct_shared::route::{NavigateTo, Route};

use crate::helpers::{spawn_app, spawn_app_logged_in};

#[tokio::test]
async fn restored_session_logs_out() {
    // Arrange
    let app = spawn_app_logged_in().await;
    assert!(app.core_client.is_logged_in());
    assert_eq!(
        app.core_client.session().username().unwrap().as_ref(),
        "AuthenticatedUser"
    );

    // Act
    let navigation = app.core_client.logout();

    // Assert
    assert_eq!(navigation, NavigateTo(Route::Login));
    assert!(!app.core_client.is_logged_in());
    assert_eq!(app.stored_token(), None);
}

#[tokio::test]
async fn logout_when_logged_out_still_succeeds() {
    // Arrange
    let app = spawn_app().await;

    // Act
    let navigation = app.core_client.logout();

    // Assert
    assert_eq!(navigation, NavigateTo(Route::Login));
    assert!(!app.core_client.is_logged_in());
    assert!(!app.core_client.session().is_loading);
}
