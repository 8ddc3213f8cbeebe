use construct_client_core::DataApi as _;
use construct_shared::{
    errors::FetchError,
    payments::{PaymentMethod, PaymentStatus},
    req_args::api::InitiatePaymentReqArgs,
    token::AuthToken,
};
use serde_json::json;
use wiremock::{
    matchers::{body_json, header, method, path},
    Mock, ResponseTemplate,
};

use crate::helpers::{no_cb, spawn_app_logged_in};

fn token() -> AuthToken {
    "T".into()
}

#[tokio::test]
async fn list_payments_sends_token_and_decodes() {
    // Arrange
    let app = spawn_app_logged_in().await;
    Mock::given(method("GET"))
        .and(path("/api/payments/"))
        .and(header("Authorization", "Token T"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "amount": "5000.00", "payment_method": "Credit Card",
             "status": "Completed", "payment_date": "2025-06-20",
             "paystack_reference": "PS_REF_12345"},
            {"id": 2, "amount": 7500.5, "method": "Bank Transfer",
             "status": "Pending", "date": "2025-06-25"}
        ])))
        .expect(1)
        .mount(&app.server)
        .await;

    // Act
    let payments = app
        .core_client
        .list_payments(&token(), no_cb)
        .await
        .unwrap()
        .unwrap();

    // Assert
    assert_eq!(payments.len(), 2);
    assert_eq!(payments[0].amount, 5000.0);
    assert_eq!(payments[0].reference.as_deref(), Some("PS_REF_12345"));
    assert_eq!(payments[1].status, PaymentStatus::Pending);
}

#[tokio::test]
async fn missing_payment_is_none() {
    // Arrange
    let app = spawn_app_logged_in().await;
    Mock::given(method("GET"))
        .and(path("/api/payments/42/"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"detail": "Not found."})))
        .mount(&app.server)
        .await;

    // Act
    let payment = app
        .core_client
        .get_payment(&token(), 42.into(), no_cb)
        .await
        .unwrap();

    // Assert
    assert_eq!(payment, Ok(None));
}

#[tokio::test]
async fn unauthorized_is_missing_token() {
    // Arrange
    let app = spawn_app_logged_in().await;
    Mock::given(method("GET"))
        .and(path("/api/payments/"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(json!({"detail": "Invalid token."})),
        )
        .mount(&app.server)
        .await;

    // Act
    let outcome = app
        .core_client
        .list_payments(&token(), no_cb)
        .await
        .unwrap();

    // Assert
    assert_eq!(outcome, Err(FetchError::MissingToken));
}

#[tokio::test]
async fn initiate_payment_posts_amount_and_method() {
    // Arrange
    let app = spawn_app_logged_in().await;
    Mock::given(method("POST"))
        .and(path("/api/payments/"))
        .and(body_json(json!({"amount": 150.5, "payment_method": "Mobile Money"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": 9, "amount": "150.50", "payment_method": "Mobile Money",
            "status": "Pending", "payment_date": "2025-07-02",
            "paystack_authorization_url": "https://paystack.com/pay/abc",
            "message": "Payment initiation successful."
        })))
        .expect(1)
        .mount(&app.server)
        .await;
    let args = InitiatePaymentReqArgs::try_new("150.5", Some(PaymentMethod::MobileMoney)).unwrap();

    // Act
    let initiated = app
        .core_client
        .initiate_payment(&token(), &args, no_cb)
        .await
        .unwrap()
        .unwrap();

    // Assert
    assert_eq!(initiated.id, 9.into());
    assert_eq!(
        initiated.authorization_url.as_deref(),
        Some("https://paystack.com/pay/abc")
    );
}

#[tokio::test]
async fn server_rejection_surfaces_detail() {
    // Arrange
    let app = spawn_app_logged_in().await;
    Mock::given(method("POST"))
        .and(path("/api/payments/"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({"detail": "Amount too large."})),
        )
        .mount(&app.server)
        .await;
    let args = InitiatePaymentReqArgs::try_new("1", Some(PaymentMethod::CreditCard)).unwrap();

    // Act
    let outcome = app
        .core_client
        .initiate_payment(&token(), &args, no_cb)
        .await
        .unwrap();

    // Assert
    assert_eq!(
        outcome.unwrap_err().to_string(),
        "Amount too large.".to_string()
    );
}
