use construct_client_core::DataApi as _;
use construct_shared::{
    images::AnalysisStatus, req_args::api::UploadImageReqArgs, token::AuthToken,
};
use serde_json::json;
use wiremock::{
    matchers::{header, header_regex, method, path},
    Mock, ResponseTemplate,
};

use crate::helpers::{no_cb, spawn_app_logged_in};

fn token() -> AuthToken {
    "T".into()
}

#[tokio::test]
async fn upload_sends_multipart_and_returns_processing_record() {
    // Arrange
    let app = spawn_app_logged_in().await;
    Mock::given(method("POST"))
        .and(path("/api/images/"))
        .and(header("Authorization", "Token T"))
        .and(header_regex("content-type", "^multipart/form-data"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": 77, "name": "site.jpg", "url": "/media/site.jpg",
            "ai_analysis_status": "Processing", "upload_date": "2025-07-02",
            "detected_elements_json": null, "verified_progress_percentage": null
        })))
        .expect(1)
        .mount(&app.server)
        .await;
    let args = UploadImageReqArgs::try_new(Some(("site.jpg".into(), vec![0xFF, 0xD8]))).unwrap();

    // Act
    let created = app
        .core_client
        .upload_image(&token(), args, no_cb)
        .await
        .unwrap()
        .unwrap();

    // Assert
    assert_eq!(created.id, 77.into());
    assert_eq!(created.ai_analysis_status, AnalysisStatus::Processing);
}

#[tokio::test]
async fn image_detail_decodes_analysis() {
    // Arrange
    let app = spawn_app_logged_in().await;
    let elements = json!({
        "elements": [{"label": "Roof Tiles", "confidence": 0.99, "bbox": [10, 10, 590, 300]}],
        "overall_assessment": "Roofing completed."
    });
    Mock::given(method("GET"))
        .and(path("/api/images/1003/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 1003, "name": "Roof_Progress_Final.jpeg", "url": "/media/roof.jpeg",
            "ai_analysis_status": "Completed", "upload_date": "2025-07-01",
            "detected_elements_json": elements.to_string(),
            "verified_progress_percentage": 95, "project_id": 123
        })))
        .mount(&app.server)
        .await;

    // Act
    let image = app
        .core_client
        .get_image(&token(), 1003.into(), no_cb)
        .await
        .unwrap()
        .unwrap()
        .unwrap();

    // Assert
    assert_eq!(image.progress_display(), "95%");
    let analysis = image.detected_elements().unwrap().unwrap();
    assert_eq!(analysis.elements[0].label, "Roof Tiles");
    assert_eq!(analysis.overall_assessment.as_deref(), Some("Roofing completed."));
}

#[tokio::test]
async fn unknown_image_is_none() {
    // Arrange
    let app = spawn_app_logged_in().await;
    Mock::given(method("GET"))
        .and(path("/api/images/5/"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&app.server)
        .await;

    // Act
    let image = app
        .core_client
        .get_image(&token(), 5.into(), no_cb)
        .await
        .unwrap();

    // Assert
    assert_eq!(image, Ok(None));
}

#[tokio::test]
async fn garbled_list_is_network_error() {
    // Arrange
    let app = spawn_app_logged_in().await;
    Mock::given(method("GET"))
        .and(path("/api/images/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&app.server)
        .await;

    // Act
    let outcome = app.core_client.list_images(&token(), no_cb).await.unwrap();

    // Assert
    assert!(outcome.unwrap_err().to_string().starts_with("Network error."));
}
