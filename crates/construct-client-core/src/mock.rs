//! In-process stand in for the payment and image endpoints
//!
//! Serves a fixed set of records and answers immediately. Writes are kept for
//! the lifetime of the value (and its clones) so that a created record can be
//! read back.

use std::sync::{Arc, Mutex};

use construct_shared::{
    errors::FetchError,
    images::{AnalysisStatus, ImageDetail, ImageId, ImageSummary},
    payments::{
        PaymentDetail, PaymentId, PaymentInitiated, PaymentStatus, PaymentSummary, ProjectRef,
        Transaction, UserRef,
    },
    req_args::api::{InitiatePaymentReqArgs, UploadImageReqArgs},
    token::AuthToken,
};
use futures::channel::oneshot;
use tracing::info;

use crate::{client::send_result, data_api::FetchReceiver, DataApi, UiCallBack};

const FIRST_CREATED_PAYMENT_ID: u64 = 100;
const FIRST_CREATED_IMAGE_ID: u64 = 1004;
const COMPLETED_ANALYSIS_PROGRESS: u8 = 70;

#[derive(Debug, Clone)]
pub struct MockApi {
    inner: Arc<Mutex<MockState>>,
}

#[derive(Debug)]
struct MockState {
    payments: Vec<PaymentDetail>,
    images: Vec<ImageDetail>,
    /// Uploads whose analysis finishes the next time they are read
    analysing: Vec<ImageId>,
    next_payment_id: u64,
    next_image_id: u64,
}

impl Default for MockApi {
    fn default() -> Self {
        Self {
            inner: Arc::new(Mutex::new(MockState {
                payments: fixture_payments(),
                images: fixture_images(),
                analysing: Vec::new(),
                next_payment_id: FIRST_CREATED_PAYMENT_ID,
                next_image_id: FIRST_CREATED_IMAGE_ID,
            })),
        }
    }
}

impl MockApi {
    pub fn new() -> Self {
        Self::default()
    }

    fn with_state<T>(
        &self,
        token: &AuthToken,
        f: impl FnOnce(&mut MockState) -> Result<T, FetchError>,
    ) -> Result<T, FetchError> {
        if token.as_str().is_empty() {
            return Err(FetchError::MissingToken);
        }
        f(&mut self.inner.lock().expect("mutex poisoned"))
    }
}

impl MockState {
    fn finish_analysis(&mut self) {
        for id in self.analysing.drain(..) {
            if let Some(image) = self.images.iter_mut().find(|image| image.id == id) {
                image.ai_analysis_status = AnalysisStatus::Completed;
                image.detected_elements_json = Some(
                    serde_json::json!({
                        "elements": [
                            {"type": "wall", "confidence": 0.95},
                            {"type": "roof_frame", "confidence": 0.88}
                        ]
                    })
                    .to_string(),
                );
                image.verified_progress_percentage = Some(COMPLETED_ANALYSIS_PROGRESS);
            }
        }
    }
}

fn respond<T: std::fmt::Debug, F: UiCallBack>(
    result: Result<T, FetchError>,
    ui_notify: F,
) -> FetchReceiver<T> {
    let (tx, rx) = oneshot::channel();
    send_result(tx, result);
    ui_notify();
    rx
}

fn today() -> String {
    chrono::Utc::now().date_naive().to_string()
}

impl DataApi for MockApi {
    #[tracing::instrument(skip(token, ui_notify))]
    fn list_payments<F: UiCallBack>(
        &self,
        token: &AuthToken,
        ui_notify: F,
    ) -> FetchReceiver<Vec<PaymentSummary>> {
        let result = self.with_state(token, |state| {
            Ok(state.payments.iter().map(PaymentSummary::from).collect())
        });
        respond(result, ui_notify)
    }

    #[tracing::instrument(skip(token, ui_notify))]
    fn get_payment<F: UiCallBack>(
        &self,
        token: &AuthToken,
        id: PaymentId,
        ui_notify: F,
    ) -> FetchReceiver<Option<PaymentDetail>> {
        let result = self.with_state(token, |state| {
            Ok(state.payments.iter().find(|p| p.id == id).cloned())
        });
        respond(result, ui_notify)
    }

    #[tracing::instrument(skip(token, ui_notify))]
    fn initiate_payment<F: UiCallBack>(
        &self,
        token: &AuthToken,
        args: &InitiatePaymentReqArgs,
        ui_notify: F,
    ) -> FetchReceiver<PaymentInitiated> {
        let result = self.with_state(token, |state| {
            let id = PaymentId::new(state.next_payment_id);
            state.next_payment_id += 1;
            let date = today();
            state.payments.push(PaymentDetail {
                id,
                amount: args.amount,
                method: args.method.to_string(),
                status: PaymentStatus::Pending,
                date: date.clone(),
                description: format!("Payment request #{id}."),
                reference: None,
                currency: Some("NGN".to_string()),
                transactions: Vec::new(),
                project: None,
                user: None,
            });
            info!(%id, "mock payment created");
            Ok(PaymentInitiated {
                id,
                amount: args.amount,
                method: args.method.to_string(),
                status: PaymentStatus::Pending,
                date,
                authorization_url: Some(format!("https://paystack.com/pay/mock_auth_url_{id}")),
                message: Some(
                    "Payment initiation successful. Redirecting to Paystack...".to_string(),
                ),
            })
        });
        respond(result, ui_notify)
    }

    #[tracing::instrument(skip(token, ui_notify))]
    fn list_images<F: UiCallBack>(
        &self,
        token: &AuthToken,
        ui_notify: F,
    ) -> FetchReceiver<Vec<ImageSummary>> {
        let result = self.with_state(token, |state| {
            state.finish_analysis();
            Ok(state.images.iter().map(ImageSummary::from).collect())
        });
        respond(result, ui_notify)
    }

    #[tracing::instrument(skip(token, ui_notify))]
    fn get_image<F: UiCallBack>(
        &self,
        token: &AuthToken,
        id: ImageId,
        ui_notify: F,
    ) -> FetchReceiver<Option<ImageDetail>> {
        let result = self.with_state(token, |state| {
            state.finish_analysis();
            Ok(state.images.iter().find(|image| image.id == id).cloned())
        });
        respond(result, ui_notify)
    }

    #[tracing::instrument(skip(token, ui_notify))]
    fn upload_image<F: UiCallBack>(
        &self,
        token: &AuthToken,
        args: UploadImageReqArgs,
        ui_notify: F,
    ) -> FetchReceiver<ImageDetail> {
        let result = self.with_state(token, |state| {
            let id = ImageId::new(state.next_image_id);
            state.next_image_id += 1;
            let image = ImageDetail {
                id,
                url: format!("mock://images/{id}/{}", args.file_name),
                name: args.file_name,
                ai_analysis_status: AnalysisStatus::Processing,
                upload_date: today(),
                detected_elements_json: None,
                verified_progress_percentage: None,
                project_id: None,
            };
            state.images.insert(0, image.clone());
            state.analysing.push(id);
            info!(%id, "mock image stored, analysis pending");
            Ok(image)
        });
        respond(result, ui_notify)
    }
}

fn fixture_payments() -> Vec<PaymentDetail> {
    let project = Some(ProjectRef {
        id: 501.into(),
        name: "Grand Mall Expansion".to_string(),
    });
    let user = Some(UserRef {
        id: 1.into(),
        username: "john.doe".to_string(),
    });
    let transaction = |id: u64, kind: &str, amount: f64, date: &str, status: &str| Transaction {
        id: id.into(),
        kind: kind.to_string(),
        amount,
        date: date.to_string(),
        status: status.to_string(),
        charge_id: None,
    };
    let payment = |id: u64,
                   amount: f64,
                   method: &str,
                   status: PaymentStatus,
                   date: &str,
                   reference: &str| PaymentDetail {
        id: id.into(),
        amount,
        method: method.to_string(),
        status,
        date: date.to_string(),
        description: format!("Payment for Phase 2 construction of project #{id}."),
        reference: Some(reference.to_string()),
        currency: Some("NGN".to_string()),
        transactions: vec![transaction(
            id * 100 + 1,
            "Initiated",
            amount,
            &format!("{date} 10:00"),
            "Success",
        )],
        project: project.clone(),
        user: user.clone(),
    };

    let mut first = payment(
        1,
        5000.00,
        "Credit Card",
        PaymentStatus::Completed,
        "2025-06-20",
        "PS_REF_12345",
    );
    first.description = "Final payment for office building renovation.".to_string();
    first.transactions = vec![
        transaction(101, "Initiated", 5000.00, "2025-06-20 09:30", "Success"),
        Transaction {
            charge_id: Some("CHG_ABC456".to_string()),
            ..transaction(102, "Verification", 5000.00, "2025-06-20 09:35", "Success")
        },
    ];

    let mut third = payment(
        3,
        2500.00,
        "Mobile Money",
        PaymentStatus::Failed,
        "2025-06-28",
        "PS_REF_11223",
    );
    third.description = "Initial deposit for warehouse construction.".to_string();
    third.transactions = vec![transaction(
        301,
        "Initiated",
        2500.00,
        "2025-06-28 14:00",
        "Failed",
    )];

    vec![
        first,
        payment(
            2,
            7500.50,
            "Bank Transfer",
            PaymentStatus::Pending,
            "2025-06-25",
            "PS_REF_67890",
        ),
        third,
        payment(
            4,
            12000.00,
            "Credit Card",
            PaymentStatus::Completed,
            "2025-06-15",
            "PS_REF_44556",
        ),
        payment(
            5,
            900.75,
            "Debit Card",
            PaymentStatus::Completed,
            "2025-06-10",
            "PS_REF_77889",
        ),
    ]
}

fn fixture_images() -> Vec<ImageDetail> {
    let site_elements = serde_json::json!({
        "elements": [
            {"label": "Wall Structure", "confidence": 0.98, "bbox": [50, 50, 200, 300]},
            {"label": "Roof Truss", "confidence": 0.92, "bbox": [250, 100, 400, 250]},
            {"label": "Foundation", "confidence": 0.85, "bbox": [10, 350, 580, 390]},
            {"label": "Scaffolding", "confidence": 0.70, "bbox": [450, 80, 550, 380]}
        ],
        "overall_assessment": "Good progress on structural elements."
    });
    let roof_elements = serde_json::json!({
        "elements": [
            {"label": "Roof Tiles", "confidence": 0.99, "bbox": [10, 10, 590, 300]},
            {"label": "Chimney", "confidence": 0.90, "bbox": [400, 50, 500, 150]}
        ],
        "overall_assessment": "Roofing completed."
    });
    vec![
        ImageDetail {
            id: 1001.into(),
            name: "Site_Entry_01.jpg".to_string(),
            url: "https://placehold.co/600x400/000/FFF?text=Image+1001".to_string(),
            ai_analysis_status: AnalysisStatus::Completed,
            upload_date: "2025-06-20".to_string(),
            detected_elements_json: Some(site_elements.to_string()),
            verified_progress_percentage: Some(75),
            project_id: Some(123.into()),
        },
        ImageDetail {
            id: 1002.into(),
            name: "Foundation_View.png".to_string(),
            url: "https://placehold.co/600x400/000/FFF?text=Processing...".to_string(),
            ai_analysis_status: AnalysisStatus::Processing,
            upload_date: "2025-06-22".to_string(),
            detected_elements_json: None,
            verified_progress_percentage: None,
            project_id: Some(123.into()),
        },
        ImageDetail {
            id: 1003.into(),
            name: "Roof_Progress.jpeg".to_string(),
            url: "https://placehold.co/600x400/000/FFF?text=Roof+Done".to_string(),
            ai_analysis_status: AnalysisStatus::Completed,
            upload_date: "2025-06-25".to_string(),
            detected_elements_json: Some(roof_elements.to_string()),
            verified_progress_percentage: Some(95),
            project_id: Some(123.into()),
        },
    ]
}
