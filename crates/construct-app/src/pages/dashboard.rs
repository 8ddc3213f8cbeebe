use construct_client_core::DataApi;
use construct_shared::{
    const_config::client::CLIENT_DASHBOARD_RECENT_LIMIT,
    images::ImageSummary,
    payments::PaymentSummary,
    route::{NavigateTo, Route},
};

use super::{
    data_state::{PageData, Phase},
    format_amount, DisplayablePage, Screen,
};
use crate::DataShared;

/// Recent payments and images, each loaded on its own
#[derive(Debug, Default)]
pub struct UiDashboard {
    payments: PageData<Vec<PaymentSummary>>,
    images: PageData<Vec<ImageSummary>>,
}

impl DisplayablePage for UiDashboard {
    fn title_base() -> &'static str {
        "Dashboard"
    }

    fn update<A: DataApi>(&mut self, data_shared: &mut DataShared<A>) -> Option<NavigateTo> {
        let session = data_shared.client.session();
        self.payments.sync(&session, |token| {
            Ok(data_shared.api.list_payments(token, data_shared.wake_fn()))
        });
        self.images.sync(&session, |token| {
            Ok(data_shared.api.list_images(token, data_shared.wake_fn()))
        });
        self.payments.poll();
        self.images.poll();
        None
    }

    fn screen(&self) -> Screen {
        let mut screen = Screen::new(Self::title_base());
        screen
            .action("Initiate New Payment", Route::InitiatePayment)
            .action("Upload Construction Image", Route::UploadImage)
            .action("View All Payments", Route::Payments);

        screen.line("Recent Payments");
        match self.payments.phase() {
            Phase::Loading => {
                screen.line("  Loading dashboard data...");
            }
            Phase::Error(e) => {
                screen.line(format!("  Failed to load recent payments. {e}"));
            }
            Phase::Ready(payments) if payments.is_empty() => {
                screen.line("  No recent payments found.");
            }
            Phase::Ready(payments) => {
                for payment in payments.iter().take(CLIENT_DASHBOARD_RECENT_LIMIT) {
                    screen
                        .line(format!(
                            "  #{} {} | {} | {}",
                            payment.id,
                            format_amount(payment.amount),
                            payment.status,
                            payment.date
                        ))
                        .action(
                            format!("View Payment #{}", payment.id),
                            Route::PaymentDetail(payment.id.to_string()),
                        );
                }
            }
        }

        screen.line("Uploaded Images Summary");
        match self.images.phase() {
            Phase::Loading => {
                screen.line("  Loading dashboard data...");
            }
            Phase::Error(e) => {
                screen.line(format!("  Failed to load uploaded images. {e}"));
            }
            Phase::Ready(images) if images.is_empty() => {
                screen.line("  No images uploaded yet.");
            }
            Phase::Ready(images) => {
                for image in images.iter().take(CLIENT_DASHBOARD_RECENT_LIMIT) {
                    screen
                        .line(format!(
                            "  {} | {} | Progress: {} | {}",
                            image.name,
                            image.ai_analysis_status,
                            image.progress.as_deref().unwrap_or("N/A"),
                            image.upload_date
                        ))
                        .action(
                            format!("View Image {}", image.name),
                            Route::ImageDetail(image.id.to_string()),
                        );
                }
            }
        }
        screen
    }

    fn is_busy(&self) -> bool {
        self.payments.is_busy() || self.images.is_busy()
    }
}
