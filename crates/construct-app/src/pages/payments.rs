use construct_client_core::DataApi;
use construct_shared::{
    payments::PaymentSummary,
    route::{NavigateTo, Route},
};

use super::{
    data_state::{PageData, Phase},
    format_amount, DisplayablePage, Screen,
};
use crate::DataShared;

#[derive(Debug, Default)]
pub struct UiPayments {
    payments: PageData<Vec<PaymentSummary>>,
}

impl DisplayablePage for UiPayments {
    fn title_base() -> &'static str {
        "My Payments"
    }

    fn update<A: DataApi>(&mut self, data_shared: &mut DataShared<A>) -> Option<NavigateTo> {
        let session = data_shared.client.session();
        self.payments.sync(&session, |token| {
            Ok(data_shared.api.list_payments(token, data_shared.wake_fn()))
        });
        self.payments.poll();
        None
    }

    fn screen(&self) -> Screen {
        let mut screen = Screen::new(Self::title_base());
        match self.payments.phase() {
            Phase::Loading => {
                screen.line("Loading payments data...");
            }
            Phase::Error(e) => {
                screen.error(e);
            }
            Phase::Ready(payments) if payments.is_empty() => {
                screen.line("No payments found. Initiate a new payment from the Dashboard!");
            }
            Phase::Ready(payments) => {
                for payment in payments {
                    screen
                        .line(format!(
                            "#{} {} via {} | {} | {} | Ref: {}",
                            payment.id,
                            format_amount(payment.amount),
                            payment.method,
                            payment.status,
                            payment.date,
                            payment.reference.as_deref().unwrap_or("N/A"),
                        ))
                        .action(
                            format!("View Payment #{}", payment.id),
                            Route::PaymentDetail(payment.id.to_string()),
                        );
                }
            }
        }
        screen.action("Initiate New Payment", Route::InitiatePayment);
        screen
    }

    fn is_busy(&self) -> bool {
        self.payments.is_busy()
    }
}
