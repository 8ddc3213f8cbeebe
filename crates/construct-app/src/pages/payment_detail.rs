use construct_client_core::DataApi;
use construct_shared::{
    errors::FetchError,
    payments::{PaymentDetail, PaymentId},
    route::{NavigateTo, Route},
};

use super::{
    data_state::{PageData, Phase},
    format_amount, DisplayablePage, Screen,
};
use crate::DataShared;

#[derive(Debug)]
pub struct UiPaymentDetail {
    raw_id: String,
    payment: PageData<Option<PaymentDetail>>,
}

impl UiPaymentDetail {
    pub fn new(raw_id: &str) -> Self {
        Self {
            raw_id: raw_id.to_string(),
            payment: Default::default(),
        }
    }
}

impl DisplayablePage for UiPaymentDetail {
    fn title_base() -> &'static str {
        "Payment Details"
    }

    fn update<A: DataApi>(&mut self, data_shared: &mut DataShared<A>) -> Option<NavigateTo> {
        let session = data_shared.client.session();
        let id = self.raw_id.parse::<PaymentId>();
        self.payment.sync(&session, |token| {
            let id = id.map_err(|_| FetchError::InvalidId("Payment"))?;
            Ok(data_shared.api.get_payment(token, id, data_shared.wake_fn()))
        });
        self.payment.poll();
        None
    }

    fn screen(&self) -> Screen {
        let mut screen = Screen::new(Self::title_base());
        match self.payment.phase() {
            Phase::Loading => {
                screen.line("Loading payment details...");
            }
            Phase::Error(e) => {
                screen.error(e);
            }
            Phase::Ready(None) => {
                screen.line("Payment not found.");
            }
            Phase::Ready(Some(payment)) => describe_payment(&mut screen, payment),
        }
        screen.action("Back to Payments", Route::Payments);
        screen
    }

    fn is_busy(&self) -> bool {
        self.payment.is_busy()
    }
}

fn describe_payment(screen: &mut Screen, payment: &PaymentDetail) {
    screen.heading = format!("Payment #{}", payment.id);
    screen
        .line(format!(
            "Amount: {} {}",
            format_amount(payment.amount),
            payment.currency.as_deref().unwrap_or_default()
        ))
        .line(format!("Status: {}", payment.status))
        .line(format!("Method: {}", payment.method))
        .line(format!("Date: {}", payment.date))
        .line(format!("Description: {}", payment.description))
        .line(format!(
            "Paystack Reference: {}",
            payment.reference.as_deref().unwrap_or("N/A")
        ));
    if let Some(project) = &payment.project {
        screen.line(format!("Project: {} (#{})", project.name, project.id));
    }
    if let Some(user) = &payment.user {
        screen.line(format!("Requested by: {}", user.username));
    }
    if payment.status.is_pending() {
        screen.line(format!(
            "Payment #{} is pending, complete it via Paystack.",
            payment.id
        ));
    }
    screen.line("Transactions");
    if payment.transactions.is_empty() {
        screen.line("  No transactions found for this payment.");
    }
    for txn in &payment.transactions {
        let charge = txn
            .charge_id
            .as_deref()
            .map(|charge| format!(" | Charge: {charge}"))
            .unwrap_or_default();
        screen.line(format!(
            "  #{} {} | {} | {} | {}{charge}",
            txn.id,
            txn.kind,
            format_amount(txn.amount),
            txn.date,
            txn.status
        ));
    }
}
