use construct_client_core::DataApi;
use construct_shared::{
    errors::{FetchError, ValidationError},
    payments::{PaymentInitiated, PaymentMethod},
    req_args::api::InitiatePaymentReqArgs,
    route::{NavigateTo, Route},
};
use strum::IntoEnumIterator as _;
use tracing::info;

use super::{
    data_state::{PageData, Phase},
    format_amount, DisplayablePage, Screen,
};
use crate::DataShared;

#[derive(Debug, Default)]
pub struct UiInitiatePayment {
    submission: PageData<PaymentInitiated>,
    is_submitted: bool,
    notice: Option<String>,
}

impl UiInitiatePayment {
    /// Sends the request if the form passed validation
    pub fn submit<A: DataApi>(
        &mut self,
        args: Result<InitiatePaymentReqArgs, ValidationError>,
        data_shared: &DataShared<A>,
    ) {
        if self.submission.is_busy() {
            info!("payment initiation already in progress, ignoring submit");
            return;
        }
        self.is_submitted = true;
        let args = match args {
            Ok(args) => args,
            Err(e) => {
                self.submission.fail(e.into());
                return;
            }
        };
        let Some(token) = data_shared.client.token() else {
            self.submission.fail(FetchError::MissingToken);
            return;
        };
        let rx = data_shared
            .api
            .initiate_payment(&token, &args, data_shared.wake_fn());
        self.submission.start(rx);
    }
}

impl DisplayablePage for UiInitiatePayment {
    fn title_base() -> &'static str {
        "New Payment Request"
    }

    fn update<A: DataApi>(&mut self, _: &mut DataShared<A>) -> Option<NavigateTo> {
        if !self.submission.poll() {
            return None;
        }
        let Phase::Ready(initiated) = self.submission.phase() else {
            return None;
        };
        info!(id = %initiated.id, "payment initiated");
        let message = initiated
            .message
            .clone()
            .unwrap_or_else(|| format!("Payment #{} initiated.", initiated.id));
        self.notice = Some(match &initiated.authorization_url {
            Some(url) => format!("{message} Complete the payment at: {url}"),
            None => message,
        });
        Some(NavigateTo(Route::Dashboard))
    }

    fn screen(&self) -> Screen {
        let mut screen = Screen::new(Self::title_base());
        let methods: Vec<String> = PaymentMethod::iter().map(|m| m.to_string()).collect();
        screen
            .line("Amount (NGN), e.g. 15000.00")
            .line(format!("Payment Method: {}", methods.join(", ")));
        if self.is_submitted {
            match self.submission.phase() {
                Phase::Loading => {
                    screen.line("Initiating...");
                }
                Phase::Error(e) => {
                    screen.error(e);
                }
                Phase::Ready(initiated) => {
                    screen.line(format!(
                        "Payment #{} for {} is {}",
                        initiated.id,
                        format_amount(initiated.amount),
                        initiated.status
                    ));
                }
            }
        }
        screen.action("Back to Dashboard", Route::Dashboard);
        screen
    }

    fn is_busy(&self) -> bool {
        self.submission.is_busy()
    }

    fn take_notice(&mut self) -> Option<String> {
        self.notice.take()
    }
}
