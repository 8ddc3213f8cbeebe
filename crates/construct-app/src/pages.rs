use std::fmt::{Debug, Display};

use construct_client_core::{DataApi, GuardDecision};
use construct_shared::route::{NavigateTo, Route};

use crate::DataShared;

pub mod dashboard;
pub mod data_state;
pub mod image_detail;
pub mod initiate_payment;
pub mod login;
pub mod payment_detail;
pub mod payments;
pub mod placeholder;
pub mod register;
pub mod upload_image;

use dashboard::UiDashboard;
use image_detail::UiImageDetail;
use initiate_payment::UiInitiatePayment;
use login::UiLogin;
use payment_detail::UiPaymentDetail;
use payments::UiPayments;
use placeholder::{UiLoading, UiNotFound};
use register::UiRegister;
use upload_image::UiUploadImage;

#[derive(Debug)]
pub enum UiPage {
    Loading(UiLoading),
    NotFound(UiNotFound),
    Login(UiLogin),
    Register(UiRegister),
    Dashboard(UiDashboard),
    Payments(UiPayments),
    PaymentDetail(UiPaymentDetail),
    InitiatePayment(UiInitiatePayment),
    UploadImage(UiUploadImage),
    ImageDetail(UiImageDetail),
}

/// Trait for types that can be treated as pages to display
pub trait DisplayablePage: Debug {
    /// Heading shown at the top of the page
    fn title_base() -> &'static str
    where
        Self: Sized;

    /// Advances any outstanding work of the page
    ///
    /// Returns where to go next when the page is done with
    fn update<A: DataApi>(&mut self, data_shared: &mut DataShared<A>) -> Option<NavigateTo>;

    /// Describes what the page currently shows
    fn screen(&self) -> Screen;

    /// True while the page waits on a response
    fn is_busy(&self) -> bool;

    /// A message that should outlive the page, taken at most once
    fn take_notice(&mut self) -> Option<String> {
        None
    }
}

macro_rules! do_on_ui_page {
    ($on:ident, $page:ident, $body:tt) => {
        match $on {
            UiPage::Loading($page) => $body,
            UiPage::NotFound($page) => $body,
            UiPage::Login($page) => $body,
            UiPage::Register($page) => $body,
            UiPage::Dashboard($page) => $body,
            UiPage::Payments($page) => $body,
            UiPage::PaymentDetail($page) => $body,
            UiPage::InitiatePayment($page) => $body,
            UiPage::UploadImage($page) => $body,
            UiPage::ImageDetail($page) => $body,
        }
    };
}

impl UiPage {
    #[tracing::instrument(ret)]
    pub fn from_decision(decision: &GuardDecision) -> Self {
        match decision {
            GuardDecision::Loading => Self::Loading(UiLoading),
            GuardDecision::NotFound { path, escape } => {
                Self::NotFound(UiNotFound::new(path.clone(), escape.clone()))
            }
            GuardDecision::Render(route) => Self::for_route(route),
            GuardDecision::Redirect(route) => {
                // `resolve` only hands back settled decisions
                construct_shared::debug_panic!("unresolved redirect to {route}");
                Self::for_route(route)
            }
        }
    }

    fn for_route(route: &Route) -> Self {
        match route {
            Route::Login => Self::Login(UiLogin::default()),
            Route::Register => Self::Register(UiRegister::default()),
            Route::Dashboard => Self::Dashboard(UiDashboard::default()),
            Route::Payments => Self::Payments(UiPayments::default()),
            Route::PaymentDetail(raw_id) => Self::PaymentDetail(UiPaymentDetail::new(raw_id)),
            Route::InitiatePayment => Self::InitiatePayment(UiInitiatePayment::default()),
            Route::UploadImage => Self::UploadImage(UiUploadImage::default()),
            Route::ImageDetail(raw_id) => Self::ImageDetail(UiImageDetail::new(raw_id)),
            Route::Root | Route::NotFound(_) => {
                Self::NotFound(UiNotFound::new(route.to_string(), Route::Root))
            }
        }
    }

    pub fn update<A: DataApi>(&mut self, data_shared: &mut DataShared<A>) -> Option<NavigateTo> {
        do_on_ui_page!(self, page, { page.update(data_shared) })
    }

    pub fn screen(&self) -> Screen {
        do_on_ui_page!(self, page, { page.screen() })
    }

    pub fn is_busy(&self) -> bool {
        do_on_ui_page!(self, page, { page.is_busy() })
    }

    pub fn take_notice(&mut self) -> Option<String> {
        do_on_ui_page!(self, page, { page.take_notice() })
    }
}

pub(crate) fn format_amount(amount: f64) -> String {
    format!("{amount:.2}")
}

/// Text description of a page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Screen {
    pub heading: String,
    pub lines: Vec<String>,
    pub error: Option<String>,
    pub actions: Vec<Action>,
}

/// A navigation the user can take from a page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Action {
    pub label: String,
    pub route: Route,
}

impl Screen {
    pub fn new<S: Into<String>>(heading: S) -> Self {
        Self {
            heading: heading.into(),
            ..Default::default()
        }
    }

    pub fn line<S: Into<String>>(&mut self, line: S) -> &mut Self {
        self.lines.push(line.into());
        self
    }

    pub fn error<S: Into<String>>(&mut self, error: S) -> &mut Self {
        self.error = Some(error.into());
        self
    }

    pub fn action<S: Into<String>>(&mut self, label: S, route: Route) -> &mut Self {
        self.actions.push(Action {
            label: label.into(),
            route,
        });
        self
    }

    pub fn find_action(&self, label: &str) -> Option<&Action> {
        self.actions.iter().find(|action| action.label == label)
    }
}

impl Display for Screen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{}", self.heading)?;
        writeln!(f, "{}", "=".repeat(self.heading.chars().count()))?;
        for line in &self.lines {
            writeln!(f, "{line}")?;
        }
        if let Some(error) = &self.error {
            writeln!(f, "Error: {error}")?;
        }
        if !self.actions.is_empty() {
            writeln!(f)?;
            for Action { label, route } in &self.actions {
                writeln!(f, "  [{label}] {route}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn screen_text_lists_error_and_actions() {
        let mut screen = Screen::new("Payment Details");
        screen
            .line("Payment not found.")
            .error("boom")
            .action("Back to Payments", Route::Payments);

        let text = screen.to_string();

        assert_eq!(
            text,
            "Payment Details\n===============\nPayment not found.\nError: boom\n\n  [Back to Payments] /payments\n"
        );
    }

    #[test]
    fn rendered_routes_get_their_page() {
        let page = UiPage::from_decision(&GuardDecision::Render(Route::PaymentDetail("2".into())));
        assert!(matches!(page, UiPage::PaymentDetail(_)));
    }
}
