use construct_client_core::{resolve, Client, DataApi, GuardDecision, UiCallBack};
use construct_shared::{
    req_args::{api::InitiatePaymentReqArgs, LoginReqArgs, RegisterReqArgs},
    route::{NavigateTo, Route},
};
use futures::{channel::mpsc, StreamExt as _};
use tracing::{debug, info, instrument};

use crate::pages::{Screen, UiPage};

/// Everything pages need to do their work
#[derive(Debug)]
pub struct DataShared<A> {
    pub client: Client,
    pub api: A,
    wake_tx: mpsc::UnboundedSender<()>,
}

impl<A: DataApi> DataShared<A> {
    /// Callback for requests, wakes [`App::settle`] when a response lands
    pub fn wake_fn(&self) -> impl UiCallBack {
        let tx = self.wake_tx.clone();
        move || {
            if tx.unbounded_send(()).is_err() {
                debug!("app gone, nobody to wake");
            }
        }
    }
}

/// The navigation loop: owns the current route and its page
#[derive(Debug)]
pub struct App<A> {
    data_shared: DataShared<A>,
    route: Route,
    decision: GuardDecision,
    page: UiPage,
    notice: Option<String>,
    wake_rx: mpsc::UnboundedReceiver<()>,
}

impl<A: DataApi> App<A> {
    /// Starts at `/` which sends the user wherever the session allows
    pub fn new(client: Client, api: A) -> Self {
        let (wake_tx, wake_rx) = mpsc::unbounded();
        let mut result = Self {
            data_shared: DataShared {
                client,
                api,
                wake_tx,
            },
            route: Route::Root,
            page: UiPage::Loading(Default::default()),
            decision: GuardDecision::Loading,
            notice: None,
            wake_rx,
        };
        result.navigate(Route::Root);
        result
    }

    pub fn client(&self) -> &Client {
        &self.data_shared.client
    }

    pub fn route(&self) -> &Route {
        &self.route
    }

    pub fn page(&self) -> &UiPage {
        &self.page
    }

    #[instrument(skip(self))]
    pub fn navigate(&mut self, route: Route) {
        self.notice = None;
        self.switch_to(route);
        self.update();
    }

    fn switch_to(&mut self, route: Route) {
        let decision = resolve(route.clone(), &self.data_shared.client.session());
        info!(%route, ?decision, "navigating");
        self.page = UiPage::from_decision(&decision);
        self.route = match &decision {
            GuardDecision::Render(settled) => settled.clone(),
            _ => route,
        };
        self.decision = decision;
    }

    /// Brings the page up to date with the session and any finished requests
    ///
    /// Re-checks the guard first so a session change (for example a logout)
    /// moves the user off a page they may no longer see.
    fn update(&mut self) {
        // Wakes that arrived so far are covered by the poll below
        while let Ok(Some(())) = self.wake_rx.try_next() {}
        loop {
            let decision = resolve(self.route.clone(), &self.data_shared.client.session());
            let waits_on_own_request = decision == GuardDecision::Loading && self.page.is_busy();
            if decision != self.decision && !waits_on_own_request {
                debug!(?decision, "guard decision changed");
                if let GuardDecision::Render(settled) = &decision {
                    self.route = settled.clone();
                }
                self.page = UiPage::from_decision(&decision);
                self.decision = decision;
            }
            let Some(NavigateTo(route)) = self.page.update(&mut self.data_shared) else {
                break;
            };
            self.notice = self.page.take_notice();
            self.switch_to(route);
        }
    }

    /// Waits until the page has no request outstanding
    pub async fn settle(&mut self) {
        self.update();
        while self.page.is_busy() {
            if self.wake_rx.next().await.is_none() {
                break;
            }
            self.update();
        }
    }

    /// What the current page shows, with the notice left by the page that
    /// sent the user here
    pub fn screen(&self) -> Screen {
        let mut screen = self.page.screen();
        if let Some(notice) = &self.notice {
            screen.lines.insert(0, notice.clone());
        }
        screen
    }

    pub fn logout(&mut self) {
        let NavigateTo(route) = self.data_shared.client.logout();
        self.navigate(route);
    }

    /// Submits the login form, going to the login page first
    ///
    /// Returns `false` if the guard did not allow the login page
    pub fn submit_login(&mut self, args: LoginReqArgs) -> bool {
        self.navigate(Route::Login);
        let UiPage::Login(page) = &mut self.page else {
            return false;
        };
        page.submit(args, &self.data_shared);
        true
    }

    pub fn submit_register(&mut self, args: RegisterReqArgs) -> bool {
        self.navigate(Route::Register);
        let UiPage::Register(page) = &mut self.page else {
            return false;
        };
        page.submit(args, &self.data_shared);
        true
    }

    pub fn submit_payment(
        &mut self,
        amount: &str,
        method: Option<construct_shared::payments::PaymentMethod>,
    ) -> bool {
        self.navigate(Route::InitiatePayment);
        let UiPage::InitiatePayment(page) = &mut self.page else {
            return false;
        };
        page.submit(
            InitiatePaymentReqArgs::try_new(amount, method),
            &self.data_shared,
        );
        true
    }

    pub fn submit_image(&mut self, selection: Option<(String, Vec<u8>)>) -> bool {
        self.navigate(Route::UploadImage);
        let UiPage::UploadImage(page) = &mut self.page else {
            return false;
        };
        page.select(selection);
        page.upload(&self.data_shared);
        true
    }
}
