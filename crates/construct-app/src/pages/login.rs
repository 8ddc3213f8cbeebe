use construct_client_core::{AuthReceiver, DataApi};
use construct_shared::{
    internal_error,
    req_args::LoginReqArgs,
    route::{NavigateTo, Route},
};
use std::fmt::Debug;
use tracing::{error, info};

use super::{DisplayablePage, Screen};
use crate::DataShared;

#[derive(Debug, Default)]
pub struct UiLogin {
    login_attempt_status: AttemptStatus,
}

/// Progress of a login or registration form
#[derive(Default)]
pub(crate) enum AttemptStatus {
    #[default]
    NotAttempted,
    AwaitingResponse(AuthReceiver),
    Failed(String),
    Success,
}

impl Debug for AttemptStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotAttempted => write!(f, "NotAttempted"),
            Self::AwaitingResponse(_) => write!(f, "AwaitingResponse"),
            Self::Failed(e) => f.debug_tuple("Failed").field(e).finish(),
            Self::Success => write!(f, "Success"),
        }
    }
}

impl AttemptStatus {
    pub(crate) fn is_allowed_to_submit(&self) -> bool {
        match self {
            AttemptStatus::NotAttempted | AttemptStatus::Failed(_) => true,
            AttemptStatus::AwaitingResponse(_) | AttemptStatus::Success => false,
        }
    }

    /// Picks up the outcome once it arrives
    pub(crate) fn check(&mut self) -> Option<NavigateTo> {
        let AttemptStatus::AwaitingResponse(rx) = self else {
            return None;
        };
        match rx.try_recv() {
            Ok(Some(Ok(navigate_to))) => {
                info!("auth attempt succeeded");
                *self = AttemptStatus::Success;
                Some(navigate_to)
            }
            Ok(Some(Err(e))) => {
                info!("error returned from client-core: {e:?}");
                *self = AttemptStatus::Failed(e.to_string());
                None
            }
            Ok(None) => None,
            Err(e) => {
                error!("Error receiving on channel. Canceled: {e:?}");
                *self = AttemptStatus::Failed(internal_error!(e));
                None
            }
        }
    }

    pub(crate) fn describe(&self, screen: &mut Screen, waiting_msg: &str) {
        match self {
            AttemptStatus::NotAttempted | AttemptStatus::Success => {}
            AttemptStatus::AwaitingResponse(_) => {
                screen.line(waiting_msg);
            }
            AttemptStatus::Failed(e) => {
                screen.error(e.as_str());
            }
        }
    }
}

impl UiLogin {
    pub fn submit<A: DataApi>(&mut self, args: LoginReqArgs, data_shared: &DataShared<A>) {
        if !self.login_attempt_status.is_allowed_to_submit() {
            info!("login already in progress, ignoring submit");
            return;
        }
        let rx = data_shared.client.login(args, data_shared.wake_fn());
        self.login_attempt_status = AttemptStatus::AwaitingResponse(rx);
    }
}

impl DisplayablePage for UiLogin {
    fn title_base() -> &'static str {
        "Login"
    }

    fn update<A: DataApi>(&mut self, _: &mut DataShared<A>) -> Option<NavigateTo> {
        self.login_attempt_status.check()
    }

    fn screen(&self) -> Screen {
        let mut screen = Screen::new(Self::title_base());
        self.login_attempt_status
            .describe(&mut screen, "Logging in...");
        screen.action("Don't have an account? Register here", Route::Register);
        screen
    }

    fn is_busy(&self) -> bool {
        matches!(
            self.login_attempt_status,
            AttemptStatus::AwaitingResponse(_)
        )
    }
}
