use construct_client_core::DataApi;
use construct_shared::{
    req_args::RegisterReqArgs,
    route::{NavigateTo, Route},
};
use tracing::info;

use super::{login::AttemptStatus, DisplayablePage, Screen};
use crate::DataShared;

#[derive(Debug, Default)]
pub struct UiRegister {
    attempt_status: AttemptStatus,
}

impl UiRegister {
    pub fn submit<A: DataApi>(&mut self, args: RegisterReqArgs, data_shared: &DataShared<A>) {
        if !self.attempt_status.is_allowed_to_submit() {
            info!("registration already in progress, ignoring submit");
            return;
        }
        let rx = data_shared.client.register(args, data_shared.wake_fn());
        self.attempt_status = AttemptStatus::AwaitingResponse(rx);
    }
}

impl DisplayablePage for UiRegister {
    fn title_base() -> &'static str {
        "Register"
    }

    fn update<A: DataApi>(&mut self, _: &mut DataShared<A>) -> Option<NavigateTo> {
        self.attempt_status.check()
    }

    fn screen(&self) -> Screen {
        let mut screen = Screen::new(Self::title_base());
        self.attempt_status.describe(&mut screen, "Registering...");
        screen.action("Already have an account? Login here", Route::Login);
        screen
    }

    fn is_busy(&self) -> bool {
        matches!(self.attempt_status, AttemptStatus::AwaitingResponse(_))
    }
}
