//! Pages the guard shows when there is nothing to render yet or at all

use construct_client_core::DataApi;
use construct_shared::route::{NavigateTo, Route};

use super::{DisplayablePage, Screen};
use crate::DataShared;

/// Shown until the session has been established
#[derive(Debug, Default)]
pub struct UiLoading;

impl DisplayablePage for UiLoading {
    fn title_base() -> &'static str {
        "Loading"
    }

    fn update<A: DataApi>(&mut self, _: &mut DataShared<A>) -> Option<NavigateTo> {
        None
    }

    fn screen(&self) -> Screen {
        let mut screen = Screen::new(Self::title_base());
        screen.line("Loading application...");
        screen
    }

    fn is_busy(&self) -> bool {
        false
    }
}

/// Terminal page for paths that match nothing, only left by the user
#[derive(Debug)]
pub struct UiNotFound {
    path: String,
    escape: Route,
}

impl UiNotFound {
    pub fn new(path: String, escape: Route) -> Self {
        Self { path, escape }
    }
}

impl DisplayablePage for UiNotFound {
    fn title_base() -> &'static str {
        "404 - Page Not Found"
    }

    fn update<A: DataApi>(&mut self, _: &mut DataShared<A>) -> Option<NavigateTo> {
        None
    }

    fn screen(&self) -> Screen {
        let mut screen = Screen::new(Self::title_base());
        screen
            .line(format!("Nothing exists at {:?}.", self.path))
            .action("Go to Home", self.escape.clone());
        screen
    }

    fn is_busy(&self) -> bool {
        false
    }
}
