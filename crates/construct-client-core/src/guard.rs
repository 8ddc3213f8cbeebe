//! Decides what a navigation shows given the current session

use construct_shared::{
    const_config::client::CLIENT_MAX_REDIRECTS, debug_panic, route::Route, session::Session,
};
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    /// The session is still being established, show a placeholder
    Loading,
    Redirect(Route),
    Render(Route),
    /// Nothing matched, only leaves through `escape`
    NotFound { path: String, escape: Route },
}

/// Pure decision for a single requested route
pub fn guard(route: &Route, session: &Session) -> GuardDecision {
    if session.is_loading {
        return GuardDecision::Loading;
    }
    let has_token = session.is_authenticated();
    match route {
        Route::Root if has_token => GuardDecision::Redirect(Route::Dashboard),
        Route::Root => GuardDecision::Redirect(Route::Login),
        Route::NotFound(path) => GuardDecision::NotFound {
            path: path.clone(),
            escape: Route::Root,
        },
        route if route.requires_auth() && !has_token => GuardDecision::Redirect(Route::Login),
        route if route.is_auth_only() && has_token => GuardDecision::Redirect(Route::Dashboard),
        route => GuardDecision::Render(route.clone()),
    }
}

/// Follows redirects until the guard settles on something to show
#[tracing::instrument(ret, skip(session))]
pub fn resolve(route: Route, session: &Session) -> GuardDecision {
    let mut current = route;
    for _ in 0..CLIENT_MAX_REDIRECTS {
        match guard(&current, session) {
            GuardDecision::Redirect(next) => current = next,
            decision => return decision,
        }
    }
    debug_panic!("redirects did not settle, stopped at {current}");
    warn!(%current, "redirect limit reached");
    GuardDecision::NotFound {
        path: current.to_string(),
        escape: Route::Root,
    }
}
