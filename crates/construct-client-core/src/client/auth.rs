//! Login, registration and logout

use construct_shared::{
    const_config::{
        error::{ERR_LOGIN_FALLBACK, ERR_LOGIN_FIELDS, ERR_REGISTER_FALLBACK, ERR_REGISTER_FIELDS},
        path::{PathSpec, PATH_LOGIN, PATH_REGISTER},
    },
    errors::ValidationError,
    req_args::{LoginReqArgs, RegisterReqArgs},
    route::{NavigateTo, Route},
    token::AuthToken,
    uac::{rejection_reason, AuthError, TokenResponse, Username},
};
use futures::channel::oneshot;
use secrecy::ExposeSecret as _;
use tracing::{info, warn};

use super::{extract_response, send_result, Client, UiCallBack};

pub type AuthReceiver = oneshot::Receiver<Result<NavigateTo, AuthError>>;

/// The two endpoints that hand out a token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AuthEndpoint {
    Login,
    Register,
}

impl AuthEndpoint {
    fn path_spec(self) -> PathSpec {
        match self {
            AuthEndpoint::Login => PATH_LOGIN,
            AuthEndpoint::Register => PATH_REGISTER,
        }
    }

    fn reason_fields(self) -> &'static [&'static str] {
        match self {
            AuthEndpoint::Login => ERR_LOGIN_FIELDS,
            AuthEndpoint::Register => ERR_REGISTER_FIELDS,
        }
    }

    fn fallback(self) -> &'static str {
        match self {
            AuthEndpoint::Login => ERR_LOGIN_FALLBACK,
            AuthEndpoint::Register => ERR_REGISTER_FALLBACK,
        }
    }
}

impl Client {
    /// Exchanges credentials for a token
    ///
    /// Invalid input is reported without contacting the server. On success the
    /// token is persisted and the caller is told to go to the dashboard.
    #[tracing::instrument(skip(ui_notify))]
    pub fn login<F: UiCallBack>(&self, args: LoginReqArgs, ui_notify: F) -> AuthReceiver {
        let prepared = args.validate().map(|username| {
            let body = serde_json::json!({
                "username": args.username,
                "password": args.password.expose_secret(),
            });
            (username, body)
        });
        self.authenticate(AuthEndpoint::Login, prepared, ui_notify)
    }

    /// Creates an account and logs straight into it
    #[tracing::instrument(skip(ui_notify))]
    pub fn register<F: UiCallBack>(&self, args: RegisterReqArgs, ui_notify: F) -> AuthReceiver {
        let prepared = args.validate().map(|username| {
            let body = serde_json::json!({
                "username": args.username,
                "email": args.email,
                "password": args.password.expose_secret(),
                "password2": args.password2.expose_secret(),
            });
            (username, body)
        });
        self.authenticate(AuthEndpoint::Register, prepared, ui_notify)
    }

    /// Forgets the token, cannot fail
    #[tracing::instrument]
    pub fn logout(&self) -> NavigateTo {
        self.with_session_store(|store| store.clear());
        info!("logged out");
        NavigateTo(Route::Login)
    }

    fn authenticate<F: UiCallBack>(
        &self,
        endpoint: AuthEndpoint,
        prepared: Result<(Username, serde_json::Value), ValidationError>,
        ui_notify: F,
    ) -> AuthReceiver {
        let (tx, rx) = oneshot::channel();
        let (username, body) = match prepared {
            Ok(prepared) => prepared,
            Err(e) => {
                info!(?e, "rejected before sending");
                send_result(tx, Err(e.into()));
                ui_notify();
                return rx;
            }
        };
        self.with_session_store(|store| store.set_loading(true));
        let client = self.clone();
        let on_done = move |resp: reqwest::Result<reqwest::Response>| async move {
            let outcome = process_auth(resp, endpoint).await;
            client.with_session_store(|store| {
                if let Ok(token) = &outcome {
                    store.save(token.clone(), username);
                }
                store.set_loading(false);
            });
            send_result(tx, outcome.map(|_| NavigateTo(Route::Dashboard)));
            ui_notify();
        };
        let path_spec = endpoint.path_spec();
        let request = self
            .request_builder(&path_spec, path_spec.path, None)
            .json(&body);
        reqwest_cross::fetch(request, on_done);
        rx
    }
}

#[tracing::instrument(ret, err(Debug))]
async fn process_auth(
    response: reqwest::Result<reqwest::Response>,
    endpoint: AuthEndpoint,
) -> Result<AuthToken, AuthError> {
    let (response, status) = extract_response(response).map_err(|_| AuthError::Network)?;
    let body: serde_json::Value = response.json().await.map_err(|e| {
        warn!(?e, %status, "auth response was not json");
        AuthError::Network
    })?;
    if status.is_success() {
        let TokenResponse { token } = serde_json::from_value(body).map_err(|e| {
            warn!(?e, "auth response did not contain a token");
            AuthError::Network
        })?;
        Ok(token)
    } else {
        Err(AuthError::Rejected(rejection_reason(
            &body,
            endpoint.reason_fields(),
            endpoint.fallback(),
        )))
    }
}
