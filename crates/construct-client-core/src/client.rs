use closure_traits::{ChannelCallBack, ChannelCallBackOutput};
use construct_shared::{
    const_config::{client::CLIENT_DEFAULT_SERVER_ADDRESS, path::PathSpec},
    errors::FetchError,
    session::Session,
    token::AuthToken,
    uac::rejection_reason,
};
use futures::channel::oneshot;
use reqwest::{header::AUTHORIZATION, Method, StatusCode};
use std::fmt::Debug;
use std::sync::{Arc, Mutex};
use tracing::{debug, info, warn};

use crate::session::{KeyValueStorage, MemoryStorage, SessionStore};

pub mod api;
pub mod auth;

pub const DUMMY_ARGUMENT: &[(&str, &str)] = &[("", "")];

/// Handle to the backend and the session it is used with
///
/// Clones share the same session. The session is only ever written by the
/// authentication operations, everything else reads snapshots of it.
#[derive(Debug, Clone)]
pub struct Client {
    api_client: reqwest::Client,
    inner: Arc<Mutex<ClientInner>>,
}

#[derive(Debug)]
struct ClientInner {
    server_address: String,
    session_store: SessionStore,
}

impl Default for Client {
    fn default() -> Self {
        Self::new(
            CLIENT_DEFAULT_SERVER_ADDRESS.to_string(),
            Box::new(MemoryStorage::default()),
        )
    }
}

impl Client {
    /// Creates the client and loads the session from `storage`
    #[tracing::instrument(name = "NEW CLIENT-CORE")]
    pub fn new(server_address: String, storage: Box<dyn KeyValueStorage>) -> Self {
        let api_client = reqwest::Client::builder()
            .build()
            .expect("Unable to create reqwest client");
        let server_address = server_address.trim_end_matches('/').to_string();
        Self {
            api_client,
            inner: Arc::new(Mutex::new(ClientInner {
                server_address,
                session_store: SessionStore::load(storage),
            })),
        }
    }

    /// Snapshot of the current session
    pub fn session(&self) -> Session {
        self.inner
            .lock()
            .expect("mutex poisoned")
            .session_store
            .session()
            .clone()
    }

    pub fn token(&self) -> Option<AuthToken> {
        self.inner
            .lock()
            .expect("mutex poisoned")
            .session_store
            .session()
            .token
            .clone()
    }

    pub fn is_logged_in(&self) -> bool {
        self.inner
            .lock()
            .expect("mutex poisoned")
            .session_store
            .session()
            .is_authenticated()
    }

    pub fn server_address(&self) -> String {
        self.inner
            .lock()
            .expect("mutex poisoned")
            .server_address
            .clone()
    }

    fn with_session_store<R>(&self, f: impl FnOnce(&mut SessionStore) -> R) -> R {
        f(&mut self.inner.lock().expect("mutex poisoned").session_store)
    }

    #[tracing::instrument(skip(args, token, on_done))]
    // WARNING: Must skip args as it my contain sensitive info and "safe" versions
    // would usually already be logged by the caller
    fn initiate_request<T, F, O>(
        &self,
        path_spec: &PathSpec,
        path: &str,
        token: Option<&AuthToken>,
        args: &T,
        on_done: F,
    ) where
        T: serde::Serialize + Debug,
        F: ChannelCallBack<O>,
        O: ChannelCallBackOutput,
    {
        let is_get_method = path_spec.method == Method::GET;
        let mut request = self.request_builder(path_spec, path, token);
        request = if is_get_method {
            request.query(&args)
        } else {
            request.json(&args)
        };
        reqwest_cross::fetch(request, on_done)
    }

    fn request_builder(
        &self,
        path_spec: &PathSpec,
        path: &str,
        token: Option<&AuthToken>,
    ) -> reqwest::RequestBuilder {
        let request = self
            .api_client
            .request(path_spec.method.clone(), self.path_to_url(path));
        match token {
            Some(token) => request.header(AUTHORIZATION, token.header_value()),
            None => request,
        }
    }

    /// Sends an authenticated request and decodes the JSON answer
    fn send_request_expect_json<F, T, U>(
        &self,
        path_spec: &PathSpec,
        path: &str,
        token: &AuthToken,
        args: &T,
        ui_notify: F,
    ) -> oneshot::Receiver<Result<U, FetchError>>
    where
        T: serde::Serialize + std::fmt::Debug,
        F: UiCallBack,
        U: Send + std::fmt::Debug + serde::de::DeserializeOwned + 'static,
    {
        let (tx, rx) = oneshot::channel();
        let on_done = move |resp: reqwest::Result<reqwest::Response>| async move {
            let msg = process_json_body(resp).await;
            send_result(tx, msg);
            ui_notify();
        };
        self.initiate_request(path_spec, path, Some(token), args, on_done);
        rx
    }

    /// Same as [`Self::send_request_expect_json`] but a 404 is reported as
    /// `None` instead of an error
    fn send_request_expect_optional_json<F, U>(
        &self,
        path_spec: &PathSpec,
        path: &str,
        token: &AuthToken,
        ui_notify: F,
    ) -> oneshot::Receiver<Result<Option<U>, FetchError>>
    where
        F: UiCallBack,
        U: Send + std::fmt::Debug + serde::de::DeserializeOwned + 'static,
    {
        let (tx, rx) = oneshot::channel();
        let on_done = move |resp: reqwest::Result<reqwest::Response>| async move {
            let msg = process_optional_json_body(resp).await;
            send_result(tx, msg);
            ui_notify();
        };
        self.initiate_request(path_spec, path, Some(token), &DUMMY_ARGUMENT, on_done);
        rx
    }

    #[tracing::instrument(ret)]
    fn path_to_url(&self, path: &str) -> String {
        format!(
            "{}{path}",
            &self
                .inner
                .lock()
                .expect("failed to unlock client mutex")
                .server_address
        )
    }
}

/// Delivers the outcome of a request
///
/// The receiver is gone when the view that asked has moved on or issued a
/// newer request, in which case the outcome is no longer wanted.
pub(crate) fn send_result<T: Debug>(tx: oneshot::Sender<T>, msg: T) {
    if let Err(unwanted) = tx.send(msg) {
        debug!(?unwanted, "receiver dropped, discarding response");
    }
}

#[tracing::instrument(ret, err(Debug))]
async fn process_json_body<T>(response: reqwest::Result<reqwest::Response>) -> Result<T, FetchError>
where
    T: Debug + serde::de::DeserializeOwned,
{
    let (response, status) = extract_response(response)?;
    if status.is_success() {
        response.json().await.map_err(|e| {
            warn!(?e, "response body was not the expected json");
            FetchError::Network(format!("failed to parse result as json: {e}"))
        })
    } else {
        Err(handle_error(response).await)
    }
}

#[tracing::instrument(ret, err(Debug))]
async fn process_optional_json_body<T>(
    response: reqwest::Result<reqwest::Response>,
) -> Result<Option<T>, FetchError>
where
    T: Debug + serde::de::DeserializeOwned,
{
    match response {
        Ok(response) if response.status() == StatusCode::NOT_FOUND => Ok(None),
        other => process_json_body(other).await.map(Some),
    }
}

#[tracing::instrument(ret)]
async fn handle_error(response: reqwest::Response) -> FetchError {
    let status = response.status();
    debug_assert!(
        !status.is_success(),
        "this is supposed to be an error, right? Status code is: {status}"
    );
    if status == StatusCode::UNAUTHORIZED {
        return FetchError::MissingToken;
    }
    let Ok(body) = response.text().await else {
        return FetchError::Network("failed to get response body".to_string());
    };
    if body.is_empty() {
        return FetchError::Rejected(format!("request failed with status code: {status}"));
    }
    let reason = match serde_json::from_str::<serde_json::Value>(&body) {
        Ok(json) => rejection_reason(&json, &[], &body),
        Err(_) => body,
    };
    FetchError::Rejected(reason)
}

/// Provides a way to standardize the error message
#[tracing::instrument(ret, err(Debug))]
fn extract_response(
    response: reqwest::Result<reqwest::Response>,
) -> Result<(reqwest::Response, StatusCode), FetchError> {
    let response = response.map_err(|e| {
        info!("Response is err: {e:#?}");
        FetchError::Network(format!("failed to send request: {e}"))
    })?;
    let status = response.status();
    Ok((response, status))
}

pub trait UiCallBack: 'static + Send + FnOnce() {}
impl<T> UiCallBack for T where T: 'static + Send + FnOnce() {}

#[cfg(not(target_arch = "wasm32"))]
pub mod closure_traits {
    pub trait ChannelCallBack<O>:
        'static + Send + FnOnce(reqwest::Result<reqwest::Response>) -> O
    {
    }
    impl<T, O> ChannelCallBack<O> for T where
        T: 'static + Send + FnOnce(reqwest::Result<reqwest::Response>) -> O
    {
    }
    pub trait ChannelCallBackOutput: futures::Future<Output = ()> + Send {}
    impl<T> ChannelCallBackOutput for T where T: futures::Future<Output = ()> + Send {}
}

#[cfg(target_arch = "wasm32")]
pub mod closure_traits {
    pub trait ChannelCallBack<O>:
        'static + FnOnce(reqwest::Result<reqwest::Response>) -> O
    {
    }
    impl<T, O> ChannelCallBack<O> for T where
        T: 'static + FnOnce(reqwest::Result<reqwest::Response>) -> O
    {
    }
    pub trait ChannelCallBackOutput: futures::Future<Output = ()> {}
    impl<T> ChannelCallBackOutput for T where T: futures::Future<Output = ()> {}
}
