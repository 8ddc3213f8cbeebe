use construct_client_core::FetchReceiver;
use construct_shared::{errors::FetchError, internal_error, session::Session, token::AuthToken};
use tracing::{debug, error};

/// A request in flight, tagged with the generation that issued it
#[derive(Debug)]
pub struct AwaitingType<T> {
    generation: u64,
    rx: FetchReceiver<T>,
}

#[derive(Debug, Default)]
pub enum DataState<T> {
    #[default]
    None,
    AwaitingResponse(AwaitingType<T>),
    Present(T),
    Failed(String),
}

/// What a view shows for a piece of data
#[derive(Debug, PartialEq, Eq)]
pub enum Phase<'a, T> {
    Loading,
    Error(&'a str),
    Ready(&'a T),
}

impl<T> DataState<T> {
    /// Moves a finished request into its outcome, returns `true` if anything
    /// changed
    fn poll(&mut self, current_generation: u64) -> bool {
        let DataState::AwaitingResponse(awaiting) = self else {
            return false;
        };
        if awaiting.generation != current_generation {
            debug!(
                generation = awaiting.generation,
                current_generation, "dropping superseded request"
            );
            *self = DataState::None;
            return false;
        }
        let outcome = match awaiting.rx.try_recv() {
            Ok(Some(outcome)) => outcome,
            Ok(None) => return false,
            Err(e) => {
                error!("Error receiving on channel. Canceled: {e:?}");
                *self = DataState::Failed(internal_error!(e));
                return true;
            }
        };
        *self = match outcome {
            Ok(data) => DataState::Present(data),
            Err(e) => {
                debug!(?e, "Error response received instead of the data");
                DataState::Failed(e.to_string())
            }
        };
        true
    }

    pub fn phase(&self) -> Phase<'_, T> {
        match self {
            DataState::None | DataState::AwaitingResponse(_) => Phase::Loading,
            DataState::Present(data) => Phase::Ready(data),
            DataState::Failed(e) => Phase::Error(e),
        }
    }

    /// Returns `true` if the data state is [`AwaitingResponse`].
    ///
    /// [`AwaitingResponse`]: DataState::AwaitingResponse
    #[must_use]
    pub fn is_awaiting_response(&self) -> bool {
        matches!(self, Self::AwaitingResponse(..))
    }
}

/// Session values a fetch depends on, a change in either triggers a refetch
type SyncKey = (Option<AuthToken>, bool);

/// View data tied to the session it was fetched for
///
/// Only the most recently issued request can change the state, a request that
/// was superseded is ignored even if it completes later.
#[derive(Debug)]
pub struct PageData<T> {
    state: DataState<T>,
    generation: u64,
    synced_for: Option<SyncKey>,
}

impl<T> Default for PageData<T> {
    fn default() -> Self {
        Self {
            state: DataState::None,
            generation: 0,
            synced_for: None,
        }
    }
}

impl<T> PageData<T> {
    /// Fetches on first use and whenever the token or loading flag changed
    ///
    /// `fetch` may refuse to start (for example on an id that does not parse),
    /// that error becomes the state without anything being sent.
    pub fn sync<F>(&mut self, session: &Session, fetch: F)
    where
        F: FnOnce(&AuthToken) -> Result<FetchReceiver<T>, FetchError>,
    {
        let key = (session.token.clone(), session.is_loading);
        if self.synced_for.as_ref() == Some(&key) {
            return;
        }
        self.synced_for = Some(key);
        if session.is_loading {
            self.reset();
            return;
        }
        match &session.token {
            None => self.fail(FetchError::MissingToken),
            Some(token) => match fetch(token) {
                Ok(rx) => self.start(rx),
                Err(e) => self.fail(e),
            },
        }
    }

    /// Issues a new request, any earlier one stops counting
    pub fn start(&mut self, rx: FetchReceiver<T>) {
        self.generation += 1;
        self.state = DataState::AwaitingResponse(AwaitingType {
            generation: self.generation,
            rx,
        });
    }

    pub fn fail(&mut self, e: FetchError) {
        self.generation += 1;
        self.state = DataState::Failed(e.to_string());
    }

    fn reset(&mut self) {
        self.generation += 1;
        self.state = DataState::None;
    }

    /// Returns `true` if the state changed
    pub fn poll(&mut self) -> bool {
        self.state.poll(self.generation)
    }

    pub fn phase(&self) -> Phase<'_, T> {
        self.state.phase()
    }

    pub fn is_busy(&self) -> bool {
        self.state.is_awaiting_response()
    }

    pub fn data_mut(&mut self) -> Option<&mut T> {
        match &mut self.state {
            DataState::Present(data) => Some(data),
            _ => None,
        }
    }
}
