//! Stores functionality that should be shared between different clients
//! NB: The assumption is made that the async runtime has already been started
//! before any functions that send requests are called

#![warn(unused_crate_dependencies)]


mod client;
mod data_api;
mod guard;
mod mock;
mod session;

pub use client::{auth::AuthReceiver, Client, UiCallBack, DUMMY_ARGUMENT};
pub use data_api::{DataApi, FetchReceiver};
pub use guard::{guard, resolve, GuardDecision};
pub use mock::MockApi;
#[cfg(not(target_arch = "wasm32"))]
pub use session::FileStorage;
pub use session::{KeyValueStorage, MemoryStorage, SessionStore};
