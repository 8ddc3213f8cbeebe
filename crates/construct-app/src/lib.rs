#![warn(unused_crate_dependencies)]

mod suppress_bin_warnings {
    // Only used in binary and triggers unused warning
    use tokio as _;
}

mod app;
pub mod cli;
mod commands;
pub mod configuration;
mod pages;
pub mod tracing;

pub use app::{App, DataShared};
pub use commands::run;
pub use pages::{Action, DisplayablePage, Screen, UiPage};
