//! Code shared between the client core and the application

#![warn(unused_crate_dependencies)]

pub mod const_config;
pub mod errors;
pub mod id;
pub mod images;
mod macros;
pub mod payments;
pub mod req_args;
pub mod route;
pub mod session;
pub mod token;
pub mod uac;

#[cfg(not(target_arch = "wasm32"))]
pub mod telemetry;
