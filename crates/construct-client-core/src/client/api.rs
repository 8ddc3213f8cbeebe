//! Authenticated endpoints of the backend
//!
//! Every call needs the token from the session the caller rendered with, the
//! session itself is not consulted here.

mod images;
mod payments;
