//! REST API module.
//!
//! Contains all route handlers. Response shapes follow the contract the
//! site's frontend consumes: flat payloads plus an `{"error"}` body on
//! failure, mapped centrally in the errors module.

mod admin;
mod auth;
mod updates;

pub use admin::*;
pub use auth::*;
pub use updates::*;
