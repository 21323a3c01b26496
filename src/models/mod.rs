//! Data models for the updates backend.
//!
//! Wire field names are snake_case to match the contract the site's frontend
//! already consumes.

mod auth;
mod update;

pub use auth::*;
pub use update::*;
