//! Authentication and authorization extractors.
//!
//! - [`auth::AuthUser`] -- Requires a valid JWT Bearer token.
//! - [`auth::OptionalAuthUser`] -- Identifies the caller when a valid token is sent.
//! - [`rbac::RequireAdmin`] -- Requires an admin account.

pub mod auth;
pub mod rbac;
