//! Identity collaborator for write endpoints.
//!
//! Tokens are issued elsewhere; this feature only verifies them and exposes the
//! resulting [`model::AuthenticatedUser`] to handlers.

mod validator;

pub mod model;

pub use validator::JwtValidator;
