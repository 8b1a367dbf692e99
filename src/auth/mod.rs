//! Authentication module for the Pokédex gateway
//!
//! This module handles operator credential checks, session token
//! issuance and verification, and the authorization preamble used by
//! every protected route.

pub mod clock;
pub mod credentials;
pub mod handlers;
mod service;

pub use clock::{Clock, SystemClock};
pub use credentials::CredentialStore;
pub use service::{extract_token, AuthService, Claims, TokenService, Verification, LOGIN_SUCCESS};
