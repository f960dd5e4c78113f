//! Resource lifecycle and authentication logic.
//!
//! Every operation takes the store and, where the caller matters, the
//! explicit [`Identity`](crate::auth::Identity) of the requester.

pub mod accounts;
pub mod projects;
pub mod tasks;

pub use accounts::Authenticator;
