//! Service account identities.
//!
//! A [`ServiceAccount`] is the subject a mock token asserts. Its canonical
//! name (`system:serviceaccount:<namespace>:<name>`) is what token reviews
//! report back as the username.

pub mod service_account;

pub use service_account::{ServiceAccount, CANONICAL_PREFIX};
