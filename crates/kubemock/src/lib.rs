//! kubemock: a stand-in for the Kubernetes TokenReview API.
//!
//! Issues throwaway service account JWTs and later answers token reviews
//! for them, so that a system relying on Kubernetes auth can be tested
//! without a cluster.
//!
//! Authentication here is registry membership: every token is signed with
//! a fresh RSA key that is dropped right after signing, so a token is
//! "valid" only because [`IdentityRegistry`] remembers it.

pub mod crypto;
pub mod error;
pub mod identity;
pub mod issuer;
pub mod registry;
pub mod service;
pub mod time;

// Re-export primary types
pub use error::{MockError, Result};
pub use identity::ServiceAccount;
pub use issuer::{RsaTokenIssuer, TokenIssuer};
pub use registry::IdentityRegistry;
pub use service::{AuthResult, TokenReviewService};
