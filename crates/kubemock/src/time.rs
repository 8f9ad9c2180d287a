//! Time utilities for kubemock.

/// Return the current time as seconds since the Unix epoch.
///
/// Used for the `iat` claim, which JWTs express in whole seconds.
pub fn now_secs() -> i64 {
    chrono::Utc::now().timestamp()
}
