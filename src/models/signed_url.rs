//! A time-limited retrieval link for one object-store object.

use chrono::{DateTime, Utc};
use std::time::Duration;

/// Presigned `GET` URL issued for a single request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignedUrl {
    /// Full URL including signature query parameters.
    pub url: String,

    /// Object key the URL grants access to.
    pub key: String,

    /// Instant the signature was computed for.
    pub issued_at: DateTime<Utc>,

    /// Validity window counted from `issued_at`.
    pub expires_in: Duration,

    /// `issued_at + expires_in`; the link is rejected by the store afterwards.
    pub expires_at: DateTime<Utc>,
}
