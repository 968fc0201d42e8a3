//! Branded request identifier.
//!
//! Correlation ids are strings on the wire (the peer echoes them back
//! verbatim), but code never passes a bare `String` around — [`RequestId`]
//! is a newtype so a request id cannot be confused with any other string.
//! Generated ids are UUID v7 (time-ordered).

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Correlation identifier for one outbound request.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestId(String);

impl RequestId {
    /// Generate a new random id (UUID v7, time-ordered).
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    /// Adopt a caller-supplied id.
    #[must_use]
    pub fn from_string(s: String) -> Self {
        Self(s)
    }

    /// The id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume self and return the inner `String`.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RequestId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}
