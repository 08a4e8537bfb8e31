//! Cassette data structures for recording and replaying interactions.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single recorded interaction with an external port.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Interaction {
    /// Sequence number (assigned automatically by the recorder).
    pub seq: u64,
    /// Port name (`"clock"` or `"fs"`).
    pub port: String,
    /// Method name invoked on the port.
    pub method: String,
    /// Input data sent to the port.
    pub input: serde_json::Value,
    /// Output data returned from the port.
    pub output: serde_json::Value,
}

/// A cassette containing a sequence of recorded interactions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Cassette {
    /// Human-readable name for this cassette.
    pub name: String,
    /// When this cassette was recorded.
    pub recorded_at: DateTime<Utc>,
    /// Version of `headroll` that produced the recording.
    pub tool_version: String,
    /// Ordered list of interactions.
    pub interactions: Vec<Interaction>,
}

/// File contents as stored in a cassette: the length plus a base64 body,
/// so a header takes one YAML line instead of one per byte.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RecordedBytes {
    /// Number of bytes.
    pub len: usize,
    /// Standard base64 with padding.
    pub base64: String,
}

impl RecordedBytes {
    /// Encodes `bytes` for a cassette.
    #[must_use]
    pub fn encode(bytes: &[u8]) -> Self {
        Self { len: bytes.len(), base64: STANDARD.encode(bytes) }
    }

    /// Decodes the body and checks it against the recorded length.
    ///
    /// # Errors
    ///
    /// Returns an error if the body is not valid base64 or its length differs.
    pub fn decode(&self) -> Result<Vec<u8>, Box<dyn std::error::Error + Send + Sync>> {
        let bytes = STANDARD.decode(&self.base64)?;
        if bytes.len() != self.len {
            let found = bytes.len();
            return Err(format!("recorded body has {found} bytes, expected {}", self.len).into());
        }
        Ok(bytes)
    }
}
