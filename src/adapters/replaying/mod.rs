//! Replaying adapters that serve recorded interactions.

pub mod clock;
pub mod filesystem;

pub use clock::ReplayingClock;
pub use filesystem::ReplayingFileSystem;

/// Extracts a Result from a cassette output JSON value.
///
/// Expects `{"ok": <value>}` or `{"err": "message"}`, the shape written by
/// `recording::record_result`.
pub(crate) fn extract_result<T: serde::de::DeserializeOwned>(
    output: &serde_json::Value,
    context: &str,
) -> Result<T, Box<dyn std::error::Error + Send + Sync>> {
    if let Some(err) = output.get("err") {
        let msg = err.as_str().unwrap_or("unknown error").to_string();
        return Err(msg.into());
    }
    let value = output.get("ok").ok_or_else(|| format!("{context}: missing ok/err key"))?;
    serde_json::from_value(value.clone())
        .map_err(|e| format!("{context}: failed to deserialize: {e}").into())
}
