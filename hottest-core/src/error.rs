use reqwest::StatusCode;
use thiserror::Error;

use crate::render::Slot;

/// Failures raised while fetching and decoding a reading.
///
/// All variants are caught at the cycle boundary, logged, and swallowed;
/// the previously rendered state persists.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to data source failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("data source returned status {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("failed to decode reading payload: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Failures raised while applying a reading to a render target.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The target does not expose this slot. Fatal for required slots
    /// (a markup/target mismatch), silently skipped for optional ones.
    #[error("render target has no slot '{0}'")]
    MissingSlot(Slot),

    /// An image resource failed to load; the value names the source URL.
    #[error("asset failed to load: {0}")]
    AssetUnavailable(String),
}
