use tokio::sync::{mpsc, oneshot};
use tracing::debug;

/// Whether a touch-move gesture keeps its platform default behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureDecision {
    /// Let the platform handle the gesture (enables pull-to-refresh).
    AllowDefault,
    /// Suppress the default scrolling behavior entirely.
    PreventDefault,
}

/// A touch-move gesture awaiting a decision from the guard.
#[derive(Debug)]
pub struct TouchMove {
    pub scroll_offset_px: u64,
    pub responder: oneshot::Sender<GestureDecision>,
}

/// Pull-to-refresh is only allowed when the viewport sits exactly at the top.
pub fn decide(scroll_offset_px: u64) -> GestureDecision {
    if scroll_offset_px == 0 {
        GestureDecision::AllowDefault
    } else {
        GestureDecision::PreventDefault
    }
}

/// Subscribe to a gesture stream and answer each touch-move with a decision.
///
/// Installed once at startup; runs for the life of the process (the stream
/// ends only when every sender is dropped). There is no teardown hook.
pub async fn run(mut gestures: mpsc::UnboundedReceiver<TouchMove>) {
    while let Some(gesture) = gestures.recv().await {
        let decision = decide(gesture.scroll_offset_px);
        debug!(offset = gesture.scroll_offset_px, ?decision, "touch-move");
        // The gesture's originator may have given up waiting; that is fine.
        let _ = gesture.responder.send(decision);
    }
}
