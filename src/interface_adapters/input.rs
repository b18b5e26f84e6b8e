// Input collaborator boundary: raw intent frames in, latest valid intent out.

use crate::domain::InputIntent;
use crate::interface_adapters::protocol::decode_input;
use tokio::sync::{mpsc, watch};
use tracing::debug;

/// Decodes each raw frame and publishes it as the latest intent. A frame that
/// is not a valid intent object publishes `None`, so prediction skips frames
/// until the collaborator sends something usable again.
///
/// Returns when the raw side closes or every intent receiver is gone.
pub async fn forward_inputs(
    mut raw_rx: mpsc::Receiver<String>,
    intent_tx: watch::Sender<Option<InputIntent>>,
) {
    while let Some(text) = raw_rx.recv().await {
        let intent = match decode_input(&text) {
            Ok(intent) => Some(intent),
            Err(e) => {
                debug!(error = %e, "input frame rejected");
                None
            }
        };
        if intent_tx.send(intent).is_err() {
            break;
        }
    }
}
