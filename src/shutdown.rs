use tokio::sync::broadcast;
use tokio::sync::broadcast::error::RecvError;

pub type ShutdownSender = broadcast::Sender<()>;
pub type ShutdownReceiver = broadcast::Receiver<()>;

/// Resolves once shutdown was requested. A channel whose senders are all gone
/// never resolves.
pub async fn wait_for_shutdown(shutdown_rx: &mut ShutdownReceiver) {
    match shutdown_rx.recv().await {
        Ok(()) | Err(RecvError::Lagged(_)) => {}
        Err(RecvError::Closed) => std::future::pending::<()>().await,
    }
}
