//! WebSocket write pump: serialises outbound messages.

use futures_util::SinkExt;
use tokio::sync::mpsc;
use tokio_tungstenite::tungstenite;
use tracing::warn;

/// Writes queued messages to the WebSocket.
///
/// Stops after forwarding a close frame. If the queue is dropped first, a
/// close frame is sent on the way out.
pub(crate) async fn write_pump<S>(
    mut write: S,
    mut write_rx: mpsc::UnboundedReceiver<tungstenite::Message>,
) where
    S: SinkExt<tungstenite::Message, Error = tungstenite::Error> + Unpin,
{
    while let Some(msg) = write_rx.recv().await {
        let closing = matches!(msg, tungstenite::Message::Close(_));
        if let Err(e) = write.send(msg).await {
            warn!("WebSocket write error: {e}");
            return;
        }
        if closing {
            return;
        }
    }

    let _ = write.send(tungstenite::Message::Close(None)).await;
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_util::sink;

    fn capture_sink(
        tx: mpsc::Sender<tungstenite::Message>,
    ) -> impl SinkExt<tungstenite::Message, Error = tungstenite::Error> + Unpin {
        Box::pin(sink::unfold(tx, |tx, msg: tungstenite::Message| async move {
            let _ = tx.send(msg).await;
            Ok::<_, tungstenite::Error>(tx)
        }))
    }

    #[tokio::test]
    async fn write_pump_forwards_then_stops_on_close() {
        let (sink_tx, mut sink_rx) = mpsc::channel::<tungstenite::Message>(16);
        let (write_tx, write_rx) = mpsc::unbounded_channel();

        write_tx
            .send(tungstenite::Message::Text("one".to_owned().into()))
            .unwrap();
        write_tx.send(tungstenite::Message::Close(None)).unwrap();
        write_tx
            .send(tungstenite::Message::Text("after close".to_owned().into()))
            .unwrap();

        tokio::time::timeout(
            std::time::Duration::from_secs(2),
            write_pump(capture_sink(sink_tx), write_rx),
        )
        .await
        .expect("should stop");

        assert!(matches!(sink_rx.recv().await, Some(tungstenite::Message::Text(t)) if t.as_str() == "one"));
        assert!(matches!(sink_rx.recv().await, Some(tungstenite::Message::Close(_))));
        assert!(sink_rx.recv().await.is_none());
    }

    #[tokio::test]
    async fn write_pump_sends_close_when_queue_drops() {
        let (sink_tx, mut sink_rx) = mpsc::channel::<tungstenite::Message>(16);
        let (write_tx, write_rx) = mpsc::unbounded_channel::<tungstenite::Message>();
        drop(write_tx);

        write_pump(capture_sink(sink_tx), write_rx).await;

        let close_msg = sink_rx.recv().await;
        assert!(matches!(close_msg, Some(tungstenite::Message::Close(_))));
    }
}
