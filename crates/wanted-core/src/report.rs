//! Error streams for fan-out operations.
//!
//! An operation that attempts every item and reports every failure hands its
//! caller an [`ErrorStream`]. The operation keeps the [`ErrorSink`] side and
//! drops it once all work is finished or abandoned; the stream then ends.
//! Exhaustion of the stream is the only completion signal.

use std::pin::Pin;
use std::task::{Context, Poll};

use futures::Stream;
use tokio::sync::mpsc;
use tokio::time::Instant;

/// Create a connected sink/stream pair.
pub fn error_channel<E>() -> (ErrorSink<E>, ErrorStream<E>) {
    let (tx, rx) = mpsc::unbounded_channel();
    (ErrorSink { tx }, ErrorStream { rx })
}

/// Writer side of an error stream, owned by the operation.
///
/// Clones share the stream; it closes when the last clone is dropped.
#[derive(Debug)]
pub struct ErrorSink<E> {
    tx: mpsc::UnboundedSender<E>,
}

impl<E> Clone for ErrorSink<E> {
    fn clone(&self) -> Self {
        Self {
            tx: self.tx.clone(),
        }
    }
}

impl<E> ErrorSink<E> {
    /// Enqueue an error for the caller.
    pub fn report(&self, err: E) {
        // A dropped stream means the caller stopped listening; the operation
        // still runs to completion.
        let _ = self.tx.send(err);
    }
}

/// Reader side of an error stream: a finite, non-restartable sequence.
#[derive(Debug)]
pub struct ErrorStream<E> {
    rx: mpsc::UnboundedReceiver<E>,
}

impl<E> ErrorStream<E> {
    /// Next reported error, or `None` once the operation has finished.
    pub async fn next(&mut self) -> Option<E> {
        self.rx.recv().await
    }

    /// Drain the stream to closure.
    pub async fn collect(mut self) -> Vec<E> {
        let mut errors = Vec::new();
        while let Some(err) = self.rx.recv().await {
            errors.push(err);
        }
        errors
    }
}

impl<E> Stream for ErrorStream<E> {
    type Item = E;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<E>> {
        self.rx.poll_recv(cx)
    }
}

/// True while `deadline` is still ahead of now.
pub fn deadline_pending(deadline: Instant) -> bool {
    deadline > Instant::now()
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::StreamExt;
    use std::time::Duration;

    #[tokio::test]
    async fn test_stream_closes_when_all_sinks_drop() {
        let (sink, mut stream) = error_channel::<String>();
        let helper = sink.clone();

        sink.report("first".to_string());
        drop(sink);

        let handle = tokio::spawn(async move {
            helper.report("second".to_string());
        });
        handle.await.unwrap();

        assert_eq!(stream.next().await.as_deref(), Some("first"));
        assert_eq!(stream.next().await.as_deref(), Some("second"));
        assert!(stream.next().await.is_none());
        // Closed for good
        assert!(stream.next().await.is_none());
    }

    #[tokio::test]
    async fn test_collect_empty_stream() {
        let (sink, stream) = error_channel::<u32>();
        drop(sink);
        assert!(stream.collect().await.is_empty());
    }

    #[tokio::test]
    async fn test_stream_trait_preserves_order() {
        let (sink, stream) = error_channel::<u32>();
        for i in 0..5 {
            sink.report(i);
        }
        drop(sink);
        let items: Vec<u32> = StreamExt::collect(stream).await;
        assert_eq!(items, vec![0, 1, 2, 3, 4]);
    }

    #[tokio::test]
    async fn test_report_after_reader_dropped_is_ignored() {
        let (sink, stream) = error_channel::<u32>();
        let helper = sink.clone();
        drop(stream);
        sink.report(7);
        helper.report(8);
    }

    #[test]
    fn test_deadline_pending() {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_time()
            .build()
            .unwrap();
        rt.block_on(async {
            assert!(deadline_pending(Instant::now() + Duration::from_secs(5)));
            assert!(!deadline_pending(Instant::now()));
        });
    }
}
