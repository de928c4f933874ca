//! Delivery of [`PipelineEvent`]s to whoever is watching a run.

use tokio::sync::mpsc;
use tubelens_core::event::PipelineEvent;

/// Sending half of a run's event stream.
///
/// Events are also traced, so a sink with no receiver still leaves a log.
/// Sending never fails: a dropped receiver only means nobody is watching.
#[derive(Debug, Clone, Default)]
pub struct EventSink {
    sender: Option<mpsc::UnboundedSender<PipelineEvent>>,
}

impl EventSink {
    /// Create a sink and the receiver that observes it. The stream ends when
    /// every clone of the sink is dropped.
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<PipelineEvent>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (
            Self {
                sender: Some(sender),
            },
            receiver,
        )
    }

    /// A sink that only traces.
    pub fn discard() -> Self {
        Self::default()
    }

    pub fn emit(&self, event: PipelineEvent) {
        match &event {
            PipelineEvent::Log { message } => tracing::info!("{message}"),
            PipelineEvent::Progress { percent } => tracing::debug!(percent, "Extraction progress"),
            PipelineEvent::Complete { output_path, stats } => tracing::info!(
                output_path = %output_path,
                video_count = stats.video_count,
                "Analysis complete"
            ),
            PipelineEvent::Error { message } => tracing::error!(error = %message, "Analysis failed"),
        }

        if let Some(sender) = &self.sender {
            let _ = sender.send(event);
        }
    }

    pub fn log(&self, message: impl Into<String>) {
        self.emit(PipelineEvent::log(message));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn receiver_sees_events_in_order() {
        let (sink, mut rx) = EventSink::channel();
        sink.log("first");
        sink.emit(PipelineEvent::Progress { percent: 50 });
        drop(sink);

        assert_eq!(rx.recv().await, Some(PipelineEvent::log("first")));
        assert_eq!(rx.recv().await, Some(PipelineEvent::Progress { percent: 50 }));
        assert_eq!(rx.recv().await, None);
    }

    #[test]
    fn emit_after_receiver_dropped_does_not_panic() {
        let (sink, rx) = EventSink::channel();
        drop(rx);
        sink.log("nobody listening");
        EventSink::discard().log("also fine");
    }
}
