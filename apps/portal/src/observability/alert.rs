//! Critical-error alerting layer for tracing.
//!
//! ERROR-level events are forwarded, off the request path, to an operator
//! channel: a webhook in production, stderr during development.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{Event, Subscriber};
use tracing_subscriber::{Layer, layer::Context};

/// One ERROR event, flattened for delivery.
#[derive(Debug, Clone)]
pub struct ErrorAlert {
    pub message: String,
    pub target: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Delivery channel for alerts - implement this for other backends.
#[async_trait::async_trait]
pub trait AlertSink: Send + Sync {
    async fn deliver(&self, alert: ErrorAlert) -> Result<(), AlertDeliveryError>;
}

#[derive(Debug, thiserror::Error)]
#[error("Failed to deliver alert: {0}")]
pub struct AlertDeliveryError(String);

/// Writes alerts to stderr (for development).
pub struct StderrSink;

#[async_trait::async_trait]
impl AlertSink for StderrSink {
    async fn deliver(&self, alert: ErrorAlert) -> Result<(), AlertDeliveryError> {
        eprintln!(
            "ALERT {} [{}] {}",
            alert.timestamp.to_rfc3339(),
            alert.target,
            alert.message
        );
        Ok(())
    }
}

/// Posts alerts to a webhook URL (Slack-compatible payload).
pub struct WebhookSink {
    url: String,
    client: reqwest::Client,
}

impl WebhookSink {
    pub fn new(url: String) -> Self {
        Self {
            url,
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait::async_trait]
impl AlertSink for WebhookSink {
    async fn deliver(&self, alert: ErrorAlert) -> Result<(), AlertDeliveryError> {
        let payload = serde_json::json!({
            "text": format!(
                "*certify-portal error*\n*Target:* {}\n*Message:* {}\n*Time:* {}",
                alert.target, alert.message, alert.timestamp
            )
        });

        self.client
            .post(&self.url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| AlertDeliveryError(e.to_string()))?;

        Ok(())
    }
}

/// Tracing layer that forwards ERROR events to a sink through a bounded
/// channel. A full buffer drops the alert rather than stalling a request.
pub struct AlertLayer {
    tx: mpsc::Sender<ErrorAlert>,
}

impl AlertLayer {
    pub fn new(sink: Arc<dyn AlertSink>) -> Self {
        let (tx, mut rx) = mpsc::channel::<ErrorAlert>(64);

        tokio::spawn(async move {
            while let Some(alert) = rx.recv().await {
                if let Err(e) = sink.deliver(alert).await {
                    eprintln!("{e}");
                }
            }
        });

        Self { tx }
    }

    pub fn stderr() -> Self {
        Self::new(Arc::new(StderrSink))
    }

    pub fn webhook(url: String) -> Self {
        Self::new(Arc::new(WebhookSink::new(url)))
    }
}

/// Visitor pulling the `message` field out of an event.
struct MessageVisitor(String);

impl tracing::field::Visit for MessageVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.0 = format!("{value:?}");
        }
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        if field.name() == "message" {
            self.0 = value.to_string();
        }
    }
}

impl<S> Layer<S> for AlertLayer
where
    S: Subscriber,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        if *event.metadata().level() != tracing::Level::ERROR {
            return;
        }

        let mut visitor = MessageVisitor(String::new());
        event.record(&mut visitor);

        let _ = self.tx.try_send(ErrorAlert {
            message: visitor.0,
            target: event.metadata().target().to_string(),
            timestamp: chrono::Utc::now(),
        });
    }
}
