//! Observability module - request IDs and error alerting.

mod alert;
mod request_id;

pub use alert::{AlertLayer, AlertSink, ErrorAlert};
pub use request_id::RequestIdMiddleware;
