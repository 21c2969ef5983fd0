//! Correlation logging.
//!
//! Every handled request produces exactly two `info` events under the
//! `login_relay::correlation` target, joined by a random `transactionId`:
//!
//! ```text
//! Request  { component, transactionId, payload? }
//! Response { component, transactionId, returnCode, payload? }
//! ```
//!
//! `payload` is omitted when it is null or an empty object. Otherwise it is
//! recorded as compact JSON text, so with the JSON formatter it appears as a
//! string field that consumers parse again.

use serde_json::Value;
use uuid::Uuid;

/// Target all correlation events are emitted under.
pub const LOG_TARGET: &str = "login_relay::correlation";

/// Identity of one request as it appears in the logs.
#[derive(Debug, Clone, PartialEq)]
pub struct CorrelationRecord {
    pub transaction_id: Uuid,
    pub component: String,
    pub payload: Option<Value>,
}

/// Emits the entry event and hands back the open transaction.
pub fn begin(component: &str, payload: Option<&Value>) -> Transaction {
    let record = CorrelationRecord {
        transaction_id: Uuid::new_v4(),
        component: component.to_string(),
        payload: payload.cloned(),
    };

    match loggable(record.payload.as_ref()) {
        Some(payload) => tracing::info!(
            target: LOG_TARGET,
            component = %record.component,
            transactionId = %record.transaction_id,
            payload = %payload,
            "Request"
        ),
        None => tracing::info!(
            target: LOG_TARGET,
            component = %record.component,
            transactionId = %record.transaction_id,
            "Request"
        ),
    }

    Transaction {
        record,
        finished: false,
    }
}

/// An open request. Must be closed with [`Transaction::end`]; if it is
/// dropped first (cancelled future, panic) a 500 exit event is emitted.
#[derive(Debug)]
#[must_use = "a transaction logs its exit when ended or dropped"]
pub struct Transaction {
    record: CorrelationRecord,
    finished: bool,
}

impl Transaction {
    pub fn transaction_id(&self) -> Uuid {
        self.record.transaction_id
    }

    pub fn record(&self) -> &CorrelationRecord {
        &self.record
    }

    /// Emit the exit event.
    pub fn end(mut self, return_code: u16, payload: Option<&Value>) {
        self.emit_response(return_code, payload);
        self.finished = true;
    }

    fn emit_response(&self, return_code: u16, payload: Option<&Value>) {
        match loggable(payload) {
            Some(payload) => tracing::info!(
                target: LOG_TARGET,
                component = %self.record.component,
                transactionId = %self.record.transaction_id,
                returnCode = return_code,
                payload = %payload,
                "Response"
            ),
            None => tracing::info!(
                target: LOG_TARGET,
                component = %self.record.component,
                transactionId = %self.record.transaction_id,
                returnCode = return_code,
                "Response"
            ),
        }
    }
}

impl Drop for Transaction {
    fn drop(&mut self) {
        if !self.finished {
            tracing::warn!(
                target: LOG_TARGET,
                transactionId = %self.record.transaction_id,
                "Transaction abandoned before completion"
            );
            self.emit_response(500, None);
        }
    }
}

/// Payloads worth logging: anything but null and `{}`.
fn loggable(payload: Option<&Value>) -> Option<&Value> {
    payload.filter(|p| match p {
        Value::Null => false,
        Value::Object(map) => !map.is_empty(),
        _ => true,
    })
}
