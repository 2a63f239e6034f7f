use std::time::Instant;

use chrono::{DateTime, Utc};
use fake_traffic_core::contract::{
    attempt_timestamp, AttemptResult, InvocationResponse, SessionSummary,
};
use fake_traffic_core::storage_keys::{session_object_key, SESSION_LOG_CONTENT_TYPE};
use fake_traffic_core::targets::{plan_session, RequestTarget};
use rand::Rng;
use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::adapters::object_store::SessionLogStore;
use crate::adapters::traffic_client::TrafficClient;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("failed to serialize session log: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("S3 upload failed for {key}: {message}")]
    StorageWrite { key: String, message: String },
}

/// Runs one fake traffic session.
///
/// Every attempt is issued in turn and recorded whatever its outcome; a
/// failed request never aborts the batch. The batch is then written as a
/// single object whose key derives from `captured_at`, the same instant
/// stamped on every record. A failed write is returned as an error and no
/// summary is produced.
pub fn handle_session(
    captured_at: DateTime<Utc>,
    rng: &mut impl Rng,
    client: &impl TrafficClient,
    store: &impl SessionLogStore,
) -> Result<InvocationResponse, SessionError> {
    let plan = plan_session(rng);
    info!(planned_requests = plan.len(), "session started");

    let results = run_attempts(&plan, &attempt_timestamp(captured_at), client);
    let s3_key = session_object_key(captured_at);
    write_session_log(&s3_key, &results, store)?;

    let summary = SessionSummary::new(s3_key, results);
    Ok(InvocationResponse::ok(&summary)?)
}

/// Issues the planned requests sequentially, preserving plan order.
pub fn run_attempts(
    plan: &[RequestTarget],
    timestamp: &str,
    client: &impl TrafficClient,
) -> Vec<AttemptResult> {
    let mut results = Vec::with_capacity(plan.len());
    for target in plan {
        let started_at = Instant::now();
        let result = match client.fetch(target) {
            Ok(status) => {
                debug!(
                    url = target.url,
                    status,
                    duration_ms = started_at.elapsed().as_millis() as u64,
                    "request completed"
                );
                AttemptResult::success(target.url, status, timestamp)
            }
            Err(message) => {
                warn!(
                    url = target.url,
                    error = %message,
                    duration_ms = started_at.elapsed().as_millis() as u64,
                    "request failed"
                );
                AttemptResult::failure(target.url, message, timestamp)
            }
        };
        results.push(result);
    }
    results
}

fn write_session_log(
    key: &str,
    results: &[AttemptResult],
    store: &impl SessionLogStore,
) -> Result<(), SessionError> {
    let body = serde_json::to_vec(results)?;

    if let Err(message) = store.put_object(key, &body, SESSION_LOG_CONTENT_TYPE) {
        error!(location = %store.location(key), error = %message, "S3 upload failed");
        return Err(SessionError::StorageWrite {
            key: key.to_string(),
            message,
        });
    }

    info!(
        entries = results.len(),
        location = %store.location(key),
        "wrote session log"
    );
    Ok(())
}
