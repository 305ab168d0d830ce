//! Task-local trace context for web requests.
//!
//! Provides a minimal API for reading the current request's trace_id from
//! anywhere in the request pipeline, backed by Tokio task-local storage.
//! Middleware establishes the scope; error rendering and log statements
//! read from it. Service code should receive the trace id implicitly via
//! logging rather than importing this module.

use std::cell::RefCell;

use tokio::task_local;

/// Value reported when no trace scope is active (startup, tests, detached tasks).
const NO_TRACE: &str = "unknown";

task_local! {
    static TRACE_ID: RefCell<Option<String>>;
}

/// Get the trace_id for the current task.
/// Returns "unknown" if no trace_id is set (e.g., outside of a request context).
pub fn trace_id() -> String {
    TRACE_ID
        .try_with(|cell| {
            cell.borrow()
                .as_ref()
                .cloned()
                .unwrap_or_else(|| NO_TRACE.to_string())
        })
        .unwrap_or_else(|_| NO_TRACE.to_string())
}

/// Run a future within a trace context.
/// This is used by middleware to establish the task-local scope.
pub async fn with_trace_id<F, R>(trace_id: String, future: F) -> R
where
    F: std::future::Future<Output = R>,
{
    TRACE_ID.scope(RefCell::new(Some(trace_id)), future).await
}
