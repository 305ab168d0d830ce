use tracing::warn;

use crate::logging::pii::Redacted;
use crate::trace_ctx;

/// Log a security-relevant login failure event.
pub fn login_failed(reason: &str, email: Option<&str>) {
    let trace_id = trace_ctx::trace_id();

    warn!(
        event = "SECURITY_LOGIN_FAILED",
        %trace_id,
        email = %email.map(Redacted).unwrap_or(Redacted("")),
        reason,
        "Authentication failure"
    );
}

/// Log a request that presented a revoked JWT.
pub fn revoked_token_used(user_id: i64) {
    let trace_id = trace_ctx::trace_id();

    warn!(
        event = "SECURITY_REVOKED_TOKEN_USED",
        %trace_id,
        user_id,
        "Request carried a revoked token"
    );
}
