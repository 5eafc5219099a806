use tracing::warn;

use crate::auth::permissions::RouteGroup;
use crate::errors::ErrorCode;
use crate::logging::pii::Redacted;
use crate::trace_ctx;

/// Log a failed password login.
pub fn login_failed(reason: &str, login: &str) {
    let trace_id = trace_ctx::trace_id();

    warn!(
        event = "SECURITY_LOGIN_FAILED",
        %trace_id,
        login = %Redacted(login),
        reason,
        "Authentication failure"
    );
}

/// Log a request rejected by the access gate.
pub fn access_denied(group: RouteGroup, code: ErrorCode, path: &str) {
    let trace_id = trace_ctx::trace_id();

    warn!(
        event = "SECURITY_ACCESS_DENIED",
        %trace_id,
        route_group = group.as_str(),
        code = code.as_str(),
        path,
        "Request rejected at access gate"
    );
}
