//! HTTP middleware components.

pub mod auth;
pub mod logging;
pub mod metrics;
pub mod security_headers;
pub mod trace_id;

#[allow(unused_imports)] // Re-exports for downstream use
pub use auth::{
    authorize, require_admin_web, require_auth, require_student_mobile, AccessDenial, Platform,
};
#[allow(unused_imports)] // Re-exports for downstream use
pub use metrics::{
    init_metrics, metrics_handler, metrics_middleware, record_attendance_marked,
    record_registration_created,
};
#[allow(unused_imports)] // Re-exports for downstream use
pub use security_headers::security_headers_middleware;
#[allow(unused_imports)] // Re-exports for downstream use
pub use trace_id::{trace_id, RequestId, REQUEST_ID_HEADER};
