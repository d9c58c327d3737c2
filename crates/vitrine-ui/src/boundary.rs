use std::panic::{AssertUnwindSafe, catch_unwind};

use vitrine_core::View;

/// What went wrong inside an `ErrorBoundary`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ErrorInfo {
    pub message: String,
    pub component: String,
}

/// Composes `content`; if it panics, logs the panic and composes `fallback`
/// instead so the rest of the page still renders.
pub fn ErrorBoundary(
    component: &str,
    fallback: impl FnOnce(ErrorInfo) -> View,
    content: impl FnOnce() -> View,
) -> View {
    match catch_unwind(AssertUnwindSafe(content)) {
        Ok(view) => view,
        Err(err) => {
            let message = if let Some(s) = err.downcast_ref::<String>() {
                s.clone()
            } else if let Some(s) = err.downcast_ref::<&str>() {
                s.to_string()
            } else {
                "Unknown panic".to_string()
            };
            log::error!("{component} failed to compose: {message}");

            fallback(ErrorInfo {
                message,
                component: component.to_string(),
            })
        }
    }
}
