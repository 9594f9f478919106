//! User-facing notifications
//!
//! Short transient messages about the outcome of a user action. The
//! console front end prints them; the library only logs.

use crate::error::{AppError, Result};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
}

/// Sink for short outcome messages
pub trait Notifier: Send + Sync {
    fn notify(&self, level: NoticeLevel, message: &str);

    fn success(&self, message: &str) {
        self.notify(NoticeLevel::Success, message);
    }

    fn error(&self, message: &str) {
        self.notify(NoticeLevel::Error, message);
    }
}

/// Notifier that only writes to the log
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, level: NoticeLevel, message: &str) {
        match level {
            NoticeLevel::Success => tracing::info!("Notice: {}", message),
            NoticeLevel::Error => tracing::warn!("Notice: {}", message),
        }
    }
}

pub type SharedNotifier = Arc<dyn Notifier>;

/// Announce the outcome of a user action and pass the result through.
///
/// Validation failures show their own field messages; anything else is
/// logged and shown as `failure`.
pub fn report<T>(notifier: &dyn Notifier, result: Result<T>, success: &str, failure: &str) -> Result<T> {
    match &result {
        Ok(_) => notifier.success(success),
        Err(AppError::Validation(issues)) => {
            tracing::debug!("Rejected before submit: {}", issues);
            notifier.error(&issues.to_string());
        }
        Err(e) => {
            tracing::error!("{}: {}", failure, e);
            notifier.error(failure);
        }
    }
    result
}
