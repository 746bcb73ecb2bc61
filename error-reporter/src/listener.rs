//! Hooks the host framework calls when something goes wrong
//!
//! The listener is the only place reporting failures are absorbed: a broken
//! transport must never turn into a second error while handling the first.

use crate::{client::ReportId, reporter::Reporter};
use error_common::{ErrorLevel, Exception, ExtraData, HttpRequest};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::warn;

/// An uncaught exception, with the request it was raised in if any
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExceptionEvent {
    pub exception: Exception,
    pub request: Option<HttpRequest>,
}

impl ExceptionEvent {
    pub fn new(exception: Exception) -> Self {
        Self {
            exception,
            request: None,
        }
    }

    pub fn with_request(mut self, request: HttpRequest) -> Self {
        self.request = Some(request);
        self
    }
}

/// A runtime error raised by the host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorEvent {
    pub level: ErrorLevel,
    pub message: String,
    pub file: String,
    pub line: u32,
    pub request: Option<HttpRequest>,
}

impl ErrorEvent {
    pub fn new<M: Into<String>, F: Into<String>>(
        level: ErrorLevel,
        message: M,
        file: F,
        line: u32,
    ) -> Self {
        Self {
            level,
            message: message.into(),
            file: file.into(),
            line,
            request: None,
        }
    }

    pub fn with_request(mut self, request: HttpRequest) -> Self {
        self.request = Some(request);
        self
    }
}

#[derive(Clone)]
pub struct ErrorListener {
    reporter: Arc<Reporter>,
}

impl ErrorListener {
    pub fn new(reporter: Arc<Reporter>) -> Self {
        Self { reporter }
    }

    /// Forward the event's exception with no extra data
    pub async fn on_exception(&self, event: &ExceptionEvent) -> Option<ReportId> {
        let class = event.exception.class().to_string();
        match self
            .reporter
            .report(event.exception.clone(), event.request.as_ref(), ExtraData::new())
            .await
        {
            Ok(id) => id,
            Err(e) => {
                warn!(error_class = %class, error = %e, "Failed to report exception");
                None
            }
        }
    }

    /// Forward a runtime error.
    ///
    /// Always returns `false`, so the host's own error handling still runs.
    pub async fn on_error(&self, event: &ErrorEvent) -> bool {
        if let Err(e) = self
            .reporter
            .report_error(
                event.level,
                &event.message,
                &event.file,
                event.line,
                event.request.as_ref(),
            )
            .await
        {
            warn!(level = %event.level, error = %e, "Failed to report runtime error");
        }

        false
    }
}
