//! Seam to the remote error-tracking client
//!
//! The reporter never talks to the network itself. Everything it forwards
//! goes through [`RemoteLogger::log`] as a [`ReportPayload`] plus the
//! per-call [`ReportContext`].

use async_trait::async_trait;
use auth_identity::UserRecord;
use chrono::{DateTime, Utc};
use error_common::{ErrorLevel, Exception, ExtraData, Level, Result};
use report_scrubber::ExceptionSnapshot;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

#[cfg(test)]
use mockall::automock;

/// Identifier the remote service assigns to a logged item
pub type ReportId = Uuid;

/// Remote representation of a level-tagged runtime error
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorWrapper {
    pub level: ErrorLevel,
    /// Constant name of the level, e.g. `E_WARNING`
    pub error_class: String,
    pub message: String,
    pub file: String,
    pub line: u32,
}

/// What is sent to the remote service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "body", rename_all = "snake_case")]
pub enum ReportPayload {
    /// Exception forwarded as raised
    Exception(Exception),
    /// Flattened, scrubbed exception
    Snapshot(ExceptionSnapshot),
    /// Runtime error wrapped by the client's data builder
    Error(ErrorWrapper),
}

impl ReportPayload {
    pub fn class(&self) -> &str {
        match self {
            ReportPayload::Exception(exception) => exception.class(),
            ReportPayload::Snapshot(snapshot) => &snapshot.class,
            ReportPayload::Error(wrapper) => &wrapper.error_class,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            ReportPayload::Exception(exception) => exception.message(),
            ReportPayload::Snapshot(snapshot) => &snapshot.message,
            ReportPayload::Error(wrapper) => &wrapper.message,
        }
    }
}

/// Metadata staged for exactly one report.
///
/// Built per call and moved into [`RemoteLogger::log`], so nothing outlives
/// the report it belongs to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportContext {
    /// Raw body of the request the error was raised in
    pub request_content: Option<String>,
    /// Authenticated user at report time
    pub person: Option<UserRecord>,
    pub reported_at: DateTime<Utc>,
}

impl ReportContext {
    pub fn new(request_content: Option<String>, person: Option<UserRecord>) -> Self {
        Self {
            request_content,
            person,
            reported_at: Utc::now(),
        }
    }
}

impl Default for ReportContext {
    fn default() -> Self {
        Self::new(None, None)
    }
}

/// Builds the client's wrapper for runtime errors
#[cfg_attr(test, automock)]
pub trait DataBuilder: Send + Sync {
    fn generate_error_wrapper(&self, level: ErrorLevel, message: &str, file: &str, line: u32) -> ErrorWrapper;
}

/// Names the wrapper after the level constant
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultDataBuilder;

impl DataBuilder for DefaultDataBuilder {
    fn generate_error_wrapper(&self, level: ErrorLevel, message: &str, file: &str, line: u32) -> ErrorWrapper {
        let error_class = match level.name() {
            Some(name) => name.to_string(),
            None => format!("Unknown error ({})", level),
        };

        ErrorWrapper {
            level,
            error_class,
            message: message.to_string(),
            file: file.to_string(),
            line,
        }
    }
}

/// Remote error-tracking client
#[cfg_attr(test, automock)]
#[async_trait]
pub trait RemoteLogger: Send + Sync {
    /// Send one item; transport failures are returned, never retried here
    async fn log(
        &self,
        level: Level,
        payload: ReportPayload,
        extra: ExtraData,
        context: ReportContext,
    ) -> Result<ReportId>;

    fn data_builder(&self) -> Arc<dyn DataBuilder>;

    async fn flush(&self) -> Result<()>;
}
