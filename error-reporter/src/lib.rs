//! Error reporting adapter
//!
//! Sits between an application's error handling and a remote error-tracking
//! client. Every exception or runtime error goes through the same pipeline:
//! - Voted on by the [`ReportDecisionManager`]; any deny suppresses it
//! - Scrubbed of sensitive argument values when its class is configured for it
//! - Enriched with the request body and the current user
//! - Forwarded to a [`RemoteLogger`]
//!
//! # Example
//!
//! ```rust,no_run
//! use error_reporter::{ErrorListener, ExceptionEvent, Reporter, ReporterConfig, TracingLogger};
//! use error_common::Exception;
//! use std::sync::Arc;
//!
//! # async fn run() -> error_common::Result<()> {
//! let reporter = Reporter::builder()
//!     .config(ReporterConfig::from_env()?)
//!     .client(Arc::new(TracingLogger::new()))
//!     .build()?;
//!
//! let listener = ErrorListener::new(Arc::new(reporter));
//! listener
//!     .on_exception(&ExceptionEvent::new(Exception::new("RuntimeException", "boom")))
//!     .await;
//! # Ok(())
//! # }
//! ```
//!
//! [`ReportDecisionManager`]: report_decision::ReportDecisionManager

pub mod client;
pub mod config;
pub mod reporter;
pub mod listener;
pub mod telemetry;
pub mod tracing_logger;

pub use client::{
    DataBuilder, DefaultDataBuilder, ErrorWrapper, RemoteLogger, ReportContext, ReportId,
    ReportPayload,
};
pub use config::ReporterConfig;
pub use listener::{ErrorEvent, ErrorListener, ExceptionEvent};
pub use reporter::{Reporter, ReporterBuilder};
pub use telemetry::init_tracing;
pub use tracing_logger::TracingLogger;
