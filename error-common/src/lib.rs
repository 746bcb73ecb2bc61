//! Common error model for the error reporter
//!
//! This crate provides the values that flow through the reporting pipeline:
//! the errors being reported, the request they were raised in, and the error
//! type returned when reporting itself fails.
//!
//! # Key Types
//!
//! - **ReportableError**: Either a thrown [`Exception`] or a level-tagged [`RuntimeError`]
//! - **StackFrame / ArgValue**: Captured call stack with argument values
//! - **ErrorLevel**: Runtime error level bitmask (`E_WARNING`, `E_USER_NOTICE`, ...)
//! - **Level**: Severity sent to the remote error-tracking service
//! - **HttpRequest**: Minimal view of the request an error was raised in
//! - **ReporterError**: Failures of the reporting pipeline itself
//!
//! # Example
//!
//! ```rust
//! use error_common::{ArgValue, Exception, ReportableError, StackFrame};
//!
//! let exception = Exception::new("App\\LoginFailed", "Invalid credentials")
//!     .at("/srv/app/src/Login.php", 42)
//!     .with_frame(
//!         StackFrame::new("authenticate")
//!             .with_arg("password", ArgValue::from("secret123")),
//!     );
//!
//! let error = ReportableError::from(exception);
//! assert_eq!(error.line(), 42);
//! ```

pub mod types;
pub mod context;
pub mod levels;
pub mod error;

pub use types::*;
pub use context::*;
pub use levels::*;
pub use error::*;
