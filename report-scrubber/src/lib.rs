//! Sensitive parameter scrubbing for reported exceptions
//!
//! Exceptions whose class is listed in [`ScrubConfig::exceptions`] are
//! flattened into an [`ExceptionSnapshot`] and every string argument in
//! their traces that exactly equals a registered sensitive value is replaced
//! with `%<key>%`, where `<key>` is the name the value was registered under.
//!
//! # Example
//!
//! ```rust
//! use error_common::{ArgValue, Exception, StackFrame};
//! use report_scrubber::{ScrubConfig, Scrubber};
//!
//! let scrubber = Scrubber::new(
//!     &ScrubConfig::new()
//!         .with_exception("LoginException")
//!         .with_parameter("password", "secret123"),
//! );
//!
//! let exception = Exception::new("LoginException", "Bad credentials")
//!     .with_frame(StackFrame::new("login").with_arg("password", "secret123"));
//!
//! let snapshot = scrubber.scrub(&exception).unwrap();
//! assert_eq!(snapshot.trace[0].args["password"], ArgValue::from("%password%"));
//! ```

pub mod config;
pub mod snapshot;
pub mod scrubber;

pub use config::*;
pub use snapshot::*;
pub use scrubber::*;
