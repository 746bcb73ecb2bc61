//! Reporting decisions for the error reporter
//!
//! Decides whether an error is forwarded to the remote error-tracking
//! service. Each [`Voter`] answers allow, deny or abstain; the
//! [`ReportDecisionManager`] applies a deny-overrides policy over the voters
//! in registration order.
//!
//! # Built-in Voters
//!
//! - **HttpStatusVoter**: Denies ignored HTTP client errors (404 by default)
//! - **SameRefererVoter**: Denies errors whose referer is the request's own host
//!
//! # Example
//!
//! ```rust
//! use error_common::{Exception, ReportableError};
//! use report_decision::{HttpStatusVoter, ReportDecisionManager, SameRefererVoter};
//!
//! let manager = ReportDecisionManager::default()
//!     .with_voter(HttpStatusVoter::default())
//!     .with_voter(SameRefererVoter::new());
//!
//! let not_found: ReportableError = Exception::new("NotFoundHttpException", "No route")
//!     .with_status_code(404)
//!     .into();
//! assert!(!manager.decide(&not_found));
//! ```

pub mod voter;
pub mod http_status;
pub mod same_referer;
pub mod manager;

pub use voter::*;
pub use http_status::*;
pub use same_referer::*;
pub use manager::*;
