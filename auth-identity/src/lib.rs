//! Authentication context access for error reports
//!
//! This module provides the narrow view of the authentication layer the
//! reporter needs:
//! - The current token, through [`TokenStorage`] (per request task with
//!   [`TaskLocalTokenStorage`])
//! - The user behind it, through [`UserObject`]
//! - A [`UserRecord`] ready to attach to a report, through [`UserContextProvider`]
//!
//! # Example
//!
//! ```rust
//! use auth_identity::{AuthenticatedUser, InMemoryTokenStorage, StaticToken, UserContextProvider};
//! use std::sync::Arc;
//!
//! let storage = Arc::new(InMemoryTokenStorage::with_token(StaticToken::for_user(
//!     AuthenticatedUser::new("alice").with_email("alice@example.com"),
//! )));
//! let provider = UserContextProvider::new(storage);
//!
//! let user = provider.user_data().unwrap();
//! assert_eq!(user.id, "alice");
//! ```

pub mod models;
pub mod token;
pub mod service;

pub use models::*;
pub use token::*;
pub use service::*;
