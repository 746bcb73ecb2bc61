use serde::{Deserialize, Serialize};

/// Identity attached to an error report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    /// Always present; falls back to the username
    pub id: String,
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// A user as exposed by the authentication layer.
///
/// Only `username` is mandatory. The defaults model a user type that has no
/// id or email accessor at all.
pub trait UserObject: Send + Sync {
    fn username(&self) -> String;

    fn id(&self) -> Option<String> {
        None
    }

    fn email(&self) -> Option<String> {
        None
    }
}

/// Concrete user for tokens built outside a full identity service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    pub id: Option<String>,
    pub username: String,
    pub email: Option<String>,
}

impl AuthenticatedUser {
    pub fn new<U: Into<String>>(username: U) -> Self {
        Self {
            id: None,
            username: username.into(),
            email: None,
        }
    }

    pub fn with_id<I: Into<String>>(mut self, id: I) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_email<E: Into<String>>(mut self, email: E) -> Self {
        self.email = Some(email.into());
        self
    }
}

impl UserObject for AuthenticatedUser {
    fn username(&self) -> String {
        self.username.clone()
    }

    fn id(&self) -> Option<String> {
        self.id.clone()
    }

    fn email(&self) -> Option<String> {
        self.email.clone()
    }
}
