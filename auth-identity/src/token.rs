use crate::models::UserObject;
use parking_lot::RwLock;
use std::future::Future;
use std::sync::Arc;

/// What a token says about who is logged in
#[derive(Clone)]
pub enum TokenUser {
    /// A real user object
    User(Arc<dyn UserObject>),
    /// A bare principal string such as `anon.`
    Anonymous(String),
}

impl std::fmt::Debug for TokenUser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenUser::User(user) => f.debug_tuple("User").field(&user.username()).finish(),
            TokenUser::Anonymous(name) => f.debug_tuple("Anonymous").field(name).finish(),
        }
    }
}

/// Authentication token for the current request
pub trait AuthToken: Send + Sync {
    fn user(&self) -> Option<TokenUser>;
}

/// Access to the current authentication token
pub trait TokenStorage: Send + Sync {
    fn token(&self) -> Option<Arc<dyn AuthToken>>;
}

/// Token with a fixed user
#[derive(Debug, Clone)]
pub struct StaticToken {
    user: Option<TokenUser>,
}

impl StaticToken {
    pub fn for_user<U: UserObject + 'static>(user: U) -> Self {
        Self {
            user: Some(TokenUser::User(Arc::new(user))),
        }
    }

    pub fn anonymous<N: Into<String>>(name: N) -> Self {
        Self {
            user: Some(TokenUser::Anonymous(name.into())),
        }
    }

    /// Token that carries no user at all
    pub fn empty() -> Self {
        Self { user: None }
    }
}

impl AuthToken for StaticToken {
    fn user(&self) -> Option<TokenUser> {
        self.user.clone()
    }
}

/// Token storage with a single slot shared by every caller.
///
/// Suitable for tests and single-request processes. Concurrent requests
/// overwrite each other's token; use [`TaskLocalTokenStorage`] there.
pub struct InMemoryTokenStorage {
    token: RwLock<Option<Arc<dyn AuthToken>>>,
}

impl InMemoryTokenStorage {
    pub fn new() -> Self {
        Self {
            token: RwLock::new(None),
        }
    }

    pub fn with_token<T: AuthToken + 'static>(token: T) -> Self {
        let storage = Self::new();
        storage.set_token(token);
        storage
    }

    pub fn set_token<T: AuthToken + 'static>(&self, token: T) {
        *self.token.write() = Some(Arc::new(token));
    }

    pub fn clear(&self) {
        *self.token.write() = None;
    }
}

impl Default for InMemoryTokenStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenStorage for InMemoryTokenStorage {
    fn token(&self) -> Option<Arc<dyn AuthToken>> {
        self.token.read().clone()
    }
}

tokio::task_local! {
    static CURRENT_TOKEN: Option<Arc<dyn AuthToken>>;
}

/// Token storage scoped to the current task.
///
/// Each request runs inside [`TaskLocalTokenStorage::scope`] with its own
/// token, so concurrent requests never see each other's user. Outside a
/// scope there is no token.
#[derive(Debug, Clone, Copy, Default)]
pub struct TaskLocalTokenStorage;

impl TaskLocalTokenStorage {
    pub fn new() -> Self {
        Self
    }

    /// Run `future` with `token` as the current token
    pub async fn scope<F: Future>(token: Option<Arc<dyn AuthToken>>, future: F) -> F::Output {
        CURRENT_TOKEN.scope(token, future).await
    }
}

impl TokenStorage for TaskLocalTokenStorage {
    fn token(&self) -> Option<Arc<dyn AuthToken>> {
        CURRENT_TOKEN.try_with(Clone::clone).ok().flatten()
    }
}
