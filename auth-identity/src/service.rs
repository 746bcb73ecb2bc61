use crate::{models::*, token::*};
use std::sync::Arc;
use tracing::trace;

/// Extracts the identity of the current user for error reports.
///
/// Queried once per report; holds no cache.
#[derive(Clone)]
pub struct UserContextProvider {
    token_storage: Arc<dyn TokenStorage>,
}

impl UserContextProvider {
    pub fn new(token_storage: Arc<dyn TokenStorage>) -> Self {
        Self { token_storage }
    }

    /// Current user, or `None` when nobody is authenticated
    pub fn user_data(&self) -> Option<UserRecord> {
        let Some(token) = self.token_storage.token() else {
            trace!("No authentication token, reporting without user");
            return None;
        };

        let user = match token.user() {
            Some(TokenUser::User(user)) => user,
            Some(TokenUser::Anonymous(_)) | None => {
                trace!("Token carries no user object, reporting without user");
                return None;
            }
        };

        let username = user.username();
        Some(UserRecord {
            // id is required downstream
            id: user.id().unwrap_or_else(|| username.clone()),
            username,
            email: user.email(),
        })
    }
}
