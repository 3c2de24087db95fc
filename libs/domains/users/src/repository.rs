use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{UserError, UserResult};
use crate::models::User;

/// Repository trait for User persistence
///
/// Every read only sees users that are not soft-deleted.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user
    async fn create(&self, user: User) -> UserResult<User>;

    /// Get a user by ID
    async fn get_by_id(&self, id: Uuid) -> UserResult<Option<User>>;

    /// Get a user by exact email
    async fn get_by_email(&self, email: &str) -> UserResult<Option<User>>;

    /// All users, oldest first
    async fn list(&self) -> UserResult<Vec<User>>;

    /// Persist every field of `user`, including `deleted_at`
    async fn update(&self, user: User) -> UserResult<User>;
}

/// In-memory implementation of UserRepository (for development/testing)
///
/// Soft-deleted rows are kept, and a second non-deleted row with the same
/// email is rejected the way the partial unique index rejects it.
#[derive(Debug, Default, Clone)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<Uuid, User>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self {
            users: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Look up a row whether or not it is soft-deleted.
    pub async fn get_including_deleted(&self, id: Uuid) -> Option<User> {
        self.users.read().await.get(&id).cloned()
    }

    fn email_taken(users: &HashMap<Uuid, User>, email: &str, except: Uuid) -> bool {
        users
            .values()
            .any(|u| u.id != except && !u.is_deleted() && u.email == email)
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> UserResult<User> {
        let mut users = self.users.write().await;

        if Self::email_taken(&users, &user.email, user.id) {
            return Err(UserError::UniqueEmail(user.email));
        }

        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn get_by_id(&self, id: Uuid) -> UserResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.get(&id).filter(|u| !u.is_deleted()).cloned())
    }

    async fn get_by_email(&self, email: &str) -> UserResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users
            .values()
            .find(|u| !u.is_deleted() && u.email == email)
            .cloned())
    }

    async fn list(&self) -> UserResult<Vec<User>> {
        let users = self.users.read().await;

        let mut result: Vec<User> = users.values().filter(|u| !u.is_deleted()).cloned().collect();
        result.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));

        Ok(result)
    }

    async fn update(&self, user: User) -> UserResult<User> {
        let mut users = self.users.write().await;

        if !users.contains_key(&user.id) {
            return Err(UserError::NotFound(user.id));
        }

        if !user.is_deleted() && Self::email_taken(&users, &user.email, user.id) {
            return Err(UserError::UniqueEmail(user.email));
        }

        users.insert(user.id, user.clone());
        Ok(user)
    }
}
