use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use std::sync::Arc;
use uuid::Uuid;

use crate::error::{UserError, UserResult};
use crate::models::{CreateUser, UpdateUser, User};
use crate::repository::UserRepository;

/// Service layer for User business logic
///
/// Input is expected to be validated already (`ValidatedJson` at the HTTP
/// boundary).
#[derive(Clone)]
pub struct UserService<R: UserRepository> {
    repository: Arc<R>,
}

impl<R: UserRepository> UserService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Register a user. Fails with `DuplicateEmail` when a non-deleted user
    /// already has exactly this email.
    pub async fn create(&self, input: CreateUser) -> UserResult<User> {
        if self.repository.get_by_email(&input.email).await?.is_some() {
            tracing::info!("Rejected registration with an email already in use");
            return Err(UserError::DuplicateEmail(input.email));
        }

        let password_hash = hash_password(&input.password)?;
        let user = self.repository.create(User::new(input, password_hash)).await?;

        tracing::info!(user_id = %user.id, "Created user");
        Ok(user)
    }

    pub async fn find_by_id(&self, id: Uuid) -> UserResult<User> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id))
    }

    pub async fn find_by_email(&self, email: &str) -> UserResult<Option<User>> {
        self.repository.get_by_email(email).await
    }

    pub async fn find_all(&self) -> UserResult<Vec<User>> {
        self.repository.list().await
    }

    /// Merge `input` into an existing user. A new password is re-hashed.
    pub async fn update(&self, id: Uuid, input: UpdateUser) -> UserResult<User> {
        let mut user = self.find_by_id(id).await?;

        let password_hash = input.password.as_deref().map(hash_password).transpose()?;
        user.apply_update(input, password_hash);

        let user = self.repository.update(user).await?;

        tracing::info!(user_id = %id, "Updated user");
        Ok(user)
    }

    /// Soft delete: the row is kept with `deleted_at` set.
    pub async fn remove(&self, id: Uuid) -> UserResult<User> {
        let mut user = self.find_by_id(id).await?;
        user.soft_delete();

        let user = self.repository.update(user).await?;

        tracing::info!(user_id = %id, "Soft-deleted user");
        Ok(user)
    }
}

fn hash_password(password: &str) -> UserResult<String> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| UserError::PasswordHash(e.to_string()))
}

/// Check `password` against a stored Argon2 PHC string.
pub fn verify_password(password: &str, hash: &str) -> UserResult<bool> {
    let parsed_hash =
        PasswordHash::new(hash).map_err(|e| UserError::PasswordHash(e.to_string()))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}
