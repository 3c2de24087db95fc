use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::{Validate, ValidationError};

/// User account as stored
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    /// Unique among non-deleted users, compared case-sensitively
    pub email: String,
    /// Argon2 PHC string
    pub password: String,
    /// Set when the account is soft-deleted
    pub deleted_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Build a new user from validated input and an already hashed password.
    pub fn new(input: CreateUser, password_hash: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            first_name: input.first_name,
            last_name: input.last_name,
            email: input.email,
            password: password_hash,
            deleted_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    /// Merge the provided fields. `password_hash` replaces the stored hash
    /// when the patch carried a new password.
    pub fn apply_update(&mut self, input: UpdateUser, password_hash: Option<String>) {
        if let Some(first_name) = input.first_name {
            self.first_name = first_name;
        }
        if let Some(last_name) = input.last_name {
            self.last_name = last_name;
        }
        if let Some(email) = input.email {
            self.email = email;
        }
        if let Some(hash) = password_hash {
            self.password = hash;
        }
        self.updated_at = Utc::now();
    }

    pub fn soft_delete(&mut self) {
        let now = Utc::now();
        self.deleted_at = Some(now);
        self.updated_at = now;
    }
}

/// User as returned over HTTP, without the password hash
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub deleted_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
            deleted_at: user.deleted_at,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

fn not_empty(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::new("not_empty")
            .with_message(Cow::Borrowed("should not be empty")));
    }
    Ok(())
}

/// DTO for registering a user
///
/// Missing fields deserialize as empty strings so they are reported by
/// validation rather than rejected by the JSON extractor.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateUser {
    #[validate(
        custom(function = "not_empty"),
        length(max = 50, message = "must be shorter than or equal to 50 characters")
    )]
    #[schema(example = "Ada", max_length = 50)]
    pub first_name: String,

    #[validate(
        custom(function = "not_empty"),
        length(max = 50, message = "must be shorter than or equal to 50 characters")
    )]
    #[schema(example = "Lovelace", max_length = 50)]
    pub last_name: String,

    #[validate(email(message = "must be an email"))]
    #[schema(example = "ada@example.com")]
    pub email: String,

    #[validate(length(min = 8, message = "must be longer than or equal to 8 characters"))]
    #[schema(example = "correct-horse", min_length = 8)]
    pub password: String,
}

/// DTO for a partial update; absent fields are left unchanged
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUser {
    #[validate(
        custom(function = "not_empty"),
        length(max = 50, message = "must be shorter than or equal to 50 characters")
    )]
    pub first_name: Option<String>,

    #[validate(
        custom(function = "not_empty"),
        length(max = 50, message = "must be shorter than or equal to 50 characters")
    )]
    pub last_name: Option<String>,

    #[validate(email(message = "must be an email"))]
    pub email: Option<String>,

    #[validate(length(min = 8, message = "must be longer than or equal to 8 characters"))]
    pub password: Option<String>,
}

/// Query string for `GET /by-email`
#[derive(Debug, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct EmailQuery {
    /// Exact, case-sensitive match
    pub email: String,
}
