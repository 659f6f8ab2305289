use crate::errors::Result;
use crate::users::users_model::{NewUser, Registration, User, UserProfile};
use async_trait::async_trait;

/// Trait for user repository operations
#[async_trait]
pub trait UserRepositoryTrait: Send + Sync {
    fn find_by_email(&self, email: &str) -> Result<Option<User>>;
    fn find_by_id(&self, user_id: i64) -> Result<Option<User>>;
    async fn insert_user(&self, new_user: NewUser) -> Result<User>;
}

/// Trait for user service operations
#[async_trait]
pub trait UserServiceTrait: Send + Sync {
    /// Creates a user, failing with `Error::Conflict` when the email is taken.
    async fn register(&self, registration: Registration) -> Result<User>;
    fn find_by_email(&self, email: &str) -> Result<Option<User>>;
    fn find_by_id(&self, user_id: i64) -> Result<Option<UserProfile>>;
    fn verify_password(&self, plain: &str, password_hash: &str) -> Result<bool>;
    /// Looks the user up by email and checks the password. Unknown emails and
    /// wrong passwords both yield `Error::InvalidCredentials`.
    fn authenticate(&self, email: &str, password: &str) -> Result<UserProfile>;
}
