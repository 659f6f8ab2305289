use std::sync::Arc;

use argon2::{
    password_hash::{
        Error as PasswordHashError, PasswordHash, PasswordHasher, PasswordVerifier, SaltString,
    },
    Argon2,
};
use async_trait::async_trait;
use chrono::Utc;
use log::info;
use rand::rngs::OsRng;

use crate::errors::{DatabaseError, Error, Result};
use crate::users::users_model::{NewUser, Registration, User, UserProfile};
use crate::users::users_traits::{UserRepositoryTrait, UserServiceTrait};

const USER_EXISTS: &str = "User already exists";

pub struct UserService {
    user_repo: Arc<dyn UserRepositoryTrait>,
}

impl UserService {
    pub fn new(user_repo: Arc<dyn UserRepositoryTrait>) -> Self {
        UserService { user_repo }
    }
}

/// Hashes a password with argon2 and a fresh random salt, returning the PHC string.
pub(crate) fn hash_password(plain: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(plain.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| Error::PasswordHash(e.to_string()))
}

#[async_trait]
impl UserServiceTrait for UserService {
    async fn register(&self, registration: Registration) -> Result<User> {
        if self
            .user_repo
            .find_by_email(&registration.email)?
            .is_some()
        {
            return Err(Error::Conflict(USER_EXISTS.to_string()));
        }

        let new_user = NewUser {
            name: registration.name,
            email: registration.email,
            password_hash: hash_password(&registration.password)?,
            created_at: Utc::now().naive_utc(),
        };

        // A concurrent registration can still win the race on the unique index.
        match self.user_repo.insert_user(new_user).await {
            Ok(user) => {
                info!("Registered user {}", user.id);
                Ok(user)
            }
            Err(Error::Database(DatabaseError::UniqueViolation(_))) => {
                Err(Error::Conflict(USER_EXISTS.to_string()))
            }
            Err(e) => Err(e),
        }
    }

    fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        self.user_repo.find_by_email(email)
    }

    fn find_by_id(&self, user_id: i64) -> Result<Option<UserProfile>> {
        Ok(self.user_repo.find_by_id(user_id)?.map(UserProfile::from))
    }

    fn verify_password(&self, plain: &str, password_hash: &str) -> Result<bool> {
        let parsed = PasswordHash::new(password_hash)
            .map_err(|e| Error::PasswordHash(format!("Invalid stored password hash: {e}")))?;
        match Argon2::default().verify_password(plain.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(PasswordHashError::Password) => Ok(false),
            Err(other) => Err(Error::PasswordHash(other.to_string())),
        }
    }

    fn authenticate(&self, email: &str, password: &str) -> Result<UserProfile> {
        let user = self
            .user_repo
            .find_by_email(email)?
            .ok_or(Error::InvalidCredentials)?;
        if !self.verify_password(password, &user.password_hash)? {
            return Err(Error::InvalidCredentials);
        }
        Ok(UserProfile::from(user))
    }
}
