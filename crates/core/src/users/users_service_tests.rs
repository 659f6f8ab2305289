#[cfg(test)]
mod tests {
    use crate::errors::{DatabaseError, Error, Result};
    use crate::users::users_service::hash_password;
    use crate::users::{
        NewUser, Registration, User, UserRepositoryTrait, UserService, UserServiceTrait,
    };
    use async_trait::async_trait;
    use std::sync::{Arc, Mutex};

    // --- Mock UserRepository ---
    #[derive(Default)]
    struct MockUserRepository {
        users: Mutex<Vec<User>>,
        fail_insert_with_unique_violation: bool,
    }

    #[async_trait]
    impl UserRepositoryTrait for MockUserRepository {
        fn find_by_email(&self, email: &str) -> Result<Option<User>> {
            let users = self.users.lock().unwrap();
            Ok(users.iter().find(|u| u.email == email).cloned())
        }

        fn find_by_id(&self, user_id: i64) -> Result<Option<User>> {
            let users = self.users.lock().unwrap();
            Ok(users.iter().find(|u| u.id == user_id).cloned())
        }

        async fn insert_user(&self, new_user: NewUser) -> Result<User> {
            if self.fail_insert_with_unique_violation {
                return Err(Error::Database(DatabaseError::UniqueViolation(
                    "UNIQUE constraint failed: users.email".to_string(),
                )));
            }
            let mut users = self.users.lock().unwrap();
            let user = User {
                id: users.len() as i64 + 1,
                name: new_user.name,
                email: new_user.email,
                password_hash: new_user.password_hash,
                created_at: new_user.created_at,
            };
            users.push(user.clone());
            Ok(user)
        }
    }

    fn registration(email: &str, password: &str) -> Registration {
        Registration {
            name: "Ana".to_string(),
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn test_register_hashes_password() {
        let service = UserService::new(Arc::new(MockUserRepository::default()));

        let user = service
            .register(registration("a@x.com", "secret1"))
            .await
            .unwrap();

        assert_eq!(user.id, 1);
        assert_eq!(user.email, "a@x.com");
        assert_ne!(user.password_hash, "secret1");
        assert!(user.password_hash.starts_with("$argon2"));
        assert!(service.verify_password("secret1", &user.password_hash).unwrap());
    }

    #[tokio::test]
    async fn test_register_duplicate_email_conflicts() {
        let service = UserService::new(Arc::new(MockUserRepository::default()));
        service
            .register(registration("a@x.com", "secret1"))
            .await
            .unwrap();

        let second = service.register(registration("a@x.com", "other-pass")).await;

        assert!(matches!(second, Err(Error::Conflict(_))));
    }

    #[tokio::test]
    async fn test_register_unique_violation_race_maps_to_conflict() {
        let repo = MockUserRepository {
            fail_insert_with_unique_violation: true,
            ..Default::default()
        };
        let service = UserService::new(Arc::new(repo));

        let result = service.register(registration("a@x.com", "secret1")).await;

        assert!(matches!(result, Err(Error::Conflict(_))));
    }

    #[tokio::test]
    async fn test_authenticate() {
        let service = UserService::new(Arc::new(MockUserRepository::default()));
        let user = service
            .register(registration("a@x.com", "secret1"))
            .await
            .unwrap();

        let profile = service.authenticate("a@x.com", "secret1").unwrap();
        assert_eq!(profile.id, user.id);
        assert_eq!(profile.name, "Ana");

        assert!(matches!(
            service.authenticate("a@x.com", "wrong-password"),
            Err(Error::InvalidCredentials)
        ));
        assert!(matches!(
            service.authenticate("nobody@x.com", "secret1"),
            Err(Error::InvalidCredentials)
        ));
    }

    #[test]
    fn test_verify_password_rejects_garbage_hash() {
        let service = UserService::new(Arc::new(MockUserRepository::default()));
        assert!(matches!(
            service.verify_password("secret1", "not-a-phc-string"),
            Err(Error::PasswordHash(_))
        ));
    }

    #[test]
    fn test_hash_password_is_salted() {
        let first = hash_password("secret1").unwrap();
        let second = hash_password("secret1").unwrap();
        assert_ne!(first, second);
    }

    #[tokio::test]
    async fn test_find_by_id_returns_profile() {
        let service = UserService::new(Arc::new(MockUserRepository::default()));
        let user = service
            .register(registration("a@x.com", "secret1"))
            .await
            .unwrap();

        let profile = service.find_by_id(user.id).unwrap().unwrap();
        assert_eq!(profile.email, "a@x.com");
        assert!(service.find_by_id(42).unwrap().is_none());
    }
}
