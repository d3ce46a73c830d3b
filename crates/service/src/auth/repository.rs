use async_trait::async_trait;
use uuid::Uuid;

use super::errors::AuthError;

/// Repository abstraction for auth-related persistence.
#[async_trait]
pub trait AuthRepository: Send + Sync {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<models::user::Model>, AuthError>;
    async fn find_user_by_id(&self, id: Uuid) -> Result<Option<models::user::Model>, AuthError>;

    /// Existence check plus insert as one atomic unit against the store.
    /// The storage-level unique key on email is the authoritative backstop;
    /// implementations map a unique-constraint violation to `DuplicateEmail`.
    async fn create_user(
        &self,
        full_name: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<models::user::Model, AuthError>;
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct MockAuthRepository {
        users: Mutex<HashMap<Uuid, models::user::Model>>,
    }

    impl MockAuthRepository {
        /// Simulates account deletion for stale-token tests.
        pub fn remove_user(&self, id: Uuid) {
            self.users.lock().unwrap().remove(&id);
        }
    }

    #[async_trait]
    impl AuthRepository for MockAuthRepository {
        async fn find_user_by_email(&self, email: &str) -> Result<Option<models::user::Model>, AuthError> {
            let users = self.users.lock().unwrap();
            Ok(users.values().find(|u| u.email == email).cloned())
        }

        async fn find_user_by_id(&self, id: Uuid) -> Result<Option<models::user::Model>, AuthError> {
            let users = self.users.lock().unwrap();
            Ok(users.get(&id).cloned())
        }

        async fn create_user(
            &self,
            full_name: &str,
            email: &str,
            password_hash: &str,
        ) -> Result<models::user::Model, AuthError> {
            let mut users = self.users.lock().unwrap();
            if users.values().any(|u| u.email == email) {
                return Err(AuthError::DuplicateEmail);
            }
            let user = models::user::Model {
                id: Uuid::new_v4(),
                full_name: full_name.to_string(),
                email: email.to_string(),
                password_hash: password_hash.to_string(),
            };
            users.insert(user.id, user.clone());
            Ok(user)
        }
    }
}
