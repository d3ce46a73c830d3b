use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set, SqlErr,
    TransactionTrait,
};
use uuid::Uuid;

use crate::auth::errors::AuthError;
use crate::auth::repository::AuthRepository;

pub struct SeaOrmAuthRepository {
    pub db: DatabaseConnection,
}

#[async_trait::async_trait]
impl AuthRepository for SeaOrmAuthRepository {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<models::user::Model>, AuthError> {
        models::user::Entity::find()
            .filter(models::user::Column::Email.eq(email.to_string()))
            .one(&self.db)
            .await
            .map_err(|e| AuthError::Repository(e.to_string()))
    }

    async fn find_user_by_id(&self, id: Uuid) -> Result<Option<models::user::Model>, AuthError> {
        models::user::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| AuthError::Repository(e.to_string()))
    }

    async fn create_user(
        &self,
        full_name: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<models::user::Model, AuthError> {
        // Check-then-insert runs in one transaction to narrow the duplicate
        // race under concurrent signups; the unique key on email remains the
        // authoritative guard and is mapped below.
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| AuthError::Repository(e.to_string()))?;

        let existing = models::user::Entity::find()
            .filter(models::user::Column::Email.eq(email.to_string()))
            .one(&txn)
            .await
            .map_err(|e| AuthError::Repository(e.to_string()))?;
        if existing.is_some() {
            let _ = txn.rollback().await;
            return Err(AuthError::DuplicateEmail);
        }

        let am = models::user::ActiveModel {
            id: Set(Uuid::new_v4()),
            full_name: Set(full_name.to_string()),
            email: Set(email.to_string()),
            password_hash: Set(password_hash.to_string()),
        };
        let created = match am.insert(&txn).await {
            Ok(m) => m,
            Err(e) => {
                let mapped = if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) {
                    AuthError::DuplicateEmail
                } else {
                    AuthError::Repository(e.to_string())
                };
                let _ = txn.rollback().await;
                return Err(mapped);
            }
        };

        txn.commit()
            .await
            .map_err(|e| AuthError::Repository(e.to_string()))?;
        Ok(created)
    }
}
