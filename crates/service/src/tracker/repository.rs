use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set,
};
use uuid::Uuid;

use models::tracker;

use super::{TrackerError, TrackerSpec};

#[async_trait]
pub trait TrackerRepository: Send + Sync {
    async fn create(&self, owner: Uuid, spec: TrackerSpec) -> Result<tracker::Model, TrackerError>;
    async fn list_by_owner(&self, owner: Uuid) -> Result<Vec<tracker::Model>, TrackerError>;
    /// Fails `NotFound` unless both id and owner match; never split into a
    /// lookup-by-id followed by an ownership check.
    async fn get(&self, owner: Uuid, id: Uuid) -> Result<tracker::Model, TrackerError>;
    /// Full replace of all mutable fields plus a fresh `updated_at`;
    /// zero matched rows fails `NotFound`.
    async fn update(&self, owner: Uuid, id: Uuid, spec: TrackerSpec) -> Result<tracker::Model, TrackerError>;
    async fn delete(&self, owner: Uuid, id: Uuid) -> Result<(), TrackerError>;
}

/// SeaORM-backed repository implementation.
pub struct SeaOrmTrackerRepository {
    pub db: DatabaseConnection,
}

#[async_trait]
impl TrackerRepository for SeaOrmTrackerRepository {
    async fn create(&self, owner: Uuid, spec: TrackerSpec) -> Result<tracker::Model, TrackerError> {
        let now = Utc::now().into();
        let am = tracker::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(owner),
            name: Set(spec.name),
            cron_expr: Set(spec.cron_expr),
            compare_mode: Set(spec.compare_mode),
            website_url: Set(spec.website_url),
            selector: Set(spec.selector),
            created_at: Set(now),
            updated_at: Set(now),
        };
        am.insert(&self.db).await.map_err(|e| TrackerError::Db(e.to_string()))
    }

    async fn list_by_owner(&self, owner: Uuid) -> Result<Vec<tracker::Model>, TrackerError> {
        tracker::Entity::find()
            .filter(tracker::Column::UserId.eq(owner))
            .all(&self.db)
            .await
            .map_err(|e| TrackerError::Db(e.to_string()))
    }

    async fn get(&self, owner: Uuid, id: Uuid) -> Result<tracker::Model, TrackerError> {
        tracker::Entity::find()
            .filter(tracker::Column::Id.eq(id))
            .filter(tracker::Column::UserId.eq(owner))
            .one(&self.db)
            .await
            .map_err(|e| TrackerError::Db(e.to_string()))?
            .ok_or(TrackerError::NotFound)
    }

    async fn update(&self, owner: Uuid, id: Uuid, spec: TrackerSpec) -> Result<tracker::Model, TrackerError> {
        // One UPDATE ... RETURNING under the compound predicate; mutation and
        // read-back never separate.
        let am = tracker::ActiveModel {
            name: Set(spec.name),
            cron_expr: Set(spec.cron_expr),
            compare_mode: Set(spec.compare_mode),
            website_url: Set(spec.website_url),
            selector: Set(spec.selector),
            updated_at: Set(Utc::now().into()),
            ..Default::default()
        };
        let updated = tracker::Entity::update_many()
            .set(am)
            .filter(tracker::Column::Id.eq(id))
            .filter(tracker::Column::UserId.eq(owner))
            .exec_with_returning(&self.db)
            .await
            .map_err(|e| TrackerError::Db(e.to_string()))?;
        updated.into_iter().next().ok_or(TrackerError::NotFound)
    }

    async fn delete(&self, owner: Uuid, id: Uuid) -> Result<(), TrackerError> {
        let res = tracker::Entity::delete_many()
            .filter(tracker::Column::Id.eq(id))
            .filter(tracker::Column::UserId.eq(owner))
            .exec(&self.db)
            .await
            .map_err(|e| TrackerError::Db(e.to_string()))?;
        if res.rows_affected == 0 {
            return Err(TrackerError::NotFound);
        }
        Ok(())
    }
}

/// Simple in-memory mock repository for tests
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct MockTrackerRepository {
        rows: Mutex<HashMap<Uuid, tracker::Model>>,
    }

    #[async_trait]
    impl TrackerRepository for MockTrackerRepository {
        async fn create(&self, owner: Uuid, spec: TrackerSpec) -> Result<tracker::Model, TrackerError> {
            let now = Utc::now().into();
            let row = tracker::Model {
                id: Uuid::new_v4(),
                user_id: owner,
                name: spec.name,
                cron_expr: spec.cron_expr,
                compare_mode: spec.compare_mode,
                website_url: spec.website_url,
                selector: spec.selector,
                created_at: now,
                updated_at: now,
            };
            self.rows.lock().unwrap().insert(row.id, row.clone());
            Ok(row)
        }

        async fn list_by_owner(&self, owner: Uuid) -> Result<Vec<tracker::Model>, TrackerError> {
            let rows = self.rows.lock().unwrap();
            Ok(rows.values().filter(|t| t.user_id == owner).cloned().collect())
        }

        async fn get(&self, owner: Uuid, id: Uuid) -> Result<tracker::Model, TrackerError> {
            let rows = self.rows.lock().unwrap();
            rows.get(&id)
                .filter(|t| t.user_id == owner)
                .cloned()
                .ok_or(TrackerError::NotFound)
        }

        async fn update(&self, owner: Uuid, id: Uuid, spec: TrackerSpec) -> Result<tracker::Model, TrackerError> {
            let mut rows = self.rows.lock().unwrap();
            let row = rows
                .get_mut(&id)
                .filter(|t| t.user_id == owner)
                .ok_or(TrackerError::NotFound)?;
            row.name = spec.name;
            row.cron_expr = spec.cron_expr;
            row.compare_mode = spec.compare_mode;
            row.website_url = spec.website_url;
            row.selector = spec.selector;
            row.updated_at = Utc::now().into();
            Ok(row.clone())
        }

        async fn delete(&self, owner: Uuid, id: Uuid) -> Result<(), TrackerError> {
            let mut rows = self.rows.lock().unwrap();
            match rows.get(&id) {
                Some(t) if t.user_id == owner => {
                    rows.remove(&id);
                    Ok(())
                }
                _ => Err(TrackerError::NotFound),
            }
        }
    }
}
