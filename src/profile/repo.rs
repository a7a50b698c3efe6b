use async_trait::async_trait;

use crate::db::{PgStore, StoreError};
use crate::profile::repo_types::{CalorieStrategy, NewWeightEntry, WeightEntry, WeightEntryRow};

/// Append-only weight log. Entries are never updated or deleted.
#[async_trait]
pub trait WeightLogStore: Send + Sync {
    async fn append(&self, entry: NewWeightEntry) -> Result<WeightEntry, StoreError>;
    /// Most recent entry by recorded time.
    async fn latest(&self, user_id: i64) -> Result<Option<WeightEntry>, StoreError>;
    /// Earliest entry recorded with the given strategy.
    async fn first_with_strategy(
        &self,
        user_id: i64,
        strategy: CalorieStrategy,
    ) -> Result<Option<WeightEntry>, StoreError>;
}

fn into_entry(row: Option<WeightEntryRow>) -> Result<Option<WeightEntry>, StoreError> {
    row.map(WeightEntry::try_from)
        .transpose()
        .map_err(|e| StoreError::Corrupt(e.to_string()))
}

#[async_trait]
impl WeightLogStore for PgStore {
    async fn append(&self, entry: NewWeightEntry) -> Result<WeightEntry, StoreError> {
        let row = sqlx::query_as::<_, WeightEntryRow>(
            r#"
            INSERT INTO user_weights (user_id, weight, goal_weight, goal_date, calorie_strategy)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, user_id, weight, goal_weight, goal_date, calorie_strategy, recorded_at
            "#,
        )
        .bind(entry.user_id)
        .bind(entry.weight)
        .bind(entry.goal_weight)
        .bind(entry.goal_date)
        .bind(entry.calorie_strategy.as_db())
        .fetch_one(&self.pool)
        .await?;
        WeightEntry::try_from(row).map_err(|e| StoreError::Corrupt(e.to_string()))
    }

    async fn latest(&self, user_id: i64) -> Result<Option<WeightEntry>, StoreError> {
        let row = sqlx::query_as::<_, WeightEntryRow>(
            r#"
            SELECT id, user_id, weight, goal_weight, goal_date, calorie_strategy, recorded_at
              FROM user_weights
             WHERE user_id = $1
             ORDER BY recorded_at DESC, id DESC
             LIMIT 1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;
        into_entry(row)
    }

    async fn first_with_strategy(
        &self,
        user_id: i64,
        strategy: CalorieStrategy,
    ) -> Result<Option<WeightEntry>, StoreError> {
        let row = sqlx::query_as::<_, WeightEntryRow>(
            r#"
            SELECT id, user_id, weight, goal_weight, goal_date, calorie_strategy, recorded_at
              FROM user_weights
             WHERE user_id = $1 AND calorie_strategy = $2
             ORDER BY recorded_at ASC, id ASC
             LIMIT 1
            "#,
        )
        .bind(user_id)
        .bind(strategy.as_db())
        .fetch_optional(&self.pool)
        .await?;
        into_entry(row)
    }
}
