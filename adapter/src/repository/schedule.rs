use async_trait::async_trait;
use derive_new::new;
use kernel::model::{id::ScheduleId, schedule::Schedule};
use kernel::repository::schedule::ScheduleRepository;
use shared::error::{AppError, AppResult};

use crate::database::{model::schedule::ScheduleRow, ConnectionPool};

#[derive(new)]
pub struct ScheduleRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl ScheduleRepository for ScheduleRepositoryImpl {
    async fn find_by_id(&self, schedule_id: ScheduleId) -> AppResult<Option<Schedule>> {
        let row: Option<ScheduleRow> = sqlx::query_as(
            r#"
                SELECT
                    schedule_id,
                    schedule_name,
                    owned_by
                FROM schedules
                WHERE schedule_id = $1
            "#,
        )
        .bind(schedule_id)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(row.map(Schedule::from))
    }
}
