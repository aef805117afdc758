use async_trait::async_trait;
use shared::error::AppResult;

use crate::model::{id::ScheduleId, schedule::Schedule};

#[async_trait]
pub trait ScheduleRepository: Send + Sync {
    async fn find_by_id(&self, schedule_id: ScheduleId) -> AppResult<Option<Schedule>>;
}
