use crate::model::id::{ScheduleId, UserId};

#[derive(Debug, Clone)]
pub struct Schedule {
    pub schedule_id: ScheduleId,
    pub schedule_name: String,
    pub owned_by: UserId,
}
