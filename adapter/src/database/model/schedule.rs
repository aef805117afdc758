use kernel::model::{
    id::{ScheduleId, UserId},
    schedule::Schedule,
};

#[derive(sqlx::FromRow)]
pub struct ScheduleRow {
    pub schedule_id: ScheduleId,
    pub schedule_name: String,
    pub owned_by: UserId,
}

impl From<ScheduleRow> for Schedule {
    fn from(value: ScheduleRow) -> Self {
        let ScheduleRow {
            schedule_id,
            schedule_name,
            owned_by,
        } = value;
        Schedule {
            schedule_id,
            schedule_name,
            owned_by,
        }
    }
}
