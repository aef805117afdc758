use async_trait::async_trait;
use chrono::{DateTime, Utc};
use shared::error::AppResult;

use crate::model::{
    booking::{event::UpdateBookingStatus, Booking},
    id::{BookingId, GuestId, ScheduleId},
};

#[async_trait]
pub trait BookingRepository: Send + Sync {
    // スケジュールに紐づく予約一覧を取得する。
    // 検証済みゲストに紐づく予約のみを対象とする
    async fn find_by_schedule_id(&self, schedule_id: ScheduleId) -> AppResult<Vec<Booking>>;
    // booking_id から Booking 型のデータを渡す
    async fn find_by_id(&self, booking_id: BookingId) -> AppResult<Option<Booking>>;
    // 予約ステータスと更新日時を永続化する
    async fn update_status(&self, event: UpdateBookingStatus) -> AppResult<()>;
    // ゲストに紐づく今後の予約を開始日時の昇順で取得する
    async fn find_upcoming_by_guest_id(
        &self,
        guest_id: GuestId,
        after: DateTime<Utc>,
        limit: i64,
    ) -> AppResult<Vec<Booking>>;
}
