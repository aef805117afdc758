use chrono::{DateTime, Utc};
use strum::{AsRefStr, Display, EnumString};

use crate::model::id::{BookingId, GuestId, ScheduleId, UserId};

pub mod event;

// 予約ステータス。DB には snake_case の文字列として保存する
#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum BookingStatus {
    Active,
    Cancel,
    ForceCancel,
}

impl BookingStatus {
    // ステータス変更 API で受け付けるのはキャンセル系の 2 値のみ
    pub fn is_cancellation(self) -> bool {
        matches!(self, BookingStatus::Cancel | BookingStatus::ForceCancel)
    }
}

#[derive(Debug, Clone)]
pub struct Booking {
    pub booking_id: BookingId,
    pub schedule_id: ScheduleId,
    pub reserved_by: Option<UserId>,
    pub user_email: Option<String>,
    pub status: BookingStatus,
    pub start_date: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub guest: Option<BookingGuest>,
}

// 通知先となるゲスト（連絡先）情報。予約に紐づかない場合もある
#[derive(Debug, Clone)]
pub struct BookingGuest {
    pub guest_id: GuestId,
    pub guest_name: String,
    pub email: Option<String>,
    pub is_verified: bool,
}
