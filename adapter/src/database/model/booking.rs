use std::str::FromStr;

use kernel::model::{
    booking::{Booking, BookingGuest, BookingStatus},
    id::{BookingId, GuestId, ScheduleId, UserId},
};
use shared::error::AppError;
use sqlx::types::chrono::{DateTime, Utc};

// 予約一覧・単体取得で使う型。
// ゲスト情報は LEFT JOIN のため NULL になりうる
#[derive(sqlx::FromRow)]
pub struct BookingRow {
    pub booking_id: BookingId,
    pub schedule_id: ScheduleId,
    pub user_id: Option<UserId>,
    pub user_email: Option<String>,
    pub status: String,
    pub start_date: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub guest_id: Option<GuestId>,
    pub guest_name: Option<String>,
    pub guest_email: Option<String>,
    pub guest_is_verified: Option<bool>,
}

impl TryFrom<BookingRow> for Booking {
    type Error = AppError;

    fn try_from(value: BookingRow) -> Result<Self, Self::Error> {
        let BookingRow {
            booking_id,
            schedule_id,
            user_id,
            user_email,
            status,
            start_date,
            updated_at,
            guest_id,
            guest_name,
            guest_email,
            guest_is_verified,
        } = value;

        // DB 上のステータス文字列は必ず列挙値のいずれかである前提。
        // 変換できない場合はデータ不整合として扱う
        let status = BookingStatus::from_str(&status).map_err(|_| {
            AppError::ConversionEntityError(format!("invalid booking status: {status}"))
        })?;

        let guest = match (guest_id, guest_name) {
            (Some(guest_id), Some(guest_name)) => Some(BookingGuest {
                guest_id,
                guest_name,
                email: guest_email,
                is_verified: guest_is_verified.unwrap_or(false),
            }),
            _ => None,
        };

        Ok(Booking {
            booking_id,
            schedule_id,
            reserved_by: user_id,
            user_email,
            status,
            start_date,
            updated_at,
            guest,
        })
    }
}
