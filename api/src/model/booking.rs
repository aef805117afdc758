use std::str::FromStr;

use chrono::{DateTime, Utc};
use derive_new::new;
use garde::Validate;
use kernel::model::{
    booking::{Booking, BookingGuest, BookingStatus},
    id::{BookingId, GuestId, ScheduleId},
    schedule::Schedule,
};
use serde::{Deserialize, Serialize};
use shared::i18n;
use strum::VariantNames;

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, VariantNames)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum BookingStatusName {
    Active,
    Cancel,
    ForceCancel,
}

impl From<BookingStatus> for BookingStatusName {
    fn from(value: BookingStatus) -> Self {
        match value {
            BookingStatus::Active => Self::Active,
            BookingStatus::Cancel => Self::Cancel,
            BookingStatus::ForceCancel => Self::ForceCancel,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBookingStatusRequest {
    // 欠落時もフィールド単位のローカライズ済みメッセージを返すため、
    // serde の default で受けてバリデーション側で必須チェックを行う
    #[serde(default)]
    #[garde(custom(validate_status))]
    pub status: String,
}

impl UpdateBookingStatusRequest {
    // validate 済みであることが前提
    pub fn status(&self) -> Option<BookingStatus> {
        BookingStatus::from_str(&self.status)
            .ok()
            .filter(|status| status.is_cancellation())
    }
}

fn validate_status(value: &str, _context: &()) -> garde::Result {
    if value.is_empty() {
        return Err(garde::Error::new(i18n::t("validation.status.required")));
    }
    match BookingStatus::from_str(value) {
        Ok(status) if status.is_cancellation() => Ok(()),
        _ => Err(garde::Error::new(i18n::t("validation.status.invalid"))),
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBookingStatusResponse {
    pub result: bool,
}

#[derive(Serialize, new)]
#[serde(rename_all = "camelCase")]
pub struct BookingsResponse {
    pub schedule: ScheduleResponse,
    pub items: Vec<BookingResponse>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleResponse {
    pub schedule_id: ScheduleId,
    pub schedule_name: String,
}

impl From<Schedule> for ScheduleResponse {
    fn from(value: Schedule) -> Self {
        let Schedule {
            schedule_id,
            schedule_name,
            owned_by: _,
        } = value;
        Self {
            schedule_id,
            schedule_name,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingResponse {
    pub booking_id: BookingId,
    pub schedule_id: ScheduleId,
    pub status: BookingStatusName,
    pub start_date: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub guest: Option<BookingGuestResponse>,
}

impl From<Booking> for BookingResponse {
    fn from(value: Booking) -> Self {
        let Booking {
            booking_id,
            schedule_id,
            reserved_by: _,
            user_email: _,
            status,
            start_date,
            updated_at,
            guest,
        } = value;
        Self {
            booking_id,
            schedule_id,
            status: status.into(),
            start_date,
            updated_at,
            guest: guest.map(BookingGuestResponse::from),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingGuestResponse {
    pub guest_id: GuestId,
    pub guest_name: String,
    pub email: Option<String>,
}

impl From<BookingGuest> for BookingGuestResponse {
    fn from(value: BookingGuest) -> Self {
        let BookingGuest {
            guest_id,
            guest_name,
            email,
            is_verified: _,
        } = value;
        Self {
            guest_id,
            guest_name,
            email,
        }
    }
}
