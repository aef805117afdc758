use chrono::{DateTime, Utc};
use derive_new::new;

use crate::model::booking::BookingStatus;
use crate::model::id::{BookingId, UserId};

#[derive(new, Debug)]
pub struct UpdateBookingStatus {
    pub booking_id: BookingId,
    pub status: BookingStatus,
    pub requested_user: UserId,
    pub updated_at: DateTime<Utc>,
}
