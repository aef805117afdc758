use chrono::{DateTime, Utc};

use crate::model::{
    booking::{Booking, BookingStatus},
    id::BookingId,
};

// メール本文の組み立てに必要な予約情報のスナップショット。
// 永続化後のステータスを保持させるため、ステータスは明示的に渡す
#[derive(Debug, Clone)]
pub struct BookingMailContext {
    pub booking_id: BookingId,
    pub start_date: DateTime<Utc>,
    pub status: BookingStatus,
}

impl BookingMailContext {
    pub fn from_booking(booking: &Booking, status: BookingStatus) -> Self {
        Self {
            booking_id: booking.booking_id,
            start_date: booking.start_date,
            status,
        }
    }
}

#[derive(Debug, Clone)]
pub enum Mail {
    // 予約者本人へのキャンセル通知
    BookingCancel {
        to: String,
        booking: BookingMailContext,
    },
    // 運営都合による強制キャンセル通知
    BookingForceCancel {
        to: String,
        booking: BookingMailContext,
    },
    // ゲスト連絡先への予約状況通知。直近の予約一覧を同封する
    BookingNotification {
        to: String,
        booking: BookingMailContext,
        upcoming: Vec<BookingMailContext>,
    },
}

// 送信キューへの投入のみを行う。配送の成否は呼び出し元へ返さない
pub trait Mailer: Send + Sync {
    fn enqueue(&self, mail: Mail);
}
