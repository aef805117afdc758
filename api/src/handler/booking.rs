use axum::{
    extract::{Path, State},
    Json,
};
use chrono::Utc;
use garde::Validate;
use kernel::mailer::{BookingMailContext, Mail};
use kernel::model::{
    booking::{event::UpdateBookingStatus, Booking, BookingStatus},
    id::{BookingId, ScheduleId},
};
use kernel::policy::{authorize, Capability};
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

use crate::{
    extractor::AuthorizedUser,
    model::booking::{BookingResponse, BookingsResponse, UpdateBookingStatusRequest,
        UpdateBookingStatusResponse},
};

// 通知メールに同封する今後の予約の最大件数
const UPCOMING_BOOKINGS_LIMIT: i64 = 10;

pub async fn show_booking_list(
    user: AuthorizedUser,
    Path(schedule_id): Path<ScheduleId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<BookingsResponse>> {
    let schedule = registry
        .schedule_repository()
        .find_by_id(schedule_id)
        .await?
        .ok_or_else(|| {
            AppError::EntityNotFound(format!(
                "スケジュール（{schedule_id}）が見つかりませんでした。"
            ))
        })?;

    if authorize(&user.user, Capability::ViewSchedule(&schedule)).is_deny() {
        return Err(AppError::ForbiddenOperation);
    }

    let items = registry
        .booking_repository()
        .find_by_schedule_id(schedule_id)
        .await?
        .into_iter()
        .map(BookingResponse::from)
        .collect();

    Ok(Json(BookingsResponse::new(schedule.into(), items)))
}

pub async fn update_booking_status(
    user: AuthorizedUser,
    Path(booking_id): Path<BookingId>,
    State(registry): State<AppRegistry>,
    Json(req): Json<UpdateBookingStatusRequest>,
) -> AppResult<Json<UpdateBookingStatusResponse>> {
    req.validate(&())?;
    let status = req.status().ok_or_else(|| {
        AppError::ConversionEntityError("status must be validated before parsing".into())
    })?;

    let booking = registry
        .booking_repository()
        .find_by_id(booking_id)
        .await?
        .ok_or_else(|| {
            AppError::EntityNotFound(format!("予約（{booking_id}）が見つかりませんでした。"))
        })?;

    if authorize(&user.user, Capability::UpdateBooking(&booking)).is_deny() {
        return Err(AppError::ForbiddenOperation);
    }

    let updated_at = Utc::now();
    let event = UpdateBookingStatus::new(booking_id, status, user.id(), updated_at);
    registry
        .booking_repository()
        .update_status(event)
        .await
        .inspect_err(|e| {
            tracing::error!(
                error.cause_chain = ?e,
                %booking_id,
                "Booking status update failed"
            )
        })?;

    // 永続化に成功した場合のみ通知メールを投入する。
    // 2 つの通知は互いに独立している
    notify_owner(&registry, &booking, status).await?;
    notify_guest(&registry, &booking, status).await?;

    Ok(Json(UpdateBookingStatusResponse { result: true }))
}

// 予約者本人への通知。メールアドレスが直接指定されていない場合は
// 予約ユーザーのアドレスへ送る
async fn notify_owner(
    registry: &AppRegistry,
    booking: &Booking,
    status: BookingStatus,
) -> AppResult<()> {
    if booking.user_email.is_none() && booking.reserved_by.is_none() {
        return Ok(());
    }

    let to = match &booking.user_email {
        Some(email) => Some(email.clone()),
        None => match booking.reserved_by {
            Some(user_id) => registry
                .user_repository()
                .find_current_user(user_id)
                .await?
                .map(|u| u.email),
            None => None,
        },
    };
    let Some(to) = to else { return Ok(()) };

    let context = BookingMailContext::from_booking(booking, status);
    let mail = match status {
        BookingStatus::Cancel => Mail::BookingCancel {
            to,
            booking: context,
        },
        BookingStatus::ForceCancel => Mail::BookingForceCancel {
            to,
            booking: context,
        },
        BookingStatus::Active => return Ok(()),
    };
    registry.mailer().enqueue(mail);

    Ok(())
}

// ゲスト連絡先への通知。今後の予約一覧を同封する
async fn notify_guest(
    registry: &AppRegistry,
    booking: &Booking,
    status: BookingStatus,
) -> AppResult<()> {
    let Some(guest) = &booking.guest else {
        return Ok(());
    };
    let Some(to) = &guest.email else {
        return Ok(());
    };
    if !status.is_cancellation() {
        return Ok(());
    }

    let upcoming = registry
        .booking_repository()
        .find_upcoming_by_guest_id(guest.guest_id, Utc::now(), UPCOMING_BOOKINGS_LIMIT)
        .await?;

    registry.mailer().enqueue(Mail::BookingNotification {
        to: to.clone(),
        booking: BookingMailContext::from_booking(booking, status),
        upcoming: upcoming
            .iter()
            .map(|b| BookingMailContext::from_booking(b, b.status))
            .collect(),
    });

    Ok(())
}
