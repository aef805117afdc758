use async_trait::async_trait;
use chrono::{DateTime, Utc};
use derive_new::new;
use kernel::model::{
    booking::{event::UpdateBookingStatus, Booking},
    id::{BookingId, GuestId, ScheduleId},
};
use kernel::repository::booking::BookingRepository;
use shared::error::{AppError, AppResult};

use crate::database::{model::booking::BookingRow, ConnectionPool};

#[derive(new)]
pub struct BookingRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl BookingRepository for BookingRepositoryImpl {
    // スケジュールに紐づく予約一覧を取得する。
    // ゲスト情報も一緒に抽出するため guests テーブルと INNER JOIN し、
    // 検証済みゲストの予約のみに絞り込む。
    // 出力するレコードは、開始日時の早い順に並べる
    async fn find_by_schedule_id(&self, schedule_id: ScheduleId) -> AppResult<Vec<Booking>> {
        let rows: Vec<BookingRow> = sqlx::query_as(
            r#"
                SELECT
                    b.booking_id,
                    b.schedule_id,
                    b.user_id,
                    b.user_email,
                    b.status,
                    b.start_date,
                    b.updated_at,
                    g.guest_id,
                    g.guest_name,
                    g.email AS guest_email,
                    g.is_verified AS guest_is_verified
                FROM bookings AS b
                INNER JOIN guests AS g ON b.guest_id = g.guest_id
                WHERE b.schedule_id = $1
                  AND g.is_verified = TRUE
                ORDER BY b.start_date ASC
            "#,
        )
        .bind(schedule_id)
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        rows.into_iter().map(Booking::try_from).collect()
    }

    async fn find_by_id(&self, booking_id: BookingId) -> AppResult<Option<Booking>> {
        let row: Option<BookingRow> = sqlx::query_as(
            r#"
                SELECT
                    b.booking_id,
                    b.schedule_id,
                    b.user_id,
                    b.user_email,
                    b.status,
                    b.start_date,
                    b.updated_at,
                    g.guest_id,
                    g.guest_name,
                    g.email AS guest_email,
                    g.is_verified AS guest_is_verified
                FROM bookings AS b
                LEFT JOIN guests AS g ON b.guest_id = g.guest_id
                WHERE b.booking_id = $1
            "#,
        )
        .bind(booking_id)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        row.map(Booking::try_from).transpose()
    }

    // ステータスと更新日時のみを書き換える。排他制御は行わず、
    // 同一予約への同時更新は後勝ちとなる
    async fn update_status(&self, event: UpdateBookingStatus) -> AppResult<()> {
        let res = sqlx::query(
            r#"
                UPDATE bookings
                SET
                    status = $1,
                    updated_at = $2
                WHERE booking_id = $3
            "#,
        )
        .bind(event.status.as_ref())
        .bind(event.updated_at)
        .bind(event.booking_id)
        .execute(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::EntityNotFound(
                "specified booking not found".into(),
            ));
        }

        Ok(())
    }

    // ゲストに紐づく今後の予約を開始日時の昇順で取得する。
    // キャンセル済みの予約は通知対象から外す
    async fn find_upcoming_by_guest_id(
        &self,
        guest_id: GuestId,
        after: DateTime<Utc>,
        limit: i64,
    ) -> AppResult<Vec<Booking>> {
        let rows: Vec<BookingRow> = sqlx::query_as(
            r#"
                SELECT
                    b.booking_id,
                    b.schedule_id,
                    b.user_id,
                    b.user_email,
                    b.status,
                    b.start_date,
                    b.updated_at,
                    g.guest_id,
                    g.guest_name,
                    g.email AS guest_email,
                    g.is_verified AS guest_is_verified
                FROM bookings AS b
                INNER JOIN guests AS g ON b.guest_id = g.guest_id
                WHERE b.guest_id = $1
                  AND b.start_date > $2
                  AND b.status = 'active'
                ORDER BY b.start_date ASC
                LIMIT $3
            "#,
        )
        .bind(guest_id)
        .bind(after)
        .bind(limit)
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        rows.into_iter().map(Booking::try_from).collect()
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use kernel::model::booking::BookingStatus;
    use kernel::model::id::UserId;

    use super::*;

    async fn fixture_user(pool: &sqlx::PgPool) -> anyhow::Result<UserId> {
        let user_id = UserId::new();
        sqlx::query(
            "INSERT INTO users (user_id, user_name, email, role) VALUES ($1, $2, $3, $4)",
        )
        .bind(user_id)
        .bind("Test User")
        .bind(format!("{}@example.com", user_id))
        .bind("user")
        .execute(pool)
        .await?;
        Ok(user_id)
    }

    async fn fixture_schedule(pool: &sqlx::PgPool, owned_by: UserId) -> anyhow::Result<ScheduleId> {
        let schedule_id = ScheduleId::new();
        sqlx::query(
            "INSERT INTO schedules (schedule_id, schedule_name, owned_by) VALUES ($1, $2, $3)",
        )
        .bind(schedule_id)
        .bind("Test Schedule")
        .bind(owned_by)
        .execute(pool)
        .await?;
        Ok(schedule_id)
    }

    async fn fixture_guest(pool: &sqlx::PgPool, is_verified: bool) -> anyhow::Result<GuestId> {
        let guest_id = GuestId::new();
        sqlx::query(
            "INSERT INTO guests (guest_id, guest_name, email, is_verified) VALUES ($1, $2, $3, $4)",
        )
        .bind(guest_id)
        .bind("Test Guest")
        .bind(format!("{}@example.com", guest_id))
        .bind(is_verified)
        .execute(pool)
        .await?;
        Ok(guest_id)
    }

    async fn fixture_booking(
        pool: &sqlx::PgPool,
        schedule_id: ScheduleId,
        guest_id: Option<GuestId>,
        status: &str,
        start_date: DateTime<Utc>,
    ) -> anyhow::Result<BookingId> {
        let booking_id = BookingId::new();
        sqlx::query(
            r#"
                INSERT INTO bookings
                (booking_id, schedule_id, guest_id, user_email, status, start_date)
                VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(booking_id)
        .bind(schedule_id)
        .bind(guest_id)
        .bind("owner@example.com")
        .bind(status)
        .bind(start_date)
        .execute(pool)
        .await?;
        Ok(booking_id)
    }

    #[sqlx::test]
    async fn find_by_schedule_id_filters_to_verified_guests(
        pool: sqlx::PgPool,
    ) -> anyhow::Result<()> {
        let repo = BookingRepositoryImpl::new(ConnectionPool::new(pool.clone()));

        let user_id = fixture_user(&pool).await?;
        let schedule_id = fixture_schedule(&pool, user_id).await?;
        let other_schedule_id = fixture_schedule(&pool, user_id).await?;
        let verified = fixture_guest(&pool, true).await?;
        let unverified = fixture_guest(&pool, false).await?;

        let now = Utc::now();
        // 対象：検証済みゲストの予約を開始日時の降順で投入し、昇順で返ることを見る
        let later =
            fixture_booking(&pool, schedule_id, Some(verified), "active", now + Duration::days(2))
                .await?;
        let sooner =
            fixture_booking(&pool, schedule_id, Some(verified), "active", now + Duration::days(1))
                .await?;
        // 対象外：未検証ゲスト・ゲストなし・別スケジュール
        fixture_booking(&pool, schedule_id, Some(unverified), "active", now).await?;
        fixture_booking(&pool, schedule_id, None, "active", now).await?;
        fixture_booking(&pool, other_schedule_id, Some(verified), "active", now).await?;

        let res = repo.find_by_schedule_id(schedule_id).await?;
        assert_eq!(res.len(), 2);
        assert_eq!(res[0].booking_id, sooner);
        assert_eq!(res[1].booking_id, later);
        assert!(res.iter().all(|b| b.schedule_id == schedule_id));
        assert!(res.iter().all(|b| b.guest.as_ref().unwrap().is_verified));

        Ok(())
    }

    #[sqlx::test]
    async fn update_status_persists_status_and_updated_at(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let repo = BookingRepositoryImpl::new(ConnectionPool::new(pool.clone()));

        let user_id = fixture_user(&pool).await?;
        let schedule_id = fixture_schedule(&pool, user_id).await?;
        let booking_id =
            fixture_booking(&pool, schedule_id, None, "active", Utc::now()).await?;

        let updated_at = Utc::now();
        let event = UpdateBookingStatus::new(
            booking_id,
            BookingStatus::ForceCancel,
            user_id,
            updated_at,
        );
        repo.update_status(event).await?;

        let booking = repo.find_by_id(booking_id).await?.unwrap();
        assert_eq!(booking.status, BookingStatus::ForceCancel);
        assert_eq!(booking.updated_at.timestamp_millis(), updated_at.timestamp_millis());

        // 存在しない予約 ID は EntityNotFound
        let missing = UpdateBookingStatus::new(
            BookingId::new(),
            BookingStatus::Cancel,
            user_id,
            Utc::now(),
        );
        let err = repo.update_status(missing).await;
        assert!(matches!(err, Err(AppError::EntityNotFound(_))));

        Ok(())
    }

    #[sqlx::test]
    async fn find_upcoming_returns_future_active_bookings_in_order(
        pool: sqlx::PgPool,
    ) -> anyhow::Result<()> {
        let repo = BookingRepositoryImpl::new(ConnectionPool::new(pool.clone()));

        let user_id = fixture_user(&pool).await?;
        let schedule_id = fixture_schedule(&pool, user_id).await?;
        let guest_id = fixture_guest(&pool, true).await?;

        let now = Utc::now();
        // 未来の予約 12 件（上限 10 件で切り捨てられることを見る）
        for i in 1..=12 {
            fixture_booking(
                &pool,
                schedule_id,
                Some(guest_id),
                "active",
                now + Duration::hours(i),
            )
            .await?;
        }
        // 対象外：過去の予約とキャンセル済みの予約
        fixture_booking(&pool, schedule_id, Some(guest_id), "active", now - Duration::hours(1))
            .await?;
        fixture_booking(&pool, schedule_id, Some(guest_id), "cancel", now + Duration::hours(1))
            .await?;

        let res = repo.find_upcoming_by_guest_id(guest_id, now, 10).await?;
        assert_eq!(res.len(), 10);
        assert!(res.windows(2).all(|w| w[0].start_date <= w[1].start_date));
        assert!(res.iter().all(|b| b.start_date > now));
        assert!(res.iter().all(|b| b.status == BookingStatus::Active));

        Ok(())
    }
}
