use crate::model::{booking::Booking, role::Role, schedule::Schedule, user::User};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Deny,
}

impl Decision {
    pub fn is_allow(self) -> bool {
        matches!(self, Decision::Allow)
    }

    pub fn is_deny(self) -> bool {
        !self.is_allow()
    }
}

// 認可対象の操作。操作ごとに判定に必要なリソースへの参照を持つ
#[derive(Debug)]
pub enum Capability<'a> {
    ViewSchedule(&'a Schedule),
    UpdateBooking(&'a Booking),
}

// 操作主体と操作の組に対して許可・拒否を返す。
// 管理者はすべての操作が許可され、一般ユーザーは
// 自身が所有するリソースに対する操作のみ許可される
pub fn authorize(actor: &User, capability: Capability<'_>) -> Decision {
    if actor.role == Role::Admin {
        return Decision::Allow;
    }
    let allowed = match capability {
        Capability::ViewSchedule(schedule) => schedule.owned_by == actor.user_id,
        Capability::UpdateBooking(booking) => {
            booking.reserved_by == Some(actor.user_id)
                || booking.user_email.as_deref() == Some(actor.email.as_str())
        }
    };
    if allowed {
        Decision::Allow
    } else {
        Decision::Deny
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::model::{
        booking::BookingStatus,
        id::{BookingId, ScheduleId, UserId},
    };

    fn user(role: Role) -> User {
        User {
            user_id: UserId::new(),
            user_name: "テストユーザー".into(),
            email: "user@example.com".into(),
            role,
        }
    }

    fn schedule(owned_by: UserId) -> Schedule {
        Schedule {
            schedule_id: ScheduleId::new(),
            schedule_name: "テストスケジュール".into(),
            owned_by,
        }
    }

    fn booking(reserved_by: Option<UserId>, user_email: Option<&str>) -> Booking {
        Booking {
            booking_id: BookingId::new(),
            schedule_id: ScheduleId::new(),
            reserved_by,
            user_email: user_email.map(String::from),
            status: BookingStatus::Active,
            start_date: Utc::now(),
            updated_at: Utc::now(),
            guest: None,
        }
    }

    #[test]
    fn admin_is_always_allowed() {
        let admin = user(Role::Admin);
        let schedule = schedule(UserId::new());
        let booking = booking(None, None);

        assert!(authorize(&admin, Capability::ViewSchedule(&schedule)).is_allow());
        assert!(authorize(&admin, Capability::UpdateBooking(&booking)).is_allow());
    }

    #[test]
    fn schedule_owner_can_view_own_schedule() {
        let owner = user(Role::User);
        let own = schedule(owner.user_id);
        let other = schedule(UserId::new());

        assert!(authorize(&owner, Capability::ViewSchedule(&own)).is_allow());
        assert!(authorize(&owner, Capability::ViewSchedule(&other)).is_deny());
    }

    #[test]
    fn booking_owner_is_matched_by_user_id_or_email() {
        let actor = user(Role::User);

        let by_id = booking(Some(actor.user_id), None);
        assert!(authorize(&actor, Capability::UpdateBooking(&by_id)).is_allow());

        let by_email = booking(None, Some("user@example.com"));
        assert!(authorize(&actor, Capability::UpdateBooking(&by_email)).is_allow());

        let unrelated = booking(Some(UserId::new()), Some("other@example.com"));
        assert!(authorize(&actor, Capability::UpdateBooking(&unrelated)).is_deny());
    }
}
