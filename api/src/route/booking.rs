use axum::{
    routing::{get, put},
    Router,
};
use registry::AppRegistry;

use crate::handler::booking::{show_booking_list, update_booking_status};

pub fn build_booking_routers() -> Router<AppRegistry> {
    let schedule_routers =
        Router::new().route("/:schedule_id/bookings", get(show_booking_list));
    let booking_routers = Router::new().route("/:booking_id/status", put(update_booking_status));

    Router::new()
        .nest("/schedules", schedule_routers)
        .nest("/bookings", booking_routers)
}
