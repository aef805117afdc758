use std::sync::Arc;

use adapter::{
    database::ConnectionPool,
    mailer::MailQueue,
    redis::RedisClient,
    repository::{
        auth::AuthRepositoryImpl, booking::BookingRepositoryImpl,
        health::HealthCheckRepositoryImpl, schedule::ScheduleRepositoryImpl,
        user::UserRepositoryImpl,
    },
};
use kernel::{
    mailer::Mailer,
    repository::{
        auth::AuthRepository, booking::BookingRepository, health::HealthCheckRepository,
        schedule::ScheduleRepository, user::UserRepository,
    },
};

#[derive(Clone)]
pub struct AppRegistry {
    health_check_repository: Arc<dyn HealthCheckRepository>,
    booking_repository: Arc<dyn BookingRepository>,
    schedule_repository: Arc<dyn ScheduleRepository>,
    user_repository: Arc<dyn UserRepository>,
    auth_repository: Arc<dyn AuthRepository>,
    mailer: Arc<dyn Mailer>,
}

impl AppRegistry {
    pub fn new(pool: ConnectionPool, kv: Arc<RedisClient>, mail_queue: Arc<MailQueue>) -> Self {
        let health_check_repository = Arc::new(HealthCheckRepositoryImpl::new(pool.clone()));
        let booking_repository = Arc::new(BookingRepositoryImpl::new(pool.clone()));
        let schedule_repository = Arc::new(ScheduleRepositoryImpl::new(pool.clone()));
        let user_repository = Arc::new(UserRepositoryImpl::new(pool.clone()));
        let auth_repository = Arc::new(AuthRepositoryImpl::new(kv));
        Self {
            health_check_repository,
            booking_repository,
            schedule_repository,
            user_repository,
            auth_repository,
            mailer: mail_queue,
        }
    }

    // テストでリポジトリ実装を差し替えるためのコンストラクタ
    pub fn from_parts(
        health_check_repository: Arc<dyn HealthCheckRepository>,
        booking_repository: Arc<dyn BookingRepository>,
        schedule_repository: Arc<dyn ScheduleRepository>,
        user_repository: Arc<dyn UserRepository>,
        auth_repository: Arc<dyn AuthRepository>,
        mailer: Arc<dyn Mailer>,
    ) -> Self {
        Self {
            health_check_repository,
            booking_repository,
            schedule_repository,
            user_repository,
            auth_repository,
            mailer,
        }
    }

    pub fn health_check_repository(&self) -> Arc<dyn HealthCheckRepository> {
        self.health_check_repository.clone()
    }

    pub fn booking_repository(&self) -> Arc<dyn BookingRepository> {
        self.booking_repository.clone()
    }

    pub fn schedule_repository(&self) -> Arc<dyn ScheduleRepository> {
        self.schedule_repository.clone()
    }

    pub fn user_repository(&self) -> Arc<dyn UserRepository> {
        self.user_repository.clone()
    }

    pub fn auth_repository(&self) -> Arc<dyn AuthRepository> {
        self.auth_repository.clone()
    }

    pub fn mailer(&self) -> Arc<dyn Mailer> {
        self.mailer.clone()
    }
}
