pub mod database;
pub mod mailer;
pub mod redis;
pub mod repository;
