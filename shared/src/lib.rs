pub mod config;
pub mod env;
pub mod error;
pub mod i18n;
