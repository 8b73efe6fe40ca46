pub mod attendance;
pub mod auth;
pub mod catalog;
pub mod config;
pub mod dashboard;
pub mod events;
pub mod init;
pub mod metrics;
pub mod staff;
