//! Platform users: CRUD plus the Telegram-username lookup the auth flow uses.

pub mod models;
pub mod repo;
pub mod service;
