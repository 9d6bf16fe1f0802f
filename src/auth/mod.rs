//! Telegram-code authentication: one-time code issuance, bounded-retry
//! verification, and JWT token-pair issuance.

pub mod models;
pub mod repo;
pub mod service;
pub mod token;
