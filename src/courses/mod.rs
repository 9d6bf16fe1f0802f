//! Courses: CRUD with soft-delete and optional filtering.

pub mod models;
pub mod repo;
pub mod service;
