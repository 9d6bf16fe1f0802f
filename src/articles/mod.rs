//! Course content: versioned articles. Published versions are immutable;
//! edits clone the article into a next-version draft.

pub mod models;
pub mod repo;
pub mod service;
