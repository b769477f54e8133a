//! API route handlers

pub mod announcement;
pub mod entries;
pub mod health;
