//! Route handlers

pub mod community;
pub mod finance;
pub mod health;
