//! Route handlers

pub mod health;
pub mod home;
pub mod themes;
pub mod trees;
