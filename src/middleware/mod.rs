//! Request guards for the admin API.

pub mod auth;
