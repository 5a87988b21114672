//! HTTP request handlers for the admin API.

pub mod counting;
