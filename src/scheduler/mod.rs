//! Cron jobs.

pub mod server_stats;
