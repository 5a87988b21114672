//! Domain models and API DTOs.
//!
//! - `counting` - Counting game state, submissions, history entries, and outcomes
//! - `admin` - Bot admin list entries and command requesters
//! - `stats` - Server statistics mirrored into voice channels
//! - `api` - JSON request/response bodies for the admin API

pub mod admin;
pub mod api;
pub mod counting;
pub mod stats;
