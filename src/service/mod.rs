//! Business logic layer.
//!
//! - `counting` - The counting game engine and its platform seams
//! - `admin` - Admin rights checks and the persisted admin list
//! - `server_stats` - Member and boost counts mirrored into voice channels

pub mod admin;
pub mod counting;
pub mod server_stats;
