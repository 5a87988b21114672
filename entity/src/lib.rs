//! SeaORM entity models for the bot's persistent tables.

pub mod prelude;

pub mod bot_admin;
