//! Factory methods for creating test data.
//!
//! This module provides factory methods for creating test entities with sensible defaults,
//! reducing boilerplate in tests.
//!
//! # Basic Usage
//!
//! ```rust,ignore
//! use test_utils::factory;
//!
//! #[tokio::test]
//! async fn test_example() -> Result<(), sea_orm::DbErr> {
//!     let db = /* ... */;
//!
//!     // Create with defaults
//!     let admin = factory::bot_admin::create_bot_admin(&db).await?;
//!
//!     // Customize through the builder
//!     let admin = factory::bot_admin::BotAdminFactory::new(&db)
//!         .discord_id("987654321")
//!         .added_by("123456789")
//!         .build()
//!         .await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! # Available Factories
//!
//! - `bot_admin` - Create bot admin entities
//! - `helpers` - Shared id generation

pub mod bot_admin;
pub mod helpers;

pub use bot_admin::create_bot_admin;
