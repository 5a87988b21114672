//! FCKR Bot Test Utils
//!
//! Provides shared testing utilities for the bot's unit and integration tests. This crate
//! offers a builder pattern for creating test contexts with in-memory SQLite databases,
//! entity factories, and factories for Serenity model objects.
//!
//! # Overview
//!
//! - **TestBuilder**: Fluent builder for configuring test environments
//! - **TestContext**: Test environment containing the database connection
//! - **TestError**: Error types that can occur during test setup
//! - **factory**: Entity factories with sensible defaults
//! - **serenity**: Serenity model factories built from Discord-shaped JSON
//!
//! # Usage
//!
//! ```rust,ignore
//! use test_utils::builder::TestBuilder;
//! use entity::prelude::BotAdmin;
//!
//! #[tokio::test]
//! async fn test_admin_operations() -> Result<(), TestError> {
//!     let test = TestBuilder::new()
//!         .with_table(BotAdmin)
//!         .build()
//!         .await?;
//!
//!     let db = test.db.unwrap();
//!     // Perform database operations...
//!
//!     Ok(())
//! }
//! ```

pub mod builder;
pub mod context;
pub mod error;
pub mod factory;
pub mod serenity;
