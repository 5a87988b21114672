//! Test factories for creating Serenity API objects.
//!
//! These factories create valid Serenity structs by deserializing JSON, simulating what
//! Discord's API would return, so conversion code can be tested without a gateway
//! connection.
//!
//! # Usage
//!
//! ```rust,ignore
//! use test_utils::serenity::TestMessageBuilder;
//!
//! let message = TestMessageBuilder::new(1001, 42, "7")
//!     .reaction("✅", true)
//!     .build();
//! ```
//!
//! # Available Factories
//!
//! - `message::TestMessageBuilder` - Create Serenity Message objects

pub mod message;

pub use message::TestMessageBuilder;
