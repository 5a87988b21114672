pub use super::bot_admin::Entity as BotAdmin;
