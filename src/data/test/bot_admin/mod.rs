use crate::data::bot_admin::BotAdminRepository;
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod add;
mod get_all;
mod is_admin;
mod remove;
