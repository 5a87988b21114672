mod bot;
mod config;
mod controller;
mod data;
mod error;
mod middleware;
mod model;
mod router;
mod scheduler;
mod service;
mod startup;
mod state;
mod util;

use dioxus_logger::tracing::{self, Level};
use serenity::http::Http;
use std::sync::Arc;

use crate::{
    bot::{
        handler::Handler,
        platform::DiscordChatPlatform,
        voice_label::{LogOnlyPublisher, VoiceLabelPublisher},
    },
    config::Config,
    error::AppError,
    service::{
        counting::{platform::StatsPublisher, CountingService},
        server_stats::ServerStatsService,
    },
    state::AppState,
};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();

    if let Err(e) = dioxus_logger::init(Level::INFO) {
        eprintln!("Failed to initialize logger: {}", e);
    }

    let config = Config::from_env()?;
    let db = startup::connect_to_database(&config).await?;

    // One REST client for every service so they share Serenity's rate limiter
    let http = Arc::new(Http::new(&config.discord_bot_token));

    let publisher: Arc<dyn StatsPublisher> = match config.count_voice_channel_id {
        Some(channel_id) => Arc::new(VoiceLabelPublisher::spawn(http.clone(), channel_id)),
        None => {
            tracing::info!("COUNT_VOICE_CHANNEL_ID not set, count display disabled");
            Arc::new(LogOnlyPublisher)
        }
    };

    let platform = Arc::new(DiscordChatPlatform::new(
        http.clone(),
        config.platform_timeout,
        config.notice_ttl,
    ));

    let counting = Arc::new(CountingService::new(
        config.counting_channel_id,
        config.history_window,
        platform,
        publisher,
    ));
    let server_stats = Arc::new(ServerStatsService::new(http.clone(), config.guild_id));

    let handler = Handler {
        db,
        http,
        counting: counting.clone(),
        server_stats: server_stats.clone(),
        guild_id: config.guild_id,
        command_prefix: config.command_prefix.clone(),
        owner_user_id: config.owner_user_id,
    };

    let bot_client = bot::start::init_bot(&config, handler).await?;

    tokio::spawn(async move {
        if let Err(e) = bot::start::start_bot(bot_client).await {
            tracing::error!("Discord bot error: {}", e);
        }
    });

    // Keep the scheduler alive for the lifetime of the process
    let _scheduler = scheduler::server_stats::start_scheduler(server_stats).await?;

    let app = router::router().with_state(AppState::new(counting, config.admin_api_token.clone()));

    let listener = tokio::net::TcpListener::bind(config.api_bind_addr).await?;
    tracing::info!("Admin API listening on {}", config.api_bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
