use dioxus_logger::tracing;
use std::sync::Arc;
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::{error::AppError, service::server_stats::ServerStatsService};

/// Every 4 minutes, staying under Discord's limit of two channel renames per 10 minutes.
const REFRESH_SCHEDULE: &str = "0 */4 * * * *";

/// Starts the server statistics scheduler
///
/// Renames the member and boost voice channels to the current figures on every run.
///
/// # Arguments
/// - `stats`: Statistics service shared with the bot
pub async fn start_scheduler(stats: Arc<ServerStatsService>) -> Result<JobScheduler, AppError> {
    let scheduler = JobScheduler::new().await?;

    let job = Job::new_async(REFRESH_SCHEDULE, move |_uuid, _lock| {
        let stats = stats.clone();

        Box::pin(async move {
            match stats.refresh().await {
                Ok(figures) => tracing::debug!(
                    "Server statistics refreshed: {} members, {} boosts",
                    figures.member_count,
                    figures.boost_count
                ),
                Err(e) => tracing::error!("Error refreshing server statistics: {}", e),
            }
        })
    })?;

    scheduler.add(job).await?;
    scheduler.start().await?;

    tracing::info!("Server statistics scheduler started");

    Ok(scheduler)
}
