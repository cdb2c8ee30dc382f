//! Background catalog refresh.
//!
//! Registers one cron job that re-reads the catalog range from Sheets. The
//! job is skipped entirely when no cron expression is configured or the
//! storefront settings are incomplete.

use tokio_cron_scheduler::{Job, JobScheduler, JobSchedulerError};

use crate::api::AppState;
use crate::store::refresh_catalog;

/// Builds and starts the background job scheduler.
///
/// Returns the running [`JobScheduler`] handle, which must be kept alive for
/// the lifetime of the process. Dropping it shuts down all scheduled jobs.
///
/// # Errors
///
/// Returns [`JobSchedulerError`] if the scheduler cannot be initialised,
/// the cron expression is invalid, or the scheduler fails to start.
pub async fn build_scheduler(state: AppState) -> Result<JobScheduler, JobSchedulerError> {
    let scheduler = JobScheduler::new().await?;

    match state.config.catalog_refresh_cron.clone() {
        Some(cron) if state.sheets.is_some() => {
            register_catalog_refresh_job(&scheduler, &cron, state).await?;
        }
        Some(_) => tracing::info!("scheduler: storefront not configured; refresh job disabled"),
        None => tracing::info!("scheduler: no refresh cron configured; refresh job disabled"),
    }

    scheduler.start().await?;
    Ok(scheduler)
}

async fn register_catalog_refresh_job(
    scheduler: &JobScheduler,
    cron: &str,
    state: AppState,
) -> Result<(), JobSchedulerError> {
    let job = Job::new_async(cron, move |_uuid, _lock| {
        let state = state.clone();

        Box::pin(async move {
            tracing::info!("scheduler: starting catalog refresh");
            run_catalog_refresh(&state).await;
        })
    })?;

    scheduler.add(job).await?;
    tracing::info!(cron, "scheduler: catalog refresh job registered");
    Ok(())
}

/// Runs one refresh against the shared store. Logs and returns when the
/// storefront is not configured.
pub async fn run_catalog_refresh(state: &AppState) {
    let (Ok(settings), Some(client)) = (&state.config.storefront, &state.sheets) else {
        tracing::warn!("catalog refresh skipped: storefront not configured");
        return;
    };

    let snapshot = refresh_catalog(
        &state.store,
        client,
        &settings.sheet_id,
        &state.config.catalog_range,
    )
    .await;

    tracing::info!(
        status = ?snapshot.status(),
        stale = snapshot.is_stale(),
        "catalog refresh complete"
    );
}
