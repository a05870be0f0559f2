//! One refresh-and-fetch cycle.

use std::path::{Path, PathBuf};

use tracing::{error, info, instrument, warn};

use nozbe_core::traits::{EntityApi, FileIo};
use nozbe_core::{EntityType, Error};

use crate::config::AppConfig;

/// What happened to one entity type during a run.
#[derive(Debug)]
pub enum EntityOutcome {
    /// The collection was fetched and written to `path`.
    Written {
        entity: EntityType,
        path: PathBuf,
        items: Option<usize>,
    },
    /// Nothing was written for this entity.
    Failed { entity: EntityType, reason: String },
}

/// Summary of a completed run.
#[derive(Debug, Default)]
pub struct SyncReport {
    /// Why the token refresh failed, if it did.
    pub refresh_error: Option<String>,
    /// One entry per configured entity type, in configuration order.
    pub outcomes: Vec<EntityOutcome>,
}

impl SyncReport {
    pub fn written(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, EntityOutcome::Written { .. }))
            .count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.written()
    }
}

/// Refresh the token, then fetch and store every configured entity type.
///
/// Entities are processed one at a time. A failed fetch is recorded and the
/// run moves on to the next entity, whatever the cause. A failed refresh is
/// recorded too, unless it is fatal (see [`Error::is_fatal`]), which stops the
/// run before anything is fetched.
#[instrument(skip_all, fields(base_dir = %base_dir.display()))]
pub async fn run_cycle(
    api: &dyn EntityApi,
    files: &dyn FileIo,
    config: &AppConfig,
    base_dir: &Path,
) -> Result<SyncReport, Error> {
    let endpoints = &config.nozbe.endpoints;
    let data_dir = config.data_dir(base_dir);
    let mut report = SyncReport::default();

    if let Err(e) = api.refresh_token(&endpoints.refresh_token).await {
        if e.is_fatal() {
            return Err(e);
        }
        warn!(error = %e, "Token refresh failed, continuing with the current token");
        report.refresh_error = Some(e.to_string());
    }

    for entity in &config.nozbe.entities {
        info!("Getting data for {} entity...", entity);

        let data = match api.fetch_entity_data(&endpoints.data, entity).await {
            Ok(data) => data,
            Err(e) => {
                if let Error::UnhandledStatus { status } = e {
                    error!(status, "Skipping {} entity after unexpected status", entity);
                }
                report.outcomes.push(EntityOutcome::Failed {
                    entity: entity.clone(),
                    reason: e.to_string(),
                });
                continue;
            }
        };

        let outcome = match store(files, config, &data_dir, entity, data.as_value()) {
            Ok(path) => {
                info!(path = %path.display(), "Stored {} data", entity);
                EntityOutcome::Written {
                    entity: entity.clone(),
                    path,
                    items: data.len(),
                }
            }
            Err(reason) => {
                error!(error = %reason, "Couldn't store data for {} type", entity);
                EntityOutcome::Failed {
                    entity: entity.clone(),
                    reason,
                }
            }
        };
        report.outcomes.push(outcome);
    }

    Ok(report)
}

/// Write `value` to `<data_dir>/<entity>_<timestamp>.json`.
fn store(
    files: &dyn FileIo,
    config: &AppConfig,
    data_dir: &Path,
    entity: &EntityType,
    value: &serde_json::Value,
) -> Result<PathBuf, String> {
    let timestamp = config
        .timestamp(&files.current_time())
        .map_err(|e| e.to_string())?;
    let file_name = format!("{}_{}.json", entity, timestamp);

    files
        .write_json_file(data_dir, &file_name, value)
        .map_err(|e| e.to_string())
}
