use crate::errors::AppError;
use crate::store::StatusStore;
use chrono::{DateTime, Local};
use std::path::Path;
use tokio::fs;
use tracing::error;

pub async fn load_data(path: &Path) -> StatusStore {
    match fs::read_to_string(path).await {
        Ok(text) => StatusStore::from_persisted(&text),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => StatusStore::default(),
        Err(err) => {
            error!("failed to read data file: {err}");
            StatusStore::default()
        }
    }
}

/// Overwrites the record with the full store.
pub async fn persist_data(path: &Path, store: &StatusStore) -> Result<(), AppError> {
    fs::write(path, store.snapshot())
        .await
        .map_err(AppError::internal)?;
    Ok(())
}

pub fn export_file_name(now: DateTime<Local>) -> String {
    format!("wfh-tracker-backup-{}.json", now.format("%Y-%m-%d_%H-%M-%S"))
}
