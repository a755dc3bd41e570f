use crate::errors::AppError;
use crate::models::AppData;
use std::{env, path::Path, path::PathBuf};
use tokio::fs;
use tracing::{debug, error, info};

const DEFAULT_DATA_PATH: &str = "data/workouts.json";

/// `APP_DATA_PATH` if set and non-blank, otherwise `data/workouts.json`.
pub fn resolve_data_path() -> Result<PathBuf, std::io::Error> {
    match env::var("APP_DATA_PATH") {
        Ok(path) if !path.trim().is_empty() => Ok(PathBuf::from(path.trim())),
        _ => Ok(PathBuf::from(DEFAULT_DATA_PATH)),
    }
}

pub async fn load_data(path: &Path) -> AppData {
    match fs::read(path).await {
        Ok(bytes) => match serde_json::from_slice::<AppData>(&bytes) {
            Ok(data) => {
                info!(workouts = data.workouts.len(), "loaded workout log");
                data
            }
            Err(err) => {
                error!("failed to parse data file: {err}");
                AppData::default()
            }
        },
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => AppData::default(),
        Err(err) => {
            error!("failed to read data file: {err}");
            AppData::default()
        }
    }
}

/// Writes the whole log to a sibling temp file, then renames it over `path`.
pub async fn persist_data(path: &Path, data: &AppData) -> Result<(), AppError> {
    let payload = serde_json::to_vec_pretty(data).map_err(AppError::internal)?;
    let temp_path = path.with_extension("json.tmp");
    fs::write(&temp_path, payload).await?;
    fs::rename(&temp_path, path).await?;
    debug!(workouts = data.workouts.len(), path = %path.display(), "persisted workout log");
    Ok(())
}
