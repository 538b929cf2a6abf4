use std::path::{Path, PathBuf};

use crate::services::file_service::APP_DIR_NAME;

fn fallback_dotenv_path(data_dir: Option<PathBuf>) -> Option<PathBuf> {
    Some(data_dir?.join(APP_DIR_NAME).join(".env"))
}

fn load_fallback(path: &Path) -> Result<(), dotenvy::Error> {
    dotenvy::from_path(path)
}

/// Load `.env` from the working directory, or from the app data dir when absent.
pub fn load_dotenv() {
    if dotenvy::dotenv().is_ok() {
        return;
    }

    let Some(path) = fallback_dotenv_path(dirs::data_dir()) else {
        return;
    };
    if path.is_file() {
        // Logging is not initialized yet.
        if let Err(e) = load_fallback(&path) {
            eprintln!("warning: failed to load {}: {}", path.display(), e);
        }
    }
}
