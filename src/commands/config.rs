use super::AppState;
use crate::services::config_service::{self, AppConfig};

pub fn get_config(state: &AppState) -> AppConfig {
    state.config().clone()
}

/// Persisted to `config.json`; takes effect the next time state is built.
pub fn set_api_key(key: String) -> Result<(), String> {
    config_service::set_api_key(&key).map_err(|e| e.to_string())
}

pub fn set_model(model: String) -> Result<(), String> {
    config_service::set_model(&model).map_err(|e| e.to_string())
}
