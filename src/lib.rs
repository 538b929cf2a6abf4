pub mod commands;
pub mod env_loader;
pub mod error;
pub mod logging;
pub mod models;
pub mod services;

pub use commands::AppState;
pub use error::{ConfigError, ExportError, IngestError, RemoteError};
pub use models::*;
pub use services::llm_client::{GenerateRequest, GenerativeBackend};

use tracing::info;

/// Load `.env`, install logging, read configuration and build the app state
/// around the Gemini client.
pub fn bootstrap() -> Result<AppState, String> {
    env_loader::load_dotenv();
    if let Err(e) = logging::init_logging() {
        eprintln!("{}", e);
    }

    let config = services::config_service::load_config().map_err(|e| e.to_string())?;
    info!(model = %config.model, continuity = ?config.chat_continuity, "starting docbrief");
    AppState::from_config(config).map_err(|e| e.to_string())
}
