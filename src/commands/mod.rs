//! Entry points for the UI. Each function mirrors one user action and
//! returns the state the view should render next.

mod state;
mod config;
mod summarize;
mod chat;
mod export;

pub use state::*;
pub use config::*;
pub use summarize::*;
pub use chat::*;
pub use export::*;
