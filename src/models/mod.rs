mod mode;
mod document;
mod chat;
mod summary;
mod export;

pub use mode::*;
pub use document::*;
pub use chat::*;
pub use summary::*;
pub use export::*;
