//! Command Handlers 实现

mod synthesis_handlers;
mod transcription_handlers;

pub use synthesis_handlers::*;
pub use transcription_handlers::*;
