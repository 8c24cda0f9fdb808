//! HTTP Handlers

mod health;
mod transcribe;
mod tts;

pub use health::*;
pub use transcribe::*;
pub use tts::*;
