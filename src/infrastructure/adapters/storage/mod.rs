//! Storage Adapter - 文件系统音色库

mod voice_store;

pub use voice_store::FileVoiceStore;
