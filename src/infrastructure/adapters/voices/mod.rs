//! Voices Adapter - 远程音色目录下载

mod http_voice_fetcher;

pub use http_voice_fetcher::{HttpVoiceFetcher, HttpVoiceFetcherConfig, CATALOG_FILE};
