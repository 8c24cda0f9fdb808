//! 日志初始化
//!
//! `RUST_LOG` 优先于配置中的 `log.level`

use tracing_subscriber::EnvFilter;

use crate::config::LogConfig;

/// 初始化全局 tracing subscriber，只能调用一次
pub fn init_logging(log: &LogConfig) {
    let log_filter = format!(
        "{},voicegate={},tower_http=debug",
        log.level, log.level
    );
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log_filter));

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if log.json {
        builder.json().init();
    } else {
        builder.init();
    }
}
