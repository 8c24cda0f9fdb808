//! Voice Queries

/// 列出已安装音色
#[derive(Debug, Clone)]
pub struct ListInstalledVoices;

/// 健康检查（默认音色 + 已安装音色）
#[derive(Debug, Clone)]
pub struct GetHealth;
