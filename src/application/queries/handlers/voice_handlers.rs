//! Voice Query Handlers

use std::sync::Arc;

use crate::application::error::ApplicationError;
use crate::application::ports::VoiceStorePort;
use crate::application::queries::{GetHealth, ListInstalledVoices};

// ============================================================================
// Response DTOs
// ============================================================================

/// 健康检查响应
#[derive(Debug, Clone)]
pub struct HealthResponse {
    pub installed: Vec<String>,
    pub default_voice: String,
}

// ============================================================================
// Handlers
// ============================================================================

/// ListInstalledVoices Handler
pub struct ListInstalledVoicesHandler {
    store: Arc<dyn VoiceStorePort>,
}

impl ListInstalledVoicesHandler {
    pub fn new(store: Arc<dyn VoiceStorePort>) -> Self {
        Self { store }
    }

    pub async fn handle(&self, _query: ListInstalledVoices) -> Result<Vec<String>, ApplicationError> {
        Ok(self.store.list_installed().await?)
    }
}

/// GetHealth Handler
///
/// 只读，不创建目录也不触发下载
pub struct GetHealthHandler {
    store: Arc<dyn VoiceStorePort>,
    default_voice: String,
}

impl GetHealthHandler {
    pub fn new(store: Arc<dyn VoiceStorePort>, default_voice: impl Into<String>) -> Self {
        Self {
            store,
            default_voice: default_voice.into(),
        }
    }

    pub async fn handle(&self, _query: GetHealth) -> Result<HealthResponse, ApplicationError> {
        let installed = self.store.list_installed().await?;
        Ok(HealthResponse {
            installed,
            default_voice: self.default_voice.clone(),
        })
    }
}
