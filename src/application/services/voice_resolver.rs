//! Voice Resolver - 确保音色文件在本地可用
//!
//! 流程：
//! 1. 确保本地音色库目录存在
//! 2. 模型和配置都在 -> 直接返回，不访问网络
//! 3. 缺任意一个 -> 对该音色执行一次下载（目标目录即本地音色库）
//! 4. 下载后再检查一次，仍缺失则返回 VoiceUnavailable
//!
//! 同一音色的首次下载按音色串行化；不同音色互不阻塞。
//! 已安装的音色不会被重新下载（即使文件已损坏）。

use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::application::error::ApplicationError;
use crate::application::ports::{VoiceFetcherPort, VoiceStorePort};
use crate::domain::voice::{VoiceAssetPair, VoiceId};

pub struct VoiceResolver {
    store: Arc<dyn VoiceStorePort>,
    fetcher: Arc<dyn VoiceFetcherPort>,
    /// voice -> 下载锁
    fetch_locks: DashMap<VoiceId, Arc<Mutex<()>>>,
}

impl VoiceResolver {
    pub fn new(store: Arc<dyn VoiceStorePort>, fetcher: Arc<dyn VoiceFetcherPort>) -> Self {
        Self {
            store,
            fetcher,
            fetch_locks: DashMap::new(),
        }
    }

    pub async fn resolve(&self, voice: &VoiceId) -> Result<VoiceAssetPair, ApplicationError> {
        self.store.ensure_root().await?;

        if let Some(pair) = self.store.find(voice).await {
            tracing::debug!(voice = %voice, "Voice already installed");
            return Ok(pair);
        }

        let lock = self.fetch_locks.entry(voice.clone()).or_default().clone();
        let result = {
            let _guard = lock.lock().await;
            self.fetch_locked(voice).await
        };

        // 没有其他等待者时回收锁
        self.fetch_locks
            .remove_if(voice, |_, l| Arc::strong_count(l) <= 2);

        result
    }

    async fn fetch_locked(&self, voice: &VoiceId) -> Result<VoiceAssetPair, ApplicationError> {
        // 等锁期间可能已被其他请求下载完成
        if let Some(pair) = self.store.find(voice).await {
            tracing::debug!(voice = %voice, "Voice installed by concurrent request");
            return Ok(pair);
        }

        tracing::info!(
            voice = %voice,
            dir = %self.store.root().display(),
            "Voice not installed, fetching"
        );

        let fetch_error = match self.fetcher.fetch(voice, self.store.root()).await {
            Ok(()) => None,
            Err(e) => {
                tracing::warn!(voice = %voice, error = %e, "Voice fetch failed");
                Some(e.to_string())
            }
        };

        match self.store.find(voice).await {
            Some(pair) => {
                tracing::info!(voice = %voice, "Voice installed");
                Ok(pair)
            }
            None => Err(ApplicationError::VoiceUnavailable {
                voice: voice.to_string(),
                reason: fetch_error,
            }),
        }
    }
}
