//! HTTP Voice Fetcher - 从远程音色目录下载音色
//!
//! 实现 VoiceFetcherPort，远程目录格式与 Piper 音色仓库一致:
//!
//! GET {base_url}/voices.json
//! ```json
//! {
//!   "en_US-lessac-medium": {
//!     "key": "en_US-lessac-medium",
//!     "aliases": [],
//!     "files": {
//!       "en/en_US/lessac/medium/en_US-lessac-medium.onnx": { "size_bytes": 63201294, "md5_digest": "..." },
//!       "en/en_US/lessac/medium/en_US-lessac-medium.onnx.json": { "size_bytes": 4885, "md5_digest": "..." }
//!     }
//!   }
//! }
//! ```
//! GET {base_url}/{file path}

use async_trait::async_trait;
use futures_util::StreamExt;
use reqwest::Client;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;
use tempfile::{Builder, NamedTempFile};
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::application::ports::{FetchError, VoiceFetcherPort};
use crate::domain::voice::{VoiceFileLayout, VoiceId};

/// 目录缓存文件名（写入目标目录）
pub const CATALOG_FILE: &str = "voices.json";

/// 暂存文件名前缀，以 `.` 开头使其不被当作音色文件
const STAGING_PREFIX: &str = ".voicegate-";

/// 暂存文件后缀
const STAGING_SUFFIX: &str = ".part";

/// HTTP 音色下载配置
#[derive(Debug, Clone)]
pub struct HttpVoiceFetcherConfig {
    /// 音色仓库基础 URL
    pub base_url: String,
    /// 单次请求超时（秒）
    pub timeout_secs: u64,
    /// 文件命名规则
    pub layout: VoiceFileLayout,
}

impl Default for HttpVoiceFetcherConfig {
    fn default() -> Self {
        Self {
            base_url: "https://huggingface.co/rhasspy/piper-voices/resolve/v1.0.0".to_string(),
            timeout_secs: 300,
            layout: VoiceFileLayout::default(),
        }
    }
}

impl HttpVoiceFetcherConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

#[derive(Debug, Deserialize)]
struct CatalogEntry {
    #[serde(default)]
    aliases: Vec<String>,
    #[serde(default)]
    files: HashMap<String, CatalogFile>,
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    md5_digest: Option<String>,
}

/// 在目标目录创建唯一命名的暂存文件，未提交时 Drop 删除
fn staging_file(dir: &Path) -> Result<NamedTempFile, FetchError> {
    Builder::new()
        .prefix(STAGING_PREFIX)
        .suffix(STAGING_SUFFIX)
        .tempfile_in(dir)
        .map_err(|e| FetchError::Io(format!("{}: {}", dir.display(), e)))
}

/// 原子地把暂存文件重命名为目标文件
fn commit(staged: NamedTempFile, target: &Path) -> Result<(), FetchError> {
    staged
        .persist(target)
        .map_err(|e| FetchError::Io(format!("{}: {}", target.display(), e.error)))?;
    Ok(())
}

/// HTTP 音色下载器
pub struct HttpVoiceFetcher {
    client: Client,
    config: HttpVoiceFetcherConfig,
}

impl HttpVoiceFetcher {
    /// 创建新的下载器
    pub fn new(config: HttpVoiceFetcherConfig) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| FetchError::Network(e.to_string()))?;

        Ok(Self { client, config })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.config.base_url.trim_end_matches('/'), path)
    }

    async fn get(&self, url: &str) -> Result<reqwest::Response, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::Network(format!("{}: {}", url, e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Network(format!("HTTP {} for {}", status, url)));
        }
        Ok(response)
    }

    /// 下载目录并刷新本地缓存
    async fn refresh_catalog(
        &self,
        target_dir: &Path,
    ) -> Result<HashMap<String, CatalogEntry>, FetchError> {
        let url = self.url(CATALOG_FILE);
        let bytes = self
            .get(&url)
            .await?
            .bytes()
            .await
            .map_err(|e| FetchError::Network(format!("{}: {}", url, e)))?;

        let catalog: HashMap<String, CatalogEntry> = serde_json::from_slice(&bytes)
            .map_err(|e| FetchError::InvalidCatalog(e.to_string()))?;

        // 并发下载各自写入独立的暂存文件，读者只会看到完整的目录
        let cache = staging_file(target_dir)?;
        fs::write(cache.path(), &bytes)
            .await
            .map_err(|e| FetchError::Io(format!("{}: {}", cache.path().display(), e)))?;
        commit(cache, &target_dir.join(CATALOG_FILE))?;

        tracing::debug!(voices = catalog.len(), "Voice catalog refreshed");
        Ok(catalog)
    }

    /// 流式下载到 `dir` 下的暂存文件，校验 MD5，返回未提交的文件
    async fn download(
        &self,
        remote_path: &str,
        expected_md5: Option<&str>,
        dir: &Path,
    ) -> Result<NamedTempFile, FetchError> {
        let url = self.url(remote_path);
        let response = self.get(&url).await?;

        let staged = staging_file(dir)?;
        let handle = staged
            .reopen()
            .map_err(|e| FetchError::Io(format!("{}: {}", staged.path().display(), e)))?;
        let mut file = fs::File::from_std(handle);

        let mut hasher = md5::Context::new();
        let mut size = 0u64;
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|e| FetchError::Network(format!("{}: {}", url, e)))?;
            hasher.consume(&chunk);
            size += chunk.len() as u64;
            file.write_all(&chunk)
                .await
                .map_err(|e| FetchError::Io(e.to_string()))?;
        }
        file.flush().await.map_err(|e| FetchError::Io(e.to_string()))?;
        drop(file);

        if let Some(expected) = expected_md5 {
            let actual = format!("{:x}", hasher.compute());
            if !actual.eq_ignore_ascii_case(expected) {
                return Err(FetchError::Integrity {
                    file: remote_path.to_string(),
                    expected: expected.to_string(),
                    actual,
                });
            }
        }

        tracing::debug!(url = %url, size, "Voice file downloaded");
        Ok(staged)
    }
}

/// 按 key 查找，找不到再按别名查找
fn find_entry<'a>(
    catalog: &'a HashMap<String, CatalogEntry>,
    voice: &str,
) -> Option<&'a CatalogEntry> {
    catalog.get(voice).or_else(|| {
        catalog
            .values()
            .find(|entry| entry.aliases.iter().any(|alias| alias == voice))
    })
}

/// 在条目中找到以指定后缀结尾的文件
fn find_file<'a>(entry: &'a CatalogEntry, suffix: &str) -> Option<(&'a str, &'a CatalogFile)> {
    entry
        .files
        .iter()
        .find(|(path, _)| path.ends_with(suffix))
        .map(|(path, file)| (path.as_str(), file))
}

#[async_trait]
impl VoiceFetcherPort for HttpVoiceFetcher {
    async fn fetch(&self, voice: &VoiceId, target_dir: &Path) -> Result<(), FetchError> {
        let layout = &self.config.layout;
        let catalog = self.refresh_catalog(target_dir).await?;

        let entry = find_entry(&catalog, voice.as_str())
            .ok_or_else(|| FetchError::UnknownVoice(voice.to_string()))?;

        let (model_remote, model_file) = find_file(entry, &layout.model_suffix).ok_or_else(|| {
            FetchError::InvalidCatalog(format!("{} has no model file", voice))
        })?;
        let (config_remote, config_file) =
            find_file(entry, &layout.config_suffix).ok_or_else(|| {
                FetchError::InvalidCatalog(format!("{} has no config file", voice))
            })?;

        tracing::info!(voice = %voice, model = %model_remote, "Downloading voice");

        let pair = layout.asset_pair(target_dir, voice);
        let model = self
            .download(model_remote, model_file.md5_digest.as_deref(), target_dir)
            .await?;
        let config = self
            .download(config_remote, config_file.md5_digest.as_deref(), target_dir)
            .await?;

        // 两个文件都下载校验完毕后才提交
        commit(model, &pair.model_path)?;
        commit(config, &pair.config_path)?;
        Ok(())
    }
}
