//! Scratch File - 单次请求独占的临时文件
//!
//! 与外部引擎通过文件系统交换数据：合成时作为输出文件，转写时作为输入文件。
//! 文件名由 tempfile 生成，Drop 时删除（成功、失败、超时、panic 展开都会执行），
//! 删除失败被忽略。

use std::path::Path;
use tempfile::{Builder, TempPath};

/// 文件名前缀
const SCRATCH_PREFIX: &str = "voicegate-";

#[derive(Debug)]
pub struct ScratchFile {
    path: TempPath,
}

impl ScratchFile {
    /// 在 `dir` 中创建一个唯一命名的空文件，供引擎写入
    pub fn reserve(dir: &Path, suffix: &str) -> std::io::Result<Self> {
        let file = Builder::new()
            .prefix(SCRATCH_PREFIX)
            .suffix(suffix)
            .tempfile_in(dir)?;
        tracing::debug!(path = %file.path().display(), "Scratch file reserved");
        Ok(Self {
            path: file.into_temp_path(),
        })
    }

    /// 创建并写入全部内容
    ///
    /// 写入失败时部分文件随 Drop 一起删除
    pub async fn create(dir: &Path, suffix: &str, contents: &[u8]) -> std::io::Result<Self> {
        let scratch = Self::reserve(dir, suffix)?;
        tokio::fs::write(scratch.path(), contents).await?;
        Ok(scratch)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
