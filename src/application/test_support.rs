//! 测试替身：端口的可编程实现

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use crate::application::ports::{
    FetchError, ProcessError, ProcessInvocation, ProcessOutput, ProcessRunnerPort, Recognition,
    RecognitionEnginePort, RecognitionError, VoiceFetcherPort,
};
use crate::domain::transcript::{DetectedLanguage, LanguageHint, TranscriptSegment};
use crate::domain::voice::{VoiceFileLayout, VoiceId};

// ============================================================================
// Voice fetcher
// ============================================================================

/// 下载行为
#[derive(Debug, Clone)]
pub enum FetchBehavior {
    /// 写入模型和配置
    Install,
    /// 只写入模型（模拟残缺下载）
    ModelOnly,
    /// 什么都不写，返回 UnknownVoice
    Unknown,
    /// 什么都不写，但返回成功
    Silent,
}

pub struct CountingFetcher {
    behavior: FetchBehavior,
    layout: VoiceFileLayout,
    delay: Duration,
    calls: AtomicUsize,
}

impl CountingFetcher {
    pub fn new(behavior: FetchBehavior) -> Self {
        Self {
            behavior,
            layout: VoiceFileLayout::default(),
            delay: Duration::ZERO,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl VoiceFetcherPort for CountingFetcher {
    async fn fetch(&self, voice: &VoiceId, target_dir: &Path) -> Result<(), FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        let pair = self.layout.asset_pair(target_dir, voice);
        match self.behavior {
            FetchBehavior::Install => {
                tokio::fs::write(&pair.model_path, b"model").await.unwrap();
                tokio::fs::write(&pair.config_path, b"{}").await.unwrap();
                Ok(())
            }
            FetchBehavior::ModelOnly => {
                tokio::fs::write(&pair.model_path, b"model").await.unwrap();
                Ok(())
            }
            FetchBehavior::Unknown => Err(FetchError::UnknownVoice(voice.to_string())),
            FetchBehavior::Silent => Ok(()),
        }
    }
}

/// 在目录中直接安装一个音色
pub fn install_voice(dir: &Path, voice: &str) {
    let layout = VoiceFileLayout::default();
    let voice = VoiceId::new(voice).unwrap();
    let pair = layout.asset_pair(dir, &voice);
    std::fs::write(pair.model_path, b"model").unwrap();
    std::fs::write(pair.config_path, b"{}").unwrap();
}

/// 列出目录中的所有文件名（已排序）
pub fn list_files(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

// ============================================================================
// Process runner
// ============================================================================

type Script = dyn Fn(&ProcessInvocation) -> Result<ProcessOutput, ProcessError> + Send + Sync;

/// 按脚本返回结果的进程运行器，记录每次调用
pub struct ScriptedRunner {
    script: Box<Script>,
    invocations: Mutex<Vec<ProcessInvocation>>,
}

impl ScriptedRunner {
    pub fn new<F>(script: F) -> Self
    where
        F: Fn(&ProcessInvocation) -> Result<ProcessOutput, ProcessError> + Send + Sync + 'static,
    {
        Self {
            script: Box::new(script),
            invocations: Mutex::new(Vec::new()),
        }
    }

    /// 模拟 piper：向 `-f` 指定的路径写入音频，退出码 0
    pub fn writing_audio(audio: &'static [u8]) -> Self {
        Self::new(move |inv| {
            let out = output_path_of(inv).expect("missing -f argument");
            std::fs::write(out, audio).unwrap();
            Ok(ProcessOutput {
                exit_code: Some(0),
                ..Default::default()
            })
        })
    }

    /// 以给定退出码和 stderr 失败
    pub fn failing(code: i32, stderr: &'static str) -> Self {
        Self::new(move |_| {
            Ok(ProcessOutput {
                exit_code: Some(code),
                stdout: String::new(),
                stderr: stderr.to_string(),
            })
        })
    }

    /// 先写出部分输出，再超时
    pub fn timing_out(after: Duration) -> Self {
        Self::new(move |inv| {
            if let Some(out) = output_path_of(inv) {
                std::fs::write(out, b"partial").unwrap();
            }
            Err(ProcessError::Timeout {
                program: inv.program.clone(),
                after,
            })
        })
    }

    pub fn calls(&self) -> usize {
        self.invocations.lock().unwrap().len()
    }

    pub fn invocations(&self) -> Vec<ProcessInvocation> {
        self.invocations.lock().unwrap().clone()
    }
}

/// 取 `-f` 参数后面的路径
pub fn output_path_of(inv: &ProcessInvocation) -> Option<PathBuf> {
    let args = inv.args_lossy();
    args.iter()
        .position(|a| a == "-f")
        .and_then(|i| args.get(i + 1))
        .map(PathBuf::from)
}

#[async_trait]
impl ProcessRunnerPort for ScriptedRunner {
    async fn run(&self, invocation: ProcessInvocation) -> Result<ProcessOutput, ProcessError> {
        self.invocations.lock().unwrap().push(invocation.clone());
        (self.script)(&invocation)
    }
}

// ============================================================================
// Recognition engine
// ============================================================================

/// 调用时观察到的输入
#[derive(Debug, Clone)]
pub struct ObservedRecognition {
    pub path: PathBuf,
    pub contents: Vec<u8>,
    pub language: LanguageHint,
}

/// 返回固定片段的识别引擎
pub struct ScriptedEngine {
    segments: Vec<&'static str>,
    language: &'static str,
    fail_with: Option<&'static str>,
    observed: Mutex<Vec<ObservedRecognition>>,
}

impl ScriptedEngine {
    pub fn new(segments: Vec<&'static str>, language: &'static str) -> Self {
        Self {
            segments,
            language,
            fail_with: None,
            observed: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(message: &'static str) -> Self {
        Self {
            segments: Vec::new(),
            language: "",
            fail_with: Some(message),
            observed: Mutex::new(Vec::new()),
        }
    }

    pub fn observed(&self) -> Vec<ObservedRecognition> {
        self.observed.lock().unwrap().clone()
    }
}

#[async_trait]
impl RecognitionEnginePort for ScriptedEngine {
    async fn recognize(
        &self,
        audio_path: &Path,
        language: &LanguageHint,
    ) -> Result<Recognition, RecognitionError> {
        let contents = std::fs::read(audio_path).unwrap_or_default();
        self.observed.lock().unwrap().push(ObservedRecognition {
            path: audio_path.to_path_buf(),
            contents,
            language: language.clone(),
        });

        if let Some(message) = self.fail_with {
            return Err(RecognitionError::EngineFailed(message.to_string()));
        }

        let segments: Vec<TranscriptSegment> =
            self.segments.iter().map(|s| TranscriptSegment::new(*s)).collect();
        Ok(Recognition {
            info: DetectedLanguage {
                language: self.language.to_string(),
            },
            segments: Box::new(segments.into_iter()),
        })
    }
}
