//! Process Runner Port - 外部进程调用抽象
//!
//! 合成引擎、识别引擎都通过命令行调用，这里统一建模为
//! "执行程序 + 参数 + 可选超时 -> 退出码/stdout/stderr"

use async_trait::async_trait;
use std::ffi::OsString;
use std::time::Duration;
use thiserror::Error;

/// 进程调用错误（进程未能正常结束）
#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("Failed to spawn {program}: {message}")]
    Spawn { program: String, message: String },

    #[error("{program} timed out after {}", format_timeout(*after))]
    Timeout { program: String, after: Duration },

    #[error("IO error while running {program}: {message}")]
    Io { program: String, message: String },
}

/// 超时时长的可读形式：整秒显示为 `60s`，否则精确到毫秒（`200ms`）
pub fn format_timeout(after: Duration) -> String {
    if after.subsec_nanos() == 0 {
        format!("{}s", after.as_secs())
    } else {
        format!("{}ms", after.as_millis())
    }
}

/// 一次进程调用
#[derive(Debug, Clone)]
pub struct ProcessInvocation {
    pub program: String,
    pub args: Vec<OsString>,
    /// None 表示不限时
    pub timeout: Option<Duration>,
}

impl ProcessInvocation {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            timeout: None,
        }
    }

    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// 参数的可读形式（用于日志和测试断言）
    pub fn args_lossy(&self) -> Vec<String> {
        self.args
            .iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect()
    }
}

/// 进程运行结果
#[derive(Debug, Clone, Default)]
pub struct ProcessOutput {
    /// 被信号终止时为 None
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl ProcessOutput {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Process Runner Port
#[async_trait]
pub trait ProcessRunnerPort: Send + Sync {
    /// 阻塞等待进程结束；超过 `timeout` 时终止进程并返回 `ProcessError::Timeout`
    async fn run(&self, invocation: ProcessInvocation) -> Result<ProcessOutput, ProcessError>;
}
