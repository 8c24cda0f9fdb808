//! Tokio Process Runner
//!
//! 实现 ProcessRunnerPort：捕获 stdout/stderr，超时后终止子进程

use async_trait::async_trait;
use std::process::Stdio;
use std::time::Instant;
use tokio::process::Command;

use crate::application::ports::{ProcessError, ProcessInvocation, ProcessOutput, ProcessRunnerPort};

#[derive(Debug, Clone, Default)]
pub struct TokioProcessRunner;

impl TokioProcessRunner {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ProcessRunnerPort for TokioProcessRunner {
    async fn run(&self, invocation: ProcessInvocation) -> Result<ProcessOutput, ProcessError> {
        let program = invocation.program.clone();

        let mut cmd = Command::new(&invocation.program);
        cmd.args(&invocation.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            // 超时后 future 被丢弃，子进程随之被杀掉
            .kill_on_drop(true);

        let child = cmd.spawn().map_err(|e| ProcessError::Spawn {
            program: program.clone(),
            message: e.to_string(),
        })?;

        let started = Instant::now();
        let wait = child.wait_with_output();
        let output = match invocation.timeout {
            Some(limit) => match tokio::time::timeout(limit, wait).await {
                Ok(result) => result,
                Err(_) => {
                    tracing::warn!(
                        program = %program,
                        timeout_ms = limit.as_millis() as u64,
                        "Process timed out, killed"
                    );
                    return Err(ProcessError::Timeout {
                        program,
                        after: limit,
                    });
                }
            },
            None => wait.await,
        }
        .map_err(|e| ProcessError::Io {
            program: program.clone(),
            message: e.to_string(),
        })?;

        tracing::debug!(
            program = %program,
            exit_code = ?output.status.code(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Process finished"
        );

        Ok(ProcessOutput {
            exit_code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}
