//! Process Adapter - tokio 子进程实现

mod tokio_process_runner;

pub use tokio_process_runner::TokioProcessRunner;
