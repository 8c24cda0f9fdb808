//! Infrastructure Adapters
//!
//! 六边形架构的适配器实现

pub mod process;
pub mod recognition;
pub mod storage;
pub mod voices;

pub use process::*;
pub use recognition::*;
pub use storage::*;
pub use voices::*;
