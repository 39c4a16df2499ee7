//! 工具模块集合
//!
//! 包含CLI、文件枚举、工作线程池等模块，支持main.rs的流程控制。

pub mod cli;
pub mod constants;
pub mod encoder_pool;
pub mod scanner;
pub mod utils;

// 重新导出主要的公共接口
pub use cli::{AppConfig, parse_args, show_startup_info, show_usage};
pub use encoder_pool::{EncoderPool, RunStatus};
pub use scanner::{PathSource, WavScan};
pub use utils::{extract_filename_lossy, replace_extension_mp3};
