//! wav2mp3 - 主程序入口
//!
//! 纯流程控制器：解析参数 → 打开枚举源 → 运行工作线程池 →
//! 将聚合状态映射为进程退出码。

use std::process;
use wav2mp3::{
    error::{AudioError, ErrorCategory},
    tools::{self, EncoderPool, RunStatus, WavScan},
};

/// 错误退出码定义
mod exit_codes {
    /// 全部文件处理成功
    pub const SUCCESS: i32 = 0;
    /// 用法/参数错误
    pub const USAGE_ERROR: i32 = 1;
    /// 至少一个文件解码或编码失败
    pub const FILES_FAILED: i32 = 2;
    /// 文件枚举致命失败
    pub const ENUMERATION_ERROR: i32 = 3;
}

/// 错误处理和退出码映射
fn handle_error(error: AudioError) -> ! {
    eprintln!("[ERROR] 错误 / Error: {error}");

    let exit_code = match ErrorCategory::from_audio_error(&error) {
        ErrorCategory::Input => {
            tools::show_usage();
            exit_codes::USAGE_ERROR
        }
        ErrorCategory::Enumeration => exit_codes::ENUMERATION_ERROR,
        ErrorCategory::PerFile | ErrorCategory::Resource => exit_codes::USAGE_ERROR,
    };

    process::exit(exit_code);
}

/// 应用程序主逻辑
fn run() -> Result<RunStatus, AudioError> {
    // 1. 解析命令行参数
    let config = tools::parse_args()?;

    // 2. 显示启动信息
    tools::show_startup_info(&config);

    // 3. 打开惰性枚举源并运行线程池
    let source = WavScan::scan(&config.input_dir)?;
    let pool = EncoderPool::new(source, config.workers)?;
    Ok(pool.run())
}

fn main() {
    match run() {
        Ok(status) => {
            let exit_code = match status {
                RunStatus::Success => exit_codes::SUCCESS,
                RunStatus::FileFailures => exit_codes::FILES_FAILED,
                RunStatus::EnumerationFailed => exit_codes::ENUMERATION_ERROR,
            };
            process::exit(exit_code);
        }
        Err(error) => handle_error(error),
    }
}
