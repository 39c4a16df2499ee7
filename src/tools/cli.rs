//! 命令行接口模块
//!
//! 负责命令行参数解析、配置管理和程序信息展示。

use crate::error::{AudioError, AudioResult};
use clap::error::ErrorKind;
use clap::{Arg, Command};
use std::path::PathBuf;

/// 应用程序版本信息
const VERSION: &str = env!("CARGO_PKG_VERSION");
const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// 应用程序配置（零配置原则：唯一参数是扫描目录）
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// WAV文件扫描目录
    pub input_dir: PathBuf,

    /// 工作线程数（默认为检测到的处理器核心数）
    pub workers: usize,
}

/// 解析命令行参数并创建配置
///
/// 接受零个或一个位置参数；参数个数不符时返回
/// `AudioError::InvalidInput`，由main打印用法并以状态1退出。
pub fn parse_args() -> AudioResult<AppConfig> {
    let command = Command::new("wav2mp3")
        .version(VERSION)
        .about(DESCRIPTION)
        .override_usage("wav2mp3 <directory>")
        .arg(
            Arg::new("DIRECTORY")
                .help("待转换的WAV文件目录（省略时使用当前目录）")
                .required(false)
                .index(1),
        );

    let matches = match command.try_get_matches() {
        Ok(matches) => matches,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            let _ = e.print();
            std::process::exit(0);
        }
        Err(e) => return Err(AudioError::InvalidInput(e.to_string())),
    };

    // 空参数与省略参数等价：使用当前目录
    let input_dir = match matches.get_one::<String>("DIRECTORY") {
        Some(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => PathBuf::from("."),
    };

    Ok(AppConfig {
        input_dir,
        workers: num_cpus::get(),
    })
}

/// 显示程序启动信息
pub fn show_startup_info(config: &AppConfig) {
    println!("🚀 wav2mp3 v{VERSION} 启动");
    println!("📁 扫描目录: {}", config.input_dir.display());
    println!("⚡ 工作线程数: {}", config.workers);
    println!();
}

/// 显示用法信息
pub fn show_usage() {
    eprintln!("Usage: wav2mp3 <directory>");
}
