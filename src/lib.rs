//! wav2mp3 - 多核并行WAV转MP3批量编码器
//!
//! 扫描目录中的WAV文件，用满所有处理器核心批量转码为MP3，
//! 逐文件上报成败，单个坏文件不会中断整个批次。
//!
//! ## 核心特性
//! - 固定规模工作线程池 + 共享枚举游标（每个路径恰好被认领一次）
//! - 手工RIFF/RIFX容器解析，字节序自动归一化
//! - 致命枚举错误只上报一次，其余线程静默退出
//! - 编解码缓冲区按线程复用，不按文件重新分配

pub mod audio;
pub mod encoder;
pub mod error;
pub mod tools;

// 重新导出核心类型
pub use audio::{AudioFormat, PcmSource, WavDecoder};
pub use encoder::Mp3Transcoder;
pub use error::{AudioError, AudioResult, ErrorCategory};
pub use tools::{AppConfig, EncoderPool, PathSource, RunStatus, WavScan};
