//! 统一错误处理框架
//!
//! 区分可恢复的单文件错误（解码/编码失败）和不可恢复的
//! 枚举/资源错误，为批量处理提供错误分类基础。

use std::fmt;
use std::io;

/// 音频转码相关的统一错误类型
#[derive(Debug)]
pub enum AudioError {
    /// 输入验证错误（命令行参数、构造参数）
    InvalidInput(String),

    /// 文件I/O错误
    IoError(io::Error),

    /// 容器格式错误（非RIFF/RIFX、非16位PCM、头部截断等）
    FormatError(String),

    /// 解码错误（样本数据流损坏）
    DecodingError(String),

    /// 编码错误（LAME拒绝参数或编码失败）
    EncodingError(String),

    /// 文件枚举源致命错误（目录流中断）
    EnumerationError(String),

    /// 资源访问错误（线程、锁）
    ResourceError(String),
}

impl fmt::Display for AudioError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AudioError::InvalidInput(msg) => write!(f, "输入验证失败: {msg}"),
            AudioError::IoError(err) => write!(f, "文件I/O错误: {err}"),
            AudioError::FormatError(msg) => write!(f, "音频格式错误: {msg}"),
            AudioError::DecodingError(msg) => write!(f, "音频解码失败: {msg}"),
            AudioError::EncodingError(msg) => write!(f, "MP3编码失败: {msg}"),
            AudioError::EnumerationError(msg) => write!(f, "文件枚举失败: {msg}"),
            AudioError::ResourceError(msg) => write!(f, "资源访问错误: {msg}"),
        }
    }
}

impl std::error::Error for AudioError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AudioError::IoError(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for AudioError {
    fn from(err: io::Error) -> Self {
        AudioError::IoError(err)
    }
}

/// 音频转码操作的标准Result类型
pub type AudioResult<T> = Result<T, AudioError>;

// ==================== 错误分类系统 ====================
// 用于main.rs的退出码映射

/// 错误类别枚举
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq)]
pub enum ErrorCategory {
    /// 单文件可恢复错误（格式、解码、编码、I/O）
    PerFile,
    /// 枚举源致命错误
    Enumeration,
    /// 输入/参数错误
    Input,
    /// 其他不可恢复错误（线程、锁）
    Resource,
}

impl ErrorCategory {
    /// 从AudioError提取错误类别
    pub fn from_audio_error(e: &AudioError) -> Self {
        match e {
            AudioError::FormatError(_)
            | AudioError::DecodingError(_)
            | AudioError::EncodingError(_)
            | AudioError::IoError(_) => Self::PerFile,
            AudioError::EnumerationError(_) => Self::Enumeration,
            AudioError::InvalidInput(_) => Self::Input,
            AudioError::ResourceError(_) => Self::Resource,
        }
    }

    /// 获取错误类别的显示名称
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::PerFile => "单文件错误",
            Self::Enumeration => "枚举错误",
            Self::Input => "输入错误",
            Self::Resource => "资源错误",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_category_mapping() {
        let cases = [
            (AudioError::FormatError("x".into()), ErrorCategory::PerFile),
            (AudioError::DecodingError("x".into()), ErrorCategory::PerFile),
            (AudioError::EncodingError("x".into()), ErrorCategory::PerFile),
            (
                AudioError::IoError(io::Error::new(io::ErrorKind::NotFound, "x")),
                ErrorCategory::PerFile,
            ),
            (
                AudioError::EnumerationError("x".into()),
                ErrorCategory::Enumeration,
            ),
            (AudioError::InvalidInput("x".into()), ErrorCategory::Input),
            (
                AudioError::ResourceError("x".into()),
                ErrorCategory::Resource,
            ),
        ];

        for (error, expected) in cases {
            assert_eq!(ErrorCategory::from_audio_error(&error), expected);
        }
    }

    #[test]
    fn test_io_error_source_chain() {
        let err = AudioError::from(io::Error::new(io::ErrorKind::PermissionDenied, "denied"));
        assert!(std::error::Error::source(&err).is_some());
        assert!(matches!(err, AudioError::IoError(_)));
    }
}
