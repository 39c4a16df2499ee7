//! 文件枚举模块
//!
//! 负责惰性扫描目录中的WAV文件。枚举源是单遍、可能中途失败的
//! 序列；工作线程池通过`PathSource`接口逐个认领路径。

use crate::error::{AudioError, AudioResult};
use std::fs;
use std::path::{Path, PathBuf};

/// 待转换文件的扩展名
const WAV_EXTENSION: &str = "wav";

/// 可枚举路径源的能力接口
///
/// `Ok(Some)` = 下一个匹配路径，`Ok(None)` = 序列耗尽，
/// `Err` = 枚举源本身发生致命错误（之后不应再被调用）。
pub trait PathSource: Send {
    /// 取出序列中的下一个匹配路径
    fn next_match(&mut self) -> AudioResult<Option<PathBuf>>;
}

/// 目录WAV文件扫描器
///
/// 基于`fs::ReadDir`的惰性单遍枚举：只匹配目录直接子项中的
/// 常规文件，扩展名按ASCII大小写不敏感匹配（等价于
/// `*.[wW][aA][vV]`通配模式），目录项一律跳过。
pub struct WavScan {
    entries: fs::ReadDir,
}

impl WavScan {
    /// 打开目录并创建扫描器
    ///
    /// # 错误
    ///
    /// * `AudioError::InvalidInput` - 路径不是目录
    /// * `AudioError::EnumerationError` - 目录无法打开
    pub fn scan(dir: &Path) -> AudioResult<Self> {
        if dir.exists() && !dir.is_dir() {
            return Err(AudioError::InvalidInput(format!(
                "路径不是目录: {}",
                dir.display()
            )));
        }

        let entries = fs::read_dir(dir).map_err(|e| {
            AudioError::EnumerationError(format!("无法打开目录 {}: {e}", dir.display()))
        })?;

        Ok(Self { entries })
    }
}

impl PathSource for WavScan {
    fn next_match(&mut self) -> AudioResult<Option<PathBuf>> {
        for entry in self.entries.by_ref() {
            // 目录流中途的I/O失败是致命枚举错误
            let entry = entry
                .map_err(|e| AudioError::EnumerationError(format!("目录流读取失败: {e}")))?;
            let path = entry.path();

            // 只处理常规文件，跳过目录（包括名字恰好匹配的目录）
            if !path.is_file() {
                continue;
            }

            if let Some(extension) = path.extension()
                && let Some(ext_str) = extension.to_str()
                && ext_str.eq_ignore_ascii_case(WAV_EXTENSION)
            {
                return Ok(Some(path));
            }
        }

        Ok(None)
    }
}
