//! 工具函数模块
//!
//! 提供文件路径处理等通用工具函数。

/// 文件路径处理工具函数
pub mod path {
    use std::path::{Path, PathBuf};

    /// 生成输出MP3路径：将输入路径的最后3个字符替换为"mp3"
    ///
    /// 纯文本替换操作（与枚举模式保证的`.wav`后缀配合），
    /// 例如 `a.wav` → `a.mp3`、`A.WAV` → `A.mp3`。
    #[inline]
    pub fn replace_extension_mp3(path: &Path) -> PathBuf {
        let text = path.to_string_lossy();
        if text.len() >= 3 && text.is_char_boundary(text.len() - 3) {
            PathBuf::from(format!("{}mp3", &text[..text.len() - 3]))
        } else {
            path.with_extension("mp3")
        }
    }

    /// 提取文件名（返回String，用于日志显示）
    #[inline]
    pub fn extract_filename_lossy(path: &Path) -> String {
        path.file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string()
    }
}

// 重新导出为平级函数
pub use path::{extract_filename_lossy, replace_extension_mp3};
