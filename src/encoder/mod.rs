//! MP3编码模块
//!
//! 外部LAME引擎的适配层。

pub mod mp3_transcoder;

pub use mp3_transcoder::Mp3Transcoder;
