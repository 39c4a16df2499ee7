//! MP3转码适配器
//!
//! 封装外部LAME编码引擎（mp3lame-encoder），按块驱动
//! 解码→编码→写出流水线。输入/输出缓冲区由适配器持有，
//! 同一工作线程处理的所有文件之间复用，不按文件重新分配。

use crate::audio::{AudioFormat, PcmSource};
use crate::error::{AudioError, AudioResult};
use crate::tools::constants::encode_buffers::{ENCODE_BLOCK_FRAMES, OUTPUT_BUFFER_CAPACITY};
use mp3lame_encoder::{Builder, Encoder, FlushNoGap, InterleavedPcm, MonoPcm};
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// MP3转码器
///
/// 每个工作线程构造一个实例；PCM输入缓冲区按"外部引擎在给定
/// 输出预算下可接受的最大样本量"一次性定容，MP3输出缓冲区
/// 固定预留OUTPUT_BUFFER_CAPACITY，容量只增不减。
pub struct Mp3Transcoder {
    /// 交错PCM输入缓冲区
    pcm_buf: Vec<i16>,

    /// MP3编码输出缓冲区
    mp3_buf: Vec<u8>,
}

impl Mp3Transcoder {
    /// 创建转码器，预留输出缓冲区容量
    pub fn new() -> Self {
        Self {
            pcm_buf: Vec::new(),
            mp3_buf: Vec::with_capacity(OUTPUT_BUFFER_CAPACITY),
        }
    }

    /// 将一个PCM输入流完整转码为MP3文件
    ///
    /// # 错误
    ///
    /// * `AudioError::EncodingError` - 引擎拒绝流参数或编码失败
    /// * `AudioError::IoError` - 输出文件创建/写入失败
    /// * 解码错误由输入流原样传播
    pub fn transcode<S: PcmSource>(&mut self, input: &mut S, output_path: &Path) -> AudioResult<()> {
        let format = input.format().clone();
        let mut encoder = self.configure(&format)?;

        let channels = format.channels as usize;
        let required = ENCODE_BLOCK_FRAMES * channels;
        if self.pcm_buf.len() < required {
            self.pcm_buf.resize(required, 0);
        }

        let mut output = File::create(output_path)?;

        loop {
            let frames = input.read_samples(&mut self.pcm_buf[..required])?;
            if frames == 0 {
                break;
            }

            let block = &self.pcm_buf[..frames * channels];
            self.mp3_buf.clear();
            let encoded = match channels {
                1 => encoder.encode_to_vec(MonoPcm(block), &mut self.mp3_buf),
                2 => encoder.encode_to_vec(InterleavedPcm(block), &mut self.mp3_buf),
                _ => {
                    return Err(AudioError::EncodingError(format!(
                        "不支持的声道数: {channels}"
                    )));
                }
            }
            .map_err(|e| AudioError::EncodingError(format!("样本块编码失败: {e}")))?;

            output.write_all(&self.mp3_buf[..encoded])?;
        }

        // 冲刷最后一个MP3帧
        self.mp3_buf.clear();
        let encoded = encoder
            .flush_to_vec::<FlushNoGap>(&mut self.mp3_buf)
            .map_err(|e| AudioError::EncodingError(format!("编码器冲刷失败: {e}")))?;
        output.write_all(&self.mp3_buf[..encoded])?;

        Ok(())
    }

    /// 按流参数配置外部编码引擎
    ///
    /// 引擎对参数的拒绝（如超过2声道）在此转化为单文件编码错误。
    fn configure(&self, format: &AudioFormat) -> AudioResult<Encoder> {
        let channels = u8::try_from(format.channels).map_err(|_| {
            AudioError::EncodingError(format!("编码器拒绝声道数: {}", format.channels))
        })?;

        let mut builder = Builder::new()
            .ok_or_else(|| AudioError::EncodingError("LAME引擎初始化失败".to_string()))?;
        builder.set_num_channels(channels).map_err(|e| {
            AudioError::EncodingError(format!("编码器拒绝声道数{}: {e}", format.channels))
        })?;
        builder.set_sample_rate(format.sample_rate).map_err(|e| {
            AudioError::EncodingError(format!("编码器拒绝采样率{}: {e}", format.sample_rate))
        })?;

        builder
            .build()
            .map_err(|e| AudioError::EncodingError(format!("LAME参数初始化失败: {e}")))
    }
}

impl Default for Mp3Transcoder {
    fn default() -> Self {
        Self::new()
    }
}
