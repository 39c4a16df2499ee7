//! WAV/RIFF容器解码器
//!
//! 手工解析RIFF(小端)/RIFX(大端)分块结构，仅支持16位线性PCM。
//! 三个强制块严格按 容器描述符 → 格式描述符 → 数据描述符 顺序出现，
//! 解析完成后提供带游标的顺序样本读取，自动完成字节序归一化。

use crate::audio::PcmSource;
use crate::error::{AudioError, AudioResult};
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

/// 容器描述符固定长度：4字节标签 + 4字节长度 + 4字节格式标签
const CONTAINER_DESCRIPTOR_LEN: usize = 12;

/// 格式描述符固定长度：4字节标签 + 4字节长度 + 16字节PCM参数
const FORMAT_DESCRIPTOR_LEN: usize = 24;

/// 数据描述符固定长度：4字节标签 + 4字节长度
const DATA_DESCRIPTOR_LEN: usize = 8;

/// 音频流描述信息
///
/// 由三个头部块解析得出，解析完成后不可变，生命周期限于单个文件。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioFormat {
    /// 声道数
    pub channels: u16,

    /// 采样率 (Hz)
    pub sample_rate: u32,

    /// 位深度（本系统固定为16）
    pub bits_per_sample: u16,

    /// 总样本数（每声道）
    pub total_samples: u64,

    /// 样本数据是否为大端存储（RIFX容器）
    pub big_endian: bool,
}

impl AudioFormat {
    /// 验证音频格式参数
    pub fn validate(&self) -> AudioResult<()> {
        if self.channels == 0 {
            return Err(AudioError::FormatError("声道数不能为0".to_string()));
        }

        if self.sample_rate == 0 {
            return Err(AudioError::FormatError("采样率不能为0".to_string()));
        }

        Ok(())
    }
}

/// WAV文件解码器
///
/// 打开即解析全部头部块；`read_samples`按请求量读取交错样本，
/// 超出剩余量时静默截断，流耗尽后返回0且无错误。
pub struct WavDecoder<R: Read> {
    /// 输入字节流（头部已消费，定位于样本数据起点）
    reader: R,

    /// 音频流描述信息
    format: AudioFormat,

    /// 已读取的样本数（每声道），单调递增
    samples_read: u64,

    /// 原始字节暂存区，跨read_samples调用复用
    scratch: Vec<u8>,
}

impl WavDecoder<BufReader<File>> {
    /// 从文件路径打开WAV文件并解析头部
    pub fn open<P: AsRef<Path>>(path: P) -> AudioResult<Self> {
        let file = File::open(path.as_ref())?;
        Self::new(BufReader::new(file))
    }
}

impl<R: Read> WavDecoder<R> {
    /// 从任意字节流解析WAV头部
    ///
    /// 依次解析容器描述符、格式描述符、数据描述符，任一块不符合
    /// 预期即返回错误，不做任何容错跳块。
    ///
    /// # 错误
    ///
    /// * `AudioError::FormatError` - 头部截断或格式不受支持
    /// * `AudioError::IoError` - 底层读取失败
    pub fn new(mut reader: R) -> AudioResult<Self> {
        let big_endian = parse_container_descriptor(&mut reader)?;
        let (channels, sample_rate, bits_per_sample) =
            parse_format_descriptor(&mut reader, big_endian)?;
        let total_samples = parse_data_descriptor(&mut reader, big_endian, channels)?;

        let format = AudioFormat {
            channels,
            sample_rate,
            bits_per_sample,
            total_samples,
            big_endian,
        };
        format.validate()?;

        Ok(Self {
            reader,
            format,
            samples_read: 0,
            scratch: Vec::new(),
        })
    }

    /// 获取音频流描述信息
    pub fn format(&self) -> &AudioFormat {
        &self.format
    }

    /// 获取已消费的样本数（每声道）
    pub fn samples_read(&self) -> u64 {
        self.samples_read
    }

    /// 顺序读取交错样本数据
    ///
    /// `dest`按交错格式填充（每帧 `channels` 个i16值），请求帧数为
    /// `dest.len() / channels`，超出剩余量时截断到剩余量。返回实际
    /// 读取的帧数；流耗尽后返回0。若声明的总样本数尚未读完而底层
    /// 流已经EOF，判定为数据流损坏。
    ///
    /// 当容器字节序与本机字节序不一致时，样本在原地完成字节交换。
    pub fn read_samples(&mut self, dest: &mut [i16]) -> AudioResult<usize> {
        let channels = self.format.channels as usize;
        if self.samples_read == self.format.total_samples {
            // 音频流已完全消费
            return Ok(0);
        }

        let remaining = self.format.total_samples - self.samples_read;
        let frames = ((dest.len() / channels) as u64).min(remaining) as usize;
        if frames == 0 {
            return Ok(0);
        }

        let sample_size = channels * 2;
        self.scratch.resize(frames * sample_size, 0);
        let filled = read_until_eof(&mut self.reader, &mut self.scratch)?;

        // 只统计完整帧，尾部残缺字节在下一次调用时表现为EOF
        let read = filled / sample_size;
        self.samples_read += read as u64;

        if read == 0 && self.samples_read != self.format.total_samples {
            // EOF早于声明的总样本数，输入文件损坏
            return Err(AudioError::DecodingError(
                "WAV数据流意外结束".to_string(),
            ));
        }

        let native_big_endian = cfg!(target_endian = "big");
        for (value, bytes) in dest[..read * channels]
            .iter_mut()
            .zip(self.scratch.chunks_exact(2))
        {
            *value = if self.format.big_endian == native_big_endian {
                i16::from_ne_bytes([bytes[0], bytes[1]])
            } else {
                i16::from_ne_bytes([bytes[0], bytes[1]]).swap_bytes()
            };
        }

        Ok(read)
    }
}

impl<R: Read> PcmSource for WavDecoder<R> {
    fn format(&self) -> &AudioFormat {
        WavDecoder::format(self)
    }

    fn read_samples(&mut self, dest: &mut [i16]) -> AudioResult<usize> {
        WavDecoder::read_samples(self, dest)
    }
}

// ==================== 头部块解析 ====================

/// 解析容器描述符，返回端序标志
///
/// 识别"RIFF"（小端）与"RIFX"（大端）两种标签，格式标签必须为"WAVE"。
fn parse_container_descriptor<R: Read>(reader: &mut R) -> AudioResult<bool> {
    let chunk = read_descriptor::<CONTAINER_DESCRIPTOR_LEN, R>(reader)?;

    let tag = &chunk[0..4];
    let valid = (tag == b"RIFF" || tag == b"RIFX") && &chunk[8..12] == b"WAVE";
    if !valid {
        return Err(AudioError::FormatError(
            "不支持的RIFF容器类型".to_string(),
        ));
    }

    // RIFX标签表明样本数据为大端存储
    Ok(chunk[3] == b'X')
}

/// 解析格式描述符，返回(声道数, 采样率, 位深度)
///
/// 仅接受块长16、编码标签1（线性PCM）、位深16的配置。
fn parse_format_descriptor<R: Read>(
    reader: &mut R,
    big_endian: bool,
) -> AudioResult<(u16, u32, u16)> {
    let chunk = read_descriptor::<FORMAT_DESCRIPTOR_LEN, R>(reader)?;

    let valid = &chunk[0..4] == b"fmt "
        && read_u32(&chunk, 4, big_endian) == 16
        && read_u16(&chunk, 8, big_endian) == 1
        && read_u16(&chunk, 22, big_endian) == 16;
    if !valid {
        return Err(AudioError::FormatError(
            "仅支持16位线性PCM格式".to_string(),
        ));
    }

    let channels = read_u16(&chunk, 10, big_endian);
    let sample_rate = read_u32(&chunk, 12, big_endian);
    let bits_per_sample = read_u16(&chunk, 22, big_endian);
    Ok((channels, sample_rate, bits_per_sample))
}

/// 解析数据描述符，返回总样本数（每声道）
fn parse_data_descriptor<R: Read>(
    reader: &mut R,
    big_endian: bool,
    channels: u16,
) -> AudioResult<u64> {
    let chunk = read_descriptor::<DATA_DESCRIPTOR_LEN, R>(reader)?;

    if &chunk[0..4] != b"data" {
        return Err(AudioError::FormatError(
            "无效的RIFF数据块".to_string(),
        ));
    }

    if channels == 0 {
        return Err(AudioError::FormatError("声道数不能为0".to_string()));
    }

    // 声明字节长度 ÷ (声道数 × 每样本2字节) = 每声道样本数
    let byte_len = read_u32(&chunk, 4, big_endian) as u64;
    Ok(byte_len / (channels as u64 * 2))
}

/// 读取固定长度的描述符块
///
/// 头部截断判定为格式错误而非I/O错误，其余I/O失败原样传播。
fn read_descriptor<const N: usize, R: Read>(reader: &mut R) -> AudioResult<[u8; N]> {
    let mut chunk = [0u8; N];
    reader.read_exact(&mut chunk).map_err(|e| {
        if e.kind() == io::ErrorKind::UnexpectedEof {
            AudioError::FormatError("RIFF头部不完整".to_string())
        } else {
            AudioError::IoError(e)
        }
    })?;
    Ok(chunk)
}

/// 按声明端序读取u16字段
fn read_u16(buf: &[u8], offset: usize, big_endian: bool) -> u16 {
    let bytes = [buf[offset], buf[offset + 1]];
    if big_endian {
        u16::from_be_bytes(bytes)
    } else {
        u16::from_le_bytes(bytes)
    }
}

/// 按声明端序读取u32字段
fn read_u32(buf: &[u8], offset: usize, big_endian: bool) -> u32 {
    let bytes = [
        buf[offset],
        buf[offset + 1],
        buf[offset + 2],
        buf[offset + 3],
    ];
    if big_endian {
        u32::from_be_bytes(bytes)
    } else {
        u32::from_le_bytes(bytes)
    }
}

/// 反复读取直到缓冲区填满或底层流EOF，返回实际填充字节数
fn read_until_eof<R: Read>(reader: &mut R, buf: &mut [u8]) -> AudioResult<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(AudioError::IoError(e)),
        }
    }
    Ok(filled)
}
