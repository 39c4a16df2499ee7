//! WAV解码器集成测试
//!
//! 用真实文件验证头部解析、样本读取和字节序归一化。


use wav2mp3::{AudioError, WavDecoder};
use wav_fixtures::{ensure_fixtures_generated, fixture_path};

#[test]
fn test_open_valid_mono_file() {
    ensure_fixtures_generated();

    let mut decoder = WavDecoder::open(fixture_path("decode/valid_mono.wav")).unwrap();
    let format = decoder.format().clone();
    assert_eq!(format.channels, 1);
    assert_eq!(format.sample_rate, 8000);
    assert_eq!(format.bits_per_sample, 16);
    assert_eq!(format.total_samples, 2000);
    assert!(!format.big_endian);

    // 完整读取必须恰好产出声明的样本数
    let mut out = vec![0i16; 512];
    let mut total = 0u64;
    loop {
        let read = decoder.read_samples(&mut out).unwrap();
        if read == 0 {
            break;
        }
        total += read as u64;
    }
    assert_eq!(total, format.total_samples);
}

#[test]
fn test_open_valid_stereo_file() {
    ensure_fixtures_generated();

    let decoder = WavDecoder::open(fixture_path("decode/valid_stereo.wav")).unwrap();
    let format = decoder.format();
    assert_eq!(format.channels, 2);
    assert_eq!(format.sample_rate, 44100);
    // 2000个交错样本 = 每声道1000帧
    assert_eq!(format.total_samples, 1000);
}

#[test]
fn test_endian_twins_decode_identically() {
    ensure_fixtures_generated();

    // 逻辑样本值相同的RIFF/RIFX双胞胎必须解码出相同结果
    let mut le = WavDecoder::open(fixture_path("decode/endian_le.wav")).unwrap();
    let mut be = WavDecoder::open(fixture_path("decode/endian_be.wav")).unwrap();

    assert!(!le.format().big_endian);
    assert!(be.format().big_endian);
    assert_eq!(le.format().total_samples, be.format().total_samples);

    let mut out_le = vec![0i16; 16];
    let mut out_be = vec![0i16; 16];
    let read_le = le.read_samples(&mut out_le).unwrap();
    let read_be = be.read_samples(&mut out_be).unwrap();

    assert_eq!(read_le, read_be);
    assert_eq!(out_le[..read_le * 2], out_be[..read_be * 2]);
    assert_eq!(
        &out_le[..read_le * 2],
        &[100, -100, 0x1234, -0x1234, i16::MAX, i16::MIN]
    );
}

#[test]
fn test_truncated_header_file_rejected() {
    ensure_fixtures_generated();

    let result = WavDecoder::open(fixture_path("decode/truncated_header.wav"));
    assert!(
        matches!(result, Err(AudioError::FormatError(_))),
        "2字节文件应该返回FormatError / 2-byte file should return FormatError"
    );
}

#[test]
fn test_wrong_tag_file_rejected() {
    ensure_fixtures_generated();

    let result = WavDecoder::open(fixture_path("decode/wrong_tag.wav"));
    assert!(
        matches!(result, Err(AudioError::FormatError(_))),
        "容器标签损坏应该返回FormatError / corrupt container tag should return FormatError"
    );
}

#[test]
fn test_open_nonexistent_file() {
    let result = WavDecoder::open("/nonexistent/missing.wav");
    assert!(matches!(result, Err(AudioError::IoError(_))));
}
