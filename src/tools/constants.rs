//! 常量和默认配置集中管理
//!
//! 将所有重要常量集中定义，避免"默认值漂移"和重复定义

/// 编码缓冲区常量
pub mod encode_buffers {
    /// MP3输出缓冲区容量（字节）
    ///
    /// 每次encode调用产出的编码数据上限，128KiB在吞吐量和
    /// 内存占用之间取得平衡
    pub const OUTPUT_BUFFER_CAPACITY: usize = 128 * 1024;

    /// LAME单帧最坏情况的额外开销（字节）
    ///
    /// LAME文档给出的输出体积上界为 1.25 × 样本数 + 7200
    pub const MP3_WORST_CASE_OVERHEAD: usize = 7200;

    /// 单次encode调用的最大帧数（每声道样本数）
    ///
    /// 由输出缓冲区容量反推：保证最坏情况下编码结果
    /// 仍能装入OUTPUT_BUFFER_CAPACITY
    pub const ENCODE_BLOCK_FRAMES: usize =
        (OUTPUT_BUFFER_CAPACITY - MP3_WORST_CASE_OVERHEAD) * 4 / 5;
}

/// 工作线程池常量
pub mod worker_pool {
    /// 最小工作线程数
    ///
    /// 任何并行处理至少需要1个工作线程
    pub const MIN_WORKERS: usize = 1;

    /// 工作线程名称前缀（用于调试和性能分析）
    pub const WORKER_NAME_PREFIX: &str = "mp3-worker";
}
