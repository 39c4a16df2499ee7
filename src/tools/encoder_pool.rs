//! 编码工作线程池
//!
//! 固定数量的OS工作线程共享一个枚举游标，逐个认领文件路径，
//! 在锁外完成解码和编码。单文件失败不中断批量处理；枚举源的
//! 致命错误只由发现它的线程上报一次，其余线程静默退出。

use crate::audio::WavDecoder;
use crate::encoder::Mp3Transcoder;
use crate::error::{AudioError, AudioResult};
use crate::tools::constants::worker_pool::{MIN_WORKERS, WORKER_NAME_PREFIX};
use crate::tools::scanner::PathSource;
use crate::tools::utils;
use std::path::{Path, PathBuf};
use std::process;
use std::sync::Mutex;
use std::thread;

/// 枚举游标：所有工作线程共享的队列状态
///
/// 仅在互斥锁保护下访问。`finished`是终止标志：序列耗尽或
/// 发生致命错误后置位，此后任何线程都不再触碰枚举源。
struct QueueState<S> {
    /// 惰性路径序列的当前位置
    source: S,

    /// 终止标志（耗尽或出错）
    finished: bool,
}

/// 单个工作线程的最终结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WorkerOutcome {
    /// 全部认领的文件处理成功
    Clean,
    /// 至少一个文件处理失败（已逐个上报，批量继续）
    FileFailures,
    /// 本线程发现了致命枚举错误（已上报）
    Fatal,
}

/// 池运行的聚合状态
///
/// 两类失败同时出现时，致命枚举错误优先。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    /// 所有文件处理成功（包括零文件的空批次）
    Success,
    /// 至少一个文件解码或编码失败
    FileFailures,
    /// 文件枚举源发生致命错误
    EnumerationFailed,
}

/// 编码工作线程池
///
/// 持有枚举游标锁和控制台输出锁；两把锁保护不相交的临界区，
/// 永不同时持有。
pub struct EncoderPool<S: PathSource> {
    /// 枚举游标（含终止标志）
    queue: Mutex<QueueState<S>>,

    /// 控制台输出锁，保证状态行逐行原子输出
    stdio: Mutex<()>,

    /// 工作线程数
    workers: usize,
}

impl<S: PathSource> EncoderPool<S> {
    /// 创建线程池
    ///
    /// # 错误
    ///
    /// * `AudioError::InvalidInput` - 工作线程数小于1
    pub fn new(source: S, workers: usize) -> AudioResult<Self> {
        if workers < MIN_WORKERS {
            return Err(AudioError::InvalidInput(format!(
                "工作线程数必须≥{MIN_WORKERS}，当前为{workers}"
            )));
        }

        Ok(Self {
            queue: Mutex::new(QueueState {
                source,
                finished: false,
            }),
            stdio: Mutex::new(()),
            workers,
        })
    }

    /// 启动全部工作线程并阻塞到批量处理结束
    ///
    /// 消费self，因此每个池实例只能运行一次。
    pub fn run(self) -> RunStatus {
        let pool = &self;

        let outcomes: Vec<WorkerOutcome> = thread::scope(|scope| {
            let handles: Vec<_> = (0..pool.workers)
                .map(|id| {
                    thread::Builder::new()
                        .name(format!("{WORKER_NAME_PREFIX}-{id}"))
                        .spawn_scoped(scope, move || pool.process_queue())
                        .unwrap_or_else(|e| fatal_spawn_failure(&e))
                })
                .collect();

            handles
                .into_iter()
                .map(|handle| {
                    handle
                        .join()
                        .expect("工作线程异常终止 / worker thread panicked")
                })
                .collect()
        });

        let mut status = RunStatus::Success;
        for outcome in outcomes {
            match outcome {
                // 致命枚举错误优先于单文件失败
                WorkerOutcome::Fatal => return RunStatus::EnumerationFailed,
                WorkerOutcome::FileFailures => status = RunStatus::FileFailures,
                WorkerOutcome::Clean => {}
            }
        }
        status
    }

    /// 在锁保护下认领下一个路径
    ///
    /// 不变式：每个路径恰好交给一个线程。发生致命枚举错误时，
    /// 终止标志在锁释放之前置位，保证后续线程只会看到"已耗尽"，
    /// 错误本身由当前线程独家上报。
    fn claim_next(&self) -> AudioResult<Option<PathBuf>> {
        let mut queue = self
            .queue
            .lock()
            .map_err(|_| AudioError::ResourceError("枚举游标锁已中毒".to_string()))?;

        if queue.finished {
            return Ok(None);
        }

        match queue.source.next_match() {
            Ok(Some(path)) => Ok(Some(path)),
            Ok(None) => {
                queue.finished = true;
                Ok(None)
            }
            Err(e) => {
                queue.finished = true;
                Err(e)
            }
        }
    }

    /// 工作线程主循环
    ///
    /// 编解码缓冲区由转码器持有，本线程处理的所有文件复用。
    /// 认领在锁内、处理在锁外，枚举串行化不会阻塞编码。
    fn process_queue(&self) -> WorkerOutcome {
        let mut transcoder = Mp3Transcoder::new();
        let mut had_failures = false;

        loop {
            match self.claim_next() {
                Ok(Some(path)) => match self.process_file(&path, &mut transcoder) {
                    Ok(()) => {
                        let _guard = self.stdio.lock().ok();
                        println!("{}: OK", path.display());
                    }
                    Err(e) => {
                        // 单文件失败：上报后继续处理下一个文件
                        had_failures = true;
                        let _guard = self.stdio.lock().ok();
                        eprintln!("{}: {e}", path.display());
                    }
                },
                Ok(None) => break,
                Err(e) => {
                    // 发现致命枚举错误的线程独家上报，然后立即退出
                    let _guard = self.stdio.lock().ok();
                    eprintln!("Error: {e}");
                    return WorkerOutcome::Fatal;
                }
            }
        }

        if had_failures {
            WorkerOutcome::FileFailures
        } else {
            WorkerOutcome::Clean
        }
    }

    /// 处理单个文件：解码 → 转码 → 写出
    fn process_file(&self, path: &Path, transcoder: &mut Mp3Transcoder) -> AudioResult<()> {
        let mut input = WavDecoder::open(path)?;
        let output_path = utils::replace_extension_mp3(path);
        transcoder.transcode(&mut input, &output_path)
    }
}

/// 工作线程创建失败不可恢复，进程立即终止
fn fatal_spawn_failure(err: &std::io::Error) -> ! {
    eprintln!("Fatal error: 无法创建工作线程 / failed to spawn worker thread: {err}");
    process::abort();
}
