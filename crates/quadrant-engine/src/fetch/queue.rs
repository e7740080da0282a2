use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::thread::JoinHandle;

use super::FetchError;

/// Default staging buffer size per request (32 MiB).
///
/// Files larger than the request's buffer fail with
/// [`FetchError::BufferTooSmall`].
pub const DEFAULT_BUFFER_SIZE: usize = 32 * 1024 * 1024;

/// Queue configuration.
#[derive(Debug, Clone)]
pub struct FetchDesc {
    /// Maximum number of requests in flight (submitted but not yet drained).
    pub max_requests: usize,
    /// Number of worker channels. Requests on one channel complete in
    /// submission order; channels run in parallel.
    pub num_channels: usize,
}

impl Default for FetchDesc {
    fn default() -> Self {
        Self {
            max_requests: 16,
            num_channels: 1,
        }
    }
}

/// A request to read one file.
#[derive(Debug, Clone)]
pub struct FetchRequest {
    pub path: PathBuf,
    pub channel: usize,
    pub buffer_size: usize,
}

impl FetchRequest {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            channel: 0,
            buffer_size: DEFAULT_BUFFER_SIZE,
        }
    }

    pub fn channel(mut self, channel: usize) -> Self {
        self.channel = channel;
        self
    }

    pub fn buffer_size(mut self, bytes: usize) -> Self {
        self.buffer_size = bytes;
        self
    }
}

/// Identifies a submitted request in its [`FetchResponse`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct FetchHandle(u32);

/// Outcome of one request, delivered by [`FetchQueue::do_work`].
#[derive(Debug)]
pub struct FetchResponse {
    pub handle: FetchHandle,
    pub path: PathBuf,
    pub result: Result<Vec<u8>, FetchError>,
}

impl FetchResponse {
    /// Returns `true` when the whole file was read.
    #[inline]
    pub fn fetched(&self) -> bool {
        self.result.is_ok()
    }

    #[inline]
    pub fn failed(&self) -> bool {
        self.result.is_err()
    }
}

enum Job {
    Load {
        handle: FetchHandle,
        path: PathBuf,
        buffer_size: usize,
    },
    Shutdown,
}

struct Channel {
    jobs: mpsc::Sender<Job>,
    thread: Option<JoinHandle<()>>,
}

/// Background file loader.
///
/// Each channel owns one worker thread. Workers push finished responses into
/// a shared completion channel which the owner drains with [`do_work`]
/// (non-blocking), typically once per frame.
///
/// [`do_work`]: FetchQueue::do_work
pub struct FetchQueue {
    channels: Vec<Channel>,
    done: mpsc::Receiver<FetchResponse>,
    max_requests: usize,
    in_flight: usize,
    next_handle: u32,
    shut_down: bool,
}

impl FetchQueue {
    /// Spawns the worker threads.
    ///
    /// # Errors
    ///
    /// Returns [`std::io::Error`] if a worker thread fails to spawn.
    pub fn new(desc: FetchDesc) -> io::Result<Self> {
        let num_channels = desc.num_channels.max(1);
        let (done_tx, done_rx) = mpsc::channel::<FetchResponse>();

        let mut channels = Vec::with_capacity(num_channels);
        for index in 0..num_channels {
            let (job_tx, job_rx) = mpsc::channel::<Job>();
            let done_tx = done_tx.clone();
            let thread = std::thread::Builder::new()
                .name(format!("fetch-{index}"))
                .spawn(move || worker_loop(job_rx, done_tx))?;
            channels.push(Channel {
                jobs: job_tx,
                thread: Some(thread),
            });
        }

        log::debug!(
            "fetch queue started ({num_channels} channel(s), {} max requests)",
            desc.max_requests
        );

        Ok(Self {
            channels,
            done: done_rx,
            max_requests: desc.max_requests,
            in_flight: 0,
            next_handle: 0,
            shut_down: false,
        })
    }

    /// Submits a request without blocking.
    pub fn send(&mut self, request: FetchRequest) -> Result<FetchHandle, FetchError> {
        if self.shut_down {
            return Err(FetchError::ShutDown);
        }
        if self.in_flight >= self.max_requests {
            return Err(FetchError::QueueFull {
                max_requests: self.max_requests,
            });
        }
        let Some(channel) = self.channels.get(request.channel) else {
            return Err(FetchError::InvalidChannel {
                channel: request.channel,
                channels: self.channels.len(),
            });
        };

        let handle = FetchHandle(self.next_handle);
        log::debug!("fetch {handle:?}: {}", request.path.display());

        channel
            .jobs
            .send(Job::Load {
                handle,
                path: request.path,
                buffer_size: request.buffer_size,
            })
            .map_err(|_| FetchError::ShutDown)?;

        self.next_handle = self.next_handle.wrapping_add(1);
        self.in_flight += 1;
        Ok(handle)
    }

    /// Drains every response finished since the last call.
    ///
    /// Never blocks; returns an empty vector when nothing has completed.
    pub fn do_work(&mut self) -> Vec<FetchResponse> {
        let finished: Vec<FetchResponse> = self.done.try_iter().collect();
        self.in_flight = self.in_flight.saturating_sub(finished.len());
        finished
    }

    /// Number of submitted requests not yet returned by [`do_work`](Self::do_work).
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Stops the workers and waits for them to exit.
    ///
    /// Requests still queued behind the shutdown marker are dropped. Calling
    /// this more than once is a no-op.
    pub fn shutdown(&mut self) {
        if self.shut_down {
            return;
        }
        self.shut_down = true;

        for channel in &self.channels {
            let _ = channel.jobs.send(Job::Shutdown);
        }
        for channel in &mut self.channels {
            if let Some(thread) = channel.thread.take() {
                if thread.join().is_err() {
                    log::error!("fetch worker panicked");
                }
            }
        }
        log::debug!("fetch queue shut down");
    }
}

impl Drop for FetchQueue {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[allow(clippy::needless_pass_by_value)]
fn worker_loop(jobs: mpsc::Receiver<Job>, done: mpsc::Sender<FetchResponse>) {
    while let Ok(job) = jobs.recv() {
        let Job::Load { handle, path, buffer_size } = job else {
            break;
        };

        let result = read_bounded(&path, buffer_size);
        if let Err(e) = &result {
            log::warn!("fetch {handle:?} failed: {e}");
        }

        if done.send(FetchResponse { handle, path, result }).is_err() {
            break;
        }
    }
}

/// Reads `path` fully, failing if it does not fit in `capacity` bytes.
fn read_bounded(path: &Path, capacity: usize) -> Result<Vec<u8>, FetchError> {
    let io_err = |source: io::Error| match source.kind() {
        io::ErrorKind::NotFound => FetchError::NotFound {
            path: path.to_path_buf(),
        },
        _ => FetchError::Io {
            path: path.to_path_buf(),
            source,
        },
    };

    let file = File::open(path).map_err(io_err)?;
    let too_small = |size: u64| FetchError::BufferTooSmall {
        path: path.to_path_buf(),
        size,
        capacity,
    };

    let len = file.metadata().map_err(io_err)?.len();
    if len > capacity as u64 {
        return Err(too_small(len));
    }

    // Metadata can lie (pipes, procfs); read one byte past the capacity to
    // detect overflow without trusting it.
    let mut data = Vec::with_capacity(len as usize);
    file.take((capacity as u64).saturating_add(1))
        .read_to_end(&mut data)
        .map_err(io_err)?;
    if data.len() > capacity {
        return Err(too_small(data.len() as u64));
    }

    Ok(data)
}
