use std::fmt;
use std::io;
use std::path::PathBuf;

/// Failure reported for a fetch request.
#[derive(Debug)]
pub enum FetchError {
    /// The file does not exist.
    NotFound { path: PathBuf },
    /// Opening or reading the file failed.
    Io { path: PathBuf, source: io::Error },
    /// The file is larger than the request's staging buffer.
    BufferTooSmall { path: PathBuf, size: u64, capacity: usize },
    /// `max_requests` requests are already in flight.
    QueueFull { max_requests: usize },
    /// The request named a channel the queue was not created with.
    InvalidChannel { channel: usize, channels: usize },
    /// The queue has been shut down.
    ShutDown,
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::NotFound { path } => write!(f, "file not found: {}", path.display()),
            FetchError::Io { path, source } => {
                write!(f, "failed to read {}: {source}", path.display())
            }
            FetchError::BufferTooSmall { path, size, capacity } => write!(
                f,
                "{} is {size} bytes, staging buffer holds {capacity}",
                path.display()
            ),
            FetchError::QueueFull { max_requests } => {
                write!(f, "fetch queue full ({max_requests} requests in flight)")
            }
            FetchError::InvalidChannel { channel, channels } => {
                write!(f, "fetch channel {channel} out of range (queue has {channels})")
            }
            FetchError::ShutDown => f.write_str("fetch queue has been shut down"),
        }
    }
}

impl std::error::Error for FetchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FetchError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}
