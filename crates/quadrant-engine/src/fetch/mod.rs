//! Asynchronous file fetching.
//!
//! A small background-thread queue: the main thread submits [`FetchRequest`]s
//! and later drains finished [`FetchResponse`]s with [`FetchQueue::do_work`].
//! Completions are only ever observed on the thread that calls `do_work`, so
//! consumers never need to synchronize with the workers.

mod error;
mod path;
mod queue;

pub use error::FetchError;
pub use path::resource_path;
pub use queue::{
    FetchDesc, FetchHandle, FetchQueue, FetchRequest, FetchResponse, DEFAULT_BUFFER_SIZE,
};
