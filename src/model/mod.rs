//! Core data model: the windowed file buffer
//!
//! `buffer` owns the window and the file, `search` and `splice` add pattern
//! search and insert/remove on top of the buffer's access primitive.

pub mod buffer;
pub mod error;
pub mod search;
pub mod splice;
pub mod store;
pub mod window;

pub use buffer::{WindowedBuffer, DEFAULT_WINDOW_CAPACITY};
pub use error::{BufferError, Result};
pub use search::{SearchDirection, SearchState};
pub use store::ByteStore;
pub use window::WindowRange;
