//! Request history storage

mod in_memory;

pub use in_memory::{InMemoryRequestLog, DEFAULT_MAX_ENTRIES};
