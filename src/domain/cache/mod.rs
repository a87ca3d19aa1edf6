//! Cache domain - response cache abstraction and key generation

mod key;
mod repository;

pub use key::{normalize, Fingerprint};
pub use repository::{CacheStats, ResponseCache};
