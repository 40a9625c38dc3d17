// Cache module for on-disk API response caching.
// Derives filesystem keys from request URLs and stores one JSON blob per URL.

pub mod key;
pub mod store;

pub use key::{CacheKey, ENTRY_FILE};
pub use store::CacheStore;
