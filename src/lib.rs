//! Asynchronous retrieval pipeline for searching the GitHub repository
//! catalog: interchangeable star orderings, a search coordinator that
//! supersedes in-flight searches, and a deduplicating, LRU-bounded cache
//! for decoded avatar images.

pub mod coordinator;
pub mod error;
pub mod fetcher;
pub mod image_cache;
pub mod models;
pub mod order;
pub mod types;

pub use coordinator::{Phase, SearchCoordinator, SearchEvents, NOT_FOUND_MESSAGE};
pub use error::{FetchError, Result};
pub use fetcher::{HttpFetcher, NetworkFetcher};
pub use image_cache::ImageCache;
pub use models::{SearchRequest, SearchResult, API_BASE_URL};
pub use order::{AccentColor, StarOrder};
pub use types::{RepositoryItem, SearchResponse};
