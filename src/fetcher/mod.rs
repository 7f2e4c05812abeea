pub mod http_fetcher;

use async_trait::async_trait;

use crate::app::Result;
use crate::domain::ContentItem;

pub use http_fetcher::{HttpFetcher, DEFAULT_ENDPOINT};

/// Source of the most recently published content item.
///
/// Implementations make a single attempt per call; retrying is the
/// caller's business.
#[async_trait]
pub trait Fetcher {
    async fn fetch_latest(&self) -> Result<ContentItem>;
}
