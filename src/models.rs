use crate::error::Result;
use crate::order::StarOrder;
use crate::types::RepositoryItem;
use url::Url;

pub const API_BASE_URL: &str = "https://api.github.com";
const SEARCH_PATH: &str = "/search/repositories";

/// A single search submission.
///
/// Immutable once built; a newer submission supersedes it rather than
/// mutating it.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchRequest {
    pub keyword: String,
    pub order: StarOrder,
}

impl SearchRequest {
    pub fn new(keyword: impl Into<String>, order: StarOrder) -> Self {
        SearchRequest {
            keyword: keyword.into(),
            order,
        }
    }

    /// Full search URL against the production API host.
    pub fn url(&self) -> Result<Url> {
        self.url_with_base(API_BASE_URL)
    }

    /// Full search URL against `base`, for pointing at a stand-in server.
    pub fn url_with_base(&self, base: &str) -> Result<Url> {
        let mut url = Url::parse(base)?;
        url.set_path(SEARCH_PATH);
        {
            let mut pairs = url.query_pairs_mut();
            pairs.clear();
            pairs.extend_pairs(self.order.query_parameters(&self.keyword));
        }
        Ok(url)
    }
}

/// The outcome of the most recently completed search. Replaced atomically by
/// a newer outcome; destroyed when an error supersedes it or the session is
/// reset.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    pub items: Vec<RepositoryItem>,
    pub request: SearchRequest,
}
