use serde::Deserialize;

// GitHub search API response structures

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct SearchResponse {
    pub items: Vec<RepositoryItem>,
}

/// One repository row from the search response. Read-only once decoded.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct RepositoryItem {
    pub id: u64,
    pub full_name: String,
    pub stargazers_count: u32,
    pub language: Option<String>,
    pub owner: RepoOwner,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct RepoOwner {
    pub avatar_url: Option<String>,
}

impl RepositoryItem {
    pub fn avatar_url(&self) -> Option<&str> {
        self.owner.avatar_url.as_deref()
    }
}
