use clap::{Parser, ValueEnum};
use github_repo_search::image_cache::DEFAULT_CAPACITY;
use github_repo_search::StarOrder;
use std::num::NonZeroUsize;

#[derive(Parser)]
#[command(name = "github-repo-search")]
#[command(about = "Searches GitHub repositories by keyword with star ordering")]
#[command(version = "0.1.0")]
pub struct Cli {
    /// Keyword to search for
    pub keyword: String,

    /// Popularity ordering for the results
    #[arg(long, value_enum, default_value_t = OrderArg::Default)]
    pub order: OrderArg,

    /// GitHub API base URL
    #[arg(long, env = "GITHUB_API_URL", default_value = "https://api.github.com")]
    pub api_url: String,

    /// Fetch avatar images for the first N results
    #[arg(long, default_value_t = 0)]
    pub avatars: usize,

    /// Bound on the number of decoded avatars kept in memory (at least 1)
    #[arg(long, default_value_t = DEFAULT_CAPACITY)]
    pub cache_size: NonZeroUsize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OrderArg {
    Default,
    Desc,
    Asc,
}

impl From<OrderArg> for StarOrder {
    fn from(arg: OrderArg) -> Self {
        match arg {
            OrderArg::Default => StarOrder::Default,
            OrderArg::Desc => StarOrder::Descending,
            OrderArg::Asc => StarOrder::Ascending,
        }
    }
}
