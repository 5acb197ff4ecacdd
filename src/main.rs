mod cli;

use clap::Parser;
use cli::Cli;
use colored::*;
use futures::future::join_all;
use github_repo_search::error::Result;
use github_repo_search::{
    HttpFetcher, ImageCache, NetworkFetcher, Phase, RepositoryItem, SearchCoordinator,
    SearchEvents, StarOrder,
};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Renders coordinator notifications on the terminal.
struct ConsoleEvents;

impl SearchEvents for ConsoleEvents {
    fn loading_started(&self) {
        println!("{}", "Searching...".dimmed());
    }

    fn empty_result(&self, message: &str) {
        println!("{}", message.yellow());
    }

    fn error_occurred(&self, message: &str) {
        eprintln!("{} {}", "✖".red(), message);
    }

    fn order_changed(&self, order: StarOrder) {
        println!("{}", order.label().bold());
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let order: StarOrder = cli.order.into();

    let fetcher: Arc<dyn NetworkFetcher> = Arc::new(HttpFetcher::new()?);
    let coordinator = SearchCoordinator::with_base_url(
        Arc::clone(&fetcher),
        Some(Arc::new(ConsoleEvents)),
        cli.api_url.clone(),
    );

    println!("{} {}", "GitHub Repository Search".bold().green(), order.label());
    coordinator.submit(&cli.keyword, order).await;

    let items = coordinator.items().await;
    for item in &items {
        print_row(item);
    }

    if cli.avatars > 0 && !items.is_empty() {
        let cache = ImageCache::with_capacity(Arc::clone(&fetcher), cli.cache_size);

        let fetches = items
            .iter()
            .take(cli.avatars)
            .filter_map(|item| item.avatar_url())
            .map(|avatar| {
                let cache = cache.clone();
                let avatar = avatar.to_string();
                async move {
                    let outcome = cache.fetch(&avatar).await;
                    (avatar, outcome)
                }
            });

        for (avatar, outcome) in join_all(fetches).await {
            match outcome {
                Ok(image) => {
                    println!(
                        "{} {} ({}x{})",
                        "✓".green(),
                        avatar,
                        image.width(),
                        image.height()
                    );
                }
                Err(err) => eprintln!("{} {}: {}", "✖".red(), avatar, err),
            }
        }
    }

    if coordinator.phase().await == Phase::Failed {
        std::process::exit(1);
    }

    Ok(())
}

fn print_row(item: &RepositoryItem) {
    let language = item.language.as_deref().unwrap_or("-");
    println!(
        "{}  {}  {}",
        item.full_name.bold(),
        format!("☆ {}", item.stargazers_count).yellow(),
        language.dimmed()
    );
}
