#![allow(dead_code)]

use async_trait::async_trait;
use bytes::Bytes;
use github_repo_search::coordinator::SearchEvents;
use github_repo_search::error::{FetchError, Result};
use github_repo_search::fetcher::NetworkFetcher;
use github_repo_search::order::StarOrder;
use github_repo_search::types::RepositoryItem;
use serde_json::json;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::{Mutex, Notify};
use url::Url;

struct Script {
    result: Result<Bytes>,
    gate: Option<Arc<Notify>>,
}

/// Scripted `NetworkFetcher`: per-URL responses, optional gates that hold a
/// response in flight until released, and call counters.
#[derive(Default)]
pub struct FakeFetcher {
    scripts: Mutex<HashMap<String, Script>>,
    calls: Mutex<HashMap<String, usize>>,
    total_calls: AtomicUsize,
}

impl FakeFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the response returned for `url`.
    pub async fn respond(&self, url: &str, result: Result<Bytes>) {
        self.scripts
            .lock()
            .await
            .insert(url.to_string(), Script { result, gate: None });
    }

    /// Registers a response for `url` that is held in flight until the
    /// returned gate is notified.
    pub async fn respond_gated(&self, url: &str, result: Result<Bytes>) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        self.scripts.lock().await.insert(
            url.to_string(),
            Script {
                result,
                gate: Some(Arc::clone(&gate)),
            },
        );
        gate
    }

    pub async fn calls_for(&self, url: &str) -> usize {
        self.calls.lock().await.get(url).copied().unwrap_or(0)
    }

    pub fn total_calls(&self) -> usize {
        self.total_calls.load(Ordering::SeqCst)
    }

    /// Polls until `url` has been requested at least `count` times.
    pub async fn wait_for_calls(&self, url: &str, count: usize) {
        for _ in 0..200 {
            if self.calls_for(url).await >= count {
                return;
            }
            tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        }
        panic!("timed out waiting for {count} calls to {url}");
    }
}

#[async_trait]
impl NetworkFetcher for FakeFetcher {
    async fn fetch(&self, url: &Url) -> Result<Bytes> {
        self.total_calls.fetch_add(1, Ordering::SeqCst);
        *self
            .calls
            .lock()
            .await
            .entry(url.to_string())
            .or_insert(0) += 1;

        let (result, gate) = {
            let scripts = self.scripts.lock().await;
            match scripts.get(url.as_str()) {
                Some(script) => (script.result.clone(), script.gate.clone()),
                None => return Err(FetchError::ServerError(404)),
            }
        };

        if let Some(gate) = gate {
            gate.notified().await;
        }
        result
    }
}

/// Records every notification the coordinator publishes, in order.
#[derive(Default)]
pub struct RecordingEvents {
    log: std::sync::Mutex<Vec<String>>,
}

impl RecordingEvents {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn log(&self) -> Vec<String> {
        self.log.lock().unwrap().clone()
    }

    fn push(&self, entry: String) {
        self.log.lock().unwrap().push(entry);
    }
}

impl SearchEvents for RecordingEvents {
    fn loading_started(&self) {
        self.push("loading_started".to_string());
    }

    fn loading_stopped(&self) {
        self.push("loading_stopped".to_string());
    }

    fn results_updated(&self, items: &[RepositoryItem]) {
        self.push(format!("results_updated:{}", items.len()));
    }

    fn empty_result(&self, message: &str) {
        self.push(format!("empty_result:{message}"));
    }

    fn error_occurred(&self, message: &str) {
        self.push(format!("error_occurred:{message}"));
    }

    fn order_changed(&self, order: StarOrder) {
        self.push(format!("order_changed:{}", order.label()));
    }

    fn display_reset(&self) {
        self.push("display_reset".to_string());
    }
}

/// JSON for one repository row in a search response.
pub fn repo_json(id: u64, full_name: &str, stars: u32) -> serde_json::Value {
    json!({
        "id": id,
        "full_name": full_name,
        "stargazers_count": stars,
        "language": "Rust",
        "owner": { "avatar_url": format!("https://avatars.example.com/{id}.png") }
    })
}

/// Body of a search response containing `items`.
pub fn search_body(items: &[serde_json::Value]) -> Bytes {
    Bytes::from(json!({ "total_count": items.len(), "items": items }).to_string())
}

/// A 1x1 PNG, decodable by the image cache.
pub fn png_bytes() -> Bytes {
    let pixel = image::RgbaImage::from_pixel(1, 1, image::Rgba([10, 20, 30, 255]));
    let mut buffer = std::io::Cursor::new(Vec::new());
    image::DynamicImage::ImageRgba8(pixel)
        .write_to(&mut buffer, image::ImageFormat::Png)
        .expect("encoding a PNG in memory cannot fail");
    Bytes::from(buffer.into_inner())
}
