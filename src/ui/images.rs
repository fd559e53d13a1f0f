//! In-memory cache of remote images (cards and avatar)
//!
//! Lives for the session only; nothing is written to disk.

use std::collections::HashMap;

use iced::widget::image::Handle;
use log::debug;

use crate::api::{GatewayError, GatewayResult};

#[derive(Debug, Clone)]
pub enum ImageState {
    Loading,
    Ready(Handle),
    Failed,
}

#[derive(Debug, Default)]
pub struct ImageCache {
    entries: HashMap<String, ImageState>,
    client: reqwest::Client,
}

impl ImageCache {
    pub fn get(&self, url: &str) -> Option<&ImageState> {
        self.entries.get(url)
    }

    /// Mark unseen urls as loading and return them for fetching
    pub fn request<'a>(&mut self, urls: impl IntoIterator<Item = &'a str>) -> Vec<String> {
        let mut fresh = Vec::new();
        for url in urls {
            if url.is_empty() || self.entries.contains_key(url) {
                continue;
            }
            self.entries.insert(url.to_string(), ImageState::Loading);
            fresh.push(url.to_string());
        }
        fresh
    }

    pub fn finish(&mut self, url: String, result: Result<Handle, GatewayError>) {
        let state = match result {
            Ok(handle) => ImageState::Ready(handle),
            Err(err) => {
                debug!("Image {} failed: {}", url, err);
                ImageState::Failed
            }
        };
        self.entries.insert(url, state);
    }

    pub fn client(&self) -> reqwest::Client {
        self.client.clone()
    }
}

/// Download an image and wrap it for the image widget
pub async fn fetch_image(client: reqwest::Client, url: String) -> GatewayResult<Handle> {
    let response = client.get(&url).send().await?.error_for_status()?;
    let bytes = response.bytes().await?;
    Ok(Handle::from_bytes(bytes.to_vec()))
}
