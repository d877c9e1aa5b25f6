use async_trait::async_trait;
use chrono::Utc;
use reqwest::Client;
use std::fmt::Debug;

use crate::{error::FetchError, model::PlaceReading};

/// Abstraction over wherever the current reading comes from.
///
/// The production implementation is [`HttpSource`]; tests substitute fakes.
#[async_trait]
pub trait ReadingSource: Send + Sync + Debug {
    async fn fetch(&self) -> Result<PlaceReading, FetchError>;
}

/// Fetches the reading from a static JSON endpoint.
#[derive(Debug, Clone)]
pub struct HttpSource {
    url: String,
    http: Client,
}

impl HttpSource {
    pub fn new(url: String) -> Self {
        Self {
            url,
            http: Client::new(),
        }
    }

    /// The endpoint URL with a cache-busting timestamp appended, forcing a
    /// bypass of any intermediate HTTP cache.
    fn busted_url(&self) -> String {
        format!("{}?{}", self.url, Utc::now().timestamp_millis())
    }
}

#[async_trait]
impl ReadingSource for HttpSource {
    async fn fetch(&self) -> Result<PlaceReading, FetchError> {
        let res = self.http.get(self.busted_url()).send().await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            return Err(FetchError::Status {
                status,
                body: truncate_body(&body),
            });
        }

        let reading: PlaceReading = serde_json::from_str(&body)?;
        Ok(reading)
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        // Back off to a char boundary so multibyte bodies cannot panic.
        let mut end = MAX;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &body[..end])
    } else {
        body.to_string()
    }
}
