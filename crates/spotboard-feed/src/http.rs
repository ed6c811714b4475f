//! HTTP feed: the page's `table.csv` fetched from the web server that serves
//! the map.

use std::time::Duration;

use reqwest::{Client, Url};

use crate::error::FeedError;
use crate::source::FeedSource;

#[derive(Debug, Clone)]
pub struct HttpFeed {
    client: Client,
    url: Url,
}

impl HttpFeed {
    /// Build a feed for `url`. Without a timeout a request may hang until
    /// the server gives up; the poller keeps ticking regardless.
    pub fn new(url: Url, timeout: Option<Duration>) -> Result<Self, FeedError> {
        let mut builder =
            Client::builder().user_agent(concat!("spotboard/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            url,
        })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }
}

impl FeedSource for HttpFeed {
    async fn fetch(&self) -> Result<String, FeedError> {
        let response = self
            .client
            .get(self.url.clone())
            .send()
            .await?
            .error_for_status()?;
        let text = response.text().await?;
        tracing::debug!("fetched {} bytes from {}", text.len(), self.url);
        Ok(text)
    }

    fn describe(&self) -> String {
        self.url.to_string()
    }
}
