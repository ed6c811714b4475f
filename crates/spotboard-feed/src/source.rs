//! FeedSource trait, feed locations, and the location-dispatching AnyFeed.

use std::fmt;
use std::future::Future;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use reqwest::Url;

use crate::error::FeedError;
use crate::file::FileFeed;
use crate::http::HttpFeed;

/// Trait for fetching the feed text once. Enables mock injection for testing.
pub trait FeedSource: Send + Sync {
    fn fetch(&self) -> impl Future<Output = Result<String, FeedError>> + Send;

    /// Human-readable location for logs.
    fn describe(&self) -> String;
}

impl<T: FeedSource> FeedSource for Arc<T> {
    fn fetch(&self) -> impl Future<Output = Result<String, FeedError>> + Send {
        (**self).fetch()
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}

/// Where the feed lives: `http://` / `https://` URLs are fetched over HTTP,
/// anything else is a local path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedLocation {
    Http(Url),
    File(PathBuf),
}

impl FeedLocation {
    pub fn parse(s: &str) -> Result<Self, FeedError> {
        let trimmed = s.trim();
        let lower = trimmed.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            let url = Url::parse(trimmed).map_err(|e| FeedError::InvalidUrl {
                url: trimmed.to_string(),
                detail: e.to_string(),
            })?;
            return Ok(Self::Http(url));
        }
        Ok(Self::File(PathBuf::from(trimmed)))
    }
}

impl FromStr for FeedLocation {
    type Err = FeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for FeedLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Http(url) => write!(f, "{url}"),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// A feed opened from a [`FeedLocation`].
#[derive(Debug, Clone)]
pub enum AnyFeed {
    File(FileFeed),
    Http(HttpFeed),
}

impl AnyFeed {
    /// Open a feed. `fetch_timeout` only applies to HTTP feeds.
    pub fn open(location: &FeedLocation, fetch_timeout: Option<Duration>) -> Result<Self, FeedError> {
        match location {
            FeedLocation::File(path) => Ok(Self::File(FileFeed::new(path.clone()))),
            FeedLocation::Http(url) => Ok(Self::Http(HttpFeed::new(url.clone(), fetch_timeout)?)),
        }
    }
}

impl FeedSource for AnyFeed {
    async fn fetch(&self) -> Result<String, FeedError> {
        match self {
            Self::File(feed) => feed.fetch().await,
            Self::Http(feed) => feed.fetch().await,
        }
    }

    fn describe(&self) -> String {
        match self {
            Self::File(feed) => feed.describe(),
            Self::Http(feed) => feed.describe(),
        }
    }
}
