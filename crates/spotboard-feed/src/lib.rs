//! spotboard-feed: spot feed IO boundary.
//! Fetches feed text from a local file or an HTTP URL and numbers poll
//! ticks. No classification here, only IO.

pub mod error;
pub mod file;
pub mod http;
pub mod sequence;
pub mod source;

pub use error::FeedError;
pub use file::FileFeed;
pub use http::HttpFeed;
pub use sequence::{Tick, TickSequencer};
pub use source::{AnyFeed, FeedLocation, FeedSource};
