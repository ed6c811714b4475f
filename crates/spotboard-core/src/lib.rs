//! spotboard-core: spot feed parsing, age classification and table rendering,
//! plus the writer that produces the feed from station fixes.
//! Pure library: text in, markup out. All IO lives in spotboard-feed and the
//! runtime binary.

pub mod classify;
pub mod error;
pub mod parse;
pub mod render;
pub mod types;
pub mod writer;

pub use classify::{AgeBand, ClassifiedRow, ClassifiedTable, classify, classify_table};
pub use error::ClassifyError;
pub use parse::{parse_feed, parse_minutes};
pub use render::{PageOptions, StaleNotice, escape_html, render_document, render_table};
pub use types::{FEED_COLUMNS, FeedHeader, SpotRow, SpotTable};
pub use writer::{StationFix, default_age_out, prune_aged_out, write_feed};
