//! CLI definition using clap derive.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand, ValueEnum};
use spotboard_feed::FeedLocation;

/// The tracker writes its feed next to the map page under this name.
pub const DEFAULT_FEED: &str = "table.csv";
pub const DEFAULT_INTERVAL_MS: u64 = 30_000;

#[derive(Parser)]
#[command(name = "spotboard", about = "Live age-coded spot table for QSO party trackers")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Poll the spot feed and keep the table display current
    Watch(WatchOpts),
    /// Fetch and render the spot feed once
    Render(RenderOpts),
    /// Convert a county boundary KML file into the map's GeoJSON overlay
    County(CountyOpts),
    /// Report the county and grid square for a position
    Locate(LocateOpts),
    /// Write the spot feed from a JSON list of station fixes
    WriteFeed(WriteFeedOpts),
}

#[derive(clap::Args, Clone)]
pub struct FeedArgs {
    /// Feed location: a file path or an http(s) URL
    #[arg(long, env = "SPOTBOARD_FEED", default_value = DEFAULT_FEED)]
    pub feed: FeedLocation,

    /// Per-request timeout for HTTP feeds, in milliseconds (none by default)
    #[arg(long, env = "SPOTBOARD_FETCH_TIMEOUT_MS")]
    pub fetch_timeout_ms: Option<u64>,
}

impl FeedArgs {
    pub fn fetch_timeout(&self) -> Option<Duration> {
        self.fetch_timeout_ms.map(Duration::from_millis)
    }
}

#[derive(clap::Args, Clone)]
pub struct OutputArgs {
    /// File whose content is replaced with the rendered table (stdout when omitted)
    #[arg(long, short = 'o', env = "SPOTBOARD_OUTPUT")]
    pub output: Option<PathBuf>,

    /// Write a standalone HTML page instead of a bare table fragment
    #[arg(long)]
    pub page: bool,
}

#[derive(clap::Args, Clone)]
pub struct WatchOpts {
    #[command(flatten)]
    pub feed: FeedArgs,

    #[command(flatten)]
    pub output: OutputArgs,

    /// Poll interval in milliseconds
    #[arg(
        long,
        env = "SPOTBOARD_INTERVAL_MS",
        default_value_t = DEFAULT_INTERVAL_MS,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub interval_ms: u64,

    /// Leave the last good table as-is when a refresh fails
    #[arg(long)]
    pub no_stale_notice: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum RenderFormat {
    Html,
    Json,
}

#[derive(clap::Args, Clone)]
pub struct RenderOpts {
    #[command(flatten)]
    pub feed: FeedArgs,

    #[command(flatten)]
    pub output: OutputArgs,

    /// Output format
    #[arg(long, value_enum, default_value_t = RenderFormat::Html)]
    pub format: RenderFormat,
}

#[derive(clap::Args, Clone)]
pub struct CountyOpts {
    /// County boundary KML file
    #[arg(long)]
    pub kml: PathBuf,

    /// GeoJSON file to write
    #[arg(long, short = 'o', default_value = "county.geojson")]
    pub output: PathBuf,
}

#[derive(clap::Args, Clone)]
pub struct LocateOpts {
    /// County boundary KML file
    #[arg(long)]
    pub kml: PathBuf,

    /// Longitude in decimal degrees
    #[arg(long, allow_negative_numbers = true)]
    pub lon: f64,

    /// Latitude in decimal degrees
    #[arg(long, allow_negative_numbers = true)]
    pub lat: f64,
}

#[derive(clap::Args, Clone)]
pub struct WriteFeedOpts {
    /// JSON array of station fixes
    #[arg(long)]
    pub fixes: PathBuf,

    /// Feed file to replace (stdout when omitted)
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,

    /// Drop stations not heard for this many seconds
    #[arg(
        long,
        env = "SPOTBOARD_AGE_OUT_SECS",
        default_value_t = spotboard_core::writer::DEFAULT_AGE_OUT_SECS,
        value_parser = clap::value_parser!(i64).range(1..)
    )]
    pub age_out_secs: i64,
}
