//! `spotboard write-feed`: station fixes in, tracker feed out.

use anyhow::Context;
use chrono::{DateTime, Duration, Utc};

use spotboard_core::{StationFix, write_feed};

use crate::cli::WriteFeedOpts;
use crate::sink::open_sink;

pub(crate) fn feed_from_json(json: &str, now: DateTime<Utc>, age_out: Duration) -> anyhow::Result<String> {
    let fixes: Vec<StationFix> = serde_json::from_str(json).context("parsing station fixes")?;
    Ok(write_feed(&fixes, now, age_out))
}

/// Entry point for `spotboard write-feed`.
pub fn cmd_write_feed(opts: &WriteFeedOpts) -> anyhow::Result<()> {
    let json = std::fs::read_to_string(&opts.fixes)
        .with_context(|| format!("reading {}", opts.fixes.display()))?;
    let feed = feed_from_json(&json, Utc::now(), Duration::seconds(opts.age_out_secs))
        .with_context(|| format!("writing feed from {}", opts.fixes.display()))?;

    let sink = open_sink(opts.output.as_deref());
    sink.replace(&feed)
        .with_context(|| format!("updating {}", sink.describe()))?;
    Ok(())
}
