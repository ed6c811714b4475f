//! Station fixes → feed text, in the layout the tracker publishes.
//!
//! ```text
//! 10-19-2026,1430,GMT,SPOT
//! QP CALL,C&IC,AGE,AGE
//! K4A-9,FAU,12,3
//! ,,,
//! ```
//!
//! Newest fix first; the all-empty trailer has no line-feed after it.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Stations not heard for this long drop out of the feed.
pub const DEFAULT_AGE_OUT_SECS: i64 = 14_400;

pub fn default_age_out() -> Duration {
    Duration::seconds(DEFAULT_AGE_OUT_SECS)
}

pub const COLUMN_LINE: &str = "QP CALL,C&IC,AGE,AGE";
pub const TRAILER: &str = ",,,";

/// Latest known position report for one station.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StationFix {
    pub call: String,
    /// County or independent city abbreviation the station is in.
    pub county: String,
    /// Whether the station is operating in the QSO party. Others are tracked
    /// but not listed.
    pub qso_party: bool,
    /// When the station entered `county`.
    pub entered_county: DateTime<Utc>,
    /// When the station was last heard.
    pub last_heard: DateTime<Utc>,
}

impl StationFix {
    fn is_aged_out(&self, now: DateTime<Utc>, age_out: Duration) -> bool {
        now - self.last_heard > age_out
    }
}

/// Drop stations not heard within `age_out`.
pub fn prune_aged_out(fixes: &mut Vec<StationFix>, now: DateTime<Utc>, age_out: Duration) {
    fixes.retain(|fix| !fix.is_aged_out(now, age_out));
}

/// Whole minutes from `since` to `now`, truncated toward zero.
fn minutes_between(since: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    (now - since).num_seconds() / 60
}

/// Render the feed for `now`: QSO party stations heard within `age_out`,
/// most recently heard first.
pub fn write_feed(fixes: &[StationFix], now: DateTime<Utc>, age_out: Duration) -> String {
    let mut listed: Vec<&StationFix> = fixes
        .iter()
        .filter(|fix| fix.qso_party && !fix.is_aged_out(now, age_out))
        .collect();
    listed.sort_by(|a, b| b.last_heard.cmp(&a.last_heard));

    let mut out = format!("{},GMT,SPOT\n{COLUMN_LINE}\n", now.format("%m-%d-%Y,%H%M"));
    for fix in listed {
        out.push_str(&format!(
            "{},{},{},{}\n",
            fix.call,
            fix.county,
            minutes_between(fix.entered_county, now),
            minutes_between(fix.last_heard, now),
        ));
    }
    out.push_str(TRAILER);
    out
}
