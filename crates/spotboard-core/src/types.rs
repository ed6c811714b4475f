use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::parse::parse_minutes;

/// Every feed line, header or spot, carries exactly this many fields.
pub const FEED_COLUMNS: usize = 4;

/// Column holding minutes since the station entered its current county.
pub const NEW_COLUMN: usize = 2;

/// Column holding minutes since the station was last heard.
pub const AGE_COLUMN: usize = 3;

// ─── Spot rows ────────────────────────────────────────────────────

/// One spot line of the feed, e.g. `W4XYZ-9,FAU,12,45`.
///
/// Fields are kept verbatim so a rendered table reproduces the feed text
/// exactly; numeric views go through [`parse_minutes`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SpotRow {
    pub call: String,
    /// County or independent city abbreviation (the feed's `C&IC` column).
    pub county: String,
    pub new_minutes: String,
    pub age_minutes: String,
}

impl SpotRow {
    pub fn from_fields([call, county, new_minutes, age_minutes]: [String; FEED_COLUMNS]) -> Self {
        Self {
            call,
            county,
            new_minutes,
            age_minutes,
        }
    }

    /// Fields in feed column order.
    pub fn fields(&self) -> [&str; FEED_COLUMNS] {
        [
            &self.call,
            &self.county,
            &self.new_minutes,
            &self.age_minutes,
        ]
    }

    pub fn new_minutes_value(&self) -> Option<i64> {
        parse_minutes(&self.new_minutes)
    }

    pub fn age_minutes_value(&self) -> Option<i64> {
        parse_minutes(&self.age_minutes)
    }
}

// ─── Header ───────────────────────────────────────────────────────

/// The two header lines every feed starts with.
///
/// ```text
/// 10-19-2026,1430,GMT,SPOT     <- stamp
/// QP CALL,C&IC,AGE,AGE         <- columns
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FeedHeader {
    pub stamp: [String; FEED_COLUMNS],
    pub columns: [String; FEED_COLUMNS],
}

impl FeedHeader {
    /// Header lines in feed order.
    pub fn lines(&self) -> [&[String; FEED_COLUMNS]; 2] {
        [&self.stamp, &self.columns]
    }

    /// When the feed was written, from the `MM-DD-YYYY,HHMM` stamp fields.
    /// `None` when the stamp does not have that shape.
    pub fn generated_at(&self) -> Option<NaiveDateTime> {
        let text = format!("{} {}", self.stamp[0].trim(), self.stamp[1].trim());
        NaiveDateTime::parse_from_str(&text, "%m-%d-%Y %H%M").ok()
    }
}

/// A parsed feed: header plus spot rows in source line order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SpotTable {
    pub header: FeedHeader,
    pub rows: Vec<SpotRow>,
}
