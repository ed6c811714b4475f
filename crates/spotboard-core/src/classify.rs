//! Age-based classification of spot rows.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ClassifyError;
use crate::parse::parse_feed;
use crate::types::{FeedHeader, SpotRow, SpotTable};

pub const FRESH_MAX_MINUTES: i64 = 60;
pub const MODERATE_MAX_MINUTES: i64 = 120;
pub const STALE_MAX_MINUTES: i64 = 180;

/// A spot whose station entered its county at most this long ago is emphasized.
pub const NEW_SPOT_MAX_MINUTES: i64 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgeBand {
    Fresh,
    Moderate,
    Stale,
    VeryStale,
}

impl AgeBand {
    pub const ALL: [Self; 4] = [Self::Fresh, Self::Moderate, Self::Stale, Self::VeryStale];

    /// Band for an age in minutes. An unreadable age is `VeryStale`: nothing
    /// vouches for the spot being recent.
    pub fn from_age(age_minutes: Option<i64>) -> Self {
        match age_minutes {
            Some(age) if age <= FRESH_MAX_MINUTES => Self::Fresh,
            Some(age) if age <= MODERATE_MAX_MINUTES => Self::Moderate,
            Some(age) if age <= STALE_MAX_MINUTES => Self::Stale,
            _ => Self::VeryStale,
        }
    }

    /// Row background colour.
    pub fn background(self) -> &'static str {
        match self {
            Self::Fresh => "lightgreen",
            Self::Moderate => "yellow",
            Self::Stale => "pink",
            Self::VeryStale => "red",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Fresh => "fresh",
            Self::Moderate => "moderate",
            Self::Stale => "stale",
            Self::VeryStale => "very_stale",
        }
    }
}

impl fmt::Display for AgeBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether the "new" minutes mark a station that just changed county.
/// An unreadable value never does.
pub fn is_new_spot(new_minutes: Option<i64>) -> bool {
    new_minutes.is_some_and(|m| m <= NEW_SPOT_MAX_MINUTES)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifiedRow {
    #[serde(flatten)]
    pub spot: SpotRow,
    pub band: AgeBand,
    pub emphasized: bool,
}

impl ClassifiedRow {
    pub fn new(spot: SpotRow) -> Self {
        let band = AgeBand::from_age(spot.age_minutes_value());
        let emphasized = is_new_spot(spot.new_minutes_value());
        Self {
            spot,
            band,
            emphasized,
        }
    }
}

/// Result of one tick's classification, ready to render.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ClassifiedTable {
    pub header: FeedHeader,
    pub rows: Vec<ClassifiedRow>,
}

impl ClassifiedTable {
    /// Rendered row count: two header rows plus one per spot.
    pub fn line_count(&self) -> usize {
        self.rows.len() + 2
    }

    /// Number of spots in each band, in [`AgeBand::ALL`] order.
    pub fn band_counts(&self) -> [(AgeBand, usize); 4] {
        AgeBand::ALL.map(|band| (band, self.rows.iter().filter(|r| r.band == band).count()))
    }
}

pub fn classify_table(table: SpotTable) -> ClassifiedTable {
    ClassifiedTable {
        header: table.header,
        rows: table.rows.into_iter().map(ClassifiedRow::new).collect(),
    }
}

/// Parse and classify feed text in one step.
pub fn classify(text: &str) -> Result<ClassifiedTable, ClassifyError> {
    Ok(classify_table(parse_feed(text)?))
}
