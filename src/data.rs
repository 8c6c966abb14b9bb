// src/data.rs
//! Output records and the small amount of interpretation callers layer on top of them.
//!
//! `ArrivalRecord` is what the extractor produces and what goes over the wire.
//! It is never persisted; one request builds a `Vec` of them and drops it after responding.

use serde::{Deserialize, Serialize};

/// One trip row from a stop's arrival board.
///
/// Wire shape: `{ "route", "destination", "time", "isLive" }`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArrivalRecord {
    pub route: String,
    pub destination: String,
    /// Rendered as-is: "Now", "5 min", "12 mins" or a clock time.
    pub time: String,
    pub is_live: bool,
}

impl ArrivalRecord {
    pub fn time_label(&self) -> TimeLabel {
        TimeLabel::parse(&self.time)
    }
}

/// Reading of the free-text `time` column.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TimeLabel {
    Now,
    Minutes(u32),
    /// Something like "10:42" or "10:42pm".
    Clock(String),
    Other(String),
}

impl TimeLabel {
    pub fn parse(raw: &str) -> Self {
        let t = raw.trim();

        if t.eq_ignore_ascii_case("now") {
            return TimeLabel::Now;
        }

        let minutes = t
            .strip_suffix("mins")
            .or_else(|| t.strip_suffix("min"))
            .map(str::trim_end);
        if let Some(n) = minutes.and_then(|m| m.parse::<u32>().ok()) {
            return TimeLabel::Minutes(n);
        }

        if looks_like_clock(t) {
            return TimeLabel::Clock(t.to_string());
        }

        TimeLabel::Other(t.to_string())
    }

    /// The entries the stop card shows: "Now" or anything ending in "min"/"mins",
    /// including labels like "<1 min" that carry no plain number.
    pub fn is_countdown(&self) -> bool {
        match self {
            TimeLabel::Now | TimeLabel::Minutes(_) => true,
            TimeLabel::Other(t) => t.ends_with("min") || t.ends_with("mins"),
            TimeLabel::Clock(_) => false,
        }
    }
}

fn looks_like_clock(t: &str) -> bool {
    let Some((h, rest)) = t.split_once(':') else {
        return false;
    };
    let m: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
    let suffix = rest[m.len()..].trim().to_ascii_lowercase();

    !h.is_empty()
        && h.len() <= 2
        && h.chars().all(|c| c.is_ascii_digit())
        && m.len() == 2
        && matches!(suffix.as_str(), "" | "am" | "pm")
}

/// Post-extraction narrowing. Both switches off means "everything the board showed".
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ArrivalFilter {
    pub live_only: bool,
    pub countdown_only: bool,
}

impl ArrivalFilter {
    pub const LIVE: ArrivalFilter = ArrivalFilter { live_only: true, countdown_only: false };

    pub fn keeps(&self, record: &ArrivalRecord) -> bool {
        (!self.live_only || record.is_live)
            && (!self.countdown_only || record.time_label().is_countdown())
    }

    /// Order-preserving.
    pub fn apply(&self, records: Vec<ArrivalRecord>) -> Vec<ArrivalRecord> {
        records.into_iter().filter(|r| self.keeps(r)).collect()
    }
}

/// Response body of `/api/schedule/{stop}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StopBoard {
    pub stop_number: String,
    pub trips: Vec<ArrivalRecord>,
}
