//! TM trend extraction for charting.
//!
//! Two sources are supported that must agree for engine output:
//! - the structured `adjustment` carried on each `WeeklyLog`
//! - the `action` text, parsed with a fixed pattern

use crate::{TmAdjustment, WeeklyLog};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

static ADJUSTMENT_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"TM adjusted from (\d+(?:\.\d+)?) to (\d+(?:\.\d+)?)kg \(([+-]\d+(?:\.\d+)?)%\)")
        .expect("adjustment pattern is valid")
});

/// A TM change located on the week it took effect
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct TmTrendPoint {
    pub week: u32,
    pub adjustment: TmAdjustment,
}

/// Parse `TM adjusted from P to Nkg (+/-D%)` anywhere in an action string
pub fn parse_action(action: &str) -> Option<TmAdjustment> {
    let caps = ADJUSTMENT_PATTERN.captures(action)?;
    let previous_tm = caps[1].parse().ok()?;
    let new_tm = caps[2].parse().ok()?;
    let percent_change = caps[3].parse().ok()?;

    Some(TmAdjustment {
        previous_tm,
        new_tm,
        percent_change,
    })
}

/// TM changes from the structured fields
pub fn tm_trend(logs: &[WeeklyLog]) -> Vec<TmTrendPoint> {
    logs.iter()
        .filter_map(|log| {
            log.adjustment.map(|adjustment| TmTrendPoint {
                week: log.week,
                adjustment,
            })
        })
        .collect()
}

/// TM changes recovered from the action strings
pub fn tm_trend_from_actions(logs: &[WeeklyLog]) -> Vec<TmTrendPoint> {
    logs.iter()
        .filter_map(|log| {
            parse_action(&log.action).map(|adjustment| TmTrendPoint {
                week: log.week,
                adjustment,
            })
        })
        .collect()
}
